//! Error types for manifest assembly.

use thiserror::Error;

/// Errors that can occur while serving an update manifest.
///
/// Every variant is surfaced identically to the client through the error
/// envelope; the variants only exist so logs and tests can tell them apart.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Neither the `platform` query parameter nor the `expo-platform` header was sent.
    #[error("Must specify \"expo-platform\" header or \"platform\" query parameter")]
    MissingPlatform,

    /// The request has no URL.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Project configuration could not be loaded.
    #[error("Project configuration error: {0}")]
    ProjectConfig(String),

    /// Entry point could not be resolved.
    #[error("Entry point error: {0}")]
    EntryPoint(String),

    /// Classic manifest could not be produced.
    #[error("Classic manifest error: {0}")]
    ClassicManifest(String),

    /// Classic manifest has no bundle URL.
    #[error("Classic manifest is missing \"bundleUrl\"")]
    MissingBundleUrl,

    /// Bundle URL is not an absolute HTTP(S) URL with a path.
    #[error("Invalid bundle URL: {0}")]
    InvalidBundleUrl(String),

    /// Asset collection failed.
    #[error("Asset collection error: {0}")]
    Assets(String),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure raised by a collaborator implementation.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
