//! Asset URL rewriting.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ManifestError;
use crate::project::ProjectConfig;

/// Path segment under which assets are served.
pub const ASSETS_SEGMENT: &str = "assets/";

/// A fetchable asset listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    /// Content hash, when the collector computes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Stable key identifying the asset.
    pub key: String,
    /// MIME type.
    pub content_type: String,
    /// Extension including the leading dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    /// Absolute URL.
    pub url: String,
}

/// Builds absolute asset URLs anchored at the bundle's origin.
///
/// `http://host:8081/index.bundle?platform=ios` gives the base
/// `http://host:8081/assets/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrlResolver {
    base: String,
}

impl AssetUrlResolver {
    /// Derive the asset base from a bundle URL.
    ///
    /// The URL must start with `http://` or `https://` followed by the host
    /// and a `/`; anything else is an [`ManifestError::InvalidBundleUrl`].
    pub fn from_bundle_url(bundle_url: &str) -> Result<Self, ManifestError> {
        let origin = bundle_origin(bundle_url)
            .ok_or_else(|| ManifestError::InvalidBundleUrl(bundle_url.to_string()))?;
        Ok(Self {
            base: format!("{}{}", origin, ASSETS_SEGMENT),
        })
    }

    /// Base URL, ending in `assets/`.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Absolute URL for an asset path relative to the project root.
    pub fn url_for(&self, relative_path: &str) -> String {
        let normalized = relative_path.replace('\\', "/");
        format!("{}{}", self.base, normalized.trim_start_matches('/'))
    }
}

/// Leading `scheme://host/` of an HTTP(S) URL.
fn bundle_origin(url: &str) -> Option<&str> {
    let scheme_len = if url.starts_with("http://") {
        "http://".len()
    } else if url.starts_with("https://") {
        "https://".len()
    } else {
        return None;
    };

    let rest = &url[scheme_len..];
    let slash = rest.find('/')?;
    if rest[..slash].contains(['\n', '\r']) {
        return None;
    }
    Some(&url[..scheme_len + slash + 1])
}

/// Collects the static assets referenced by a project.
#[async_trait]
pub trait AssetCollector: Send + Sync {
    /// Every asset of the project, with URLs built by `urls`.
    async fn collect(
        &self,
        project_root: &Path,
        config: &ProjectConfig,
        urls: &AssetUrlResolver,
    ) -> Result<Vec<AssetDescriptor>, ManifestError>;
}

/// Rewrite a project's assets into fetchable descriptors for `bundle_url`.
pub async fn resolve_assets(
    collector: &dyn AssetCollector,
    project_root: &Path,
    config: &ProjectConfig,
    bundle_url: &str,
) -> Result<Vec<AssetDescriptor>, ManifestError> {
    let urls = AssetUrlResolver::from_bundle_url(bundle_url)?;
    collector.collect(project_root, config, &urls).await
}
