//! Manifest document assembly.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use updates_core::{
    format_timestamp, header_names, Clock, IdGenerator, IncomingRequest, ResponseHeaders,
    SystemClock, UuidGenerator,
};

use crate::assets::{resolve_assets, AssetCollector, AssetDescriptor};
use crate::classic::{ClassicManifest, ClassicManifestProvider};
use crate::error::ManifestError;
use crate::platform::resolve_platform;
use crate::project::{EntryPointResolver, ProjectConfigLoader};
use crate::runtime::{resolve_runtime_version, RuntimeVersionMapper};

/// MIME type of the launch asset.
pub const JAVASCRIPT_CONTENT_TYPE: &str = "application/javascript";

/// Update protocol version advertised in `expo-protocol-version`.
pub const PROTOCOL_VERSION: &str = "0";

/// Structured field values version advertised in `expo-sfv-version`.
pub const SFV_VERSION: &str = "0";

/// `cache-control` of every manifest response.
pub const MANIFEST_CACHE_CONTROL: &str = "private, max-age=0";

const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// The entry bundle reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAsset {
    /// Entry module name without its script extension.
    pub key: String,
    /// Always [`JAVASCRIPT_CONTENT_TYPE`].
    pub content_type: String,
    /// Bundle URL.
    pub url: String,
}

/// Backwards-compatibility payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestExtra {
    /// The full classic manifest.
    pub expo_go_config: ClassicManifest,
}

/// Update manifest served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
    /// Fresh identifier, unique per response.
    pub id: String,
    /// Construction time, RFC 3339 UTC with milliseconds.
    pub created_at: String,
    /// Runtime compatibility identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,
    /// Entry bundle.
    pub launch_asset: LaunchAsset,
    /// Static assets, in collector order.
    pub assets: Vec<AssetDescriptor>,
    /// Always an empty object; clients use its presence to recognize the format.
    pub metadata: Map<String, Value>,
    /// Backwards-compatibility payload.
    pub extra: ManifestExtra,
}

/// A built manifest together with the headers it is served with.
#[derive(Debug, Clone)]
pub struct ManifestResponse {
    pub body: ManifestDocument,
    pub headers: ResponseHeaders,
}

/// Fixed headers of a successful manifest response, in write order.
pub fn manifest_headers() -> ResponseHeaders {
    ResponseHeaders::new()
        .with(header_names::EXPO_PROTOCOL_VERSION, PROTOCOL_VERSION)
        .with(header_names::EXPO_SFV_VERSION, SFV_VERSION)
        .with(header_names::CACHE_CONTROL, MANIFEST_CACHE_CONTROL)
        .with(header_names::CONTENT_TYPE, "application/json")
}

/// Module name of an entry point: `/`-separated, one script extension removed.
pub fn entry_module_name(entry_point: &Path) -> String {
    let normalized = entry_point.to_string_lossy().replace('\\', "/");
    strip_script_extension(&normalized).to_string()
}

/// Remove one trailing script extension (`.js`, `.tsx`, ...).
pub fn strip_script_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && !stem.ends_with('/') && SCRIPT_EXTENSIONS.contains(&ext) =>
        {
            stem
        }
        _ => name,
    }
}

/// Assembles manifest documents from the project collaborators.
#[derive(Clone)]
pub struct ManifestBuilder {
    config_loader: Arc<dyn ProjectConfigLoader>,
    entry_points: Arc<dyn EntryPointResolver>,
    classic: Arc<dyn ClassicManifestProvider>,
    runtime_mapper: Arc<dyn RuntimeVersionMapper>,
    assets: Arc<dyn AssetCollector>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl ManifestBuilder {
    /// Create a builder using the wall clock and random UUIDs.
    pub fn new(
        config_loader: Arc<dyn ProjectConfigLoader>,
        entry_points: Arc<dyn EntryPointResolver>,
        classic: Arc<dyn ClassicManifestProvider>,
        runtime_mapper: Arc<dyn RuntimeVersionMapper>,
        assets: Arc<dyn AssetCollector>,
    ) -> Self {
        Self {
            config_loader,
            entry_points,
            classic,
            runtime_mapper,
            assets,
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidGenerator),
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the id generator.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Build the manifest and headers for a request.
    ///
    /// Collaborator failures are returned unchanged.
    pub async fn build(
        &self,
        project_root: &Path,
        request: &IncomingRequest,
    ) -> Result<ManifestResponse, ManifestError> {
        if request.url.is_none() {
            return Err(ManifestError::MalformedRequest(
                "request has no URL".to_string(),
            ));
        }

        let platform = resolve_platform(request)?;
        let config = self.config_loader.load(project_root).await?;
        let entry_point = self.entry_points.resolve(project_root, &platform, &config)?;
        let host = request.header(header_names::HOST);
        let classic = self
            .classic
            .classic_manifest(project_root, &platform, host)
            .await?;
        let runtime_version = resolve_runtime_version(&classic, self.runtime_mapper.as_ref());
        let bundle_url = classic
            .bundle_url()
            .ok_or(ManifestError::MissingBundleUrl)?
            .to_string();
        let assets =
            resolve_assets(self.assets.as_ref(), project_root, &config, &bundle_url).await?;

        let body = ManifestDocument {
            id: self.ids.generate(),
            created_at: format_timestamp(self.clock.now()),
            runtime_version,
            launch_asset: LaunchAsset {
                key: entry_module_name(&entry_point),
                content_type: JAVASCRIPT_CONTENT_TYPE.to_string(),
                url: bundle_url,
            },
            assets,
            metadata: Map::new(),
            extra: ManifestExtra {
                expo_go_config: classic,
            },
        };

        Ok(ManifestResponse {
            body,
            headers: manifest_headers(),
        })
    }
}
