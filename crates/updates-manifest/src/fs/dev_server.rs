//! Classic manifests pointing at a local development server.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Value};
use updates_core::EndpointConfig;

use crate::classic::{ClassicManifest, ClassicManifestProvider};
use crate::error::ManifestError;
use crate::manifest::entry_module_name;
use crate::project::{EntryPointResolver, ProjectConfigLoader};

/// Characters escaped in a module path segment; `/` separates segments.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds the classic manifest from the app config plus dev server fields.
///
/// The bundle is served by the host the client connected to, or the
/// configured default host when the request carried none.
#[derive(Clone)]
pub struct DevServerManifestProvider {
    config_loader: Arc<dyn ProjectConfigLoader>,
    entry_points: Arc<dyn EntryPointResolver>,
    default_host: String,
    developer_tool: String,
}

impl DevServerManifestProvider {
    pub fn new(
        config_loader: Arc<dyn ProjectConfigLoader>,
        entry_points: Arc<dyn EntryPointResolver>,
        config: &EndpointConfig,
    ) -> Self {
        Self {
            config_loader,
            entry_points,
            default_host: config.default_host.clone(),
            developer_tool: config.developer_tool.clone(),
        }
    }

    /// Bundle URL for an entry module served by `host`.
    pub fn bundle_url(host: &str, module_name: &str, platform: &str) -> String {
        let module_path = module_name
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "http://{}/{}.bundle?platform={}&dev=true&hot=false",
            host,
            module_path,
            utf8_percent_encode(platform, NON_ALPHANUMERIC)
        )
    }
}

#[async_trait]
impl ClassicManifestProvider for DevServerManifestProvider {
    async fn classic_manifest(
        &self,
        project_root: &Path,
        platform: &str,
        host: Option<&str>,
    ) -> Result<ClassicManifest, ManifestError> {
        let config = self.config_loader.load(project_root).await?;
        let entry_point = self.entry_points.resolve(project_root, platform, &config)?;
        let module_name = entry_module_name(&entry_point);
        let host = host
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(&self.default_host);

        let mut fields = config.exp;
        fields.insert(
            "bundleUrl".to_string(),
            Value::String(Self::bundle_url(host, &module_name, platform)),
        );
        fields.insert("hostUri".to_string(), Value::String(host.to_string()));
        fields.insert("mainModuleName".to_string(), Value::String(module_name));
        fields.insert("packagerOpts".to_string(), json!({ "dev": true }));
        fields.insert(
            "developer".to_string(),
            json!({ "tool": self.developer_tool }),
        );

        Ok(ClassicManifest::new(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{AppJsonConfigLoader, FsEntryPointResolver};

    fn provider() -> DevServerManifestProvider {
        DevServerManifestProvider::new(
            Arc::new(AppJsonConfigLoader),
            Arc::new(FsEntryPointResolver),
            &EndpointConfig::default(),
        )
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("app.json"),
            r#"{"expo": {"name": "demo", "sdkVersion": "45.0.0"}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("index.js"), "// entry").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_manifest_uses_request_host() {
        let dir = project();

        let manifest = provider()
            .classic_manifest(dir.path(), "ios", Some("192.168.1.5:19000"))
            .await
            .unwrap();

        assert_eq!(
            manifest.bundle_url(),
            Some("http://192.168.1.5:19000/index.bundle?platform=ios&dev=true&hot=false")
        );
        assert_eq!(manifest.fields()["hostUri"], "192.168.1.5:19000");
        assert_eq!(manifest.fields()["mainModuleName"], "index");
        assert_eq!(manifest.fields()["name"], "demo");
        assert_eq!(manifest.sdk_version(), Some("45.0.0"));
    }

    #[tokio::test]
    async fn test_manifest_default_host() {
        let dir = project();

        let manifest = provider()
            .classic_manifest(dir.path(), "android", None)
            .await
            .unwrap();

        assert_eq!(
            manifest.bundle_url(),
            Some("http://localhost:8081/index.bundle?platform=android&dev=true&hot=false")
        );
        assert_eq!(manifest.fields()["developer"]["tool"], "expo-cli");
        assert_eq!(manifest.fields()["packagerOpts"]["dev"], true);
    }

    #[tokio::test]
    async fn test_manifest_missing_project() {
        let dir = tempfile::tempdir().unwrap();
        let result = provider().classic_manifest(dir.path(), "ios", None).await;
        assert!(matches!(result, Err(ManifestError::ProjectConfig(_))));
    }

    #[test]
    fn test_bundle_url_encodes_platform() {
        assert_eq!(
            DevServerManifestProvider::bundle_url("localhost:8081", "index", "ios&dev=false"),
            "http://localhost:8081/index.bundle?platform=ios%26dev%3Dfalse&dev=true&hot=false"
        );
    }

    #[test]
    fn test_bundle_url_encodes_module_segments() {
        assert_eq!(
            DevServerManifestProvider::bundle_url("h:8081", "src/my app/main-v1.2", "web"),
            "http://h:8081/src/my%20app/main-v1.2.bundle?platform=web&dev=true&hot=false"
        );
    }
}
