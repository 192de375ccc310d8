//! Classic manifest view and provider.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ManifestError;

/// Classic manifest produced by an external provider.
///
/// Only `bundleUrl`, `runtimeVersion` and `sdkVersion` are read here; the
/// whole object is embedded untouched under `extra.expoGoConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassicManifest(Map<String, Value>);

impl ClassicManifest {
    /// Wrap a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(ManifestError::ClassicManifest(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// Absolute URL of the JavaScript bundle.
    pub fn bundle_url(&self) -> Option<&str> {
        self.string_field("bundleUrl")
    }

    /// Explicit runtime version. Non-string values (runtime version
    /// policies) are not explicit versions and read as absent.
    pub fn runtime_version(&self) -> Option<&str> {
        self.string_field("runtimeVersion")
    }

    /// SDK version.
    pub fn sdk_version(&self) -> Option<&str> {
        self.string_field("sdkVersion")
    }

    /// All fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Produces the classic manifest for a project.
#[async_trait]
pub trait ClassicManifestProvider: Send + Sync {
    /// Compute the classic manifest served to `host` for `platform`.
    async fn classic_manifest(
        &self,
        project_root: &Path,
        platform: &str,
        host: Option<&str>,
    ) -> Result<ClassicManifest, ManifestError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_narrow_accessors() {
        let manifest = ClassicManifest::from_value(json!({
            "bundleUrl": "http://localhost:8081/index.bundle?platform=ios",
            "runtimeVersion": "1.0.0",
            "sdkVersion": "45.0.0",
            "name": "my-app"
        }))
        .unwrap();

        assert_eq!(
            manifest.bundle_url(),
            Some("http://localhost:8081/index.bundle?platform=ios")
        );
        assert_eq!(manifest.runtime_version(), Some("1.0.0"));
        assert_eq!(manifest.sdk_version(), Some("45.0.0"));
        assert_eq!(manifest.fields()["name"], "my-app");
    }

    #[test]
    fn test_runtime_version_policy_reads_absent() {
        let manifest =
            ClassicManifest::from_value(json!({"runtimeVersion": {"policy": "sdkVersion"}}))
                .unwrap();
        assert_eq!(manifest.runtime_version(), None);
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(matches!(
            ClassicManifest::from_value(json!([1, 2])),
            Err(ManifestError::ClassicManifest(_))
        ));
    }

    #[test]
    fn test_serializes_transparently() {
        let manifest =
            ClassicManifest::from_value(json!({"slug": "app", "extra": {"a": 1}})).unwrap();
        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            json!({"slug": "app", "extra": {"a": 1}})
        );
    }
}
