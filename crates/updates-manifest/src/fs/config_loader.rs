//! `app.json` project configuration.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ManifestError;
use crate::project::{ProjectConfig, ProjectConfigLoader};

/// Reads `<root>/app.json` and, when present, `<root>/package.json`.
///
/// The `expo` object of `app.json` is the app config; a file without one
/// is used whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJsonConfigLoader;

#[async_trait]
impl ProjectConfigLoader for AppJsonConfigLoader {
    async fn load(&self, project_root: &Path) -> Result<ProjectConfig, ManifestError> {
        let app_json_path = project_root.join("app.json");
        let content = std::fs::read_to_string(&app_json_path).map_err(|e| {
            ManifestError::ProjectConfig(format!(
                "failed to read {}: {}",
                app_json_path.display(),
                e
            ))
        })?;
        let app_json: Value = serde_json::from_str(&content).map_err(|e| {
            ManifestError::ProjectConfig(format!(
                "failed to parse {}: {}",
                app_json_path.display(),
                e
            ))
        })?;

        let exp = match app_json {
            Value::Object(mut root) => match root.remove("expo") {
                Some(Value::Object(expo)) => expo,
                Some(_) => {
                    return Err(ManifestError::ProjectConfig(
                        "\"expo\" in app.json must be an object".to_string(),
                    ))
                }
                None => root,
            },
            _ => {
                return Err(ManifestError::ProjectConfig(
                    "app.json must contain a JSON object".to_string(),
                ))
            }
        };

        let mut config = ProjectConfig::new(exp);
        let package_json_path = project_root.join("package.json");
        if package_json_path.is_file() {
            let content = std::fs::read_to_string(&package_json_path)?;
            config = config.with_package_json(serde_json::from_str(&content)?);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_expo_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("app.json"),
            r#"{"expo": {"name": "demo", "sdkVersion": "45.0.0"}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"main": "src/index.js"}"#).unwrap();

        let config = AppJsonConfigLoader.load(dir.path()).await.unwrap();

        assert_eq!(config.exp["name"], "demo");
        assert_eq!(config.sdk_version(), Some("45.0.0"));
        assert_eq!(config.package_main(), Some("src/index.js"));
    }

    #[tokio::test]
    async fn test_load_flat_app_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.json"), r#"{"name": "flat"}"#).unwrap();

        let config = AppJsonConfigLoader.load(dir.path()).await.unwrap();

        assert_eq!(config.exp["name"], "flat");
        assert!(config.package_json.is_none());
    }

    #[tokio::test]
    async fn test_missing_app_json() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppJsonConfigLoader.load(dir.path()).await;
        assert!(matches!(result, Err(ManifestError::ProjectConfig(_))));
    }

    #[tokio::test]
    async fn test_invalid_app_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.json"), "[1, 2").unwrap();

        let result = AppJsonConfigLoader.load(dir.path()).await;
        assert!(matches!(result, Err(ManifestError::ProjectConfig(_))));
    }

    #[tokio::test]
    async fn test_non_object_expo_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.json"), r#"{"expo": "nope"}"#).unwrap();

        let result = AppJsonConfigLoader.load(dir.path()).await;
        assert!(matches!(result, Err(ManifestError::ProjectConfig(_))));
    }
}
