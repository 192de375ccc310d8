//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use updates_core::EndpointConfig;

/// Config file names searched in the working directory and its ancestors.
pub const CONFIG_FILE_NAMES: &[&str] = &["updates.toml", ".updates.toml", "updates.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Project served by the endpoint.
    #[serde(default)]
    pub project: ProjectSection,

    /// Endpoint configuration.
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Problems with this configuration, as `(errors, warnings)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let endpoint = &self.endpoint;

        if !endpoint.route.starts_with('/') {
            errors.push("endpoint.route must start with '/'".to_string());
        }
        if endpoint.route.contains('?') {
            errors.push("endpoint.route must not contain a query".to_string());
        }
        if !(100..=999).contains(&endpoint.error_status) {
            errors.push(format!(
                "endpoint.error_status {} is not a valid HTTP status",
                endpoint.error_status
            ));
        } else if endpoint.error_status < 500 {
            warnings.push(format!(
                "endpoint.error_status {} is not a server error status",
                endpoint.error_status
            ));
        }
        if endpoint.default_host.trim().is_empty() {
            errors.push("endpoint.default_host must not be empty".to_string());
        } else if endpoint.default_host.contains("://") || endpoint.default_host.contains('/') {
            errors.push("endpoint.default_host must be a host[:port], not a URL".to_string());
        }
        if endpoint.developer_tool.trim().is_empty() {
            warnings.push("endpoint.developer_tool is empty".to_string());
        }
        if let Some(root) = &self.project.root {
            if root.trim().is_empty() {
                errors.push("project.root must not be empty".to_string());
            }
        }

        (errors, warnings)
    }
}

/// `[project]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Project directory, relative to the config file when not absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default updates.toml config file.
pub fn generate_default_config() -> String {
    let endpoint = EndpointConfig::default();
    format!(
        r#"# Update manifest endpoint configuration

[project]
# Project directory containing app.json, relative to this file
root = "."

[endpoint]
route = "{route}"
developer_tool = "{developer_tool}"
# Host used in bundle URLs when a request has no Host header
default_host = "{default_host}"
error_status = {error_status}
error_content_type = {error_content_type}
"#,
        route = endpoint.route,
        developer_tool = endpoint.developer_tool,
        default_host = endpoint.default_host,
        error_status = endpoint.error_status,
        error_content_type = endpoint.error_content_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config.project.root.as_deref(), Some("."));
        assert_eq!(config.endpoint.route, "/update-manifest-experimental");
        assert_eq!(config.endpoint.error_status, 520);
        assert_eq!(config.validate(), (Vec::new(), Vec::new()));
    }

    #[test]
    fn test_partial_endpoint_table() {
        let config: CliConfig = toml::from_str(
            r#"
            [endpoint]
            default_host = "10.0.0.2:19000"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint.default_host, "10.0.0.2:19000");
        assert_eq!(config.endpoint.developer_tool, "expo-cli");
        assert!(config.project.root.is_none());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updates.json");
        std::fs::write(&path, r#"{"project": {"root": "app"}}"#).unwrap();

        let config = CliConfig::load(&path).unwrap();

        assert_eq!(config.project.root.as_deref(), Some("app"));
    }

    #[test]
    fn test_validate_reports_errors() {
        let mut config = CliConfig::default();
        config.endpoint.route = "manifest".to_string();
        config.endpoint.default_host = "http://localhost:8081".to_string();
        config.endpoint.error_status = 404;

        let (errors, warnings) = config.validate();

        assert_eq!(errors.len(), 2);
        assert_eq!(warnings.len(), 1);
    }
}
