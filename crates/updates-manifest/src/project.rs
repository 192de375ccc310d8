//! Project configuration and entry point collaborators.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ManifestError;

/// Asset patterns used when the project config declares none.
pub const DEFAULT_ASSET_PATTERNS: &[&str] = &["assets/**/*"];

/// Loaded project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// App config object (`expo` key of `app.json`).
    pub exp: Map<String, Value>,
    /// Parsed `package.json`, if the project has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_json: Option<Value>,
}

impl ProjectConfig {
    /// Create a config from an app config object.
    pub fn new(exp: Map<String, Value>) -> Self {
        Self {
            exp,
            package_json: None,
        }
    }

    /// Attach a parsed `package.json`.
    pub fn with_package_json(mut self, package_json: Value) -> Self {
        self.package_json = Some(package_json);
        self
    }

    /// Declared SDK version.
    pub fn sdk_version(&self) -> Option<&str> {
        self.exp.get("sdkVersion").and_then(Value::as_str)
    }

    /// `main` field of `package.json`.
    pub fn package_main(&self) -> Option<&str> {
        self.package_json
            .as_ref()
            .and_then(|pkg| pkg.get("main"))
            .and_then(Value::as_str)
    }

    /// Asset bundle patterns, falling back to [`DEFAULT_ASSET_PATTERNS`].
    pub fn asset_bundle_patterns(&self) -> Vec<String> {
        let declared: Vec<String> = self
            .exp
            .get("assetBundlePatterns")
            .and_then(Value::as_array)
            .map(|patterns| {
                patterns
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if declared.is_empty() {
            DEFAULT_ASSET_PATTERNS.iter().map(|p| p.to_string()).collect()
        } else {
            declared
        }
    }
}

/// Loads the configuration of a project.
#[async_trait]
pub trait ProjectConfigLoader: Send + Sync {
    /// Load the configuration for `project_root`.
    async fn load(&self, project_root: &Path) -> Result<ProjectConfig, ManifestError>;
}

/// Resolves the JavaScript entry point of a project.
pub trait EntryPointResolver: Send + Sync {
    /// Entry point path relative to `project_root`.
    fn resolve(
        &self,
        project_root: &Path,
        platform: &str,
        config: &ProjectConfig,
    ) -> Result<PathBuf, ManifestError>;
}
