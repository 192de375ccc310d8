//! In-memory collaborators for endpoint tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use updates_core::{EndpointConfig, HttpResponse, IncomingRequest};
use updates_manifest::{
    AssetCollector, AssetDescriptor, AssetUrlResolver, ClassicManifest, ClassicManifestProvider,
    EntryPointResolver, ManifestBuilder, ManifestError, ManifestMiddleware, ProjectConfig,
    ProjectConfigLoader, RuntimeVersionMapper,
};
use updates_observability::{RecordingAnalytics, RecordingErrorLogger};

pub const PROJECT_ROOT: &str = "/projects/demo";
pub const ROUTE: &str = "/update-manifest-experimental";

pub struct StubConfigLoader {
    pub failure: Option<String>,
}

#[async_trait]
impl ProjectConfigLoader for StubConfigLoader {
    async fn load(&self, _project_root: &Path) -> Result<ProjectConfig, ManifestError> {
        match &self.failure {
            Some(message) => Err(ManifestError::ProjectConfig(message.clone())),
            None => Ok(ProjectConfig::default()),
        }
    }
}

pub struct StubEntryPoint(pub PathBuf);

impl EntryPointResolver for StubEntryPoint {
    fn resolve(
        &self,
        _project_root: &Path,
        _platform: &str,
        _config: &ProjectConfig,
    ) -> Result<PathBuf, ManifestError> {
        Ok(self.0.clone())
    }
}

/// Returns a fixed classic manifest, recording the platform it was asked for.
pub struct StubClassic {
    pub manifest: Value,
}

#[async_trait]
impl ClassicManifestProvider for StubClassic {
    async fn classic_manifest(
        &self,
        _project_root: &Path,
        platform: &str,
        _host: Option<&str>,
    ) -> Result<ClassicManifest, ManifestError> {
        let mut manifest = ClassicManifest::from_value(self.manifest.clone())?;
        if manifest.fields().get("platform").is_none() {
            let mut fields = manifest.fields().clone();
            fields.insert("platform".to_string(), Value::String(platform.to_string()));
            manifest = ClassicManifest::new(fields);
        }
        Ok(manifest)
    }
}

pub struct PrefixMapper;

impl RuntimeVersionMapper for PrefixMapper {
    fn runtime_version_for_sdk(&self, sdk_version: &str) -> String {
        format!("mapped-{}", sdk_version)
    }
}

pub struct StubAssets(pub Vec<&'static str>);

#[async_trait]
impl AssetCollector for StubAssets {
    async fn collect(
        &self,
        _project_root: &Path,
        _config: &ProjectConfig,
        urls: &AssetUrlResolver,
    ) -> Result<Vec<AssetDescriptor>, ManifestError> {
        Ok(self
            .0
            .iter()
            .map(|path| AssetDescriptor {
                hash: None,
                key: path.to_string(),
                content_type: "image/png".to_string(),
                file_extension: Some(".png".to_string()),
                url: urls.url_for(path),
            })
            .collect())
    }
}

/// Middleware over stub collaborators with recording sinks.
pub struct Harness {
    pub middleware: ManifestMiddleware,
    pub analytics: Arc<RecordingAnalytics>,
    pub errors: Arc<RecordingErrorLogger>,
}

pub struct HarnessBuilder {
    classic: Value,
    entry_point: PathBuf,
    assets: Vec<&'static str>,
    config_failure: Option<String>,
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self {
            classic: json!({
                "name": "demo",
                "sdkVersion": "45.0.0",
                "bundleUrl": "http://192.168.1.5:8081/index.bundle?platform=ios&dev=true",
            }),
            entry_point: PathBuf::from("index.js"),
            assets: Vec::new(),
            config_failure: None,
        }
    }
}

impl HarnessBuilder {
    pub fn classic(mut self, classic: Value) -> Self {
        self.classic = classic;
        self
    }

    pub fn entry_point(mut self, entry_point: &str) -> Self {
        self.entry_point = PathBuf::from(entry_point);
        self
    }

    pub fn assets(mut self, assets: Vec<&'static str>) -> Self {
        self.assets = assets;
        self
    }

    pub fn failing_config(mut self, message: &str) -> Self {
        self.config_failure = Some(message.to_string());
        self
    }

    pub fn build(self) -> Harness {
        let builder = ManifestBuilder::new(
            Arc::new(StubConfigLoader {
                failure: self.config_failure,
            }),
            Arc::new(StubEntryPoint(self.entry_point)),
            Arc::new(StubClassic {
                manifest: self.classic,
            }),
            Arc::new(PrefixMapper),
            Arc::new(StubAssets(self.assets)),
        );
        let analytics = Arc::new(RecordingAnalytics::new());
        let errors = Arc::new(RecordingErrorLogger::new());
        let middleware = ManifestMiddleware::new(PROJECT_ROOT, EndpointConfig::default(), builder)
            .with_analytics(analytics.clone())
            .with_error_logger(errors.clone());

        Harness {
            middleware,
            analytics,
            errors,
        }
    }
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    pub async fn get(&self, request: IncomingRequest) -> HttpResponse {
        self.middleware
            .handle(&request, || async { HttpResponse::not_found() })
            .await
    }

    pub async fn get_json(&self, request: IncomingRequest) -> (HttpResponse, Value) {
        let response = self.get(request).await;
        let body = response.json_body().expect("response body is JSON");
        (response, body)
    }
}

pub fn manifest_request(query: &str) -> IncomingRequest {
    if query.is_empty() {
        IncomingRequest::new(ROUTE)
    } else {
        IncomingRequest::new(format!("{}?{}", ROUTE, query))
    }
}
