//! Route guard and response envelope for the manifest endpoint.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use updates_core::{header_names, EndpointConfig, HttpResponse, IncomingRequest};
use updates_observability::{
    error_chain, AnalyticsSink, ErrorLogger, StructuredLogger, TracingAnalytics,
    TracingErrorLogger,
};

use crate::error::ManifestError;
use crate::manifest::ManifestBuilder;

/// Analytics event emitted for every served manifest.
pub const SERVE_MANIFEST_EVENT: &str = "Serve Updates Manifest";

/// Tag passed to the error logger.
pub const ERROR_TAG: &str = "expo";

/// Serves update manifests on a single path and passes everything else on.
#[derive(Clone)]
pub struct ManifestMiddleware {
    project_root: PathBuf,
    config: EndpointConfig,
    builder: ManifestBuilder,
    analytics: Arc<dyn AnalyticsSink>,
    errors: Arc<dyn ErrorLogger>,
}

impl ManifestMiddleware {
    /// Create a middleware reporting through `tracing`.
    pub fn new(
        project_root: impl Into<PathBuf>,
        config: EndpointConfig,
        builder: ManifestBuilder,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            config,
            builder,
            analytics: Arc::new(TracingAnalytics),
            errors: Arc::new(TracingErrorLogger),
        }
    }

    /// Replace the analytics sink.
    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Replace the error logger.
    pub fn with_error_logger(mut self, errors: Arc<dyn ErrorLogger>) -> Self {
        self.errors = errors;
        self
    }

    /// Project served by this middleware.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Endpoint configuration.
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Whether the request's pathname is exactly the manifest route.
    ///
    /// Requests without a URL never match.
    pub fn should_handle(&self, request: &IncomingRequest) -> bool {
        request.path() == Some(self.config.route.as_str())
    }

    /// Handle a request, calling `next` exactly once when the route does not match.
    ///
    /// The response from `next` is returned untouched.
    pub async fn handle<N, Fut>(&self, request: &IncomingRequest, next: N) -> HttpResponse
    where
        N: FnOnce() -> Fut,
        Fut: Future<Output = HttpResponse>,
    {
        if !self.should_handle(request) {
            return next().await;
        }
        self.handle_request(request).await
    }

    /// Serve the manifest for a request already known to match the route.
    ///
    /// Always produces exactly one response: the manifest, or the error envelope.
    pub async fn handle_request(&self, request: &IncomingRequest) -> HttpResponse {
        let logger = StructuredLogger::new(request.request_id.clone())
            .with_route(&self.config.route)
            .with_project_root(&self.project_root);

        match self.serve(request).await {
            Ok((response, runtime_version)) => {
                logger
                    .info_builder("Served update manifest")
                    .field_opt("runtimeVersion", runtime_version.as_deref())
                    .field_u64("bytes", response.content_length())
                    .emit();
                self.analytics.log_event(
                    SERVE_MANIFEST_EVENT,
                    json!({
                        "projectRoot": self.project_root.display().to_string(),
                        "developerTool": self.config.developer_tool,
                        "runtimeVersion": runtime_version,
                    }),
                );
                response
            }
            Err(err) => {
                logger
                    .error_builder("Update manifest failed")
                    .field("error", err.to_string())
                    .emit();
                self.errors
                    .log_error(&self.project_root, ERROR_TAG, &error_chain(&err));
                self.error_response(&err)
            }
        }
    }

    async fn serve(
        &self,
        request: &IncomingRequest,
    ) -> Result<(HttpResponse, Option<String>), ManifestError> {
        let manifest = self.builder.build(&self.project_root, request).await?;
        let body = serde_json::to_vec(&manifest.body)?;

        let mut response = HttpResponse::new(200);
        for (name, value) in manifest.headers {
            response.headers.insert(name, value);
        }
        response.body = body;

        Ok((response, manifest.body.runtime_version))
    }

    fn error_response(&self, err: &ManifestError) -> HttpResponse {
        let body = json!({ "error": err.to_string() });
        let mut response = HttpResponse::new(self.config.error_status)
            .with_body(serde_json::to_vec(&body).unwrap_or_default());
        if self.config.error_content_type {
            response
                .headers
                .insert(header_names::CONTENT_TYPE, "application/json");
        }
        response
    }
}
