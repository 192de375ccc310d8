//! Serve one manifest request against a local project.

use std::sync::Arc;

use anyhow::{bail, Result};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use updates_core::{header_names, HttpResponse, IncomingRequest};
use updates_manifest::{fs::filesystem_builder, ManifestMiddleware, PLATFORM_QUERY_PARAM};
use updates_observability::RecordingAnalytics;

use super::ManifestArgs;
use crate::context::Context;

/// Run the manifest command.
pub async fn run(args: ManifestArgs, ctx: &Context) -> Result<()> {
    let project_root = ctx.project_root(args.project.as_deref());
    let endpoint = ctx.config.endpoint.clone();
    let request = build_request(&args, &endpoint.route);

    ctx.output
        .debug(&format!("Project: {}", project_root.display()));
    if let Some(url) = &request.url {
        ctx.output.debug(&format!("Request: GET {}", url));
    }

    let analytics = Arc::new(RecordingAnalytics::new());
    let mut middleware =
        ManifestMiddleware::new(&project_root, endpoint.clone(), filesystem_builder(&endpoint));
    if ctx.output.is_verbose() {
        middleware = middleware.with_analytics(analytics.clone());
    }

    let spinner = ctx.output.spinner("Building manifest...");
    let response = middleware
        .handle(&request, || async { HttpResponse::not_found() })
        .await;
    spinner.finish_and_clear();

    for event in analytics.events() {
        ctx.output
            .debug(&format!("Analytics: {} {}", event.name, event.properties));
    }

    ctx.output.response(&response);

    if !response.is_success() {
        bail!("Manifest request failed with status {}", response.status);
    }

    Ok(())
}

/// Request the endpoint would receive from a client with these arguments.
fn build_request(args: &ManifestArgs, route: &str) -> IncomingRequest {
    let path = args.path.as_deref().unwrap_or(route);
    let url = match &args.platform {
        Some(platform) => format!(
            "{}?{}={}",
            path,
            PLATFORM_QUERY_PARAM,
            utf8_percent_encode(platform, NON_ALPHANUMERIC)
        ),
        None => path.to_string(),
    };

    let mut request = IncomingRequest::new(url);
    if let Some(platform) = &args.platform_header {
        request = request.with_header(header_names::EXPO_PLATFORM, platform.as_str());
    }
    if let Some(host) = &args.host {
        request = request.with_header(header_names::HOST, host.as_str());
    }
    request
}
