//! Spin workload serving the update manifest endpoint.
//!
//! The project directory comes from the `project_root` Spin variable.
//! Requests for any other path get a 404.

use futures::SinkExt;
use spin_sdk::http::{Fields, IncomingRequest, OutgoingResponse, ResponseOutparam};
use spin_sdk::http_component;

use updates_sdk::updates_core::{EndpointConfig, HttpResponse, IncomingRequest as ManifestRequest};
use updates_sdk::updates_manifest::{fs::filesystem_builder, ManifestMiddleware};
use updates_sdk::updates_observability::StructuredLogger;

const DEFAULT_PROJECT_ROOT: &str = "/";

/// Main HTTP handler.
#[http_component]
async fn handle(req: IncomingRequest, response_out: ResponseOutparam) {
    let request = manifest_request(&req);
    let logger = StructuredLogger::new(request.request_id.clone())
        .with_route(request.path().unwrap_or_default());

    let project_root = spin_sdk::variables::get("project_root")
        .unwrap_or_else(|_| DEFAULT_PROJECT_ROOT.to_string());

    let config = EndpointConfig::default();
    let middleware =
        ManifestMiddleware::new(project_root, config.clone(), filesystem_builder(&config));

    let response = middleware
        .handle(&request, || async { HttpResponse::not_found() })
        .await;

    logger
        .debug_builder("Request complete")
        .field_i64("status", i64::from(response.status))
        .emit();

    if let Err(e) = send(response, response_out).await {
        logger
            .error_builder("Failed to write response")
            .field("error", e.to_string())
            .emit();
    }
}

/// Request view over the Spin request.
fn manifest_request(req: &IncomingRequest) -> ManifestRequest {
    let mut request = match req.path_with_query() {
        Some(url) => ManifestRequest::new(url),
        None => ManifestRequest::without_url(),
    };
    for (name, value) in req.headers().entries() {
        request = request.with_header(name, String::from_utf8_lossy(&value).into_owned());
    }
    request
}

async fn send(response: HttpResponse, response_out: ResponseOutparam) -> anyhow::Result<()> {
    let header_list: Vec<(String, Vec<u8>)> = response
        .headers
        .iter()
        .map(|(name, value)| (name.to_string(), value.as_bytes().to_vec()))
        .collect();
    let headers = Fields::from_list(&header_list)
        .map_err(|e| anyhow::anyhow!("invalid response headers: {:?}", e))?;

    let outgoing = OutgoingResponse::new(headers);
    outgoing
        .set_status_code(response.status)
        .map_err(|_| anyhow::anyhow!("invalid status code {}", response.status))?;

    let mut body = outgoing.take_body();
    response_out.set(outgoing);
    body.send(response.body)
        .await
        .map_err(|e| anyhow::anyhow!("failed to send body: {:?}", e))?;
    Ok(())
}
