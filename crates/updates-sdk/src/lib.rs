//! Public SDK for the update manifest endpoint.
//!
//! This crate re-exports everything a host needs to serve manifests:
//!
//! ```ignore
//! use updates_sdk::prelude::*;
//!
//! async fn serve(request: IncomingRequest) -> HttpResponse {
//!     let config = EndpointConfig::default();
//!     let middleware =
//!         ManifestMiddleware::new("/srv/app", config.clone(), fs::filesystem_builder(&config));
//!
//!     middleware
//!         .handle(&request, || async { HttpResponse::not_found() })
//!         .await
//! }
//! ```

pub use updates_core;
pub use updates_manifest;
pub use updates_observability;

/// Prelude for convenient imports.
pub mod prelude {
    pub use updates_core::*;
    pub use updates_manifest::*;
    pub use updates_observability::*;
}
