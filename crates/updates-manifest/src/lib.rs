//! Update manifest endpoint.
//!
//! Serves `/update-manifest-experimental`: a JSON document telling a
//! client which JavaScript bundle and static assets make up the current
//! update of a project.
//!
//! - `resolve_platform` - Target platform from query or header
//! - `resolve_runtime_version` - Explicit runtime version or SDK mapping
//! - `AssetUrlResolver` - Asset URLs anchored at the bundle origin
//! - `ManifestBuilder` - Assembles the document from injected collaborators
//! - `ManifestMiddleware` - Route guard and error envelope
//! - `fs` - Collaborators reading the project from disk
//!
//! # Example
//!
//! ```rust,ignore
//! use updates_core::{EndpointConfig, HttpResponse, IncomingRequest};
//! use updates_manifest::{fs, ManifestMiddleware};
//!
//! let config = EndpointConfig::default();
//! let builder = fs::filesystem_builder(&config);
//! let middleware = ManifestMiddleware::new("/app", config, builder);
//!
//! let request = IncomingRequest::new("/update-manifest-experimental?platform=ios");
//! let response = middleware.handle(&request, || async { HttpResponse::not_found() }).await;
//! ```

mod assets;
mod classic;
mod error;
mod manifest;
mod middleware;
mod platform;
mod project;
mod runtime;

pub mod fs;

pub use assets::*;
pub use classic::*;
pub use error::*;
pub use manifest::*;
pub use middleware::*;
pub use platform::*;
pub use project::*;
pub use runtime::*;
