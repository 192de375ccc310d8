//! Core abstractions for the update manifest endpoint.
//!
//! This crate provides the fundamental types shared by the other crates:
//! - `IncomingRequest` - Method-agnostic view of an HTTP request
//! - `ResponseHeaders` - Ordered response header list
//! - `HttpResponse` - Status, headers and body produced by a handler
//! - `EndpointConfig` - Runtime configuration of the endpoint
//! - `Clock` / `IdGenerator` - Injected time and identifier capabilities

mod capabilities;
mod config;
mod context;
mod headers;
mod response;

pub use capabilities::*;
pub use config::*;
pub use context::*;
pub use headers::*;
pub use response::*;
