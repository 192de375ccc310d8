//! Observability infrastructure for the update manifest endpoint.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with request context
//! - `AnalyticsSink` - Fire-and-forget product analytics events
//! - `ErrorLogger` - Reporting of failures with their full cause chain

mod analytics;
mod errors;
mod logging;

pub use analytics::*;
pub use errors::*;
pub use logging::*;

// Re-export RequestId from updates-core for convenience
pub use updates_core::RequestId;
