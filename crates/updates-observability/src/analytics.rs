//! Fire-and-forget analytics events.

use std::sync::Mutex;

use serde::Serialize;

/// A named analytics event with JSON properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    /// Event name.
    pub name: String,
    /// Event properties.
    pub properties: serde_json::Value,
}

impl AnalyticsEvent {
    /// Create a new event.
    pub fn new(name: impl Into<String>, properties: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }
}

/// Destination for analytics events.
///
/// Implementations must not fail the caller; delivery problems are the
/// sink's own concern.
pub trait AnalyticsSink: Send + Sync {
    /// Record an event.
    fn log_event(&self, name: &str, properties: serde_json::Value);
}

/// Emits analytics events as `tracing` events on the `analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn log_event(&self, name: &str, properties: serde_json::Value) {
        tracing::info!(
            target: "analytics",
            event = name,
            properties = %properties,
            "analytics event"
        );
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn log_event(&self, _name: &str, _properties: serde_json::Value) {}
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn log_event(&self, name: &str, properties: serde_json::Value) {
        let event = AnalyticsEvent::new(name, properties);
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_analytics() {
        let sink = RecordingAnalytics::new();
        sink.log_event("Serve Updates Manifest", json!({"runtimeVersion": "1.0.0"}));
        sink.log_event("Other", json!({}));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Serve Updates Manifest");
        assert_eq!(events[0].properties["runtimeVersion"], "1.0.0");
    }

    #[test]
    fn test_noop_and_tracing_do_not_panic() {
        NoopAnalytics.log_event("x", json!({}));
        TracingAnalytics.log_event("x", json!({"a": 1}));
    }
}
