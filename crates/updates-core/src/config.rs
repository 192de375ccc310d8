//! Endpoint configuration.

use serde::{Deserialize, Serialize};

/// Path served by the update manifest endpoint.
pub const MANIFEST_ROUTE: &str = "/update-manifest-experimental";

/// Non-standard status code used for every manifest failure.
pub const MANIFEST_ERROR_STATUS: u16 = 520;

/// Configuration for the update manifest endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Exact pathname the route guard matches.
    #[serde(default = "default_route")]
    pub route: String,
    /// Developer tool identifier reported with analytics events.
    #[serde(default = "default_developer_tool")]
    pub developer_tool: String,
    /// Host used for bundle URLs when the request carries no `Host` header.
    #[serde(default = "default_host")]
    pub default_host: String,
    /// Status code of the error envelope.
    #[serde(default = "default_error_status")]
    pub error_status: u16,
    /// Whether the error envelope carries `content-type: application/json`.
    #[serde(default = "default_true")]
    pub error_content_type: bool,
}

fn default_route() -> String {
    MANIFEST_ROUTE.to_string()
}

fn default_developer_tool() -> String {
    "expo-cli".to_string()
}

fn default_host() -> String {
    "localhost:8081".to_string()
}

fn default_error_status() -> u16 {
    MANIFEST_ERROR_STATUS
}

fn default_true() -> bool {
    true
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            route: default_route(),
            developer_tool: default_developer_tool(),
            default_host: default_host(),
            error_status: default_error_status(),
            error_content_type: true,
        }
    }
}

impl EndpointConfig {
    /// Create a configuration serving the given route.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Default::default()
        }
    }

    /// Set the developer tool identifier.
    pub fn with_developer_tool(mut self, tool: impl Into<String>) -> Self {
        self.developer_tool = tool.into();
        self
    }

    /// Set the fallback host.
    pub fn with_default_host(mut self, host: impl Into<String>) -> Self {
        self.default_host = host.into();
        self
    }

    /// Enable or disable the JSON content type on error responses.
    pub fn with_error_content_type(mut self, enabled: bool) -> Self {
        self.error_content_type = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_config_default() {
        let config = EndpointConfig::default();

        assert_eq!(config.route, "/update-manifest-experimental");
        assert_eq!(config.developer_tool, "expo-cli");
        assert_eq!(config.default_host, "localhost:8081");
        assert_eq!(config.error_status, 520);
        assert!(config.error_content_type);
    }

    #[test]
    fn test_endpoint_config_partial_json() {
        let config: EndpointConfig =
            serde_json::from_str(r#"{"developer_tool": "my-tool"}"#).unwrap();

        assert_eq!(config.developer_tool, "my-tool");
        assert_eq!(config.route, MANIFEST_ROUTE);
        assert_eq!(config.error_status, MANIFEST_ERROR_STATUS);
    }

    #[test]
    fn test_endpoint_config_builder_chain() {
        let config = EndpointConfig::new("/manifest")
            .with_developer_tool("cli")
            .with_default_host("10.0.0.2:19000")
            .with_error_content_type(false);

        assert_eq!(config.route, "/manifest");
        assert_eq!(config.developer_tool, "cli");
        assert_eq!(config.default_host, "10.0.0.2:19000");
        assert!(!config.error_content_type);
    }
}
