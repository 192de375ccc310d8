//! Method-agnostic view of an incoming HTTP request.

use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;

/// Unique request identifier for tracing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new request ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Incoming request as seen by the route guard.
///
/// `url` holds the path and query exactly as received. Header lookups are
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    /// Unique request identifier.
    pub request_id: RequestId,
    /// HTTP method. Never used for routing.
    pub method: http::Method,
    /// Path and query, if the transport provided one.
    pub url: Option<String>,
    /// Request headers in arrival order.
    pub headers: Vec<(String, String)>,
}

impl IncomingRequest {
    /// Create a GET request for the given path and query.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::generate(),
            method: http::Method::GET,
            url: Some(url.into()),
            headers: Vec::new(),
        }
    }

    /// Create a request without a URL.
    pub fn without_url() -> Self {
        Self {
            request_id: RequestId::generate(),
            method: http::Method::GET,
            url: None,
            headers: Vec::new(),
        }
    }

    /// Set the HTTP method.
    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Pathname component of the URL, without the query string.
    pub fn path(&self) -> Option<&str> {
        let url = self.url.as_deref()?;
        let end = url.find(['?', '#']).unwrap_or(url.len());
        Some(&url[..end])
    }

    /// Raw query string, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        let url = self.url.as_deref()?;
        let start = url.find('?')? + 1;
        let rest = &url[start..];
        let end = rest.find('#').unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// First decoded value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query()?
            .split('&')
            .filter(|pair| !pair.is_empty())
            .find_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key) == name).then(|| decode_component(value).into_owned())
            })
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Build a request view from an `http::Request`.
    ///
    /// Header values that are not valid visible ASCII are skipped.
    pub fn from_http<B>(req: &http::Request<B>) -> Self {
        let headers = req
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        Self {
            request_id: RequestId::generate(),
            method: req.method().clone(),
            url: req.uri().path_and_query().map(|pq| pq.as_str().to_string()),
            headers,
        }
    }
}

fn decode_component(raw: &str) -> Cow<'_, str> {
    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        Cow::Owned(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
    } else {
        percent_decode_str(raw).decode_utf8_lossy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === RequestId Tests ===

    #[test]
    fn test_request_id_generate_unique() {
        let a = RequestId::generate();
        let b = RequestId::generate();

        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 32);
    }

    // === Path and Query Tests ===

    #[test]
    fn test_path_strips_query() {
        let req = IncomingRequest::new("/update-manifest-experimental?platform=ios");
        assert_eq!(req.path(), Some("/update-manifest-experimental"));
        assert_eq!(req.query(), Some("platform=ios"));
    }

    #[test]
    fn test_path_without_query() {
        let req = IncomingRequest::new("/status");
        assert_eq!(req.path(), Some("/status"));
        assert_eq!(req.query(), None);
    }

    #[test]
    fn test_path_missing_url() {
        let req = IncomingRequest::without_url();
        assert_eq!(req.path(), None);
        assert_eq!(req.query_param("platform"), None);
    }

    #[test]
    fn test_query_param_decodes() {
        let req = IncomingRequest::new("/m?name=hello%20world&mode=a+b&flag");
        assert_eq!(req.query_param("name"), Some("hello world".to_string()));
        assert_eq!(req.query_param("mode"), Some("a b".to_string()));
        assert_eq!(req.query_param("flag"), Some(String::new()));
        assert_eq!(req.query_param("missing"), None);
    }

    #[test]
    fn test_query_param_first_value_wins() {
        let req = IncomingRequest::new("/m?platform=ios&platform=android");
        assert_eq!(req.query_param("platform"), Some("ios".to_string()));
    }

    #[test]
    fn test_query_ignores_fragment() {
        let req = IncomingRequest::new("/m?platform=web#section");
        assert_eq!(req.query_param("platform"), Some("web".to_string()));
    }

    // === Header Tests ===

    #[test]
    fn test_header_case_insensitive() {
        let req = IncomingRequest::new("/").with_header("Expo-Platform", "android");
        assert_eq!(req.header("expo-platform"), Some("android"));
        assert_eq!(req.header("EXPO-PLATFORM"), Some("android"));
        assert_eq!(req.header("host"), None);
    }

    #[test]
    fn test_from_http_request() {
        let req = http::Request::builder()
            .method(http::Method::POST)
            .uri("http://localhost:8081/update-manifest-experimental?platform=ios")
            .header("Host", "localhost:8081")
            .body(())
            .unwrap();

        let view = IncomingRequest::from_http(&req);

        assert_eq!(view.method, http::Method::POST);
        assert_eq!(
            view.url.as_deref(),
            Some("/update-manifest-experimental?platform=ios")
        );
        assert_eq!(view.header("host"), Some("localhost:8081"));
    }
}
