//! Platform negotiation.

use updates_core::{header_names, IncomingRequest};

use crate::error::ManifestError;

/// Query parameter carrying the platform.
pub const PLATFORM_QUERY_PARAM: &str = "platform";

/// Resolve the requested platform.
///
/// The `platform` query parameter wins over the `expo-platform` header.
/// Values are passed through as-is; unknown platforms are left for
/// downstream collaborators to reject.
pub fn resolve_platform(request: &IncomingRequest) -> Result<String, ManifestError> {
    request
        .query_param(PLATFORM_QUERY_PARAM)
        .filter(|p| !p.is_empty())
        .or_else(|| {
            request
                .header(header_names::EXPO_PLATFORM)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
        })
        .ok_or(ManifestError::MissingPlatform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_query() {
        let req = IncomingRequest::new("/update-manifest-experimental?platform=ios");
        assert_eq!(resolve_platform(&req).unwrap(), "ios");
    }

    #[test]
    fn test_platform_from_header() {
        let req = IncomingRequest::new("/update-manifest-experimental")
            .with_header("Expo-Platform", "android");
        assert_eq!(resolve_platform(&req).unwrap(), "android");
    }

    #[test]
    fn test_query_wins_over_header() {
        let req = IncomingRequest::new("/update-manifest-experimental?platform=ios")
            .with_header("expo-platform", "android");
        assert_eq!(resolve_platform(&req).unwrap(), "ios");
    }

    #[test]
    fn test_empty_query_falls_back_to_header() {
        let req = IncomingRequest::new("/update-manifest-experimental?platform=")
            .with_header("expo-platform", "android");
        assert_eq!(resolve_platform(&req).unwrap(), "android");
    }

    #[test]
    fn test_unknown_platform_passed_through() {
        let req = IncomingRequest::new("/update-manifest-experimental?platform=tvos");
        assert_eq!(resolve_platform(&req).unwrap(), "tvos");
    }

    #[test]
    fn test_missing_platform() {
        let req = IncomingRequest::new("/update-manifest-experimental");
        assert!(matches!(
            resolve_platform(&req),
            Err(ManifestError::MissingPlatform)
        ));
    }

    #[test]
    fn test_empty_header_is_missing() {
        let req =
            IncomingRequest::new("/update-manifest-experimental").with_header("expo-platform", "");
        assert!(matches!(
            resolve_platform(&req),
            Err(ManifestError::MissingPlatform)
        ));
    }
}
