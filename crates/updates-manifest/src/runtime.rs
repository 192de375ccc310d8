//! Runtime version resolution.

use crate::classic::ClassicManifest;

/// Maps an SDK version to a runtime version.
pub trait RuntimeVersionMapper: Send + Sync {
    /// Runtime version for `sdk_version`.
    fn runtime_version_for_sdk(&self, sdk_version: &str) -> String;
}

/// Maps `45.0.0` to `exposdk:45.0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkRuntimeMapper;

impl RuntimeVersionMapper for SdkRuntimeMapper {
    fn runtime_version_for_sdk(&self, sdk_version: &str) -> String {
        format!("exposdk:{}", sdk_version)
    }
}

/// Resolve the runtime version of a classic manifest.
///
/// An explicit `runtimeVersion` is used verbatim, otherwise one is derived
/// from `sdkVersion`. With neither, the manifest has no runtime version.
pub fn resolve_runtime_version(
    classic: &ClassicManifest,
    mapper: &dyn RuntimeVersionMapper,
) -> Option<String> {
    if let Some(explicit) = classic.runtime_version() {
        return Some(explicit.to_string());
    }
    classic
        .sdk_version()
        .map(|sdk| mapper.runtime_version_for_sdk(sdk))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StubMapper;

    impl RuntimeVersionMapper for StubMapper {
        fn runtime_version_for_sdk(&self, sdk_version: &str) -> String {
            format!("stub-{}", sdk_version)
        }
    }

    fn classic(value: serde_json::Value) -> ClassicManifest {
        ClassicManifest::from_value(value).unwrap()
    }

    #[test]
    fn test_explicit_runtime_version_wins() {
        let manifest = classic(json!({"runtimeVersion": "1.0.0", "sdkVersion": "45.0.0"}));
        assert_eq!(
            resolve_runtime_version(&manifest, &StubMapper),
            Some("1.0.0".to_string())
        );
    }

    #[test]
    fn test_derived_from_sdk_version() {
        let manifest = classic(json!({"sdkVersion": "45.0.0"}));
        assert_eq!(
            resolve_runtime_version(&manifest, &StubMapper),
            Some("stub-45.0.0".to_string())
        );
    }

    #[test]
    fn test_absent_without_either() {
        let manifest = classic(json!({"name": "app"}));
        assert_eq!(resolve_runtime_version(&manifest, &StubMapper), None);
    }

    #[test]
    fn test_sdk_runtime_mapper() {
        assert_eq!(SdkRuntimeMapper.runtime_version_for_sdk("45.0.0"), "exposdk:45.0.0");
    }
}
