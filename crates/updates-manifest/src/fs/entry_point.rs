//! Entry point discovery.

use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::project::{EntryPointResolver, ProjectConfig};

const INDEX_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Uses `package.json` `main` when that file exists, otherwise the first
/// existing `index.<platform>.<ext>` or `index.<ext>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEntryPointResolver;

impl EntryPointResolver for FsEntryPointResolver {
    fn resolve(
        &self,
        project_root: &Path,
        platform: &str,
        config: &ProjectConfig,
    ) -> Result<PathBuf, ManifestError> {
        if let Some(main) = config.package_main() {
            let main = main.trim_start_matches("./");
            if project_root.join(main).is_file() {
                return Ok(PathBuf::from(main));
            }
        }

        let platform_candidates = INDEX_EXTENSIONS
            .iter()
            .map(|ext| format!("index.{}.{}", platform, ext));
        let generic_candidates = INDEX_EXTENSIONS.iter().map(|ext| format!("index.{}", ext));

        platform_candidates
            .chain(generic_candidates)
            .map(PathBuf::from)
            .find(|candidate| project_root.join(candidate).is_file())
            .ok_or_else(|| {
                ManifestError::EntryPoint(format!(
                    "no entry point found in {} for platform \"{}\"",
                    project_root.display(),
                    platform
                ))
            })
    }
}
