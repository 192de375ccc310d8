//! Static assets matched by `assetBundlePatterns`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::assets::{AssetCollector, AssetDescriptor, AssetUrlResolver};
use crate::error::ManifestError;
use crate::fs::pattern::AssetPattern;
use crate::project::ProjectConfig;

/// Walks the project for files matching the asset bundle patterns.
///
/// Assets are keyed by the SHA-256 of their contents and listed in
/// relative path order, each file once.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssetCollector;

impl FsAssetCollector {
    fn matching_files(
        project_root: &Path,
        patterns: &[String],
    ) -> Result<BTreeMap<String, PathBuf>, ManifestError> {
        let patterns = patterns
            .iter()
            .map(|pattern| AssetPattern::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        let canonical_root = project_root.canonicalize()?;
        let mut files = BTreeMap::new();

        for pattern in &patterns {
            let start = project_root.join(pattern.walk_root());
            if !start.is_dir() || !start.canonicalize()?.starts_with(&canonical_root) {
                continue;
            }

            for entry in WalkDir::new(&start).follow_links(false) {
                let entry = entry.map_err(|e| ManifestError::Assets(e.to_string()))?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let Ok(relative) = entry.path().strip_prefix(project_root) else {
                    continue;
                };
                let relative = relative.to_string_lossy().replace('\\', "/");
                if pattern.matches(&relative) {
                    files.insert(relative, entry.into_path());
                }
            }
        }

        Ok(files)
    }

    fn describe(
        relative: &str,
        path: &Path,
        urls: &AssetUrlResolver,
    ) -> Result<AssetDescriptor, ManifestError> {
        let contents = std::fs::read(path).map_err(|e| {
            ManifestError::Assets(format!("failed to read {}: {}", path.display(), e))
        })?;
        let hash = hex::encode(Sha256::digest(&contents));
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let file_extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()));

        Ok(AssetDescriptor {
            hash: Some(hash.clone()),
            key: hash,
            content_type,
            file_extension,
            url: urls.url_for(relative),
        })
    }
}

#[async_trait]
impl AssetCollector for FsAssetCollector {
    async fn collect(
        &self,
        project_root: &Path,
        config: &ProjectConfig,
        urls: &AssetUrlResolver,
    ) -> Result<Vec<AssetDescriptor>, ManifestError> {
        let patterns = config.asset_bundle_patterns();
        Self::matching_files(project_root, &patterns)?
            .iter()
            .map(|(relative, path)| Self::describe(relative, path, urls))
            .collect()
    }
}
