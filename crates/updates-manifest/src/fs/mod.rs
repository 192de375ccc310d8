//! Filesystem-backed collaborators.
//!
//! These serve a project straight from its directory:
//! - `AppJsonConfigLoader` - `app.json` + `package.json`
//! - `FsEntryPointResolver` - `package.json` `main` or `index.*` files
//! - `DevServerManifestProvider` - classic manifest pointing at a dev server
//! - `FsAssetCollector` - files matching `assetBundlePatterns`

mod asset_collector;
mod config_loader;
mod dev_server;
mod entry_point;
mod pattern;

use std::sync::Arc;

pub use asset_collector::*;
pub use config_loader::*;
pub use dev_server::*;
pub use entry_point::*;
pub use pattern::*;

use updates_core::EndpointConfig;

use crate::manifest::ManifestBuilder;
use crate::runtime::SdkRuntimeMapper;

/// Manifest builder wired to the filesystem collaborators.
pub fn filesystem_builder(config: &EndpointConfig) -> ManifestBuilder {
    let loader = Arc::new(AppJsonConfigLoader);
    let entry_points = Arc::new(FsEntryPointResolver);
    let classic = Arc::new(DevServerManifestProvider::new(
        loader.clone(),
        entry_points.clone(),
        config,
    ));

    ManifestBuilder::new(
        loader,
        entry_points,
        classic,
        Arc::new(SdkRuntimeMapper),
        Arc::new(FsAssetCollector),
    )
}
