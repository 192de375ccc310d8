//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration was loaded from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(Path::new(path))?, Some(PathBuf::from(path)))
        } else {
            match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Project directory: explicit argument, then config, then the working directory.
    ///
    /// A relative `[project] root` is resolved against the config file's directory.
    pub fn project_root(&self, explicit: Option<&str>) -> PathBuf {
        if let Some(path) = explicit {
            return self.resolve_path(path);
        }

        match &self.config.project.root {
            Some(root) if Path::new(root).is_absolute() => PathBuf::from(root),
            Some(root) => self
                .config_path
                .as_deref()
                .and_then(Path::parent)
                .map(|dir| self.resolve_path(&dir.join(root).to_string_lossy()))
                .unwrap_or_else(|| self.resolve_path(root)),
            None => self.cwd.clone(),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or one of its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(cwd: &Path, config: CliConfig, config_path: Option<PathBuf>) -> Context {
        Context {
            config,
            config_path,
            output: Output::new(false, true),
            cwd: cwd.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".updates.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join(".updates.toml")));
    }

    #[test]
    fn test_project_root_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();

        let ctx = context(dir.path(), config.clone(), None);
        assert_eq!(ctx.project_root(None), dir.path());
        assert_eq!(ctx.project_root(Some("app")), dir.path().join("app"));

        config.project.root = Some("mobile".to_string());
        let config_path = dir.path().join("conf").join("updates.toml");
        let ctx = context(dir.path(), config, Some(config_path));
        assert_eq!(ctx.project_root(None), dir.path().join("conf").join("mobile"));
    }
}
