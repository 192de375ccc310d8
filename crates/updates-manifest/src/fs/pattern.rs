//! Asset bundle patterns.
//!
//! Patterns are `/`-separated globs relative to the project root. `**`
//! matches any number of directories, `*` and `?` never cross a `/`, and
//! `[...]` character classes are supported.

use glob::{MatchOptions, Pattern};

use crate::error::ManifestError;

/// A validated `assetBundlePatterns` entry.
#[derive(Debug, Clone)]
pub struct AssetPattern {
    source: String,
    pattern: Pattern,
    walk_root: String,
}

impl AssetPattern {
    /// Parse a pattern. Absolute patterns and `..` segments are rejected.
    pub fn new(source: &str) -> Result<Self, ManifestError> {
        if source.starts_with('/') || source.starts_with('\\') {
            return Err(ManifestError::Assets(format!(
                "asset pattern \"{}\" must be relative to the project root",
                source
            )));
        }

        let segments: Vec<&str> = source
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect();
        if segments.contains(&"..") {
            return Err(ManifestError::Assets(format!(
                "asset pattern \"{}\" leaves the project root",
                source
            )));
        }

        let normalized = segments.join("/");
        let pattern = Pattern::new(&normalized).map_err(|e| {
            ManifestError::Assets(format!("invalid asset pattern \"{}\": {}", source, e))
        })?;

        Ok(Self {
            source: source.to_string(),
            pattern,
            walk_root: walk_root(&segments),
        })
    }

    /// The pattern as written in the project config.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Directory below the project root where matches can start.
    pub fn walk_root(&self) -> &str {
        &self.walk_root
    }

    /// Whether a relative, `/`-separated path matches.
    pub fn matches(&self, relative: &str) -> bool {
        self.pattern.matches_with(relative, match_options())
    }
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?', '['])
}

/// Leading literal segments; a fully literal pattern names a file, so its
/// parent directory is walked.
fn walk_root(segments: &[&str]) -> String {
    let literal = segments
        .iter()
        .take_while(|segment| !has_wildcard(segment))
        .count();
    let take = if literal == segments.len() {
        literal.saturating_sub(1)
    } else {
        literal
    };
    segments[..take].join("/")
}
