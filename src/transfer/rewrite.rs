//! Source path rewriting.
//!
//! Files under a local mount may really live on remote storage that the copy
//! tool reaches directly (e.g. `/mnt/ultra/...` → `ultra:downloads/qbittorrent/...`).
//! Rules are tried in order and the first matching prefix wins.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Replace `prefix` at the start of a source path with `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRewrite {
    pub prefix: String,
    pub replacement: String,
}

impl PathRewrite {
    pub fn new(prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            replacement: replacement.into(),
        }
    }

    /// Rewrite `path` if it starts with this rule's prefix on a path component boundary
    pub fn apply(&self, path: &str) -> Option<String> {
        if self.prefix.is_empty() {
            return None;
        }
        let rest = path.strip_prefix(&self.prefix)?;
        let on_boundary = rest.is_empty() || rest.starts_with('/') || self.prefix.ends_with('/');
        on_boundary.then(|| format!("{}{}", self.replacement, rest))
    }
}

/// Apply the first matching rule, or return the path unchanged
pub fn rewrite_source(rules: &[PathRewrite], source: &Path) -> String {
    let text = source.to_string_lossy();
    rules
        .iter()
        .find_map(|rule| rule.apply(&text))
        .unwrap_or_else(|| text.into_owned())
}
