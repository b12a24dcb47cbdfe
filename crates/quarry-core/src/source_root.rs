//! Source-root classification.
//!
//! A source root is the directory an ecosystem's import system treats as
//! the base for computing module paths (e.g. `src/python` for a Python
//! tree). The engine configures the roots; backends only ask which root a
//! given file falls under.

use crate::error::{Error, Result};

/// Read-only source-root classification service.
pub trait SourceRootLookup {
    /// Returns the configured root that `path` falls under.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSourceRoot`] if no configured root contains the
    /// file.
    fn source_root(&self, path: &str) -> Result<String>;
}

/// Source roots configured as an explicit list of repo-relative
/// directories.
///
/// The empty string denotes the repository root itself. Classification
/// picks the longest configured root that is a path-prefix of the file, so
/// nested roots behave intuitively (`src/python` wins over `src`).
#[derive(Debug, Clone, Default)]
pub struct SourceRootConfig {
    roots: Vec<String>,
}

impl SourceRootConfig {
    /// Creates a config from repo-relative root directories.
    ///
    /// Trailing slashes are stripped; `"/"` is normalized to the
    /// repository root.
    #[must_use]
    pub fn new(roots: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let roots = roots
            .into_iter()
            .map(|r| {
                let r: String = r.into();
                r.trim_matches('/').to_string()
            })
            .collect();
        Self { roots }
    }
}

impl SourceRootLookup for SourceRootConfig {
    fn source_root(&self, path: &str) -> Result<String> {
        let mut best: Option<&str> = None;
        for root in &self.roots {
            let contains = root.is_empty()
                || path
                    .strip_prefix(root.as_str())
                    .is_some_and(|rest| rest.starts_with('/'));
            if contains && best.is_none_or(|b| root.len() > b.len()) {
                best = Some(root);
            }
        }
        best.map(str::to_string).ok_or_else(|| Error::NoSourceRoot {
            path: path.to_string(),
        })
    }
}
