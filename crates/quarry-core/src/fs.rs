//! Glob file lookup against the repository tree.
//!
//! Backends resolve user-supplied file patterns through the [`FileLookup`]
//! trait rather than touching the filesystem directly, keeping resolution
//! logic testable with in-memory fakes. [`FsFileLookup`] is the real
//! implementation, built on the `ignore` crate's walker with a glob
//! override set. Build graphs see every file, so ignore-file semantics and
//! hidden-file filtering are disabled.

use std::path::PathBuf;

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;

use crate::error::{Error, Result};

/// Read-only glob expansion service.
///
/// `origin` describes where the pattern came from (a field on a target
/// address) and is embedded in the zero-match error so users can find the
/// offending declaration.
pub trait FileLookup {
    /// Returns the sorted repo-relative paths matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFilesMatched`] when nothing matches and
    /// [`Error::InvalidGlob`] when the pattern does not compile. Whether
    /// multiple matches are acceptable is the caller's decision.
    fn find(&self, pattern: &str, origin: &str) -> Result<Vec<String>>;
}

/// Filesystem-backed [`FileLookup`] rooted at a repository checkout.
#[derive(Debug, Clone)]
pub struct FsFileLookup {
    root: PathBuf,
}

impl FsFileLookup {
    /// Creates a lookup rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileLookup for FsFileLookup {
    fn find(&self, pattern: &str, origin: &str) -> Result<Vec<String>> {
        let mut overrides = OverrideBuilder::new(&self.root);
        overrides.add(pattern).map_err(|e| Error::InvalidGlob {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        let overrides = overrides.build().map_err(|e| Error::InvalidGlob {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .overrides(overrides)
            .build();

        let mut matches = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                let rel = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
                matches.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
        matches.sort();

        tracing::debug!(pattern, origin, count = matches.len(), "glob expanded");
        if matches.is_empty() {
            return Err(Error::NoFilesMatched {
                pattern: pattern.to_string(),
                origin: origin.to_string(),
            });
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn repo_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        dir
    }

    #[test]
    fn find_exact_file() {
        let repo = repo_with(&["pkg/lambda.py", "pkg/other.py"]);
        let lookup = FsFileLookup::new(repo.path());

        let matches = lookup.find("pkg/lambda.py", "test").unwrap();
        assert_eq!(matches, vec!["pkg/lambda.py"]);
    }

    #[test]
    fn find_wildcard_returns_all_sorted() {
        let repo = repo_with(&["pkg/b.py", "pkg/a.py", "pkg/notes.txt"]);
        let lookup = FsFileLookup::new(repo.path());

        let matches = lookup.find("pkg/*.py", "test").unwrap();
        assert_eq!(matches, vec!["pkg/a.py", "pkg/b.py"]);
    }

    #[test]
    fn find_zero_matches_is_error() {
        let repo = repo_with(&["pkg/lambda.py"]);
        let lookup = FsFileLookup::new(repo.path());

        let result = lookup.find("pkg/missing.py", "pkg:lambda's `handler` field");
        match result {
            Err(Error::NoFilesMatched { pattern, origin }) => {
                assert_eq!(pattern, "pkg/missing.py");
                assert!(origin.contains("handler"));
            }
            other => panic!("expected NoFilesMatched, got {other:?}"),
        }
    }

    #[test]
    fn find_sees_hidden_files() {
        let repo = repo_with(&["pkg/.hidden.py"]);
        let lookup = FsFileLookup::new(repo.path());

        let matches = lookup.find("pkg/*.py", "test").unwrap();
        assert_eq!(matches, vec!["pkg/.hidden.py"]);
    }

    #[test]
    fn find_invalid_glob_is_error() {
        let repo = repo_with(&["pkg/lambda.py"]);
        let lookup = FsFileLookup::new(repo.path());

        let result = lookup.find("pkg/[", "test");
        assert!(matches!(result, Err(Error::InvalidGlob { .. })));
    }
}
