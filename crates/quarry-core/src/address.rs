//! Target addresses.
//!
//! An [`Address`] names a target in the build graph: the repo-relative
//! directory of its declaration (`spec_path`) plus the target name,
//! displayed as `path/to/dir:name`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The identity of a target in the build graph.
///
/// Addresses appear in every user-facing error message so users can find
/// the declaration that needs correcting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Repo-relative directory containing the target declaration.
    ///
    /// Empty for targets declared at the repository root.
    pub spec_path: String,

    /// The target name, unique within its `spec_path`.
    pub name: String,
}

impl Address {
    /// Creates an address from its two components.
    #[must_use]
    pub fn new(spec_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            spec_path: spec_path.into(),
            name: name.into(),
        }
    }

    /// Parses an address of the form `path/to/dir:name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if the separator is missing, the
    /// name is empty, or either component contains whitespace.
    pub fn parse(raw: &str) -> Result<Self> {
        let Some((spec_path, name)) = raw.split_once(':') else {
            return Err(Error::InvalidAddress {
                value: raw.to_string(),
                reason: "missing `:` separator before the target name".to_string(),
            });
        };
        if name.is_empty() {
            return Err(Error::InvalidAddress {
                value: raw.to_string(),
                reason: "target name is empty".to_string(),
            });
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(Error::InvalidAddress {
                value: raw.to_string(),
                reason: "addresses must not contain whitespace".to_string(),
            });
        }
        Ok(Self::new(spec_path, name))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.spec_path, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        let addr = Address::parse("src/py/project:lambda").unwrap();
        assert_eq!(addr.spec_path, "src/py/project");
        assert_eq!(addr.name, "lambda");
        assert_eq!(addr.to_string(), "src/py/project:lambda");
    }

    #[test]
    fn parse_root_target() {
        let addr = Address::parse(":tool").unwrap();
        assert_eq!(addr.spec_path, "");
        assert_eq!(addr.name, "tool");
    }

    #[test]
    fn parse_missing_separator_fails() {
        let result = Address::parse("src/py/project");
        assert!(matches!(result, Err(Error::InvalidAddress { .. })));
    }

    #[test]
    fn parse_empty_name_fails() {
        let result = Address::parse("src/py/project:");
        assert!(matches!(result, Err(Error::InvalidAddress { .. })));
    }

    #[test]
    fn parse_whitespace_fails() {
        let result = Address::parse("src/py :lambda");
        assert!(matches!(result, Err(Error::InvalidAddress { .. })));
    }
}
