//! Runtime identifier parsing.
//!
//! Lambda runtimes are declared as `pythonX.Y`. The parser is explicit
//! rather than regex-based so failures carry a reason instead of a silent
//! non-match, and the implied interpreter version falls out as typed
//! fields rather than capture groups.

use std::fmt;

use quarry_core::Address;

use crate::error::{Error, Result};

/// The field alias under which runtimes are declared.
pub const RUNTIME_ALIAS: &str = "runtime";

/// A parsed `pythonX.Y` runtime identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LambdaRuntime {
    /// Interpreter major version.
    pub major: u32,
    /// Interpreter minor version.
    pub minor: u32,
}

impl LambdaRuntime {
    /// Parses a raw `runtime` field value.
    ///
    /// The accepted form is the literal prefix `python`, a single major
    /// digit, a `.`, and one or more minor digits with nothing trailing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] for any other shape, naming the
    /// expected form.
    pub fn parse(raw: &str, address: &Address) -> Result<Self> {
        let invalid = || Error::InvalidField {
            field: RUNTIME_ALIAS,
            address: address.clone(),
            reason: "must be of the form pythonX.Y".to_string(),
            value: raw.to_string(),
        };

        let rest = raw.strip_prefix("python").ok_or_else(invalid)?;
        let (major, minor) = rest.split_once('.').ok_or_else(invalid)?;
        if major.len() != 1 || minor.is_empty() || !minor.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let major = major.parse().map_err(|_| invalid())?;
        let minor = minor.parse().map_err(|_| invalid())?;
        Ok(Self { major, minor })
    }

    /// Returns the interpreter version implied by the runtime, as
    /// `(major, minor)`.
    #[must_use]
    pub const fn interpreter_version(&self) -> (u32, u32) {
        (self.major, self.minor)
    }
}

impl fmt::Display for LambdaRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "python{}.{}", self.major, self.minor)
    }
}
