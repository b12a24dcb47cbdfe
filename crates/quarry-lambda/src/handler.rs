//! Handler field parsing and resolution.
//!
//! A handler names the function the serverless platform invokes on each
//! triggering event. Users write it either as a qualified module path
//! (`path.to.module:handler_func`) or as a file shorthand relative to the
//! target's directory (`lambda.py:handler_func`). Resolution turns both
//! forms into a [`ResolvedHandler`] holding the importable module path.

use std::fmt;

use quarry_core::{Address, FileLookup, SourceRootLookup};

use crate::error::{Error, Result};

/// The field alias under which handlers are declared.
pub const HANDLER_ALIAS: &str = "handler";

/// Extension marking the file-shorthand form of a handler.
pub const PYTHON_SOURCE_EXTENSION: &str = ".py";

/// A parsed but unresolved handler declaration.
///
/// Splitting happens on the FIRST `:`, so everything after it is the
/// function reference verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerField {
    /// Either a source file relative to the target directory or an
    /// already-qualified dotted module path.
    pub path_or_module: String,

    /// The function name, copied verbatim from the declaration.
    pub function: String,
}

impl HandlerField {
    /// Parses a raw `handler` field value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if the `:` separator is missing or
    /// the function name after it is empty.
    pub fn parse(raw: &str, address: &Address) -> Result<Self> {
        let Some((path_or_module, function)) = raw.split_once(':') else {
            return Err(Error::InvalidField {
                field: HANDLER_ALIAS,
                address: address.clone(),
                reason: "must end in the format `:my_handler_func`".to_string(),
                value: raw.to_string(),
            });
        };
        if function.is_empty() {
            return Err(Error::InvalidField {
                field: HANDLER_ALIAS,
                address: address.clone(),
                reason: "must name a handler function after the `:`".to_string(),
                value: raw.to_string(),
            });
        }
        Ok(Self {
            path_or_module: path_or_module.to_string(),
            function: function.to_string(),
        })
    }
}

impl fmt::Display for HandlerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path_or_module, self.function)
    }
}

/// A fully resolved, importable handler reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHandler {
    /// Dot-separated module path.
    pub module: String,

    /// The function name, unchanged from the declaration.
    pub function: String,
}

impl fmt::Display for ResolvedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.function)
    }
}

/// Resolves a handler declaration to an importable module reference.
///
/// Module-path declarations pass through untouched with no filesystem
/// access. File shorthands are globbed relative to the target's directory,
/// must match exactly one file, and are converted to a module path by
/// stripping the file's source root and extension and replacing path
/// separators with `.`.
///
/// # Errors
///
/// - [`quarry_core::Error::NoFilesMatched`] if the shorthand matches no
///   file (surfaced from the lookup with origin context).
/// - [`Error::AmbiguousHandler`] if it matches more than one file, which
///   usually means a wildcard was used by accident.
/// - [`quarry_core::Error::NoSourceRoot`] if the matched file is outside
///   every configured source root.
pub fn resolve_handler(
    field: &HandlerField,
    address: &Address,
    lookup: &dyn FileLookup,
    roots: &dyn SourceRootLookup,
) -> Result<ResolvedHandler> {
    if !field.path_or_module.ends_with(PYTHON_SOURCE_EXTENSION) {
        return Ok(ResolvedHandler {
            module: field.path_or_module.clone(),
            function: field.function.clone(),
        });
    }

    let pattern = if address.spec_path.is_empty() {
        field.path_or_module.clone()
    } else {
        format!("{}/{}", address.spec_path, field.path_or_module)
    };
    let origin = format!("{address}'s `{HANDLER_ALIAS}` field");
    let matches = lookup.find(&pattern, &origin)?;
    if matches.len() != 1 {
        return Err(Error::AmbiguousHandler {
            handler: field.to_string(),
            address: address.clone(),
            matches,
        });
    }

    let file = &matches[0];
    let root = roots.source_root(file)?;
    let stripped = if root.is_empty() {
        file.as_str()
    } else {
        file.strip_prefix(root.as_str())
            .map_or(file.as_str(), |rest| rest.trim_start_matches('/'))
    };
    let module = stripped
        .strip_suffix(PYTHON_SOURCE_EXTENSION)
        .unwrap_or(stripped)
        .replace('/', ".");

    tracing::debug!(%address, handler = %field, %module, "resolved handler file to module");
    Ok(ResolvedHandler {
        module,
        function: field.function.clone(),
    })
}
