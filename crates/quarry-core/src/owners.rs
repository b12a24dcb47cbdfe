//! Module-ownership index.
//!
//! Maps a dotted module path to the targets whose sources provide it. The
//! engine maintains the real index from first-party sources and resolved
//! third-party requirements; [`ModuleMapping`] is the in-memory form used
//! by tests and standalone callers.

use std::collections::HashMap;

use crate::address::Address;

/// Read-only module-ownership lookup.
pub trait ModuleOwners {
    /// Returns the targets that provide `module`.
    ///
    /// Unknown modules yield an empty set; absence is not an error at this
    /// seam.
    fn owners(&self, module: &str) -> Vec<Address>;
}

/// In-memory [`ModuleOwners`] implementation.
#[derive(Debug, Clone, Default)]
pub struct ModuleMapping {
    map: HashMap<String, Vec<Address>>,
}

impl ModuleMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `address` as an owner of `module`.
    pub fn insert(&mut self, module: impl Into<String>, address: Address) -> &mut Self {
        self.map.entry(module.into()).or_default().push(address);
        self
    }
}

impl ModuleOwners for ModuleMapping {
    fn owners(&self, module: &str) -> Vec<Address> {
        self.map.get(module).cloned().unwrap_or_default()
    }
}
