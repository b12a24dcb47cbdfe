//! OCI registry configuration.
//!
//! Charts are pushed to and resolved from OCI registries configured under
//! `[helm.registries]`. Each entry maps an alias to an `oci://` address;
//! an entry is a default push/pull destination when it sets
//! `default = true` or its alias is literally `default`. Targets refer to
//! registries either by `@alias` or by a literal `oci://` address.

use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// The alias that marks a registry as default by name alone.
pub const DEFAULT_ALIAS: &str = "default";

/// URL scheme required of registry addresses.
pub const OCI_SCHEME: &str = "oci";

/// A raw registry entry as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    /// Registry address, `oci://registry-domain:port`.
    pub address: String,

    /// Marks this registry as a default destination.
    #[serde(default)]
    pub default: bool,
}

/// A validated registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmRegistry {
    /// The configured alias.
    pub alias: String,

    /// The validated address, without trailing slash.
    pub address: String,

    /// Whether this registry is a default destination.
    pub is_default: bool,
}

/// The validated set of configured registries, keyed by alias.
#[derive(Debug, Clone, Default)]
pub struct HelmRegistries {
    registries: HashMap<String, HelmRegistry>,
}

impl HelmRegistries {
    /// Validates a raw configuration map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegistry`] if an address does not parse as
    /// a URL or has a scheme other than `oci`.
    pub fn from_config(config: &HashMap<String, RegistryConfig>) -> Result<Self> {
        let mut registries = HashMap::new();
        for (alias, entry) in config {
            let address = validate_address(alias, &entry.address)?;
            let is_default = entry.default || alias == DEFAULT_ALIAS;
            registries.insert(
                alias.clone(),
                HelmRegistry {
                    alias: alias.clone(),
                    address,
                    is_default,
                },
            );
        }
        Ok(Self { registries })
    }

    /// Parses a JSON document of the raw configuration shape.
    ///
    /// Supports the `registries` option's from-file form.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: HashMap<String, RegistryConfig> = serde_json::from_str(text)?;
        Self::from_config(&config)
    }

    /// Returns the default registries, sorted by alias for deterministic
    /// iteration.
    #[must_use]
    pub fn default_registries(&self) -> Vec<&HelmRegistry> {
        let mut defaults: Vec<&HelmRegistry> = self
            .registries
            .values()
            .filter(|r| r.is_default)
            .collect();
        defaults.sort_by(|a, b| a.alias.cmp(&b.alias));
        defaults
    }

    /// Resolves a registry reference to an address.
    ///
    /// `@alias` references look up the configured set; anything else must
    /// be a literal `oci://` address and passes through validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRegistryAlias`] for an unconfigured alias
    /// and [`Error::InvalidRegistry`] for a malformed literal address.
    pub fn resolve(&self, reference: &str) -> Result<String> {
        if let Some(alias) = reference.strip_prefix('@') {
            return self
                .registries
                .get(alias)
                .map(|r| r.address.clone())
                .ok_or_else(|| Error::UnknownRegistryAlias {
                    alias: alias.to_string(),
                });
        }
        validate_address(reference, reference)
    }
}

fn validate_address(alias: &str, address: &str) -> Result<String> {
    let invalid = |reason: String| Error::InvalidRegistry {
        alias: alias.to_string(),
        address: address.to_string(),
        reason,
    };
    let url = Url::parse(address).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != OCI_SCHEME {
        return Err(invalid(format!(
            "scheme must be `{OCI_SCHEME}`, got `{}`",
            url.scheme()
        )));
    }
    Ok(address.trim_end_matches('/').to_string())
}
