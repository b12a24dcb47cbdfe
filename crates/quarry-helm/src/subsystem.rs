//! The `[helm]` configuration section.

use std::collections::HashMap;

use serde::Deserialize;

use crate::args::filter_args;
use crate::error::{Error, Result};
use crate::registries::{HelmRegistries, RegistryConfig};

/// Options for the helm command line.
///
/// Deserialized from the `[helm]` section of the engine's TOML
/// configuration; every option has a default so the section may be
/// omitted entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HelmSubsystem {
    /// Raw OCI registry entries, keyed by alias. See
    /// [`HelmRegistries`] for validation and default semantics.
    pub registries: HashMap<String, RegistryConfig>,

    /// Enables strict linting of charts.
    pub lint_strict: bool,

    /// Where to push charts when no specific registry repository is
    /// given. Without it, charts go to the root of the OCI registry.
    pub default_registry_repository: Option<String>,

    /// Additional environment variables made available to helm processes
    /// and during value interpolation.
    pub extra_env_vars: Vec<String>,

    /// Whether the tailor goal generates chart targets.
    pub tailor_charts: bool,

    /// Whether the tailor goal generates unittest targets.
    pub tailor_unittests: bool,

    /// Passthrough arguments for helm invocations; validated against the
    /// allow-list by [`HelmSubsystem::valid_args`].
    pub args: Vec<String>,
}

impl Default for HelmSubsystem {
    fn default() -> Self {
        Self {
            registries: HashMap::new(),
            lint_strict: false,
            default_registry_repository: None,
            extra_env_vars: Vec::new(),
            tailor_charts: true,
            tailor_unittests: true,
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDoc {
    #[serde(default)]
    helm: HelmSubsystem,
}

impl HelmSubsystem {
    /// Parses the `[helm]` section out of a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TomlParse`] for malformed TOML.
    pub fn from_toml(text: &str) -> Result<Self> {
        let doc: ConfigDoc = toml::from_str(text)?;
        Ok(doc.helm)
    }

    /// Returns the configured passthrough arguments, validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPassthroughArgs`] naming every rejected
    /// token together with the full allowed set.
    pub fn valid_args(&self) -> Result<Vec<String>> {
        let filtered = filter_args(self.args.iter().cloned());
        if !filtered.rejected.is_empty() {
            return Err(Error::InvalidPassthroughArgs {
                rejected: filtered.rejected,
            });
        }
        Ok(filtered.accepted)
    }

    /// Validates the raw registry entries into a [`HelmRegistries`] set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegistry`] for a malformed entry.
    pub fn registries(&self) -> Result<HelmRegistries> {
        HelmRegistries::from_config(&self.registries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let subsystem = HelmSubsystem::default();
        assert!(!subsystem.lint_strict);
        assert!(subsystem.tailor_charts);
        assert!(subsystem.tailor_unittests);
        assert!(subsystem.args.is_empty());
        assert!(subsystem.registries.is_empty());
    }

    #[test]
    fn from_toml_missing_section_uses_defaults() {
        let subsystem = HelmSubsystem::from_toml("[other]\nkey = 1\n").unwrap();
        assert!(subsystem.tailor_charts);
    }

    #[test]
    fn from_toml_full_section() {
        let subsystem = HelmSubsystem::from_toml(
            r#"
            [helm]
            lint_strict = true
            tailor_charts = false
            default_registry_repository = "charts"
            extra_env_vars = ["HELM_CACHE_HOME"]
            args = ["--dry-run", "--kubeconfig", "/tmp/cfg"]

            [helm.registries.internal]
            address = "oci://registry.example.com"
            default = true
            "#,
        )
        .unwrap();

        assert!(subsystem.lint_strict);
        assert!(!subsystem.tailor_charts);
        assert!(subsystem.tailor_unittests);
        assert_eq!(
            subsystem.default_registry_repository.as_deref(),
            Some("charts")
        );
        assert_eq!(subsystem.extra_env_vars, vec!["HELM_CACHE_HOME"]);

        let registries = subsystem.registries().unwrap();
        assert_eq!(registries.default_registries().len(), 1);
    }

    #[test]
    fn from_toml_malformed_fails() {
        assert!(matches!(
            HelmSubsystem::from_toml("[helm\nbroken"),
            Err(Error::TomlParse(_))
        ));
    }

    #[test]
    fn valid_args_accepts_allowed() {
        let subsystem = HelmSubsystem {
            args: vec![
                "--dry-run".to_string(),
                "--kubeconfig".to_string(),
                "/tmp/cfg".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(
            subsystem.valid_args().unwrap(),
            vec!["--dry-run", "--kubeconfig", "/tmp/cfg"]
        );
    }

    #[test]
    fn valid_args_rejects_unknown_with_full_reference() {
        let subsystem = HelmSubsystem {
            args: vec!["--dry-run".to_string(), "--bogus".to_string()],
            ..Default::default()
        };
        let err = subsystem.valid_args().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("--bogus"));
        assert!(msg.contains("--atomic"));
        assert!(!msg.contains("--dry-run."));
    }

    #[test]
    fn registry_validation_propagates() {
        let subsystem = HelmSubsystem::from_toml(
            r#"
            [helm.registries.bad]
            address = "https://example.com"
            "#,
        )
        .unwrap();
        assert!(matches!(
            subsystem.registries(),
            Err(Error::InvalidRegistry { .. })
        ));
    }
}
