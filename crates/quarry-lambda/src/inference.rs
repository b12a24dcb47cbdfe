//! Handler dependency inference.
//!
//! A lambda's handler module is provided by some target in the build
//! graph; that target is an implicit dependency the user should not have
//! to spell out. Inference resolves the handler, asks the ownership index
//! who provides the module, and injects the owners, suppressing the
//! requesting target itself.

use quarry_core::{Address, FileLookup, ModuleOwners, SourceRootLookup};

use crate::error::Result;
use crate::handler::resolve_handler;
use crate::target::LambdaTarget;

/// Switches controlling dependency inference.
#[derive(Debug, Clone, Copy)]
pub struct InferenceConfig {
    /// Whether to infer dependencies from entry-point style fields like
    /// `handler`. Mirrors the engine-wide inference toggle.
    pub infer_handler_owners: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            infer_handler_owners: true,
        }
    }
}

/// Infers the dependencies implied by a target's `handler` field.
///
/// Returns the addresses owning the handler's module, excluding the
/// target's own address. When inference is disabled the result is empty
/// and no lookup of any kind happens.
///
/// # Errors
///
/// Fails if handler resolution fails; the ownership query itself is
/// infallible at this seam.
pub fn infer_handler_dependencies(
    target: &LambdaTarget,
    lookup: &dyn FileLookup,
    roots: &dyn SourceRootLookup,
    owners: &dyn ModuleOwners,
    config: &InferenceConfig,
) -> Result<Vec<Address>> {
    if !config.infer_handler_owners {
        return Ok(Vec::new());
    }

    let resolved = resolve_handler(&target.handler, &target.address, lookup, roots)?;
    let inferred: Vec<Address> = owners
        .owners(&resolved.module)
        .into_iter()
        .filter(|owner| *owner != target.address)
        .collect();
    tracing::debug!(
        address = %target.address,
        module = %resolved.module,
        count = inferred.len(),
        "inferred handler dependencies"
    );
    Ok(inferred)
}

#[cfg(test)]
mod tests {
    use quarry_core::{ModuleMapping, SourceRootConfig};

    use crate::handler::tests::FakeLookup;
    use crate::target::{LambdaTarget, LambdaTargetSpec};

    use super::*;

    fn target(handler: &str) -> LambdaTarget {
        LambdaTarget::from_spec(LambdaTargetSpec {
            address: "pkg:lambda".to_string(),
            handler: handler.to_string(),
            runtime: "python3.9".to_string(),
            sources: None,
            output_path: None,
            dependencies: vec![],
            interpreter_constraints: vec![],
        })
        .unwrap()
    }

    #[test]
    fn infers_owner_of_handler_module() {
        let target = target("pkg.lambda:handler");
        let mut owners = ModuleMapping::new();
        owners.insert("pkg.lambda", Address::new("pkg", "lib"));

        let inferred = infer_handler_dependencies(
            &target,
            &FakeLookup::new(&[]),
            &SourceRootConfig::new(["/"]),
            &owners,
            &InferenceConfig::default(),
        )
        .unwrap();
        assert_eq!(inferred, vec![Address::new("pkg", "lib")]);
    }

    #[test]
    fn suppresses_self_dependency() {
        let target = target("pkg.lambda:handler");
        let mut owners = ModuleMapping::new();
        owners.insert("pkg.lambda", Address::new("pkg", "lambda"));
        owners.insert("pkg.lambda", Address::new("pkg", "lib"));

        let inferred = infer_handler_dependencies(
            &target,
            &FakeLookup::new(&[]),
            &SourceRootConfig::new(["/"]),
            &owners,
            &InferenceConfig::default(),
        )
        .unwrap();
        assert_eq!(inferred, vec![Address::new("pkg", "lib")]);
    }

    #[test]
    fn disabled_config_short_circuits() {
        let target = target("missing.py:handler");
        // Resolution of this handler would fail; disabling inference must
        // skip it entirely.
        let inferred = infer_handler_dependencies(
            &target,
            &FakeLookup::new(&[]),
            &SourceRootConfig::new(["/"]),
            &ModuleMapping::new(),
            &InferenceConfig {
                infer_handler_owners: false,
            },
        )
        .unwrap();
        assert!(inferred.is_empty());
    }

    #[test]
    fn file_shorthand_handler_is_resolved_before_lookup() {
        let target = target("lambda.py:handler");
        let lookup = FakeLookup::new(&[("pkg/lambda.py", &["pkg/lambda.py"])]);
        let mut owners = ModuleMapping::new();
        owners.insert("lambda", Address::new("pkg", "lib"));

        let inferred = infer_handler_dependencies(
            &target,
            &lookup,
            &SourceRootConfig::new(["pkg"]),
            &owners,
            &InferenceConfig::default(),
        )
        .unwrap();
        assert_eq!(inferred, vec![Address::new("pkg", "lib")]);
    }

    #[test]
    fn unknown_module_infers_nothing() {
        let target = target("pkg.lambda:handler");
        let inferred = infer_handler_dependencies(
            &target,
            &FakeLookup::new(&[]),
            &SourceRootConfig::new(["/"]),
            &ModuleMapping::new(),
            &InferenceConfig::default(),
        )
        .unwrap();
        assert!(inferred.is_empty());
    }
}
