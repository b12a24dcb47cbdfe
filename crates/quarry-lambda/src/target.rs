//! The lambda target schema.
//!
//! A `python_awslambda` target declares a self-contained function suitable
//! for uploading to the serverless platform. Declarations arrive as a raw
//! [`LambdaTargetSpec`] (what the build-file parser hands over) and are
//! validated field by field into a [`LambdaTarget`], failing fast with the
//! declaring address in every message.

use serde::Deserialize;

use quarry_core::Address;

use crate::error::Result;
use crate::handler::HandlerField;
use crate::runtime::LambdaRuntime;

/// The target type alias used in build files.
pub const LAMBDA_TARGET_ALIAS: &str = "python_awslambda";

/// Maximum number of source files a lambda target may own.
///
/// The packaged artifact has a single entry module; additional sources
/// belong in library targets the lambda depends on.
pub const MAX_SOURCE_FILES: usize = 1;

/// A raw, unvalidated lambda target declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct LambdaTargetSpec {
    /// The declaring address, `path/to/dir:name`.
    pub address: String,

    /// Raw `handler` field value.
    pub handler: String,

    /// Raw `runtime` field value.
    pub runtime: String,

    /// Optional source glob; at most [`MAX_SOURCE_FILES`] file.
    #[serde(default)]
    pub sources: Option<String>,

    /// Where the packaged artifact is written, relative to the
    /// distribution directory.
    #[serde(default)]
    pub output_path: Option<String>,

    /// Explicitly declared dependency addresses.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Interpreter constraint strings, carried opaquely to the
    /// interpreter selection rules.
    #[serde(default)]
    pub interpreter_constraints: Vec<String>,
}

/// A validated lambda target.
#[derive(Debug, Clone)]
pub struct LambdaTarget {
    /// The declaring address.
    pub address: Address,

    /// Parsed handler declaration.
    pub handler: HandlerField,

    /// Parsed runtime identifier.
    pub runtime: LambdaRuntime,

    /// Optional source glob.
    pub sources: Option<String>,

    /// Artifact output path override.
    pub output_path: Option<String>,

    /// Explicit dependencies.
    pub dependencies: Vec<Address>,

    /// Interpreter constraint strings.
    pub interpreter_constraints: Vec<String>,
}

impl LambdaTarget {
    /// Validates a raw declaration into a typed target.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid field, carrying the field alias, the
    /// declaring address and the offending value.
    pub fn from_spec(spec: LambdaTargetSpec) -> Result<Self> {
        let address = Address::parse(&spec.address)?;
        let handler = HandlerField::parse(&spec.handler, &address)?;
        let runtime = LambdaRuntime::parse(&spec.runtime, &address)?;
        let dependencies = spec
            .dependencies
            .iter()
            .map(|raw| Address::parse(raw).map_err(Into::into))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            address,
            handler,
            runtime,
            sources: spec.sources,
            output_path: spec.output_path,
            dependencies,
            interpreter_constraints: spec.interpreter_constraints,
        })
    }
}
