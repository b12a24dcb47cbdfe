#![doc = include_str!("../README.md")]
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`handler`] - Handler field parsing and resolution
//! - [`inference`] - Handler dependency inference
//! - [`runtime`] - Runtime identifier parsing
//! - [`target`] - The lambda target schema

pub mod error;
pub mod handler;
pub mod inference;
pub mod runtime;
pub mod target;

pub use error::{Error, Result};
pub use handler::{HANDLER_ALIAS, HandlerField, ResolvedHandler, resolve_handler};
pub use inference::{InferenceConfig, infer_handler_dependencies};
pub use runtime::{LambdaRuntime, RUNTIME_ALIAS};
pub use target::{LAMBDA_TARGET_ALIAS, LambdaTarget, LambdaTargetSpec};
