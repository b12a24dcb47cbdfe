#![doc = include_str!("../README.md")]
//!
//! ## Modules
//!
//! - [`args`] - Passthrough argument filtering
//! - [`error`] - Error types
//! - [`registries`] - OCI registry configuration
//! - [`subsystem`] - The `[helm]` configuration section
//! - [`tool`] - Tool version manifest and integrity verification

pub mod args;
pub mod error;
pub mod registries;
pub mod subsystem;
pub mod tool;

pub use args::{FilteredArgs, PASSTHROUGH_FLAGS, PASSTHROUGH_OPTIONS, filter_args};
pub use error::{Error, Result};
pub use registries::{HelmRegistries, HelmRegistry, RegistryConfig};
pub use subsystem::HelmSubsystem;
pub use tool::{HELM_DEFAULT_VERSION, HelmTool, KNOWN_VERSIONS, ToolArtifact, url_platform, verify};
