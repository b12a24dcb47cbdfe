#![doc = include_str!("../README.md")]
//!
//! ## Modules
//!
//! - [`address`] - Target addresses
//! - [`error`] - Error types
//! - [`fs`] - Glob file lookup
//! - [`owners`] - Module-ownership index
//! - [`platform`] - Platform identification
//! - [`source_root`] - Source-root classification

pub mod address;
pub mod error;
pub mod fs;
pub mod owners;
pub mod platform;
pub mod source_root;

pub use address::Address;
pub use error::{Error, Result};
pub use fs::{FileLookup, FsFileLookup};
pub use owners::{ModuleMapping, ModuleOwners};
pub use platform::Platform;
pub use source_root::{SourceRootConfig, SourceRootLookup};
