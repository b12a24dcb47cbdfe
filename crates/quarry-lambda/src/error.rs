//! Error types for the lambda backend.

use quarry_core::Address;

/// Errors that can occur while validating or resolving lambda targets.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A field value failed validation.
    ///
    /// Carries the field alias, the declaring address and the offending
    /// value so the user can correct the declaration without consulting
    /// documentation.
    #[error("the `{field}` field in target at {address} {reason}, but was {value:?}")]
    InvalidField {
        /// The field alias (e.g. `handler`).
        field: &'static str,
        /// The target declaring the field.
        address: Address,
        /// What a valid value looks like.
        reason: String,
        /// The offending value.
        value: String,
    },

    /// A handler file shorthand matched more than one file.
    #[error(
        "multiple files matched the `handler` {handler:?} for the target {address}, \
         but only one file expected. Are you using a glob, rather than a file \
         name?\n\nAll matching files: {matches:?}"
    )]
    AmbiguousHandler {
        /// The raw handler value.
        handler: String,
        /// The target declaring the handler.
        address: Address,
        /// Every file the glob matched.
        matches: Vec<String>,
    },

    /// An engine seam service failed (glob lookup, source roots).
    #[error(transparent)]
    Core(#[from] quarry_core::Error),
}

/// A specialized Result type for lambda backend operations.
pub type Result<T> = std::result::Result<T, Error>;
