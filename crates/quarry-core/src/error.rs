//! Error types for engine seam services.

/// Errors that can occur in the engine seam services.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A target address could not be parsed.
    #[error("invalid target address {value:?}: {reason}")]
    InvalidAddress {
        /// The raw address string.
        value: String,
        /// Explanation of what is malformed.
        reason: String,
    },

    /// A glob pattern could not be compiled.
    #[error("invalid glob {pattern:?}: {reason}")]
    InvalidGlob {
        /// The raw glob pattern.
        pattern: String,
        /// Explanation from the glob compiler.
        reason: String,
    },

    /// A glob matched no files.
    ///
    /// Carries the origin description so the user knows which field or
    /// option produced the pattern.
    #[error("no files matched glob {pattern:?} from {origin}")]
    NoFilesMatched {
        /// The glob pattern that matched nothing.
        pattern: String,
        /// Where the pattern came from (field, target address).
        origin: String,
    },

    /// A file is not under any configured source root.
    #[error("no source root found for {path:?}")]
    NoSourceRoot {
        /// The file that could not be classified.
        path: String,
    },

    /// The running platform is not one external tools are published for.
    #[error("unsupported platform: {os}/{arch}")]
    UnsupportedPlatform {
        /// Operating system identifier.
        os: String,
        /// CPU architecture identifier.
        arch: String,
    },

    /// An I/O error occurred while walking the repository tree.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for engine seam operations.
pub type Result<T> = std::result::Result<T, Error>;
