//! Error types for the helm backend.

use quarry_core::Platform;

use crate::args::invalid_args_message;

/// Errors that can occur while configuring or invoking the helm tool.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// One or more passthrough arguments are outside the allow-list.
    ///
    /// The message names every rejected token and bullet-lists the full
    /// allowed set so the user can self-correct.
    #[error("{}", invalid_args_message(.rejected))]
    InvalidPassthroughArgs {
        /// The rejected tokens, in input order.
        rejected: Vec<String>,
    },

    /// A configured registry entry is invalid.
    #[error("invalid helm registry {alias:?} ({address}): {reason}")]
    InvalidRegistry {
        /// The registry alias.
        alias: String,
        /// The configured address.
        address: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `@alias` registry reference names no configured registry.
    #[error("unknown helm registry alias: @{alias}")]
    UnknownRegistryAlias {
        /// The alias that was referenced.
        alias: String,
    },

    /// No manifest row for the requested tool version/platform pair.
    #[error("no known helm {version} artifact for {platform}; known versions: {known}")]
    UnknownToolVersion {
        /// The requested version.
        version: String,
        /// The requested platform.
        platform: Platform,
        /// Comma-separated versions present in the manifest.
        known: String,
    },

    /// A downloaded artifact's size does not match the manifest.
    #[error("helm artifact size mismatch: expected {expected} bytes, got {actual} bytes")]
    SizeMismatch {
        /// Byte size from the manifest.
        expected: u64,
        /// Byte size of the downloaded artifact.
        actual: u64,
    },

    /// A downloaded artifact's SHA-256 does not match the manifest.
    #[error("helm artifact checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Hex digest from the manifest.
        expected: String,
        /// Hex digest of the downloaded artifact.
        actual: String,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// TOML configuration parsing failed.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON configuration parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for helm backend operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unknown_alias() {
        let err = Error::UnknownRegistryAlias {
            alias: "prod".to_string(),
        };
        assert_eq!(err.to_string(), "unknown helm registry alias: @prod");
    }

    #[test]
    fn error_display_checksum_mismatch() {
        let err = Error::ChecksumMismatch {
            expected: "abc".to_string(),
            actual: "def".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "helm artifact checksum mismatch: expected abc, got def"
        );
    }

    #[test]
    fn error_display_invalid_args_lists_allowed_set() {
        let err = Error::InvalidPassthroughArgs {
            rejected: vec!["--bogus".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("--bogus"));
        assert!(msg.contains("--atomic"));
        assert!(msg.contains("--kube-token"));
    }
}
