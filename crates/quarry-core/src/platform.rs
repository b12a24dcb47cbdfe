//! Platform identification.
//!
//! External tools are published per platform; backends use these
//! identifiers to pick manifest rows and build download URLs.

use std::fmt;

use crate::error::{Error, Result};

/// Platforms that external tools are published for.
///
/// The set is deliberately closed: backends match on it exhaustively to
/// keep version manifests total, so growing it is a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux on 64-bit ARM
    LinuxArm64,
    /// Linux on x86-64
    LinuxX8664,
    /// macOS on Apple silicon
    MacosArm64,
    /// macOS on x86-64
    MacosX8664,
}

impl Platform {
    /// All supported platforms.
    ///
    /// Useful for iterating manifest rows or checking coverage of a
    /// version table.
    pub const ALL: &'static [Self] = &[
        Self::LinuxArm64,
        Self::LinuxX8664,
        Self::MacosArm64,
        Self::MacosX8664,
    ];

    /// Returns the internal platform identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use quarry_core::Platform;
    ///
    /// assert_eq!(Platform::LinuxX8664.as_str(), "linux_x86_64");
    /// assert_eq!(Platform::MacosArm64.as_str(), "macos_arm64");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LinuxArm64 => "linux_arm64",
            Self::LinuxX8664 => "linux_x86_64",
            Self::MacosArm64 => "macos_arm64",
            Self::MacosX8664 => "macos_x86_64",
        }
    }

    /// Detects the platform the current process is running on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] on any OS/architecture pair
    /// outside the published set.
    pub fn current() -> Result<Self> {
        match (std::env::consts::OS, std::env::consts::ARCH) {
            ("linux", "aarch64") => Ok(Self::LinuxArm64),
            ("linux", "x86_64") => Ok(Self::LinuxX8664),
            ("macos", "aarch64") => Ok(Self::MacosArm64),
            ("macos", "x86_64") => Ok(Self::MacosX8664),
            (os, arch) => Err(Error::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
