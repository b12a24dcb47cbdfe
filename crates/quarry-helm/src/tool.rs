//! Tool version manifest and integrity verification.
//!
//! The manifest pins every helm release the backend knows how to fetch:
//! one row per (version, platform) with the artifact's SHA-256 and byte
//! size. Download URLs come from a fixed template plus the mapping from
//! internal platform identifiers to helm's own platform naming.

use std::thread;
use std::time::Duration;

use sha2::{Digest, Sha256};

use quarry_core::Platform;

use crate::error::{Error, Result};

/// The helm version used when none is configured.
pub const HELM_DEFAULT_VERSION: &str = "3.11.1";

/// Download URL template; `{version}` and `{platform}` are substituted.
pub const URL_TEMPLATE: &str = "https://get.helm.sh/helm-v{version}-{platform}.tar.gz";

/// A pinned release artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolArtifact {
    /// The helm version.
    pub version: &'static str,
    /// The platform the artifact is built for.
    pub platform: Platform,
    /// Hex SHA-256 of the release tarball.
    pub sha256: &'static str,
    /// Byte size of the release tarball.
    pub size: u64,
}

/// Every release artifact this backend knows.
pub const KNOWN_VERSIONS: &[ToolArtifact] = &[
    ToolArtifact {
        version: "3.11.1",
        platform: Platform::LinuxArm64,
        sha256: "919173e8fb7a3b54d76af9feb92e49e86d5a80c5185020bae8c393fa0f0de1e8",
        size: 13_484_900,
    },
    ToolArtifact {
        version: "3.11.1",
        platform: Platform::LinuxX8664,
        sha256: "0b1be96b66fab4770526f136f5f1a385a47c41923d33aab0dcb500e0f6c1bf7c",
        size: 15_023_104,
    },
    ToolArtifact {
        version: "3.11.1",
        platform: Platform::MacosArm64,
        sha256: "43d0198a7a2ea2639caafa81bb0596c97bee2d4e40df50b36202343eb4d5c46b",
        size: 14_934_852,
    },
    ToolArtifact {
        version: "3.11.1",
        platform: Platform::MacosX8664,
        sha256: "2548a90e5cc957ccc5016b47060665a9d2cd4d5b4d61dcc32f5de3144d103826",
        size: 15_757_902,
    },
    ToolArtifact {
        version: "3.10.0",
        platform: Platform::LinuxArm64,
        sha256: "3b72f5f8a60772fb156d0a4ab93272e8da7ef4d18e6421a7020d7c019f521fc1",
        size: 13_055_719,
    },
    ToolArtifact {
        version: "3.10.0",
        platform: Platform::LinuxX8664,
        sha256: "bf56beb418bb529b5e0d6d43d56654c5a03f89c98400b409d1013a33d9586474",
        size: 14_530_566,
    },
    ToolArtifact {
        version: "3.10.0",
        platform: Platform::MacosArm64,
        sha256: "f7f6558ebc8211824032a7fdcf0d55ad064cb33ec1eeec3d18057b9fe2e04dbe",
        size: 14_446_277,
    },
    ToolArtifact {
        version: "3.10.0",
        platform: Platform::MacosX8664,
        sha256: "1e7fd528482ac2ef2d79fe300724b3e07ff6f846a2a9b0b0fe6f5fa05691786b",
        size: 15_237_557,
    },
    ToolArtifact {
        version: "3.8.0",
        platform: Platform::LinuxArm64,
        sha256: "23e08035dc0106fe4e0bd85800fd795b2b9ecd9f32187aa16c49b0a917105161",
        size: 12_324_642,
    },
    ToolArtifact {
        version: "3.8.0",
        platform: Platform::LinuxX8664,
        sha256: "8408c91e846c5b9ba15eb6b1a5a79fc22dd4d33ac6ea63388e5698d1b2320c8b",
        size: 13_626_774,
    },
    ToolArtifact {
        version: "3.8.0",
        platform: Platform::MacosArm64,
        sha256: "751348f1a4a876ffe089fd68df6aea310fd05fe3b163ab76aa62632e327122f3",
        size: 14_078_604,
    },
    ToolArtifact {
        version: "3.8.0",
        platform: Platform::MacosX8664,
        sha256: "532ddd6213891084873e5c2dcafa577f425ca662a6594a3389e288fc48dc2089",
        size: 14_318_316,
    },
];

/// Maps an internal platform identifier to helm's platform naming.
#[must_use]
pub const fn url_platform(platform: Platform) -> &'static str {
    match platform {
        Platform::LinuxArm64 => "linux-arm64",
        Platform::LinuxX8664 => "linux-amd64",
        Platform::MacosArm64 => "darwin-arm64",
        Platform::MacosX8664 => "darwin-amd64",
    }
}

const MAX_RETRIES: u32 = 3;
const RETRY_DELAYS_MS: [u64; 3] = [100, 500, 2000];
const SIZE_LIMIT: u64 = 64 * 1024 * 1024;

/// A configured helm release.
#[derive(Debug, Clone)]
pub struct HelmTool {
    version: String,
}

impl Default for HelmTool {
    fn default() -> Self {
        Self::new(HELM_DEFAULT_VERSION)
    }
}

impl HelmTool {
    /// Creates a tool pinned at `version`.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// The configured version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Builds the release download URL for `platform`.
    #[must_use]
    pub fn download_url(&self, platform: Platform) -> String {
        URL_TEMPLATE
            .replace("{version}", &self.version)
            .replace("{platform}", url_platform(platform))
    }

    /// Path of the helm executable inside the unpacked release archive.
    #[must_use]
    pub fn exe_path(&self, platform: Platform) -> String {
        format!("{}/helm", url_platform(platform))
    }

    /// Looks up the manifest row for this version on `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownToolVersion`] naming the versions present
    /// in the manifest.
    pub fn artifact(&self, platform: Platform) -> Result<&'static ToolArtifact> {
        KNOWN_VERSIONS
            .iter()
            .find(|a| a.version == self.version && a.platform == platform)
            .ok_or_else(|| Error::UnknownToolVersion {
                version: self.version.clone(),
                platform,
                known: known_versions().join(", "),
            })
    }

    /// Fetches and verifies the release artifact for `platform`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown version/platform pair, on HTTP errors after
    /// the bounded retry budget, and on size or checksum mismatches.
    pub fn fetch(&self, platform: Platform) -> Result<Vec<u8>> {
        let artifact = self.artifact(platform)?;
        let url = self.download_url(platform);
        tracing::debug!(%url, version = self.version, %platform, "fetching helm release");
        let bytes = fetch_bytes(&url)?;
        verify(&bytes, artifact)?;
        Ok(bytes)
    }
}

/// Distinct versions present in the manifest, in table order.
fn known_versions() -> Vec<&'static str> {
    let mut versions = Vec::new();
    for artifact in KNOWN_VERSIONS {
        if !versions.contains(&artifact.version) {
            versions.push(artifact.version);
        }
    }
    versions
}

/// Checks a downloaded artifact against its manifest row: byte size
/// first, then SHA-256.
///
/// # Errors
///
/// Returns [`Error::SizeMismatch`] or [`Error::ChecksumMismatch`].
pub fn verify(bytes: &[u8], artifact: &ToolArtifact) -> Result<()> {
    let actual_size = bytes.len() as u64;
    if actual_size != artifact.size {
        return Err(Error::SizeMismatch {
            expected: artifact.size,
            actual: actual_size,
        });
    }
    let digest = hex::encode(Sha256::digest(bytes));
    if !digest.eq_ignore_ascii_case(artifact.sha256) {
        return Err(Error::ChecksumMismatch {
            expected: artifact.sha256.to_string(),
            actual: digest,
        });
    }
    Ok(())
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let mut last_error = None;

    for attempt in 0..MAX_RETRIES {
        match try_fetch(url) {
            Ok(bytes) => return Ok(bytes),
            Err(e) => {
                if is_retryable(&e) && attempt < MAX_RETRIES - 1 {
                    thread::sleep(Duration::from_millis(RETRY_DELAYS_MS[attempt as usize]));
                    last_error = Some(e);
                } else {
                    return Err(e);
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::Http("max retries exceeded".into())))
}

fn try_fetch(url: &str) -> Result<Vec<u8>> {
    let mut response = ureq::get(url).call().map_err(|e| match e {
        ureq::Error::StatusCode(code) => Error::Http(format!("HTTP {code} for {url}")),
        ureq::Error::Io(io_err) => Error::Http(format!("transport error: {io_err}")),
        _ => Error::Http(format!("request failed: {e}")),
    })?;

    let bytes = response
        .body_mut()
        .with_config()
        .limit(SIZE_LIMIT)
        .read_to_vec()
        .map_err(|e| Error::Http(format!("read error: {e}")))?;
    Ok(bytes)
}

fn is_retryable(e: &Error) -> bool {
    match e {
        Error::Http(msg) => {
            msg.contains("transport")
                || msg.contains("HTTP 5")
                || msg.contains("timeout")
                || msg.contains("connection")
        }
        _ => false,
    }
}
