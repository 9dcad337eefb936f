//! Package encoding and decoding errors.

use thiserror::Error;

use crate::formats::ShaderKey;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Invalid package magic: expected {expected:?}, found {found:?}")]
    InvalidMagic { expected: [u8; 4], found: [u8; 4] },

    #[error("Unsupported package version {found} (this build reads version {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Package truncated: needed {needed} bytes for {section}, only {available} available")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Invalid table of contents entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Duplicate shader entry for {0}")]
    DuplicateKey(ShaderKey),

    #[error("No shader entry for {0}")]
    NotFound(ShaderKey),

    #[error("Checksum mismatch for {0}")]
    ChecksumMismatch(ShaderKey),

    #[error("Package {section} too large: {size} bytes does not fit a u32 field")]
    TooLarge { section: &'static str, size: usize },

    #[error("Failed to decode material metadata: {0}")]
    Metadata(#[from] bitcode::Error),
}
