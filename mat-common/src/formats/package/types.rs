//! Package header, table of contents entries and shader blobs.

use std::fmt;

use crate::enums::{ShaderModel, ShaderType, TargetApi};
use crate::variant::variant_name;

/// Lookup key of one shader blob inside a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderKey {
    pub shader_model: ShaderModel,
    pub target_api: TargetApi,
    pub variant: u8,
    pub stage: ShaderType,
}

impl ShaderKey {
    pub fn new(
        shader_model: ShaderModel,
        target_api: TargetApi,
        variant: u8,
        stage: ShaderType,
    ) -> Self {
        Self {
            shader_model,
            target_api,
            variant,
            stage,
        }
    }
}

impl fmt::Display for ShaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} (0x{:02X})/{}",
            self.shader_model.name(),
            self.target_api.name(),
            variant_name(self.variant),
            self.variant,
            self.stage.name()
        )
    }
}

/// Representation of a stored shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    /// UTF-8 source text
    Text,
    /// Little-endian u32 words (SPIR-V style)
    Binary,
}

impl ShaderKind {
    pub fn to_u8(self) -> u8 {
        match self {
            ShaderKind::Text => 0,
            ShaderKind::Binary => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ShaderKind::Text),
            1 => Some(ShaderKind::Binary),
            _ => None,
        }
    }
}

/// Package header (16 bytes)
///
/// ```text
/// 0x00: magic [u8; 4]
/// 0x04: version u32
/// 0x08: metadata_len u32
/// 0x0C: entry_count u32
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct PackageHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub metadata_len: u32,
    pub entry_count: u32,
}

impl PackageHeader {
    pub const SIZE: usize = 16;

    pub fn new(metadata_len: u32, entry_count: u32) -> Self {
        Self {
            magic: *crate::PACKAGE_MAGIC,
            version: crate::PACKAGE_VERSION,
            metadata_len,
            entry_count,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.metadata_len.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.entry_count.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            metadata_len: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            entry_count: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }
}

/// Table of contents entry (24 bytes)
///
/// Enum fields are kept raw so that an unknown value can be reported with
/// the index of the entry it came from.
///
/// ```text
/// 0x00: shader_model u8
/// 0x01: target_api u8
/// 0x02: variant u8
/// 0x03: stage u8
/// 0x04: kind u8
/// 0x05: reserved (3 bytes)
/// 0x08: offset u32 (relative to blob region)
/// 0x0C: length u32
/// 0x10: checksum u64 (xxh3-64 of the blob)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ShaderEntryHeader {
    pub shader_model: u8,
    pub target_api: u8,
    pub variant: u8,
    pub stage: u8,
    pub kind: u8,
    pub _reserved: [u8; 3],
    pub offset: u32,
    pub length: u32,
    pub checksum: u64,
}

impl ShaderEntryHeader {
    pub const SIZE: usize = 24;

    pub fn new(key: ShaderKey, kind: ShaderKind, offset: u32, length: u32, checksum: u64) -> Self {
        Self {
            shader_model: key.shader_model.to_u8(),
            target_api: key.target_api.to_u8(),
            variant: key.variant,
            stage: key.stage.to_u8(),
            kind: kind.to_u8(),
            _reserved: [0; 3],
            offset,
            length,
            checksum,
        }
    }

    /// Decode the typed key, `None` if any enum value is unknown
    pub fn key(&self) -> Option<ShaderKey> {
        Some(ShaderKey {
            shader_model: ShaderModel::from_u8(self.shader_model)?,
            target_api: TargetApi::from_u8(self.target_api)?,
            variant: self.variant,
            stage: ShaderType::from_u8(self.stage)?,
        })
    }

    pub fn shader_kind(&self) -> Option<ShaderKind> {
        ShaderKind::from_u8(self.kind)
    }

    /// Write entry to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = self.shader_model;
        bytes[1] = self.target_api;
        bytes[2] = self.variant;
        bytes[3] = self.stage;
        bytes[4] = self.kind;
        // reserved bytes stay 0
        bytes[8..12].copy_from_slice(&self.offset.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.length.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.checksum.to_le_bytes());
        bytes
    }

    /// Read entry from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let mut checksum = [0u8; 8];
        checksum.copy_from_slice(&bytes[16..24]);
        Some(Self {
            shader_model: bytes[0],
            target_api: bytes[1],
            variant: bytes[2],
            stage: bytes[3],
            kind: bytes[4],
            _reserved: [0; 3],
            offset: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            length: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
            checksum: u64::from_le_bytes(checksum),
        })
    }
}

/// One generated shader, ready to be written into a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderBlob {
    Text(String),
    Binary(Vec<u32>),
}

impl ShaderBlob {
    pub fn kind(&self) -> ShaderKind {
        match self {
            ShaderBlob::Text(_) => ShaderKind::Text,
            ShaderBlob::Binary(_) => ShaderKind::Binary,
        }
    }

    /// Size of the stored byte representation
    pub fn byte_len(&self) -> usize {
        match self {
            ShaderBlob::Text(text) => text.len(),
            ShaderBlob::Binary(words) => words.len() * 4,
        }
    }

    /// Stored byte representation
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            ShaderBlob::Text(text) => text.as_bytes().to_vec(),
            ShaderBlob::Binary(words) => words.iter().flat_map(|w| w.to_le_bytes()).collect(),
        }
    }

    /// Rebuild a blob from its stored bytes, `None` if the bytes don't fit the kind
    pub fn from_bytes(kind: ShaderKind, bytes: &[u8]) -> Option<Self> {
        match kind {
            ShaderKind::Text => String::from_utf8(bytes.to_vec()).ok().map(ShaderBlob::Text),
            ShaderKind::Binary => {
                if bytes.len() % 4 != 0 {
                    return None;
                }
                let words = bytes
                    .chunks_exact(4)
                    .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect();
                Some(ShaderBlob::Binary(words))
            }
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ShaderBlob::Text(text) => Some(text),
            ShaderBlob::Binary(_) => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u32]> {
        match self {
            ShaderBlob::Text(_) => None,
            ShaderBlob::Binary(words) => Some(words),
        }
    }
}

/// Shader blob tagged with its lookup key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedShader {
    pub key: ShaderKey,
    pub blob: ShaderBlob,
}

impl PackedShader {
    pub fn new(key: ShaderKey, blob: ShaderBlob) -> Self {
        Self { key, blob }
    }

    pub fn kind(&self) -> ShaderKind {
        self.blob.kind()
    }
}
