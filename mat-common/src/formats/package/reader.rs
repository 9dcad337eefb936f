//! Zero-copy package reader.
//!
//! Parses the header and table of contents only. Metadata and blobs stay
//! borrowed from the input and are decoded on request.

use hashbrown::HashMap;
use xxhash_rust::xxh3::xxh3_64;

use super::types::{PackageHeader, ShaderEntryHeader, ShaderKey, ShaderKind};
use crate::error::PackageError;
use crate::formats::BinarySerializable;
use crate::metadata::MaterialMetadata;
use crate::{PACKAGE_MAGIC, PACKAGE_VERSION};

/// Validated table of contents entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocEntry {
    pub key: ShaderKey,
    pub kind: ShaderKind,
    /// Offset into the blob region
    pub offset: u32,
    pub length: u32,
    pub checksum: u64,
}

/// Borrowing view over serialized package bytes
#[derive(Debug)]
pub struct PackageReader<'a> {
    header: PackageHeader,
    metadata: &'a [u8],
    entries: Vec<TocEntry>,
    index: HashMap<ShaderKey, usize>,
    blobs: &'a [u8],
}

impl<'a> PackageReader<'a> {
    /// Parse header and table of contents
    pub fn new(bytes: &'a [u8]) -> Result<Self, PackageError> {
        let header = PackageHeader::from_bytes(bytes).ok_or(PackageError::Truncated {
            section: "header",
            needed: PackageHeader::SIZE,
            available: bytes.len(),
        })?;

        if &header.magic != PACKAGE_MAGIC {
            return Err(PackageError::InvalidMagic {
                expected: *PACKAGE_MAGIC,
                found: header.magic,
            });
        }
        if header.version != PACKAGE_VERSION {
            return Err(PackageError::UnsupportedVersion {
                found: header.version,
                supported: PACKAGE_VERSION,
            });
        }

        let rest = &bytes[PackageHeader::SIZE..];
        let metadata_len = header.metadata_len as usize;
        let metadata = rest.get(..metadata_len).ok_or(PackageError::Truncated {
            section: "metadata",
            needed: metadata_len,
            available: rest.len(),
        })?;

        let rest = &rest[metadata_len..];
        let entry_count = header.entry_count as usize;
        let toc_len = entry_count
            .checked_mul(ShaderEntryHeader::SIZE)
            .filter(|&len| len <= rest.len())
            .ok_or(PackageError::Truncated {
                section: "table of contents",
                needed: entry_count.saturating_mul(ShaderEntryHeader::SIZE),
                available: rest.len(),
            })?;
        let (toc, blobs) = rest.split_at(toc_len);

        let mut entries = Vec::with_capacity(entry_count);
        let mut index = HashMap::with_capacity(entry_count);
        for (i, raw) in toc.chunks_exact(ShaderEntryHeader::SIZE).enumerate() {
            let entry = parse_entry(i, raw, blobs.len())?;
            if index.insert(entry.key, i).is_some() {
                return Err(PackageError::DuplicateKey(entry.key));
            }
            entries.push(entry);
        }

        Ok(Self {
            header,
            metadata,
            entries,
            index,
            blobs,
        })
    }

    pub fn header(&self) -> &PackageHeader {
        &self.header
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Table of contents, in stored order
    pub fn entries(&self) -> impl Iterator<Item = &TocEntry> + '_ {
        self.entries.iter()
    }

    pub fn entry(&self, key: &ShaderKey) -> Option<&TocEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &ShaderKey) -> bool {
        self.index.contains_key(key)
    }

    /// Borrow the stored bytes of one shader, verifying its checksum
    pub fn extract(&self, key: &ShaderKey) -> Result<&'a [u8], PackageError> {
        let entry = self.entry(key).ok_or(PackageError::NotFound(*key))?;
        let start = entry.offset as usize;
        let data = &self.blobs[start..start + entry.length as usize];
        if xxh3_64(data) != entry.checksum {
            return Err(PackageError::ChecksumMismatch(*key));
        }
        Ok(data)
    }

    /// Decode the material metadata
    pub fn metadata(&self) -> Result<MaterialMetadata, PackageError> {
        Ok(MaterialMetadata::from_bytes(self.metadata)?)
    }
}

fn parse_entry(index: usize, raw: &[u8], blob_len: usize) -> Result<TocEntry, PackageError> {
    let invalid = |reason: String| PackageError::InvalidEntry { index, reason };

    let header = ShaderEntryHeader::deserialize(raw)
        .ok_or_else(|| invalid("entry shorter than 24 bytes".to_string()))?;
    let key = header.key().ok_or_else(|| {
        invalid(format!(
            "unknown key values (shader model {}, target api {}, stage {})",
            header.shader_model, header.target_api, header.stage
        ))
    })?;
    if !key.target_api.is_concrete() {
        return Err(invalid("target api must be concrete".to_string()));
    }
    let kind = header
        .shader_kind()
        .ok_or_else(|| invalid(format!("unknown shader kind {}", header.kind)))?;

    let end = (header.offset as usize).checked_add(header.length as usize);
    if end.is_none_or(|end| end > blob_len) {
        return Err(invalid(format!(
            "blob range {}+{} exceeds blob region of {} bytes",
            header.offset, header.length, blob_len
        )));
    }

    Ok(TocEntry {
        key,
        kind,
        offset: header.offset,
        length: header.length,
        checksum: header.checksum,
    })
}
