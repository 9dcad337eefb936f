//! Material package format (.nmat)
//!
//! One package holds every generated shader of a material plus one copy of
//! its metadata. Shaders are addressed by [`ShaderKey`] through a table of
//! contents, so a loader can pull a single blob out without decoding the
//! rest (see [`PackageReader`]).
//!
//! # Layout
//! ```text
//! 0x00: PackageHeader (16 bytes)
//! 0x10: metadata (bitcode MaterialMetadata, metadata_len bytes)
//! var:  table of contents (entry_count * 24 bytes)
//! var:  blob region (offsets in the TOC are relative to its start)
//! ```
//!
//! Entries are written in the order the shaders were added. The compiler
//! adds them in a deterministic order, so equal inputs give equal bytes.

mod reader;
mod types;

#[cfg(test)]
mod tests;

pub use reader::{PackageReader, TocEntry};
pub use types::*;

use hashbrown::HashMap;
use std::sync::OnceLock;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::PackageError;
use crate::metadata::MaterialMetadata;

/// Owned, fully decoded material package
#[derive(Debug, Clone, Default)]
pub struct MaterialPackage {
    /// Material description shared by all shaders
    pub metadata: MaterialMetadata,

    // Shaders in table of contents order. Private: `shader_index` caches
    // positions into it.
    shaders: Vec<PackedShader>,

    // Lookup cache (built lazily on first access, reset on mutation)
    shader_index: OnceLock<HashMap<ShaderKey, usize>>,
}

impl MaterialPackage {
    pub fn new(metadata: MaterialMetadata, shaders: Vec<PackedShader>) -> Self {
        Self {
            metadata,
            shaders,
            shader_index: OnceLock::new(),
        }
    }

    /// Shaders in table of contents order
    pub fn shaders(&self) -> &[PackedShader] {
        &self.shaders
    }

    /// Append a shader. Keys are not checked for uniqueness here; the
    /// reader rejects duplicates.
    pub fn push_shader(&mut self, shader: PackedShader) {
        self.shaders.push(shader);
        self.shader_index = OnceLock::new();
    }

    pub fn into_parts(self) -> (MaterialMetadata, Vec<PackedShader>) {
        (self.metadata, self.shaders)
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    /// Keys of every stored shader, in table of contents order
    pub fn keys(&self) -> impl Iterator<Item = ShaderKey> + '_ {
        self.shaders.iter().map(|s| s.key)
    }

    /// Find a shader by key (O(1) lookup via lazy-initialized hash index)
    pub fn find_shader(&self, key: &ShaderKey) -> Option<&PackedShader> {
        let index = self.shader_index.get_or_init(|| {
            self.shaders
                .iter()
                .enumerate()
                .map(|(i, shader)| (shader.key, i))
                .collect()
        });
        index.get(key).map(|&i| &self.shaders[i])
    }

    /// Source text of a shader stored as text
    pub fn text(&self, key: &ShaderKey) -> Option<&str> {
        self.find_shader(key).and_then(|s| s.blob.as_text())
    }

    /// Words of a shader stored as binary
    pub fn binary(&self, key: &ShaderKey) -> Option<&[u32]> {
        self.find_shader(key).and_then(|s| s.blob.as_binary())
    }

    /// Serialize to the package byte layout.
    ///
    /// Fails with [`PackageError::TooLarge`] if a size or offset does not fit
    /// its u32 field.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PackageError> {
        let metadata = self.metadata.to_bytes();
        let blobs: Vec<Vec<u8>> = self.shaders.iter().map(|s| s.blob.to_bytes()).collect();
        let blob_total: usize = blobs.iter().map(Vec::len).sum();

        let mut out = Vec::with_capacity(
            PackageHeader::SIZE
                + metadata.len()
                + self.shaders.len() * ShaderEntryHeader::SIZE
                + blob_total,
        );

        let header = PackageHeader::new(
            checked_u32("metadata", metadata.len())?,
            checked_u32("table of contents", self.shaders.len())?,
        );
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&metadata);

        let mut offset = 0usize;
        for (shader, blob) in self.shaders.iter().zip(&blobs) {
            let entry = ShaderEntryHeader::new(
                shader.key,
                shader.kind(),
                checked_u32("blob region", offset)?,
                checked_u32("shader blob", blob.len())?,
                xxh3_64(blob),
            );
            out.extend_from_slice(&entry.to_bytes());
            offset += blob.len();
        }

        for blob in &blobs {
            out.extend_from_slice(blob);
        }
        Ok(out)
    }

    /// Decode a whole package, verifying every checksum
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PackageError> {
        let reader = PackageReader::new(bytes)?;
        let metadata = reader.metadata()?;

        let mut shaders = Vec::with_capacity(reader.entry_count());
        for entry in reader.entries() {
            let data = reader.extract(&entry.key)?;
            let blob = ShaderBlob::from_bytes(entry.kind, data).ok_or_else(|| {
                PackageError::InvalidEntry {
                    index: shaders.len(),
                    reason: format!("blob for {} is not valid {:?} data", entry.key, entry.kind),
                }
            })?;
            shaders.push(PackedShader::new(entry.key, blob));
        }

        Ok(Self::new(metadata, shaders))
    }
}

/// Sizes, counts and offsets are stored as u32
fn checked_u32(section: &'static str, size: usize) -> Result<u32, PackageError> {
    u32::try_from(size).map_err(|_| PackageError::TooLarge { section, size })
}
