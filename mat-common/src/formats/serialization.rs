//! Binary serialization trait for package headers.
//!
//! Headers keep their type-specific `to_bytes()` returning a fixed-size
//! array; the trait gives generic code (size checks, table walkers) a common
//! interface.

/// Trait for fixed-size binary headers.
///
/// Uses `Vec<u8>` because associated consts can't size a return array yet.
///
/// # Example
///
/// ```
/// use mat_common::formats::{BinarySerializable, PackageHeader};
///
/// let header = PackageHeader::new(12, 4);
/// let bytes = header.serialize();
/// let parsed = PackageHeader::deserialize(&bytes).unwrap();
/// assert_eq!(parsed.entry_count, 4);
/// ```
pub trait BinarySerializable: Sized {
    /// Size of the serialized header in bytes.
    const SIZE: usize;

    fn serialize(&self) -> Vec<u8>;

    /// Returns `None` if the byte slice is too short.
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

impl BinarySerializable for super::PackageHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

impl BinarySerializable for super::ShaderEntryHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}
