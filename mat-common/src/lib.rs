//! Shared material types for the Nethercore material compiler
//!
//! This crate provides what both sides of a material package need:
//! - `nether-mat` (build-time compiler) writes packages
//! - runtime loaders read them
//!
//! # Modules
//!
//! - [`enums`] - Shading, blending, shader model, target API and friends
//! - [`variant`] - Variant bit layout
//! - [`metadata`] - Parameters and render state stored per package
//! - [`formats`] - Package byte layout, owned decoder and zero-copy reader

pub mod enums;
pub mod error;
pub mod formats;
pub mod metadata;
pub mod variant;

/// Package magic bytes
pub const PACKAGE_MAGIC: &[u8; 4] = b"NMAT";

/// Package format version. Bump when the layout or any stable enum value changes.
pub const PACKAGE_VERSION: u32 = 1;

pub use enums::*;
pub use error::PackageError;
pub use formats::{
    BinarySerializable, MaterialPackage, PackageHeader, PackageReader, PackedShader,
    ShaderBlob, ShaderEntryHeader, ShaderKey, ShaderKind, TocEntry,
};
pub use metadata::{MAX_PARAMETERS_COUNT, MaterialMetadata, Parameter};
pub use variant::{
    VARIANT_COUNT, VARIANT_DIRECTIONAL_LIGHTING, VARIANT_DYNAMIC_LIGHTING, VARIANT_LIGHTING_MASK,
    VARIANT_MASK, VARIANT_SHADOW_RECEIVER, VARIANT_SKINNING, VariantFlags, variant_name,
};
