//! Material package binary format
//!
//! Headers are POD with explicit little-endian layouts and implement the
//! [`BinarySerializable`] trait. Metadata inside a package is bitcode.

pub mod package;
mod serialization;

pub use package::*;
pub use serialization::BinarySerializable;
