//! Material variant bit flags.
//!
//! A variant is one combination of independent feature bits baked into a
//! shader at build time. The runtime picks the variant matching the current
//! draw (lights present, shadows enabled, skinned mesh).
//!
//! The bit layout and [`VARIANT_COUNT`] are part of the package format.

// Variant bits (must match the runtime's variant selection)
pub const VARIANT_DIRECTIONAL_LIGHTING: u8 = 0x01;
pub const VARIANT_DYNAMIC_LIGHTING: u8 = 0x02;
pub const VARIANT_SHADOW_RECEIVER: u8 = 0x04;
pub const VARIANT_SKINNING: u8 = 0x08;

/// Every defined variant bit.
pub const VARIANT_MASK: u8 = VARIANT_DIRECTIONAL_LIGHTING
    | VARIANT_DYNAMIC_LIGHTING
    | VARIANT_SHADOW_RECEIVER
    | VARIANT_SKINNING;

/// Bits that only make sense for lit shading.
pub const VARIANT_LIGHTING_MASK: u8 = VARIANT_DIRECTIONAL_LIGHTING | VARIANT_DYNAMIC_LIGHTING;

/// Size of the variant space (`VARIANT_MASK + 1`).
pub const VARIANT_COUNT: u8 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantFlags {
    pub directional_lighting: bool,
    pub dynamic_lighting: bool,
    pub shadow_receiver: bool,
    pub skinning: bool,
}

impl VariantFlags {
    pub fn from_bits(variant: u8) -> Self {
        Self {
            directional_lighting: variant & VARIANT_DIRECTIONAL_LIGHTING != 0,
            dynamic_lighting: variant & VARIANT_DYNAMIC_LIGHTING != 0,
            shadow_receiver: variant & VARIANT_SHADOW_RECEIVER != 0,
            skinning: variant & VARIANT_SKINNING != 0,
        }
    }

    /// Preprocessor symbols for the bits that are set, in bit order.
    pub fn defines(&self) -> Vec<&'static str> {
        let mut defines = Vec::new();
        if self.directional_lighting {
            defines.push("HAS_DIRECTIONAL_LIGHTING");
        }
        if self.dynamic_lighting {
            defines.push("HAS_DYNAMIC_LIGHTING");
        }
        if self.shadow_receiver {
            defines.push("HAS_SHADOWING");
        }
        if self.skinning {
            defines.push("HAS_SKINNING");
        }
        defines
    }
}

/// Get human-readable name for a variant (for logs and diagnostics)
pub fn variant_name(variant: u8) -> String {
    if variant & VARIANT_MASK == 0 {
        return "base".to_string();
    }
    let mut parts = Vec::new();
    if variant & VARIANT_DIRECTIONAL_LIGHTING != 0 {
        parts.push("dir");
    }
    if variant & VARIANT_DYNAMIC_LIGHTING != 0 {
        parts.push("dyn");
    }
    if variant & VARIANT_SHADOW_RECEIVER != 0 {
        parts.push("shadow");
    }
    if variant & VARIANT_SKINNING != 0 {
        parts.push("skin");
    }
    parts.join("+")
}
