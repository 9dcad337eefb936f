//! Variant expansion
//!
//! Picks the variants of the fixed 4-bit space (see [`mat_common::variant`])
//! that a material needs. A bit is dropped when it can't apply to the
//! material or when the caller filters it out:
//!
//! - Unlit shading drops both lighting bits, and the shadow bit unless the
//!   material uses the shadow multiplier
//! - Skinning only applies to the object vertex domain
//!
//! Blending and required attributes do not restrict the variant space.

use mat_common::{
    Shading, VARIANT_COUNT, VARIANT_DIRECTIONAL_LIGHTING, VARIANT_DYNAMIC_LIGHTING,
    VARIANT_LIGHTING_MASK, VARIANT_MASK, VARIANT_SHADOW_RECEIVER, VARIANT_SKINNING, VertexDomain,
};
use serde::{Deserialize, Serialize};

/// Named variant bit, used by configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantBit {
    DirectionalLighting,
    DynamicLighting,
    ShadowReceiver,
    Skinning,
}

impl VariantBit {
    pub fn bit(self) -> u8 {
        match self {
            VariantBit::DirectionalLighting => VARIANT_DIRECTIONAL_LIGHTING,
            VariantBit::DynamicLighting => VARIANT_DYNAMIC_LIGHTING,
            VariantBit::ShadowReceiver => VARIANT_SHADOW_RECEIVER,
            VariantBit::Skinning => VARIANT_SKINNING,
        }
    }

    /// Combine named bits into a filter mask
    pub fn mask(bits: &[VariantBit]) -> u8 {
        bits.iter().fold(0, |mask, b| mask | b.bit())
    }
}

/// Material features that decide variant applicability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantContext {
    pub shading: Shading,
    pub vertex_domain: VertexDomain,
    pub shadow_multiplier: bool,
    /// Bits to exclude; bits outside [`VARIANT_MASK`] are ignored
    pub variant_filter: u8,
}

impl VariantContext {
    /// Bits that can apply to this material before filtering
    pub fn applicable_bits(&self) -> u8 {
        let mut bits = VARIANT_MASK;
        if !self.shading.is_lit() {
            bits &= !VARIANT_LIGHTING_MASK;
            if !self.shadow_multiplier {
                bits &= !VARIANT_SHADOW_RECEIVER;
            }
        }
        if self.vertex_domain != VertexDomain::Object {
            bits &= !VARIANT_SKINNING;
        }
        bits
    }

    /// Bits that survive applicability and the filter
    pub fn allowed_bits(&self) -> u8 {
        self.applicable_bits() & !(self.variant_filter & VARIANT_MASK)
    }

    pub fn is_variant_allowed(&self, variant: u8) -> bool {
        variant & !self.allowed_bits() == 0
    }
}

/// Surviving variants, ascending. Always contains the base variant `0`.
pub fn expand_variants(ctx: &VariantContext) -> Vec<u8> {
    (0..VARIANT_COUNT)
        .filter(|&v| ctx.is_variant_allowed(v))
        .collect()
}
