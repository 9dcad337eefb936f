//! Permutation planning
//!
//! Turns the platform and target API hints into the shader models to support
//! and the ordered list of (shader model, target API, codegen API) tuples to
//! generate code for.
//!
//! Tiers:
//! - Mobile: [`ShaderModel::GlEs30`]
//! - Desktop: [`ShaderModel::GlCore41`]
//!
//! Output order is shader model ascending, then target API ascending. Each
//! target API gets exactly one codegen API, so the order is total.

use mat_common::{ShaderModel, TargetApi};
use serde::{Deserialize, Serialize};

/// Hardware class the material is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Desktop,
    Mobile,
    All,
}

impl Platform {
    pub fn shader_models(self) -> ShaderModelSet {
        match self {
            Platform::Desktop => ShaderModelSet::DESKTOP,
            Platform::Mobile => ShaderModelSet::MOBILE,
            Platform::All => ShaderModelSet::DESKTOP.union(ShaderModelSet::MOBILE),
        }
    }
}

/// Bit set of shader models (`1 << ShaderModel::to_u8()`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderModelSet(u32);

impl ShaderModelSet {
    pub const EMPTY: Self = Self(0);
    pub const MOBILE: Self = Self(1 << 1);
    pub const DESKTOP: Self = Self(1 << 2);

    // Selectable models, ascending
    const MODELS: [ShaderModel; 2] = [ShaderModel::GlEs30, ShaderModel::GlCore41];

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, model: ShaderModel) -> bool {
        self.0 & (1 << model.to_u8()) != 0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Models in the set, ascending
    pub fn iter(self) -> impl Iterator<Item = ShaderModel> {
        Self::MODELS.into_iter().filter(move |&m| self.contains(m))
    }
}

/// One code generation permutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodeGenParams {
    pub shader_model: ShaderModel,
    pub target_api: TargetApi,
    pub code_gen_target_api: TargetApi,
}

/// Result of [`plan`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    pub shader_models: ShaderModelSet,
    pub permutations: Vec<CodeGenParams>,
}

/// Compute shader models and permutations.
///
/// `code_gen_override` of `None` or `Some(TargetApi::All)` mirrors each
/// concrete target API; a concrete override is used for every target.
pub fn plan(platform: Platform, target_api: TargetApi, code_gen_override: Option<TargetApi>) -> Plan {
    let shader_models = platform.shader_models();

    let mut permutations = Vec::new();
    for shader_model in shader_models.iter() {
        for &target in target_api.expand() {
            let code_gen_target_api = match code_gen_override {
                Some(api) if api.is_concrete() => api,
                _ => target,
            };
            permutations.push(CodeGenParams {
                shader_model,
                target_api: target,
                code_gen_target_api,
            });
        }
    }

    Plan {
        shader_models,
        permutations,
    }
}
