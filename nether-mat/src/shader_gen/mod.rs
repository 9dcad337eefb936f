//! Shader synthesis
//!
//! The build only depends on the [`ShaderGenerator`] trait: a pure function
//! of (stage, permutation, variant, material) to source text. The default
//! [`GlslGenerator`] fills stage templates from snippets:
//!
//! - `#version` header per shader model and codegen API
//! - Defines for shading, blending, vertex domain, properties and variant bits
//! - Vertex inputs for the required attributes (bones added for skinning)
//! - Varyings, uniform blocks and sampler declarations
//! - The material fragment, behind a `#line` directive so compiler
//!   diagnostics point at the authored file

mod error;
mod generator;
mod snippets;
mod templates;

pub use error::ShaderGenError;

use std::borrow::Cow;

use mat_common::{MaterialMetadata, ShaderType};

use crate::planner::CodeGenParams;

/// User-supplied material source with its position in the authored file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaterialCode {
    pub code: String,
    /// Number of lines preceding the code in the authored file
    pub line_offset: usize,
}

impl MaterialCode {
    pub fn new(code: impl Into<String>, line_offset: usize) -> Self {
        Self {
            code: code.into(),
            line_offset,
        }
    }
}

/// Read-only view of a material handed to a generator
#[derive(Debug, Clone, Copy)]
pub struct MaterialInfo<'a> {
    pub metadata: &'a MaterialMetadata,
    pub material_code: &'a MaterialCode,
    pub vertex_code: &'a MaterialCode,
}

/// Turns one (stage, permutation, variant) of a material into source text
pub trait ShaderGenerator: Send + Sync {
    fn generate(
        &self,
        stage: ShaderType,
        params: &CodeGenParams,
        variant: u8,
        material: &MaterialInfo<'_>,
    ) -> Result<String, ShaderGenError>;
}

/// Template based GLSL generator
#[derive(Debug, Clone)]
pub struct GlslGenerator {
    vertex_template: Cow<'static, str>,
    fragment_template: Cow<'static, str>,
}

impl Default for GlslGenerator {
    fn default() -> Self {
        Self {
            vertex_template: Cow::Borrowed(templates::VERTEX_TEMPLATE),
            fragment_template: Cow::Borrowed(templates::FRAGMENT_TEMPLATE),
        }
    }
}

impl GlslGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom stage templates. Templates use the same `//NAME`
    /// placeholders as the built-in ones and must contain `//MATERIAL_CODE`.
    pub fn with_templates(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex_template: Cow::Owned(vertex.into()),
            fragment_template: Cow::Owned(fragment.into()),
        }
    }

    pub fn template(&self, stage: ShaderType) -> &str {
        match stage {
            ShaderType::Vertex => &self.vertex_template,
            ShaderType::Fragment => &self.fragment_template,
        }
    }
}

impl ShaderGenerator for GlslGenerator {
    fn generate(
        &self,
        stage: ShaderType,
        params: &CodeGenParams,
        variant: u8,
        material: &MaterialInfo<'_>,
    ) -> Result<String, ShaderGenError> {
        generator::generate_stage(self.template(stage), stage, params, variant, material)
    }
}

#[cfg(test)]
mod tests;
