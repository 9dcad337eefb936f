//! Material builder
//!
//! Collects a material description through chained configuration calls, then
//! compiles it with [`MaterialBuilder::build`] or previews a single shader
//! with [`MaterialBuilder::peek`].
//!
//! ```no_run
//! use nether_mat::{MaterialBuilder, Platform};
//! use nether_mat::mat_common::{BlendingMode, Property, Shading, TargetApi, UniformType};
//!
//! # fn main() -> Result<(), nether_mat::MaterialError> {
//! let mut builder = MaterialBuilder::new();
//! builder
//!     .name("brick")
//!     .shading(Shading::Lit)
//!     .property(Property::BaseColor)
//!     .parameter("tint", UniformType::Float4)?
//!     .blending(BlendingMode::Opaque)
//!     .platform(Platform::All)
//!     .target_api(TargetApi::All);
//! let package = builder.build()?;
//! let bytes = package.to_bytes()?;
//! # Ok(())
//! # }
//! ```
//!
//! Configuration calls that can be invalid (parameters, variables) return
//! `Result` and reject bad input immediately; everything else returns
//! `&mut Self`.

use std::fmt;
use std::sync::Arc;

use mat_common::{
    BlendingMode, CullingMode, Interpolation, MAX_PARAMETERS_COUNT, MATERIAL_VARIABLES_COUNT,
    MaterialMetadata, MaterialPackage, Parameter, Precision, Property, SamplerFormat, SamplerType,
    ShaderModel, ShaderType, Shading, TargetApi, TransparencyMode, UniformType, Variable,
    VertexAttribute, VertexDomain,
};

use crate::assembler;
use crate::error::MaterialError;
use crate::planner::{self, CodeGenParams, Platform, ShaderModelSet};
use crate::post_process::PostProcessor;
use crate::shader_gen::{GlslGenerator, MaterialCode, ShaderGenerator};
use crate::variants::{self, VariantContext};

/// Builder for one material
#[derive(Clone)]
pub struct MaterialBuilder {
    name: String,
    shading: Shading,
    interpolation: Interpolation,
    vertex_domain: VertexDomain,
    properties: u32,
    parameters: Vec<Parameter>,
    variables: [Option<String>; MATERIAL_VARIABLES_COUNT],
    required_attributes: u32,
    material_code: MaterialCode,
    material_vertex_code: MaterialCode,

    // Render state
    blending: BlendingMode,
    culling: CullingMode,
    color_write: bool,
    depth_test: bool,
    /// `None` until set explicitly; defaults from blending
    depth_write: Option<bool>,
    /// `None` until set explicitly; overrides culling when `Some(true)`
    double_sided: Option<bool>,
    mask_threshold: f32,
    shadow_multiplier: bool,
    transparency: TransparencyMode,

    // Build hints
    platform: Platform,
    target_api: TargetApi,
    /// `None` mirrors the target API
    code_gen_target_api: Option<TargetApi>,
    variant_filter: u8,
    parallel: bool,
    post_processor: Option<Arc<dyn PostProcessor>>,
    generator: Arc<dyn ShaderGenerator>,

    // Derived by prepare()
    shader_models: ShaderModelSet,
    permutations: Vec<CodeGenParams>,
}

impl Default for MaterialBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            shading: Shading::default(),
            interpolation: Interpolation::default(),
            vertex_domain: VertexDomain::default(),
            properties: 0,
            parameters: Vec::new(),
            variables: Default::default(),
            required_attributes: 0,
            material_code: MaterialCode::default(),
            material_vertex_code: MaterialCode::default(),
            blending: BlendingMode::default(),
            culling: CullingMode::default(),
            color_write: true,
            depth_test: true,
            depth_write: None,
            double_sided: None,
            mask_threshold: 0.4,
            shadow_multiplier: false,
            transparency: TransparencyMode::default(),
            platform: Platform::default(),
            target_api: TargetApi::default(),
            code_gen_target_api: None,
            variant_filter: 0,
            parallel: true,
            post_processor: None,
            generator: Arc::new(GlslGenerator::new()),
            shader_models: ShaderModelSet::EMPTY,
            permutations: Vec::new(),
        }
    }
}

impl fmt::Debug for MaterialBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialBuilder")
            .field("name", &self.name)
            .field("shading", &self.shading)
            .field("parameters", &self.parameters)
            .field("platform", &self.platform)
            .field("target_api", &self.target_api)
            .field("code_gen_target_api", &self.code_gen_target_api)
            .field("variant_filter", &self.variant_filter)
            .field("has_post_processor", &self.post_processor.is_some())
            .finish_non_exhaustive()
    }
}

impl MaterialBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Material description
    // ========================================================================

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn shading(&mut self, shading: Shading) -> &mut Self {
        self.shading = shading;
        self
    }

    /// Interpolation of custom variables
    pub fn interpolation(&mut self, interpolation: Interpolation) -> &mut Self {
        self.interpolation = interpolation;
        self
    }

    pub fn vertex_domain(&mut self, domain: VertexDomain) -> &mut Self {
        self.vertex_domain = domain;
        self
    }

    /// Declare that the material code writes `property`
    pub fn property(&mut self, property: Property) -> &mut Self {
        self.properties |= property.bit();
        self
    }

    /// Declare a uniform parameter
    pub fn parameter(
        &mut self,
        name: impl Into<String>,
        ty: UniformType,
    ) -> Result<&mut Self, MaterialError> {
        self.parameter_array(name, ty, 1)
    }

    /// Declare a uniform array parameter of `size` elements
    pub fn parameter_array(
        &mut self,
        name: impl Into<String>,
        ty: UniformType,
        size: u32,
    ) -> Result<&mut Self, MaterialError> {
        let name = name.into();
        self.check_parameter_name(&name)?;
        if size == 0 {
            return Err(MaterialError::ZeroArraySize(name));
        }
        self.parameters.push(Parameter::uniform(name, ty, size));
        Ok(self)
    }

    /// Declare a sampler parameter. External samplers ignore format and precision.
    pub fn sampler_parameter(
        &mut self,
        name: impl Into<String>,
        ty: SamplerType,
        format: SamplerFormat,
        precision: Precision,
    ) -> Result<&mut Self, MaterialError> {
        let name = name.into();
        self.check_parameter_name(&name)?;
        self.parameters
            .push(Parameter::sampler(name, ty, format, precision));
        Ok(self)
    }

    fn check_parameter_name(&self, name: &str) -> Result<(), MaterialError> {
        if name.is_empty() {
            return Err(MaterialError::EmptyParameterName);
        }
        if self.parameters.iter().any(|p| p.name() == name) {
            return Err(MaterialError::DuplicateParameter(name.to_string()));
        }
        if self.parameters.len() >= MAX_PARAMETERS_COUNT {
            return Err(MaterialError::TooManyParameters {
                name: name.to_string(),
                max: MAX_PARAMETERS_COUNT,
            });
        }
        Ok(())
    }

    /// Name a custom variable slot. Renaming a slot replaces its old name.
    pub fn variable(
        &mut self,
        variable: Variable,
        name: impl Into<String>,
    ) -> Result<&mut Self, MaterialError> {
        let name = name.into();
        if name.is_empty() {
            return Err(MaterialError::EmptyVariableName { variable });
        }
        let taken = self
            .variables
            .iter()
            .enumerate()
            .find(|(i, v)| *i != variable.index() && v.as_deref() == Some(name.as_str()));
        if let Some((index, _)) = taken {
            return Err(MaterialError::DuplicateVariable {
                name,
                existing: Variable::ALL[index],
            });
        }
        self.variables[variable.index()] = Some(name);
        Ok(self)
    }

    /// Require a vertex attribute beyond the implied ones
    pub fn require(&mut self, attribute: VertexAttribute) -> &mut Self {
        self.required_attributes |= attribute.bit();
        self
    }

    /// Fragment material code, `line_offset` lines into the authored file
    pub fn material(&mut self, code: impl Into<String>, line_offset: usize) -> &mut Self {
        self.material_code = MaterialCode::new(code, line_offset);
        self
    }

    /// Vertex material code, `line_offset` lines into the authored file
    pub fn material_vertex(&mut self, code: impl Into<String>, line_offset: usize) -> &mut Self {
        self.material_vertex_code = MaterialCode::new(code, line_offset);
        self
    }

    // ========================================================================
    // Render state
    // ========================================================================

    pub fn blending(&mut self, blending: BlendingMode) -> &mut Self {
        self.blending = blending;
        self
    }

    pub fn culling(&mut self, culling: CullingMode) -> &mut Self {
        self.culling = culling;
        self
    }

    pub fn color_write(&mut self, enable: bool) -> &mut Self {
        self.color_write = enable;
        self
    }

    pub fn depth_write(&mut self, enable: bool) -> &mut Self {
        self.depth_write = Some(enable);
        self
    }

    pub fn depth_test(&mut self, enable: bool) -> &mut Self {
        self.depth_test = enable;
        self
    }

    /// Double-sided rendering; `true` disables culling regardless of [`Self::culling`]
    pub fn double_sided(&mut self, double_sided: bool) -> &mut Self {
        self.double_sided = Some(double_sided);
        self
    }

    /// Alpha cutoff for masked blending
    pub fn mask_threshold(&mut self, threshold: f32) -> &mut Self {
        self.mask_threshold = threshold;
        self
    }

    /// Unlit materials only: darken by the shadow factor
    pub fn shadow_multiplier(&mut self, enable: bool) -> &mut Self {
        self.shadow_multiplier = enable;
        self
    }

    pub fn transparency_mode(&mut self, mode: TransparencyMode) -> &mut Self {
        self.transparency = mode;
        self
    }

    // ========================================================================
    // Build hints
    // ========================================================================

    pub fn platform(&mut self, platform: Platform) -> &mut Self {
        self.platform = platform;
        self
    }

    /// Target API(s). Also resets the codegen API to mirror the target.
    pub fn target_api(&mut self, api: TargetApi) -> &mut Self {
        self.target_api = api;
        self.code_gen_target_api = None;
        self
    }

    /// Override the API code is generated for
    pub fn code_gen_target_api(&mut self, api: TargetApi) -> &mut Self {
        self.code_gen_target_api = Some(api);
        self
    }

    /// Variant bits to exclude from the build
    pub fn variant_filter(&mut self, filter: u8) -> &mut Self {
        self.variant_filter = filter;
        self
    }

    /// Generate shaders on the rayon pool (default) or sequentially
    pub fn parallel(&mut self, parallel: bool) -> &mut Self {
        self.parallel = parallel;
        self
    }

    pub fn post_processor(&mut self, processor: impl PostProcessor + 'static) -> &mut Self {
        self.post_processor = Some(Arc::new(processor));
        self
    }

    /// Replace the default GLSL generator
    pub fn generator(&mut self, generator: impl ShaderGenerator + 'static) -> &mut Self {
        self.generator = Arc::new(generator);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn get_platform(&self) -> Platform {
        self.platform
    }

    pub fn get_target_api(&self) -> TargetApi {
        self.target_api
    }

    /// Effective codegen API hint (mirrors the target API unless overridden)
    pub fn get_code_gen_target_api(&self) -> TargetApi {
        self.code_gen_target_api.unwrap_or(self.target_api)
    }

    pub fn get_variant_filter(&self) -> u8 {
        self.variant_filter
    }

    /// Shader models selected by the last [`Self::prepare`]
    pub fn shader_models(&self) -> ShaderModelSet {
        self.shader_models
    }

    /// Permutations computed by the last [`Self::prepare`]
    pub fn code_gen_permutations(&self) -> &[CodeGenParams] {
        &self.permutations
    }

    pub fn is_lit(&self) -> bool {
        self.shading.is_lit()
    }

    /// True if any sampler parameter is external
    pub fn has_external_sampler(&self) -> bool {
        self.parameters.iter().any(Parameter::is_external_sampler)
    }

    pub(crate) fn material_code(&self) -> &MaterialCode {
        &self.material_code
    }

    pub(crate) fn material_vertex_code(&self) -> &MaterialCode {
        &self.material_vertex_code
    }

    pub(crate) fn post_processor_ref(&self) -> Option<&dyn PostProcessor> {
        self.post_processor.as_deref()
    }

    pub(crate) fn generator_ref(&self) -> &dyn ShaderGenerator {
        self.generator.as_ref()
    }

    pub(crate) fn is_parallel(&self) -> bool {
        self.parallel
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Metadata stored in the package: effective culling and depth write,
    /// implied attributes included
    pub fn metadata(&self) -> MaterialMetadata {
        let mut required_attributes = self.required_attributes | VertexAttribute::Position.bit();
        if self.shading.is_lit() {
            required_attributes |= VertexAttribute::Tangents.bit();
        }
        let culling = if self.double_sided == Some(true) {
            CullingMode::None
        } else {
            self.culling
        };

        MaterialMetadata {
            name: self.name.clone(),
            shading: self.shading,
            interpolation: self.interpolation,
            vertex_domain: self.vertex_domain,
            properties: self.properties,
            parameters: self.parameters.clone(),
            variables: self.variables.to_vec(),
            required_attributes,
            blending: self.blending,
            culling,
            double_sided: self.double_sided,
            color_write: self.color_write,
            depth_write: self
                .depth_write
                .unwrap_or_else(|| self.blending.default_depth_write()),
            depth_test: self.depth_test,
            mask_threshold: self.mask_threshold,
            shadow_multiplier: self.shadow_multiplier,
            transparency: self.transparency,
        }
    }

    pub(crate) fn variant_context(&self) -> VariantContext {
        VariantContext {
            shading: self.shading,
            vertex_domain: self.vertex_domain,
            shadow_multiplier: self.shadow_multiplier,
            variant_filter: self.variant_filter,
        }
    }

    /// Variants the build will generate, ascending
    pub fn variants(&self) -> Vec<u8> {
        variants::expand_variants(&self.variant_context())
    }

    /// Recompute shader models and permutations from the build hints.
    /// Safe to call any number of times.
    pub fn prepare(&mut self) -> &mut Self {
        let plan = planner::plan(self.platform, self.target_api, self.code_gen_target_api);
        self.shader_models = plan.shader_models;
        self.permutations = plan.permutations;
        self
    }

    // ========================================================================
    // Terminal calls
    // ========================================================================

    /// Generate every (permutation, variant, stage) shader and assemble the
    /// package. Any failure fails the whole build.
    pub fn build(&mut self) -> Result<MaterialPackage, MaterialError> {
        self.prepare();
        assembler::assemble(self)
    }

    /// Generate one stage of the first permutation and lowest surviving
    /// variant, without post-processing. Returns the source and the shader
    /// model it was generated for.
    pub fn peek(&mut self, stage: ShaderType) -> Result<(String, ShaderModel), MaterialError> {
        self.prepare();
        assembler::peek(self, stage)
    }
}
