//! Material enumerations shared by the compiler and the package loader.
//!
//! Numeric values of [`ShaderModel`], [`TargetApi`], [`ShaderType`] and the
//! property/attribute bit positions are part of the package format
//! (see [`crate::PACKAGE_VERSION`]). Do not reorder.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

// =============================================================================
// Shader stages, models and APIs
// =============================================================================

/// Pipeline stage a shader is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    /// Both stages, vertex first (package order).
    pub const ALL: [ShaderType; 2] = [ShaderType::Vertex, ShaderType::Fragment];

    pub fn to_u8(self) -> u8 {
        match self {
            ShaderType::Vertex => 0,
            ShaderType::Fragment => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ShaderType::Vertex),
            1 => Some(ShaderType::Fragment),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderType::Vertex => "vertex",
            ShaderType::Fragment => "fragment",
        }
    }
}

/// Hardware/driver capability tier that decides the emitted GLSL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderModel {
    /// Never selected for code generation
    Unknown,
    /// OpenGL ES 3.0 class hardware (mobile tier)
    GlEs30,
    /// OpenGL 4.1 core class hardware (desktop tier)
    GlCore41,
}

/// Number of shader models, including `Unknown`.
pub const SHADER_MODEL_COUNT: u8 = 3;

impl ShaderModel {
    pub fn to_u8(self) -> u8 {
        match self {
            ShaderModel::Unknown => 0,
            ShaderModel::GlEs30 => 1,
            ShaderModel::GlCore41 => 2,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ShaderModel::Unknown),
            1 => Some(ShaderModel::GlEs30),
            2 => Some(ShaderModel::GlCore41),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderModel::Unknown => "unknown",
            ShaderModel::GlEs30 => "gles30",
            ShaderModel::GlCore41 => "gl41",
        }
    }
}

/// Graphics API a permutation targets.
///
/// `All` is a build hint only; package entries always carry a concrete API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetApi {
    All,
    #[default]
    OpenGl,
    Vulkan,
}

impl TargetApi {
    /// Concrete APIs, ascending.
    pub const CONCRETE: [TargetApi; 2] = [TargetApi::OpenGl, TargetApi::Vulkan];

    /// Expand a hint into the concrete APIs it covers, ascending.
    pub fn expand(self) -> &'static [TargetApi] {
        match self {
            TargetApi::All => &Self::CONCRETE,
            TargetApi::OpenGl => &Self::CONCRETE[0..1],
            TargetApi::Vulkan => &Self::CONCRETE[1..2],
        }
    }

    pub fn is_concrete(self) -> bool {
        self != TargetApi::All
    }

    pub fn to_u8(self) -> u8 {
        match self {
            TargetApi::All => 0,
            TargetApi::OpenGl => 1,
            TargetApi::Vulkan => 2,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(TargetApi::All),
            1 => Some(TargetApi::OpenGl),
            2 => Some(TargetApi::Vulkan),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TargetApi::All => "all",
            TargetApi::OpenGl => "opengl",
            TargetApi::Vulkan => "vulkan",
        }
    }
}

// =============================================================================
// Shading and render state
// =============================================================================

/// Lighting model applied by the material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
pub enum Shading {
    Unlit,
    #[default]
    Lit,
    Subsurface,
    Cloth,
    SpecularGlossiness,
}

impl Shading {
    pub fn is_lit(self) -> bool {
        self != Shading::Unlit
    }

    /// Preprocessor symbol emitted into generated shaders.
    pub fn define(self) -> &'static str {
        match self {
            Shading::Unlit => "SHADING_MODEL_UNLIT",
            Shading::Lit => "SHADING_MODEL_LIT",
            Shading::Subsurface => "SHADING_MODEL_SUBSURFACE",
            Shading::Cloth => "SHADING_MODEL_CLOTH",
            Shading::SpecularGlossiness => "SHADING_MODEL_SPECULAR_GLOSSINESS",
        }
    }
}

/// Interpolation qualifier for custom variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
pub enum Interpolation {
    #[default]
    Smooth,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
pub enum BlendingMode {
    #[default]
    Opaque,
    Transparent,
    Add,
    Masked,
    Fade,
    Multiply,
    Screen,
}

impl BlendingMode {
    /// Depth write default when the material does not set it explicitly.
    pub fn default_depth_write(self) -> bool {
        matches!(self, BlendingMode::Opaque | BlendingMode::Masked)
    }

    pub fn define(self) -> &'static str {
        match self {
            BlendingMode::Opaque => "BLEND_MODE_OPAQUE",
            BlendingMode::Transparent => "BLEND_MODE_TRANSPARENT",
            BlendingMode::Add => "BLEND_MODE_ADD",
            BlendingMode::Masked => "BLEND_MODE_MASKED",
            BlendingMode::Fade => "BLEND_MODE_FADE",
            BlendingMode::Multiply => "BLEND_MODE_MULTIPLY",
            BlendingMode::Screen => "BLEND_MODE_SCREEN",
        }
    }
}

/// Which triangle faces are culled. Does not affect points or lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
pub enum CullingMode {
    None,
    Front,
    #[default]
    Back,
    FrontAndBack,
}

/// How transparent objects are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
pub enum TransparencyMode {
    #[default]
    Default,
    TwoPassesOneSide,
    TwoPassesTwoSides,
}

/// Coordinate space the vertex stage outputs positions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
pub enum VertexDomain {
    #[default]
    Object,
    World,
    View,
    Device,
}

impl VertexDomain {
    pub fn define(self) -> &'static str {
        match self {
            VertexDomain::Object => "VERTEX_DOMAIN_OBJECT",
            VertexDomain::World => "VERTEX_DOMAIN_WORLD",
            VertexDomain::View => "VERTEX_DOMAIN_VIEW",
            VertexDomain::Device => "VERTEX_DOMAIN_DEVICE",
        }
    }
}

// =============================================================================
// Properties, attributes and variables
// =============================================================================

/// Material property written by the material code.
///
/// Stored as a bit set (`1 << index`) in [`crate::MaterialMetadata::properties`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    BaseColor,
    Roughness,
    Metallic,
    Reflectance,
    AmbientOcclusion,
    ClearCoat,
    ClearCoatRoughness,
    ClearCoatNormal,
    Anisotropy,
    AnisotropyDirection,
    Thickness,
    SubsurfacePower,
    SubsurfaceColor,
    SheenColor,
    SpecularColor,
    Glossiness,
    Emissive,
    Normal,
}

/// Number of known material properties.
pub const MATERIAL_PROPERTIES_COUNT: usize = 18;

impl Property {
    /// All properties in bit order.
    pub const ALL: [Property; MATERIAL_PROPERTIES_COUNT] = [
        Property::BaseColor,
        Property::Roughness,
        Property::Metallic,
        Property::Reflectance,
        Property::AmbientOcclusion,
        Property::ClearCoat,
        Property::ClearCoatRoughness,
        Property::ClearCoatNormal,
        Property::Anisotropy,
        Property::AnisotropyDirection,
        Property::Thickness,
        Property::SubsurfacePower,
        Property::SubsurfaceColor,
        Property::SheenColor,
        Property::SpecularColor,
        Property::Glossiness,
        Property::Emissive,
        Property::Normal,
    ];

    /// Bit position, equal to the declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn bit(self) -> u32 {
        1 << self.index()
    }

    pub fn define(self) -> &'static str {
        match self {
            Property::BaseColor => "MATERIAL_HAS_BASE_COLOR",
            Property::Roughness => "MATERIAL_HAS_ROUGHNESS",
            Property::Metallic => "MATERIAL_HAS_METALLIC",
            Property::Reflectance => "MATERIAL_HAS_REFLECTANCE",
            Property::AmbientOcclusion => "MATERIAL_HAS_AMBIENT_OCCLUSION",
            Property::ClearCoat => "MATERIAL_HAS_CLEAR_COAT",
            Property::ClearCoatRoughness => "MATERIAL_HAS_CLEAR_COAT_ROUGHNESS",
            Property::ClearCoatNormal => "MATERIAL_HAS_CLEAR_COAT_NORMAL",
            Property::Anisotropy => "MATERIAL_HAS_ANISOTROPY",
            Property::AnisotropyDirection => "MATERIAL_HAS_ANISOTROPY_DIRECTION",
            Property::Thickness => "MATERIAL_HAS_THICKNESS",
            Property::SubsurfacePower => "MATERIAL_HAS_SUBSURFACE_POWER",
            Property::SubsurfaceColor => "MATERIAL_HAS_SUBSURFACE_COLOR",
            Property::SheenColor => "MATERIAL_HAS_SHEEN_COLOR",
            Property::SpecularColor => "MATERIAL_HAS_SPECULAR_COLOR",
            Property::Glossiness => "MATERIAL_HAS_GLOSSINESS",
            Property::Emissive => "MATERIAL_HAS_EMISSIVE",
            Property::Normal => "MATERIAL_HAS_NORMAL",
        }
    }
}

/// Vertex attribute consumed by the generated vertex shader.
///
/// Stored as a bit set (`1 << location`) in
/// [`crate::MaterialMetadata::required_attributes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexAttribute {
    Position,
    Tangents,
    Color,
    Uv0,
    Uv1,
    BoneIndices,
    BoneWeights,
}

impl VertexAttribute {
    /// All attributes in location order.
    pub const ALL: [VertexAttribute; 7] = [
        VertexAttribute::Position,
        VertexAttribute::Tangents,
        VertexAttribute::Color,
        VertexAttribute::Uv0,
        VertexAttribute::Uv1,
        VertexAttribute::BoneIndices,
        VertexAttribute::BoneWeights,
    ];

    /// Shader input location.
    pub fn location(self) -> u32 {
        match self {
            VertexAttribute::Position => 0,
            VertexAttribute::Tangents => 1,
            VertexAttribute::Color => 2,
            VertexAttribute::Uv0 => 3,
            VertexAttribute::Uv1 => 4,
            VertexAttribute::BoneIndices => 5,
            VertexAttribute::BoneWeights => 6,
        }
    }

    pub fn bit(self) -> u32 {
        1 << self.location()
    }

    /// GLSL declaration type and input name.
    pub fn glsl(self) -> (&'static str, &'static str) {
        match self {
            VertexAttribute::Position => ("vec4", "mesh_position"),
            VertexAttribute::Tangents => ("vec4", "mesh_tangents"),
            VertexAttribute::Color => ("vec4", "mesh_color"),
            VertexAttribute::Uv0 => ("vec2", "mesh_uv0"),
            VertexAttribute::Uv1 => ("vec2", "mesh_uv1"),
            VertexAttribute::BoneIndices => ("uvec4", "mesh_bone_indices"),
            VertexAttribute::BoneWeights => ("vec4", "mesh_bone_weights"),
        }
    }
}

/// Custom interpolant slot (float4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Custom0,
    Custom1,
    Custom2,
    Custom3,
}

/// Number of custom variable slots.
pub const MATERIAL_VARIABLES_COUNT: usize = 4;

impl Variable {
    pub const ALL: [Variable; MATERIAL_VARIABLES_COUNT] = [
        Variable::Custom0,
        Variable::Custom1,
        Variable::Custom2,
        Variable::Custom3,
    ];

    pub fn index(self) -> usize {
        match self {
            Variable::Custom0 => 0,
            Variable::Custom1 => 1,
            Variable::Custom2 => 2,
            Variable::Custom3 => 3,
        }
    }
}

// =============================================================================
// Parameter types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub enum UniformType {
    Bool,
    Bool2,
    Bool3,
    Bool4,
    Float,
    Float2,
    Float3,
    Float4,
    Int,
    Int2,
    Int3,
    Int4,
    Uint,
    Uint2,
    Uint3,
    Uint4,
    Mat3,
    Mat4,
}

impl UniformType {
    pub fn glsl(self) -> &'static str {
        match self {
            UniformType::Bool => "bool",
            UniformType::Bool2 => "bvec2",
            UniformType::Bool3 => "bvec3",
            UniformType::Bool4 => "bvec4",
            UniformType::Float => "float",
            UniformType::Float2 => "vec2",
            UniformType::Float3 => "vec3",
            UniformType::Float4 => "vec4",
            UniformType::Int => "int",
            UniformType::Int2 => "ivec2",
            UniformType::Int3 => "ivec3",
            UniformType::Int4 => "ivec4",
            UniformType::Uint => "uint",
            UniformType::Uint2 => "uvec2",
            UniformType::Uint3 => "uvec3",
            UniformType::Uint4 => "uvec4",
            UniformType::Mat3 => "mat3",
            UniformType::Mat4 => "mat4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub enum SamplerType {
    Sampler2d,
    Sampler2dArray,
    SamplerCubemap,
    /// Externally backed image (e.g. camera stream); format and precision are ignored
    SamplerExternal,
    Sampler3d,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
pub enum SamplerFormat {
    Int,
    Uint,
    #[default]
    Float,
    Shadow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
pub enum Precision {
    Low,
    Medium,
    High,
    #[default]
    Default,
}

impl Precision {
    /// GLSL qualifier, empty for `Default`.
    pub fn glsl(self) -> &'static str {
        match self {
            Precision::Low => "lowp ",
            Precision::Medium => "mediump ",
            Precision::High => "highp ",
            Precision::Default => "",
        }
    }
}
