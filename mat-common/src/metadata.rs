//! Material metadata stored once per package.
//!
//! Everything a runtime loader needs to rebuild a usable material object
//! besides the shaders themselves: parameters, properties, attributes and
//! render state.

use bitcode::{Decode, Encode};

use crate::enums::{
    BlendingMode, CullingMode, Interpolation, Precision, Property, SamplerFormat, SamplerType,
    Shading, TransparencyMode, UniformType, VertexAttribute, VertexDomain,
    MATERIAL_VARIABLES_COUNT,
};

/// Maximum number of parameters a material may declare.
pub const MAX_PARAMETERS_COUNT: usize = 32;

/// A user-declared material parameter.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum Parameter {
    /// Uniform value, `size > 1` declares an array
    Uniform {
        name: String,
        ty: UniformType,
        size: u32,
    },
    /// Texture sampler
    Sampler {
        name: String,
        ty: SamplerType,
        format: SamplerFormat,
        precision: Precision,
    },
}

impl Parameter {
    pub fn uniform(name: impl Into<String>, ty: UniformType, size: u32) -> Self {
        Parameter::Uniform {
            name: name.into(),
            ty,
            size,
        }
    }

    /// Create a sampler parameter.
    ///
    /// External samplers ignore format and precision; they are normalized to
    /// the defaults so the metadata never carries meaningless values.
    pub fn sampler(
        name: impl Into<String>,
        ty: SamplerType,
        format: SamplerFormat,
        precision: Precision,
    ) -> Self {
        let (format, precision) = if ty == SamplerType::SamplerExternal {
            (SamplerFormat::default(), Precision::default())
        } else {
            (format, precision)
        };
        Parameter::Sampler {
            name: name.into(),
            ty,
            format,
            precision,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Parameter::Uniform { name, .. } | Parameter::Sampler { name, .. } => name,
        }
    }

    pub fn is_sampler(&self) -> bool {
        matches!(self, Parameter::Sampler { .. })
    }

    pub fn is_external_sampler(&self) -> bool {
        matches!(
            self,
            Parameter::Sampler {
                ty: SamplerType::SamplerExternal,
                ..
            }
        )
    }
}

/// Serialized material description (one copy per package).
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct MaterialMetadata {
    pub name: String,
    pub shading: Shading,
    pub interpolation: Interpolation,
    pub vertex_domain: VertexDomain,

    /// Bit set of [`Property::bit`]
    pub properties: u32,

    /// Declared parameters, in declaration order
    pub parameters: Vec<Parameter>,

    /// Custom variable names per slot
    pub variables: Vec<Option<String>>,

    /// Bit set of [`VertexAttribute::bit`], implied attributes included
    pub required_attributes: u32,

    // Render state
    pub blending: BlendingMode,
    /// Effective culling (double-sided already applied)
    pub culling: CullingMode,
    /// `Some` only when double-sided was set explicitly
    pub double_sided: Option<bool>,
    pub color_write: bool,
    pub depth_write: bool,
    pub depth_test: bool,
    pub mask_threshold: f32,
    pub shadow_multiplier: bool,
    pub transparency: TransparencyMode,
}

impl Default for MaterialMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            shading: Shading::default(),
            interpolation: Interpolation::default(),
            vertex_domain: VertexDomain::default(),
            properties: 0,
            parameters: Vec::new(),
            variables: vec![None; MATERIAL_VARIABLES_COUNT],
            required_attributes: VertexAttribute::Position.bit(),
            blending: BlendingMode::default(),
            culling: CullingMode::default(),
            double_sided: None,
            color_write: true,
            depth_write: true,
            depth_test: true,
            mask_threshold: 0.4,
            shadow_multiplier: false,
            transparency: TransparencyMode::default(),
        }
    }
}

impl MaterialMetadata {
    pub fn has_property(&self, property: Property) -> bool {
        self.properties & property.bit() != 0
    }

    pub fn requires(&self, attribute: VertexAttribute) -> bool {
        self.required_attributes & attribute.bit() != 0
    }

    /// Find a parameter by name
    pub fn find_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// True if any sampler parameter is external
    pub fn has_external_sampler(&self) -> bool {
        self.parameters.iter().any(Parameter::is_external_sampler)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bitcode::Error> {
        bitcode::decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_sampler_ignores_format_and_precision() {
        let p = Parameter::sampler(
            "camera",
            SamplerType::SamplerExternal,
            SamplerFormat::Shadow,
            Precision::High,
        );
        assert_eq!(
            p,
            Parameter::Sampler {
                name: "camera".to_string(),
                ty: SamplerType::SamplerExternal,
                format: SamplerFormat::Float,
                precision: Precision::Default,
            }
        );
        assert!(p.is_sampler());
        assert!(p.is_external_sampler());
    }

    #[test]
    fn test_regular_sampler_keeps_format() {
        let p = Parameter::sampler(
            "albedo",
            SamplerType::Sampler2d,
            SamplerFormat::Shadow,
            Precision::High,
        );
        match p {
            Parameter::Sampler {
                format, precision, ..
            } => {
                assert_eq!(format, SamplerFormat::Shadow);
                assert_eq!(precision, Precision::High);
            }
            Parameter::Uniform { .. } => panic!("expected sampler"),
        }
    }

    #[test]
    fn test_metadata_bytes_roundtrip() {
        let mut metadata = MaterialMetadata {
            name: "brick".to_string(),
            mask_threshold: 0.6,
            blending: BlendingMode::Masked,
            ..Default::default()
        };
        metadata.parameters.push(Parameter::uniform("tint", UniformType::Float4, 1));
        metadata.variables[2] = Some("eyeDir".to_string());

        let decoded = MaterialMetadata::from_bytes(&metadata.to_bytes()).unwrap();
        assert_eq!(decoded, metadata);
        assert_eq!(decoded.mask_threshold, 0.6);
        assert!(decoded.find_parameter("tint").is_some());
        assert!(!decoded.has_external_sampler());
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(MaterialMetadata::from_bytes(&[0xFF; 3]).is_err());
    }
}
