use std::fmt;

use mat_common::{ShaderModel, ShaderType};

/// Error type for shader generation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderGenError {
    /// Shader model that no template supports
    UnsupportedShaderModel(ShaderModel),
    /// Codegen API must be concrete when generating
    AbstractCodeGenTarget,
    /// Template has no `//MATERIAL_CODE` marker
    MissingMaterialCode { stage: ShaderType },
    /// Template placeholder the generator doesn't know
    UnreplacedPlaceholder {
        stage: ShaderType,
        placeholder: String,
    },
    /// Failure reported by a custom generator
    Other(String),
}

impl fmt::Display for ShaderGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderGenError::UnsupportedShaderModel(model) => {
                write!(f, "Unsupported shader model: {}", model.name())
            }
            ShaderGenError::AbstractCodeGenTarget => {
                write!(f, "Code generation target API must be opengl or vulkan")
            }
            ShaderGenError::MissingMaterialCode { stage } => {
                write!(f, "The {} template has no material code marker", stage.name())
            }
            ShaderGenError::UnreplacedPlaceholder { stage, placeholder } => {
                write!(
                    f,
                    "Unreplaced placeholder {} in {} shader",
                    placeholder,
                    stage.name()
                )
            }
            ShaderGenError::Other(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ShaderGenError {}
