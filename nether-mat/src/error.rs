//! Material compiler errors.

use mat_common::{PackageError, ShaderKey, Variable};
use thiserror::Error;

use crate::shader_gen::ShaderGenError;

/// Errors raised by material configuration and builds
#[derive(Debug, Error)]
pub enum MaterialError {
    // ========================================================================
    // Configuration (raised by the offending builder call)
    // ========================================================================
    #[error("Parameter name must not be empty")]
    EmptyParameterName,

    #[error("Duplicate parameter name: {0}")]
    DuplicateParameter(String),

    #[error("Too many parameters: {name} would exceed the maximum of {max}")]
    TooManyParameters { name: String, max: usize },

    #[error("Parameter {0} declares an array of size 0")]
    ZeroArraySize(String),

    #[error("Custom variable {variable:?} name must not be empty")]
    EmptyVariableName { variable: Variable },

    #[error("Custom variable name {name} is already used by {existing:?}")]
    DuplicateVariable { name: String, existing: Variable },

    // ========================================================================
    // Build
    // ========================================================================
    #[error("No code generation permutations to build")]
    NoPermutations,

    #[error("Shader generation failed for {key}: {source}")]
    ShaderGeneration {
        key: ShaderKey,
        #[source]
        source: ShaderGenError,
    },

    #[error("Post-processing failed for {key}: {message}")]
    PostProcess { key: ShaderKey, message: String },

    #[error("Package error: {0}")]
    Package(#[from] PackageError),
}
