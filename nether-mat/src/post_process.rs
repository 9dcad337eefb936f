//! Post-processing seam
//!
//! A post-processor receives each generated shader and may rewrite its text
//! (optimize, validate) and/or produce a binary form. Closures with the
//! matching signature implement [`PostProcessor`] directly.

use mat_common::{ShaderModel, ShaderType};

/// Output of a post-processing step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostProcessed {
    /// Source text to store for text targets
    pub text: String,
    /// Binary words to store for Vulkan targets
    pub binary: Option<Vec<u32>>,
}

impl PostProcessed {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            binary: None,
        }
    }

    pub fn with_binary(text: impl Into<String>, binary: Vec<u32>) -> Self {
        Self {
            text: text.into(),
            binary: Some(binary),
        }
    }
}

/// Caller-supplied shader post-processor.
///
/// Called once per generated shader, possibly from several threads at once.
/// An `Err` aborts the whole build.
pub trait PostProcessor: Send + Sync {
    fn process(
        &self,
        input: &str,
        stage: ShaderType,
        shader_model: ShaderModel,
    ) -> Result<PostProcessed, String>;
}

impl<F> PostProcessor for F
where
    F: Fn(&str, ShaderType, ShaderModel) -> Result<PostProcessed, String> + Send + Sync,
{
    fn process(
        &self,
        input: &str,
        stage: ShaderType,
        shader_model: ShaderModel,
    ) -> Result<PostProcessed, String> {
        self(input, stage, shader_model)
    }
}
