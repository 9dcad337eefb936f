//! Package assembly
//!
//! Every (permutation, variant, stage) job is independent: it reads the
//! shared material and produces one blob. Jobs run on rayon when the builder
//! allows it; results are collected in job order either way, so the package
//! layout never depends on scheduling.
//!
//! Job order: permutation (shader model, target API, codegen API), then
//! variant ascending, then vertex before fragment.

use mat_common::{
    MaterialPackage, PackedShader, ShaderBlob, ShaderKey, ShaderModel, ShaderType, TargetApi,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::builder::MaterialBuilder;
use crate::error::MaterialError;
use crate::planner::CodeGenParams;
use crate::post_process::PostProcessed;
use crate::shader_gen::MaterialInfo;

/// One shader to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Job {
    pub params: CodeGenParams,
    pub variant: u8,
    pub stage: ShaderType,
}

impl Job {
    pub fn key(&self) -> ShaderKey {
        ShaderKey::new(
            self.params.shader_model,
            self.params.target_api,
            self.variant,
            self.stage,
        )
    }
}

/// All jobs for a build, in package order
pub(crate) fn plan_jobs(permutations: &[CodeGenParams], variants: &[u8]) -> Vec<Job> {
    let mut jobs = Vec::with_capacity(permutations.len() * variants.len() * ShaderType::ALL.len());
    for &params in permutations {
        for &variant in variants {
            for stage in ShaderType::ALL {
                jobs.push(Job {
                    params,
                    variant,
                    stage,
                });
            }
        }
    }
    jobs
}

/// Pick what a permutation stores from the post-processor output.
///
/// Vulkan stores the binary when there is one; everything else stores text.
pub(crate) fn select_blob(target_api: TargetApi, processed: PostProcessed) -> ShaderBlob {
    match (target_api, processed.binary) {
        (TargetApi::Vulkan, Some(binary)) => ShaderBlob::Binary(binary),
        _ => ShaderBlob::Text(processed.text),
    }
}

/// Build the package for a prepared builder
pub(crate) fn assemble(builder: &MaterialBuilder) -> Result<MaterialPackage, MaterialError> {
    let permutations = builder.code_gen_permutations();
    if permutations.is_empty() {
        return Err(MaterialError::NoPermutations);
    }

    let variants = builder.variants();
    let metadata = builder.metadata();
    let info = MaterialInfo {
        metadata: &metadata,
        material_code: builder.material_code(),
        vertex_code: builder.material_vertex_code(),
    };
    let jobs = plan_jobs(permutations, &variants);

    info!(
        material = %metadata.name,
        permutations = permutations.len(),
        variants = variants.len(),
        shaders = jobs.len(),
        parallel = builder.is_parallel(),
        "Building material"
    );

    let generate = |job: &Job| generate_shader(builder, job, &info);
    let shaders: Result<Vec<PackedShader>, MaterialError> = if builder.is_parallel() {
        jobs.par_iter().map(generate).collect()
    } else {
        jobs.iter().map(generate).collect()
    };
    let shaders = shaders?;

    let blob_bytes: usize = shaders.iter().map(|s| s.blob.byte_len()).sum();
    info!(
        material = %metadata.name,
        shaders = shaders.len(),
        blob_bytes,
        "Material built"
    );

    Ok(MaterialPackage::new(metadata, shaders))
}

fn generate_shader(
    builder: &MaterialBuilder,
    job: &Job,
    info: &MaterialInfo<'_>,
) -> Result<PackedShader, MaterialError> {
    let key = job.key();

    let text = builder
        .generator_ref()
        .generate(job.stage, &job.params, job.variant, info)
        .map_err(|source| {
            warn!(%key, error = %source, "Shader generation failed");
            MaterialError::ShaderGeneration { key, source }
        })?;

    let blob = match builder.post_processor_ref() {
        None => ShaderBlob::Text(text),
        Some(processor) => {
            let processed = processor
                .process(&text, job.stage, job.params.shader_model)
                .map_err(|message| {
                    warn!(%key, error = %message, "Post-processing failed");
                    MaterialError::PostProcess { key, message }
                })?;
            select_blob(job.params.target_api, processed)
        }
    };

    debug!(%key, kind = ?blob.kind(), bytes = blob.byte_len(), "Generated shader");
    Ok(PackedShader::new(key, blob))
}

/// Generate one stage of the first permutation and lowest variant
pub(crate) fn peek(
    builder: &MaterialBuilder,
    stage: ShaderType,
) -> Result<(String, ShaderModel), MaterialError> {
    let params = *builder
        .code_gen_permutations()
        .first()
        .ok_or(MaterialError::NoPermutations)?;
    // The base variant always survives expansion
    let variant = builder.variants().first().copied().unwrap_or(0);

    let metadata = builder.metadata();
    let info = MaterialInfo {
        metadata: &metadata,
        material_code: builder.material_code(),
        vertex_code: builder.material_vertex_code(),
    };
    let key = ShaderKey::new(params.shader_model, params.target_api, variant, stage);
    let text = builder
        .generator_ref()
        .generate(stage, &params, variant, &info)
        .map_err(|source| MaterialError::ShaderGeneration { key, source })?;

    debug!(%key, bytes = text.len(), "Peeked shader");
    Ok((text, params.shader_model))
}
