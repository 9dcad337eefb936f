//! Nethercore material compiler
//!
//! Turns a material description into a self-describing package holding one
//! shader per (shader model, target API, variant, stage), ready for a
//! runtime to load with [`mat_common::PackageReader`].
//!
//! # Architecture
//!
//! - [`MaterialBuilder`] - Chained configuration, `build()` and `peek()`
//! - [`planner`] - Platform and target API hints to code generation permutations
//! - [`variants`] - Variant space pruning by shading, vertex domain and filter
//! - [`shader_gen`] - [`ShaderGenerator`] seam and the default [`GlslGenerator`]
//! - [`post_process`] - Optional [`PostProcessor`] applied to every shader
//! - [`config`] - TOML build hints ([`CompilerConfig`])

mod assembler;
pub mod builder;
pub mod config;
pub mod error;
pub mod planner;
pub mod post_process;
pub mod shader_gen;
pub mod variants;

pub use mat_common;

pub use builder::MaterialBuilder;
pub use config::CompilerConfig;
pub use error::MaterialError;
pub use planner::{CodeGenParams, Plan, Platform, ShaderModelSet, plan};
pub use post_process::{PostProcessed, PostProcessor};
pub use shader_gen::{GlslGenerator, MaterialCode, MaterialInfo, ShaderGenError, ShaderGenerator};
pub use variants::{VariantBit, VariantContext, expand_variants};
