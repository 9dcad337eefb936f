//! Compiler configuration (TOML)
//!
//! Build hints a build tool passes to every material it compiles:
//!
//! ```toml
//! platform = "all"                 # desktop | mobile | all
//! target_api = "all"               # all | opengl | vulkan
//! code_gen_target_api = "vulkan"   # optional, mirrors target_api when absent
//! variant_filter = ["skinning"]
//! parallel = true
//! ```
//!
//! Every key is optional; missing keys take the builder defaults.

use std::path::Path;

use anyhow::{Context, Result};
use mat_common::TargetApi;
use serde::{Deserialize, Serialize};

use crate::builder::MaterialBuilder;
use crate::planner::Platform;
use crate::variants::VariantBit;

/// Build hints shared by all materials of a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Hardware class (default: desktop)
    #[serde(default)]
    pub platform: Platform,
    /// Target API(s) (default: opengl)
    #[serde(default)]
    pub target_api: TargetApi,
    /// Codegen API override (default: mirror the target)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_gen_target_api: Option<TargetApi>,
    /// Variant bits to exclude
    #[serde(default)]
    pub variant_filter: Vec<VariantBit>,
    /// Generate shaders in parallel (default: true)
    #[serde(default = "default_true")]
    pub parallel: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            target_api: TargetApi::default(),
            code_gen_target_api: None,
            variant_filter: Vec::new(),
            parallel: default_true(),
        }
    }
}

impl CompilerConfig {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read compiler config: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse compiler config: {}", path.display()))
    }

    /// Variant filter as a bit mask
    pub fn variant_filter_mask(&self) -> u8 {
        VariantBit::mask(&self.variant_filter)
    }

    /// Apply the hints to a builder. The codegen override is applied after the
    /// target API, which would otherwise reset it.
    pub fn apply(&self, builder: &mut MaterialBuilder) {
        builder
            .platform(self.platform)
            .target_api(self.target_api)
            .variant_filter(self.variant_filter_mask())
            .parallel(self.parallel);
        if let Some(api) = self.code_gen_target_api {
            builder.code_gen_target_api(api);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mat_common::{VARIANT_DYNAMIC_LIGHTING, VARIANT_SKINNING};
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CompilerConfig::parse("").unwrap();
        assert_eq!(config, CompilerConfig::default());
        assert!(config.parallel);
        assert_eq!(config.platform, Platform::Desktop);
        assert_eq!(config.target_api, TargetApi::OpenGl);
    }

    #[test]
    fn test_parse_full_config() {
        let config = CompilerConfig::parse(
            r#"
platform = "all"
target_api = "all"
code_gen_target_api = "vulkan"
variant_filter = ["skinning", "dynamic_lighting"]
parallel = false
"#,
        )
        .unwrap();
        assert_eq!(config.platform, Platform::All);
        assert_eq!(config.target_api, TargetApi::All);
        assert_eq!(config.code_gen_target_api, Some(TargetApi::Vulkan));
        assert_eq!(
            config.variant_filter_mask(),
            VARIANT_SKINNING | VARIANT_DYNAMIC_LIGHTING
        );
        assert!(!config.parallel);
    }

    #[test]
    fn test_unknown_value_rejected() {
        assert!(CompilerConfig::parse(r#"platform = "console""#).is_err());
        assert!(CompilerConfig::parse(r#"variant_filter = ["fog"]"#).is_err());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = CompilerConfig {
            platform: Platform::Mobile,
            target_api: TargetApi::Vulkan,
            code_gen_target_api: None,
            variant_filter: vec![VariantBit::ShadowReceiver],
            parallel: true,
        };
        let text = toml::to_string(&config).unwrap();
        assert!(!text.contains("code_gen_target_api"));
        assert_eq!(CompilerConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_apply_keeps_code_gen_override() {
        let config = CompilerConfig {
            platform: Platform::All,
            target_api: TargetApi::All,
            code_gen_target_api: Some(TargetApi::OpenGl),
            variant_filter: vec![VariantBit::Skinning],
            parallel: false,
        };
        let mut builder = MaterialBuilder::new();
        config.apply(&mut builder);
        assert_eq!(builder.get_platform(), Platform::All);
        assert_eq!(builder.get_target_api(), TargetApi::All);
        assert_eq!(builder.get_code_gen_target_api(), TargetApi::OpenGl);
        assert_eq!(builder.get_variant_filter(), VARIANT_SKINNING);

        builder.prepare();
        assert_eq!(builder.code_gen_permutations().len(), 4);
        assert!(
            builder
                .code_gen_permutations()
                .iter()
                .all(|p| p.code_gen_target_api == TargetApi::OpenGl)
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "platform = \"mobile\"").unwrap();
        writeln!(file, "target_api = \"vulkan\"").unwrap();

        let config = CompilerConfig::load(file.path()).unwrap();
        assert_eq!(config.platform, Platform::Mobile);
        assert_eq!(config.target_api, TargetApi::Vulkan);
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = CompilerConfig::load(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read compiler config"));
        assert!(err.to_string().contains("missing.toml"));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "platform = 3").unwrap();
        let err = CompilerConfig::load(&bad).unwrap_err();
        assert!(err.to_string().contains("Failed to parse compiler config"));
    }
}
