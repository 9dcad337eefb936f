//! Template filling for the default GLSL generator.

use mat_common::{
    BlendingMode, Interpolation, Parameter, Precision, Property, ShaderModel, ShaderType,
    TargetApi, VariantFlags, VertexAttribute,
};

use super::templates::MATERIAL_CODE_MARKER;
use super::{MaterialInfo, ShaderGenError, snippets};
use crate::planner::CodeGenParams;

/// One shader input/output passed from the vertex to the fragment stage
struct Varying {
    ty: &'static str,
    name: String,
    flat: bool,
}

/// Everything one (permutation, variant, stage) needs to fill a template
struct StageContext<'a> {
    stage: ShaderType,
    params: &'a CodeGenParams,
    flags: VariantFlags,
    material: &'a MaterialInfo<'a>,
    /// Required attributes plus the ones the variant adds
    attributes: u32,
    varyings: Vec<Varying>,
}

/// Generate one stage from a template
pub(crate) fn generate_stage(
    template: &str,
    stage: ShaderType,
    params: &CodeGenParams,
    variant: u8,
    material: &MaterialInfo<'_>,
) -> Result<String, ShaderGenError> {
    if params.shader_model == ShaderModel::Unknown {
        return Err(ShaderGenError::UnsupportedShaderModel(params.shader_model));
    }
    if !params.code_gen_target_api.is_concrete() {
        return Err(ShaderGenError::AbstractCodeGenTarget);
    }

    let (head, tail) = template
        .split_once(MATERIAL_CODE_MARKER)
        .ok_or(ShaderGenError::MissingMaterialCode { stage })?;

    let ctx = StageContext::new(stage, params, variant, material);
    let head = ctx.fill(head);
    let tail = ctx.fill(tail);
    for part in [&head, &tail] {
        if let Some(placeholder) = find_placeholder(part) {
            return Err(ShaderGenError::UnreplacedPlaceholder {
                stage,
                placeholder: placeholder.to_string(),
            });
        }
    }

    let code = match stage {
        ShaderType::Vertex => material.vertex_code,
        ShaderType::Fragment => material.material_code,
    };
    let body = if code.code.trim().is_empty() {
        match stage {
            ShaderType::Vertex => snippets::DEFAULT_VERTEX_CODE,
            ShaderType::Fragment => snippets::DEFAULT_MATERIAL_CODE,
        }
    } else {
        code.code.as_str()
    };

    let mut shader = String::with_capacity(head.len() + body.len() + tail.len() + 16);
    shader.push_str(&head);
    shader.push_str(&format!("#line {}\n", code.line_offset + 1));
    shader.push_str(body);
    if !body.ends_with('\n') {
        shader.push('\n');
    }
    shader.push_str(&tail);
    Ok(shader)
}

/// First line that still looks like `//PLACEHOLDER`
fn find_placeholder(source: &str) -> Option<&str> {
    source.lines().map(str::trim).find(|line| {
        line.strip_prefix("//").is_some_and(|name| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        })
    })
}

impl<'a> StageContext<'a> {
    fn new(
        stage: ShaderType,
        params: &'a CodeGenParams,
        variant: u8,
        material: &'a MaterialInfo<'a>,
    ) -> Self {
        let flags = VariantFlags::from_bits(variant);
        let mut attributes = material.metadata.required_attributes;
        if flags.skinning {
            attributes |= VertexAttribute::BoneIndices.bit() | VertexAttribute::BoneWeights.bit();
        }

        let mut ctx = Self {
            stage,
            params,
            flags,
            material,
            attributes,
            varyings: Vec::new(),
        };
        ctx.varyings = ctx.collect_varyings();
        ctx
    }

    fn vulkan(&self) -> bool {
        self.params.code_gen_target_api == TargetApi::Vulkan
    }

    /// ES dialect (GL ES 3.0 model with OpenGL codegen)
    fn essl(&self) -> bool {
        self.params.shader_model == ShaderModel::GlEs30 && !self.vulkan()
    }

    fn has(&self, attribute: VertexAttribute) -> bool {
        self.attributes & attribute.bit() != 0
    }

    fn fill(&self, part: &str) -> String {
        let mut shader = part.to_string();

        shader = shader.replace("//VERSION", self.version());
        shader = shader.replace("//EXTENSIONS", &self.extensions());
        shader = shader.replace("//DEFINES", &self.defines());
        shader = shader.replace(
            "//PRECISION",
            if self.essl() {
                snippets::PRECISION_ES
            } else {
                ""
            },
        );

        // Interface
        shader = shader.replace("//VIN_ATTRIBUTES", &self.attribute_inputs());
        shader = shader.replace("//VOUT_VARYINGS", &self.varying_decls("out"));
        shader = shader.replace("//FIN_VARYINGS", &self.varying_decls("in"));
        shader = shader.replace("//ENGINE_UNIFORMS", &self.engine_uniforms());
        shader = shader.replace("//MATERIAL_UNIFORMS", &self.material_uniforms());
        shader = shader.replace("//MATERIAL_SAMPLERS", &self.samplers());
        shader = shader.replace("//FOUT_COLOR", &self.fragment_output());

        // Vertex body
        let domain = self.material.metadata.vertex_domain;
        shader = shader.replace("//VS_MATERIAL_INPUTS", &self.vertex_material_inputs());
        shader = shader.replace("//VS_INIT_MATERIAL", &self.vertex_init_material());
        shader = shader.replace("//VS_WORLD_POSITION", snippets::world_position(domain));
        shader = shader.replace("//VS_VARYINGS_OUT", &self.vertex_varyings_out());
        shader = shader.replace("//VS_CLIP_POSITION", snippets::clip_position(domain));

        // Fragment body
        shader = shader.replace(
            "//FS_PREPARE_NORMAL",
            if self.has(VertexAttribute::Tangents) {
                snippets::FS_PREPARE_NORMAL
            } else {
                ""
            },
        );
        shader = shader.replace(
            "//FS_EVALUATE",
            if self.material.metadata.shading.is_lit() {
                snippets::FS_EVALUATE_LIT
            } else {
                snippets::FS_EVALUATE_UNLIT
            },
        );

        shader
    }

    fn version(&self) -> &'static str {
        if self.vulkan() {
            snippets::VERSION_VULKAN
        } else if self.params.shader_model == ShaderModel::GlEs30 {
            snippets::VERSION_GLES30
        } else {
            snippets::VERSION_GL41
        }
    }

    fn extensions(&self) -> String {
        if self.essl() && self.material.metadata.has_external_sampler() {
            snippets::EXT_EXTERNAL_IMAGE.to_string()
        } else {
            String::new()
        }
    }

    fn defines(&self) -> String {
        let metadata = self.material.metadata;
        let mut defines: Vec<String> = vec![
            match self.params.shader_model {
                ShaderModel::GlEs30 => "SHADER_MODEL_GLES30".to_string(),
                _ => "SHADER_MODEL_GL41".to_string(),
            },
            match self.params.target_api {
                TargetApi::Vulkan => "TARGET_VULKAN_ENVIRONMENT".to_string(),
                _ => "TARGET_GL_ENVIRONMENT".to_string(),
            },
            metadata.shading.define().to_string(),
            metadata.blending.define().to_string(),
            metadata.vertex_domain.define().to_string(),
            match metadata.interpolation {
                Interpolation::Smooth => "SHADING_INTERPOLATION_SMOOTH".to_string(),
                Interpolation::Flat => "SHADING_INTERPOLATION_FLAT".to_string(),
            },
        ];
        if metadata.shadow_multiplier {
            defines.push("MATERIAL_HAS_SHADOW_MULTIPLIER".to_string());
        }
        if metadata.double_sided == Some(true) {
            defines.push("MATERIAL_HAS_DOUBLE_SIDED_CAPABILITY".to_string());
        }
        defines.extend(
            Property::ALL
                .iter()
                .filter(|p| metadata.has_property(**p))
                .map(|p| p.define().to_string()),
        );
        defines.extend(
            VertexAttribute::ALL
                .iter()
                .filter(|a| self.has(**a))
                .map(|a| snippets::attribute_define(*a)),
        );
        defines.extend(self.flags.defines().into_iter().map(str::to_string));

        defines
            .iter()
            .map(|d| format!("#define {}", d))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn attribute_inputs(&self) -> String {
        VertexAttribute::ALL
            .iter()
            .filter(|a| self.has(**a))
            .map(|a| {
                let (ty, name) = a.glsl();
                format!("layout(location = {}) in {} {};", a.location(), ty, name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect_varyings(&self) -> Vec<Varying> {
        let metadata = self.material.metadata;
        let mut varyings = vec![Varying {
            ty: "vec3",
            name: "vertex_worldPosition".to_string(),
            flat: false,
        }];
        if self.has(VertexAttribute::Tangents) {
            varyings.push(Varying {
                ty: "vec3",
                name: "vertex_worldNormal".to_string(),
                flat: false,
            });
        }
        if self.has(VertexAttribute::Color) {
            varyings.push(Varying {
                ty: "vec4",
                name: "vertex_color".to_string(),
                flat: false,
            });
        }
        for (attribute, name) in [
            (VertexAttribute::Uv0, "vertex_uv0"),
            (VertexAttribute::Uv1, "vertex_uv1"),
        ] {
            if self.has(attribute) {
                varyings.push(Varying {
                    ty: "vec2",
                    name: name.to_string(),
                    flat: false,
                });
            }
        }
        if self.flags.shadow_receiver {
            varyings.push(Varying {
                ty: "vec4",
                name: "vertex_lightSpacePosition".to_string(),
                flat: false,
            });
        }
        for name in metadata.variables.iter().flatten() {
            varyings.push(Varying {
                ty: "vec4",
                name: format!("variable_{}", name),
                flat: metadata.interpolation == Interpolation::Flat,
            });
        }
        varyings
    }

    fn varying_decls(&self, direction: &str) -> String {
        self.varyings
            .iter()
            .enumerate()
            .map(|(location, v)| {
                // ESSL 3.00 has no location qualifier on varyings
                let layout = if self.essl() {
                    String::new()
                } else {
                    format!("layout(location = {}) ", location)
                };
                let flat = if v.flat { "flat " } else { "" };
                format!("{}{}{} {} {};", layout, flat, direction, v.ty, v.name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn engine_uniforms(&self) -> String {
        let vulkan = self.vulkan();
        let mut blocks = vec![
            snippets::block_layout(vulkan, snippets::BINDING_FRAME) + snippets::FRAME_UNIFORMS,
            snippets::block_layout(vulkan, snippets::BINDING_OBJECT) + snippets::OBJECT_UNIFORMS,
        ];
        if self.flags.skinning && self.stage == ShaderType::Vertex {
            blocks.push(
                snippets::block_layout(vulkan, snippets::BINDING_BONES) + snippets::BONES_UNIFORMS,
            );
        }
        if self.flags.dynamic_lighting && self.stage == ShaderType::Fragment {
            blocks.push(
                snippets::block_layout(vulkan, snippets::BINDING_LIGHTS)
                    + snippets::LIGHTS_UNIFORMS,
            );
        }
        blocks.join("\n\n")
    }

    fn material_uniforms(&self) -> String {
        let metadata = self.material.metadata;
        let mut members: Vec<String> = metadata
            .parameters
            .iter()
            .filter_map(|p| match p {
                Parameter::Uniform { name, ty, size } if *size > 1 => {
                    Some(format!("    {} {}[{}];", ty.glsl(), name, size))
                }
                Parameter::Uniform { name, ty, .. } => Some(format!("    {} {};", ty.glsl(), name)),
                Parameter::Sampler { .. } => None,
            })
            .collect();
        if metadata.blending == BlendingMode::Masked {
            members.push(snippets::MASK_THRESHOLD_MEMBER.to_string());
        }
        if members.is_empty() {
            return String::new();
        }
        format!(
            "{}uniform MaterialParams {{\n{}\n}} materialParams;",
            snippets::block_layout(self.vulkan(), snippets::BINDING_MATERIAL),
            members.join("\n")
        )
    }

    fn samplers(&self) -> String {
        let vulkan = self.vulkan();
        let essl = self.essl();
        let mut decls: Vec<String> = self
            .material
            .metadata
            .parameters
            .iter()
            .filter_map(|p| match p {
                Parameter::Sampler {
                    name,
                    ty,
                    format,
                    precision,
                } => Some((name, *ty, *format, *precision)),
                Parameter::Uniform { .. } => None,
            })
            .enumerate()
            .map(|(binding, (name, ty, format, precision))| {
                let layout = if vulkan {
                    format!(
                        "layout(set = {}, binding = {}) ",
                        snippets::SET_MATERIAL_SAMPLERS,
                        binding
                    )
                } else {
                    String::new()
                };
                format!(
                    "{}uniform {}{} materialParams_{};",
                    layout,
                    precision.glsl(),
                    snippets::sampler_glsl(ty, format, essl),
                    name
                )
            })
            .collect();

        if self.flags.shadow_receiver && self.stage == ShaderType::Fragment {
            let layout = if vulkan {
                format!("layout(set = {}, binding = 0) ", snippets::SET_ENGINE_SAMPLERS)
            } else {
                String::new()
            };
            decls.push(format!(
                "{}uniform {}sampler2DShadow {};",
                layout,
                Precision::High.glsl(),
                snippets::SHADOW_MAP_NAME
            ));
        }
        decls.join("\n")
    }

    fn fragment_output(&self) -> String {
        "layout(location = 0) out vec4 fragColor;".to_string()
    }

    fn vertex_material_inputs(&self) -> String {
        let mut fields = vec!["    vec4 worldPosition;".to_string()];
        if self.has(VertexAttribute::Color) {
            fields.push("    vec4 color;".to_string());
        }
        if self.has(VertexAttribute::Uv0) {
            fields.push("    vec2 uv0;".to_string());
        }
        if self.has(VertexAttribute::Uv1) {
            fields.push("    vec2 uv1;".to_string());
        }
        for name in self.material.metadata.variables.iter().flatten() {
            fields.push(format!("    vec4 {};", name));
        }
        fields.join("\n")
    }

    fn vertex_init_material(&self) -> String {
        let mut lines = Vec::new();
        if self.has(VertexAttribute::Color) {
            lines.push("    material.color = mesh_color;".to_string());
        }
        if self.has(VertexAttribute::Uv0) {
            lines.push("    material.uv0 = mesh_uv0;".to_string());
        }
        if self.has(VertexAttribute::Uv1) {
            lines.push("    material.uv1 = mesh_uv1;".to_string());
        }
        for name in self.material.metadata.variables.iter().flatten() {
            lines.push(format!("    material.{} = vec4(0.0);", name));
        }
        lines.join("\n")
    }

    fn vertex_varyings_out(&self) -> String {
        let mut lines = vec!["    vertex_worldPosition = material.worldPosition.xyz;".to_string()];
        if self.has(VertexAttribute::Tangents) {
            lines.push(
                "    vertex_worldNormal = normalize(mat3(objectUniforms.worldFromModel) * mesh_tangents.xyz);"
                    .to_string(),
            );
        }
        if self.has(VertexAttribute::Color) {
            lines.push("    vertex_color = material.color;".to_string());
        }
        if self.has(VertexAttribute::Uv0) {
            lines.push("    vertex_uv0 = material.uv0;".to_string());
        }
        if self.has(VertexAttribute::Uv1) {
            lines.push("    vertex_uv1 = material.uv1;".to_string());
        }
        if self.flags.shadow_receiver {
            lines.push(
                "    vertex_lightSpacePosition = frameUniforms.lightFromWorld * material.worldPosition;"
                    .to_string(),
            );
        }
        for name in self.material.metadata.variables.iter().flatten() {
            lines.push(format!("    variable_{} = material.{};", name, name));
        }
        lines.join("\n")
    }
}
