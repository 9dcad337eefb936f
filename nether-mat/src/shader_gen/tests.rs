use super::*;
use mat_common::{
    BlendingMode, Interpolation, Parameter, Precision, Property, SamplerFormat, SamplerType,
    ShaderModel, Shading, TargetApi, UniformType, VARIANT_DIRECTIONAL_LIGHTING,
    VARIANT_SHADOW_RECEIVER, VARIANT_SKINNING, VertexAttribute, VertexDomain,
};

fn params(shader_model: ShaderModel, api: TargetApi) -> CodeGenParams {
    CodeGenParams {
        shader_model,
        target_api: api,
        code_gen_target_api: api,
    }
}

fn lit_metadata() -> MaterialMetadata {
    MaterialMetadata {
        name: "test".to_string(),
        required_attributes: VertexAttribute::Position.bit() | VertexAttribute::Tangents.bit(),
        ..Default::default()
    }
}

fn generate(
    stage: ShaderType,
    params: &CodeGenParams,
    variant: u8,
    metadata: &MaterialMetadata,
    code: &MaterialCode,
) -> Result<String, ShaderGenError> {
    let empty = MaterialCode::default();
    let info = MaterialInfo {
        metadata,
        material_code: if stage == ShaderType::Fragment { code } else { &empty },
        vertex_code: if stage == ShaderType::Vertex { code } else { &empty },
    };
    GlslGenerator::new().generate(stage, params, variant, &info)
}

#[test]
fn test_version_header_per_permutation() {
    let metadata = lit_metadata();
    let code = MaterialCode::default();
    let cases = [
        (ShaderModel::GlEs30, TargetApi::OpenGl, "#version 300 es\n"),
        (ShaderModel::GlCore41, TargetApi::OpenGl, "#version 410 core\n"),
        (ShaderModel::GlEs30, TargetApi::Vulkan, "#version 450\n"),
        (ShaderModel::GlCore41, TargetApi::Vulkan, "#version 450\n"),
    ];
    for (model, api, header) in cases {
        for stage in ShaderType::ALL {
            let shader = generate(stage, &params(model, api), 0, &metadata, &code).unwrap();
            assert!(shader.starts_with(header), "{:?} {:?} {:?}", model, api, stage);
        }
    }
}

#[test]
fn test_all_placeholders_replaced() {
    let metadata = lit_metadata();
    let code = MaterialCode::default();
    for variant in 0..16u8 {
        for stage in ShaderType::ALL {
            let shader = generate(
                stage,
                &params(ShaderModel::GlCore41, TargetApi::OpenGl),
                variant,
                &metadata,
                &code,
            )
            .unwrap();
            assert!(!shader.contains("//VERSION"));
            assert!(!shader.contains("//DEFINES"));
            assert!(!shader.contains("//MATERIAL_CODE"));
        }
    }
}

#[test]
fn test_defines() {
    let mut metadata = lit_metadata();
    metadata.blending = BlendingMode::Masked;
    metadata.properties = Property::BaseColor.bit() | Property::Roughness.bit();
    let shader = generate(
        ShaderType::Fragment,
        &params(ShaderModel::GlCore41, TargetApi::OpenGl),
        VARIANT_DIRECTIONAL_LIGHTING,
        &metadata,
        &MaterialCode::default(),
    )
    .unwrap();

    for define in [
        "#define SHADER_MODEL_GL41",
        "#define TARGET_GL_ENVIRONMENT",
        "#define SHADING_MODEL_LIT",
        "#define BLEND_MODE_MASKED",
        "#define VERTEX_DOMAIN_OBJECT",
        "#define MATERIAL_HAS_BASE_COLOR",
        "#define MATERIAL_HAS_ROUGHNESS",
        "#define HAS_ATTRIBUTE_TANGENTS",
        "#define HAS_DIRECTIONAL_LIGHTING",
    ] {
        assert!(shader.contains(define), "missing {}", define);
    }
    assert!(!shader.contains("#define MATERIAL_HAS_METALLIC"));
    assert!(!shader.contains("#define HAS_SHADOWING"));
    assert!(shader.contains("float _maskThreshold;"));
}

#[test]
fn test_line_directive_maps_material_code() {
    let metadata = lit_metadata();
    let code = MaterialCode::new(
        "void material(inout MaterialInputs material) {\n    prepareMaterial(material);\n    material.baseColor = vec4(1.0, 0.0, 0.0, 1.0);\n}",
        41,
    );
    let shader = generate(
        ShaderType::Fragment,
        &params(ShaderModel::GlCore41, TargetApi::OpenGl),
        0,
        &metadata,
        &code,
    )
    .unwrap();

    let expected = format!("#line 42\n{}\n", code.code);
    assert!(shader.contains(&expected));
}

#[test]
fn test_default_material_code() {
    let metadata = lit_metadata();
    let code = MaterialCode::default();
    let p = params(ShaderModel::GlCore41, TargetApi::OpenGl);

    let fragment = generate(ShaderType::Fragment, &p, 0, &metadata, &code).unwrap();
    assert!(fragment.contains("#line 1\nvoid material(inout MaterialInputs material) {"));
    assert!(fragment.contains("prepareMaterial(material);"));

    let vertex = generate(ShaderType::Vertex, &p, 0, &metadata, &code).unwrap();
    assert!(vertex.contains("void materialVertex(inout MaterialVertexInputs material) {"));
}

#[test]
fn test_skinning_adds_bone_attributes() {
    let metadata = lit_metadata();
    let code = MaterialCode::default();
    let p = params(ShaderModel::GlCore41, TargetApi::OpenGl);

    let base = generate(ShaderType::Vertex, &p, 0, &metadata, &code).unwrap();
    assert!(!base.contains("mesh_bone_indices;"));
    assert!(!base.contains("BonesUniforms"));

    let skinned = generate(ShaderType::Vertex, &p, VARIANT_SKINNING, &metadata, &code).unwrap();
    assert!(skinned.contains("layout(location = 5) in uvec4 mesh_bone_indices;"));
    assert!(skinned.contains("layout(location = 6) in vec4 mesh_bone_weights;"));
    assert!(skinned.contains("#define HAS_SKINNING"));
    assert!(skinned.contains("uniform BonesUniforms"));
}

#[test]
fn test_shadow_variant_declares_shadow_map() {
    let metadata = lit_metadata();
    let code = MaterialCode::default();
    let p = params(ShaderModel::GlCore41, TargetApi::OpenGl);

    let fragment =
        generate(ShaderType::Fragment, &p, VARIANT_SHADOW_RECEIVER, &metadata, &code).unwrap();
    assert!(fragment.contains("uniform highp sampler2DShadow light_shadowMap;"));
    assert!(fragment.contains("in vec4 vertex_lightSpacePosition;"));

    let vertex =
        generate(ShaderType::Vertex, &p, VARIANT_SHADOW_RECEIVER, &metadata, &code).unwrap();
    assert!(vertex.contains("vertex_lightSpacePosition = frameUniforms.lightFromWorld"));
}

#[test]
fn test_unlit_uses_unlit_evaluation() {
    let metadata = MaterialMetadata {
        shading: Shading::Unlit,
        ..Default::default()
    };
    let shader = generate(
        ShaderType::Fragment,
        &params(ShaderModel::GlCore41, TargetApi::OpenGl),
        0,
        &metadata,
        &MaterialCode::default(),
    )
    .unwrap();
    assert!(shader.contains("#define SHADING_MODEL_UNLIT"));
    assert!(shader.contains("vec4 color = material.baseColor;"));
    assert!(!shader.contains("vertex_worldNormal"));
}

#[test]
fn test_parameters_and_variables() {
    let mut metadata = lit_metadata();
    metadata.interpolation = Interpolation::Flat;
    metadata.parameters = vec![
        Parameter::uniform("tint", UniformType::Float4, 1),
        Parameter::uniform("weights", UniformType::Float, 4),
        Parameter::sampler(
            "albedo",
            SamplerType::Sampler2d,
            SamplerFormat::Float,
            Precision::Medium,
        ),
    ];
    metadata.variables[0] = Some("eyeDir".to_string());

    let p = params(ShaderModel::GlCore41, TargetApi::OpenGl);
    let fragment = generate(
        ShaderType::Fragment,
        &p,
        0,
        &metadata,
        &MaterialCode::default(),
    )
    .unwrap();
    assert!(fragment.contains("layout(std140) uniform MaterialParams {"));
    assert!(fragment.contains("    vec4 tint;"));
    assert!(fragment.contains("    float weights[4];"));
    assert!(fragment.contains("uniform mediump sampler2D materialParams_albedo;"));
    assert!(fragment.contains("flat in vec4 variable_eyeDir;"));

    let vertex = generate(ShaderType::Vertex, &p, 0, &metadata, &MaterialCode::default()).unwrap();
    assert!(vertex.contains("flat out vec4 variable_eyeDir;"));
    assert!(vertex.contains("variable_eyeDir = material.eyeDir;"));
}

#[test]
fn test_vulkan_bindings() {
    let mut metadata = lit_metadata();
    metadata.parameters = vec![Parameter::sampler(
        "albedo",
        SamplerType::Sampler2d,
        SamplerFormat::Float,
        Precision::Default,
    )];
    let shader = generate(
        ShaderType::Fragment,
        &params(ShaderModel::GlCore41, TargetApi::Vulkan),
        0,
        &metadata,
        &MaterialCode::default(),
    )
    .unwrap();
    assert!(shader.contains("layout(set = 0, binding = 0, std140) uniform FrameUniforms"));
    assert!(shader.contains("layout(set = 1, binding = 0) uniform sampler2D materialParams_albedo;"));
    assert!(shader.contains("#define TARGET_VULKAN_ENVIRONMENT"));
}

#[test]
fn test_external_sampler_on_es() {
    let mut metadata = lit_metadata();
    metadata.parameters = vec![Parameter::sampler(
        "camera",
        SamplerType::SamplerExternal,
        SamplerFormat::Float,
        Precision::Default,
    )];
    let code = MaterialCode::default();

    let es = generate(
        ShaderType::Fragment,
        &params(ShaderModel::GlEs30, TargetApi::OpenGl),
        0,
        &metadata,
        &code,
    )
    .unwrap();
    assert!(es.contains("#extension GL_OES_EGL_image_external_essl3 : require"));
    assert!(es.contains("uniform samplerExternalOES materialParams_camera;"));
    assert!(es.contains("precision highp float;"));
    // ESSL 3.00 varyings carry no location
    assert!(es.contains("\nin vec3 vertex_worldPosition;"));

    let desktop = generate(
        ShaderType::Fragment,
        &params(ShaderModel::GlCore41, TargetApi::OpenGl),
        0,
        &metadata,
        &code,
    )
    .unwrap();
    assert!(!desktop.contains("#extension"));
    assert!(desktop.contains("uniform sampler2D materialParams_camera;"));
}

#[test]
fn test_vertex_domains() {
    let code = MaterialCode::default();
    let p = params(ShaderModel::GlCore41, TargetApi::OpenGl);
    let mut metadata = lit_metadata();

    metadata.vertex_domain = VertexDomain::Device;
    let device = generate(ShaderType::Vertex, &p, 0, &metadata, &code).unwrap();
    assert!(device.contains("gl_Position = position;"));
    assert!(device.contains("#define VERTEX_DOMAIN_DEVICE"));

    metadata.vertex_domain = VertexDomain::Object;
    let object = generate(ShaderType::Vertex, &p, 0, &metadata, &code).unwrap();
    assert!(object.contains("objectUniforms.worldFromModel * position"));
}

#[test]
fn test_unknown_placeholder_is_an_error() {
    let generator = GlslGenerator::with_templates(
        "//VERSION\n//NOT_A_REAL_SLOT\n//MATERIAL_CODE\nvoid main() {}\n",
        "//VERSION\n//MATERIAL_CODE\nvoid main() {}\n",
    );
    let metadata = lit_metadata();
    let code = MaterialCode::default();
    let info = MaterialInfo {
        metadata: &metadata,
        material_code: &code,
        vertex_code: &code,
    };
    let p = params(ShaderModel::GlCore41, TargetApi::OpenGl);

    assert_eq!(
        generator.generate(ShaderType::Vertex, &p, 0, &info).unwrap_err(),
        ShaderGenError::UnreplacedPlaceholder {
            stage: ShaderType::Vertex,
            placeholder: "//NOT_A_REAL_SLOT".to_string(),
        }
    );
    assert!(generator.generate(ShaderType::Fragment, &p, 0, &info).is_ok());
}

#[test]
fn test_material_code_may_contain_comments() {
    let metadata = lit_metadata();
    let code = MaterialCode::new(
        "//TODO_LATER\nvoid material(inout MaterialInputs material) {\n    prepareMaterial(material);\n}\n",
        0,
    );
    let shader = generate(
        ShaderType::Fragment,
        &params(ShaderModel::GlCore41, TargetApi::OpenGl),
        0,
        &metadata,
        &code,
    );
    assert!(shader.is_ok());
}

#[test]
fn test_missing_marker_is_an_error() {
    let generator = GlslGenerator::with_templates("//VERSION\n", "//VERSION\n");
    let metadata = lit_metadata();
    let code = MaterialCode::default();
    let info = MaterialInfo {
        metadata: &metadata,
        material_code: &code,
        vertex_code: &code,
    };
    let err = generator
        .generate(
            ShaderType::Fragment,
            &params(ShaderModel::GlCore41, TargetApi::OpenGl),
            0,
            &info,
        )
        .unwrap_err();
    assert_eq!(
        err,
        ShaderGenError::MissingMaterialCode {
            stage: ShaderType::Fragment
        }
    );
}

#[test]
fn test_rejects_abstract_permutations() {
    let metadata = lit_metadata();
    let code = MaterialCode::default();

    let unknown = generate(
        ShaderType::Vertex,
        &params(ShaderModel::Unknown, TargetApi::OpenGl),
        0,
        &metadata,
        &code,
    );
    assert_eq!(
        unknown.unwrap_err(),
        ShaderGenError::UnsupportedShaderModel(ShaderModel::Unknown)
    );

    let all = CodeGenParams {
        shader_model: ShaderModel::GlCore41,
        target_api: TargetApi::OpenGl,
        code_gen_target_api: TargetApi::All,
    };
    assert_eq!(
        generate(ShaderType::Vertex, &all, 0, &metadata, &code).unwrap_err(),
        ShaderGenError::AbstractCodeGenTarget
    );
}

#[test]
fn test_generation_is_deterministic() {
    let metadata = lit_metadata();
    let code = MaterialCode::default();
    let p = params(ShaderModel::GlEs30, TargetApi::OpenGl);
    let a = generate(ShaderType::Fragment, &p, 0x07, &metadata, &code).unwrap();
    let b = generate(ShaderType::Fragment, &p, 0x07, &metadata, &code).unwrap();
    assert_eq!(a, b);
}
