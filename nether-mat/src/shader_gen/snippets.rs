//! GLSL snippets inserted into the stage templates.

use mat_common::{SamplerFormat, SamplerType, VertexAttribute, VertexDomain};

// Version headers (first line of every shader)
pub(crate) const VERSION_GLES30: &str = "#version 300 es";
pub(crate) const VERSION_GL41: &str = "#version 410 core";
pub(crate) const VERSION_VULKAN: &str = "#version 450";

pub(crate) const EXT_EXTERNAL_IMAGE: &str = "#extension GL_OES_EGL_image_external_essl3 : require";

// ES 3.0 has no default precision for these sampler types
pub(crate) const PRECISION_ES: &str = r#"precision highp float;
precision highp int;
precision mediump sampler3D;
precision mediump sampler2DArray;
precision mediump sampler2DShadow;
precision mediump samplerCubeShadow;"#;

pub(crate) const FRAME_UNIFORMS: &str = r#"uniform FrameUniforms {
    mat4 clipFromWorld;
    mat4 clipFromView;
    mat4 worldFromView;
    mat4 lightFromWorld;
    vec4 lightDirection;
    vec4 lightColorIntensity;
    vec4 ambient;
} frameUniforms;"#;

pub(crate) const OBJECT_UNIFORMS: &str = r#"uniform ObjectUniforms {
    mat4 worldFromModel;
} objectUniforms;"#;

pub(crate) const BONES_UNIFORMS: &str = r#"uniform BonesUniforms {
    mat4 bones[64];
} bonesUniforms;"#;

pub(crate) const LIGHTS_UNIFORMS: &str = r#"uniform LightsUniforms {
    vec4 positionFalloff[8];
    vec4 colorIntensity[8];
    uvec4 count;
} lightsUniforms;"#;

// Uniform block bindings (Vulkan set 0)
pub(crate) const BINDING_FRAME: u32 = 0;
pub(crate) const BINDING_OBJECT: u32 = 1;
pub(crate) const BINDING_BONES: u32 = 2;
pub(crate) const BINDING_LIGHTS: u32 = 3;
pub(crate) const BINDING_MATERIAL: u32 = 4;

// Descriptor sets for samplers (Vulkan)
pub(crate) const SET_MATERIAL_SAMPLERS: u32 = 1;
pub(crate) const SET_ENGINE_SAMPLERS: u32 = 2;

pub(crate) const SHADOW_MAP_NAME: &str = "light_shadowMap";

/// Uniform added to the material block for masked blending
pub(crate) const MASK_THRESHOLD_MEMBER: &str = "    float _maskThreshold;";

pub(crate) const FS_PREPARE_NORMAL: &str = "    material.normal = normalize(vertex_worldNormal);";

pub(crate) const FS_EVALUATE_UNLIT: &str = r#"vec4 evaluateMaterial(const MaterialInputs material) {
    vec4 color = material.baseColor;
#if defined(HAS_SHADOWING)
    color.rgb *= shadowVisibility();
#endif
    return color;
}"#;

pub(crate) const FS_EVALUATE_LIT: &str = r#"vec4 evaluateMaterial(const MaterialInputs material) {
    vec3 n = normalize(material.normal);
    vec3 diffuse = material.baseColor.rgb * (1.0 - material.metallic);
    vec3 color = diffuse * frameUniforms.ambient.rgb * material.ambientOcclusion;
#if defined(HAS_DIRECTIONAL_LIGHTING)
    float visibility = 1.0;
#if defined(HAS_SHADOWING)
    visibility = shadowVisibility();
#endif
    float nol = max(dot(n, -frameUniforms.lightDirection.xyz), 0.0);
    color += diffuse * frameUniforms.lightColorIntensity.rgb
        * frameUniforms.lightColorIntensity.w * nol * visibility;
#endif
#if defined(HAS_DYNAMIC_LIGHTING)
    for (uint i = 0u; i < lightsUniforms.count.x; i++) {
        vec3 toLight = lightsUniforms.positionFalloff[i].xyz - vertex_worldPosition;
        float d2 = dot(toLight, toLight);
        float falloff = clamp(1.0 - d2 * lightsUniforms.positionFalloff[i].w, 0.0, 1.0);
        float l = max(dot(n, normalize(toLight)), 0.0);
        color += diffuse * lightsUniforms.colorIntensity[i].rgb
            * lightsUniforms.colorIntensity[i].w * l * falloff * falloff;
    }
#endif
    color += material.emissive.rgb;
    return vec4(color, material.baseColor.a);
}"#;

pub(crate) const DEFAULT_MATERIAL_CODE: &str = r#"void material(inout MaterialInputs material) {
    prepareMaterial(material);
}
"#;

pub(crate) const DEFAULT_VERTEX_CODE: &str = r#"void materialVertex(inout MaterialVertexInputs material) {
}
"#;

/// Uniform block layout qualifier
pub(crate) fn block_layout(vulkan: bool, binding: u32) -> String {
    if vulkan {
        format!("layout(set = 0, binding = {}, std140) ", binding)
    } else {
        "layout(std140) ".to_string()
    }
}

pub(crate) fn world_position(domain: VertexDomain) -> &'static str {
    match domain {
        VertexDomain::Object => "    material.worldPosition = objectUniforms.worldFromModel * position;",
        VertexDomain::World | VertexDomain::Device => "    material.worldPosition = position;",
        VertexDomain::View => {
            "    material.worldPosition = frameUniforms.worldFromView * position;"
        }
    }
}

pub(crate) fn clip_position(domain: VertexDomain) -> &'static str {
    match domain {
        VertexDomain::Object | VertexDomain::World => {
            "    gl_Position = frameUniforms.clipFromWorld * material.worldPosition;"
        }
        VertexDomain::View => "    gl_Position = frameUniforms.clipFromView * position;",
        VertexDomain::Device => "    gl_Position = position;",
    }
}

/// `HAS_ATTRIBUTE_*` symbol for a vertex attribute
pub(crate) fn attribute_define(attribute: VertexAttribute) -> String {
    let (_, name) = attribute.glsl();
    format!(
        "HAS_ATTRIBUTE_{}",
        name.trim_start_matches("mesh_").to_uppercase()
    )
}

/// GLSL sampler type. `external_oes` selects the ES external image type.
pub(crate) fn sampler_glsl(ty: SamplerType, format: SamplerFormat, external_oes: bool) -> &'static str {
    match ty {
        SamplerType::SamplerExternal => {
            if external_oes {
                "samplerExternalOES"
            } else {
                "sampler2D"
            }
        }
        SamplerType::Sampler2d => match format {
            SamplerFormat::Int => "isampler2D",
            SamplerFormat::Uint => "usampler2D",
            SamplerFormat::Float => "sampler2D",
            SamplerFormat::Shadow => "sampler2DShadow",
        },
        SamplerType::Sampler2dArray => match format {
            SamplerFormat::Int => "isampler2DArray",
            SamplerFormat::Uint => "usampler2DArray",
            SamplerFormat::Float => "sampler2DArray",
            SamplerFormat::Shadow => "sampler2DArrayShadow",
        },
        SamplerType::SamplerCubemap => match format {
            SamplerFormat::Int => "isamplerCube",
            SamplerFormat::Uint => "usamplerCube",
            SamplerFormat::Float => "samplerCube",
            SamplerFormat::Shadow => "samplerCubeShadow",
        },
        // No shadow comparison for 3D textures
        SamplerType::Sampler3d => match format {
            SamplerFormat::Int => "isampler3D",
            SamplerFormat::Uint => "usampler3D",
            SamplerFormat::Float | SamplerFormat::Shadow => "sampler3D",
        },
    }
}
