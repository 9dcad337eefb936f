//! Stage templates.
//!
//! Lines of the form `//NAME` are placeholders filled by the generator.
//! `//MATERIAL_CODE` marks where the user's material fragment goes.

pub(crate) const MATERIAL_CODE_MARKER: &str = "//MATERIAL_CODE";

pub(crate) const VERTEX_TEMPLATE: &str = r#"//VERSION
//EXTENSIONS
//DEFINES
//PRECISION

//VIN_ATTRIBUTES

//VOUT_VARYINGS

//ENGINE_UNIFORMS
//MATERIAL_UNIFORMS
//MATERIAL_SAMPLERS

struct MaterialVertexInputs {
//VS_MATERIAL_INPUTS
};

#if defined(HAS_SKINNING)
vec4 skinPosition(vec4 p) {
    mat4 m = bonesUniforms.bones[mesh_bone_indices.x] * mesh_bone_weights.x
           + bonesUniforms.bones[mesh_bone_indices.y] * mesh_bone_weights.y
           + bonesUniforms.bones[mesh_bone_indices.z] * mesh_bone_weights.z
           + bonesUniforms.bones[mesh_bone_indices.w] * mesh_bone_weights.w;
    return m * p;
}
#endif

//MATERIAL_CODE

void main() {
    vec4 position = mesh_position;
#if defined(HAS_SKINNING)
    position = skinPosition(position);
#endif

    MaterialVertexInputs material;
//VS_INIT_MATERIAL
//VS_WORLD_POSITION

    materialVertex(material);

//VS_VARYINGS_OUT
//VS_CLIP_POSITION
#if defined(TARGET_VULKAN_ENVIRONMENT)
    // Vulkan clip space depth is [0, 1]
    gl_Position.z = (gl_Position.z + gl_Position.w) * 0.5;
#endif
}
"#;

pub(crate) const FRAGMENT_TEMPLATE: &str = r#"//VERSION
//EXTENSIONS
//DEFINES
//PRECISION

//FIN_VARYINGS

//ENGINE_UNIFORMS
//MATERIAL_UNIFORMS
//MATERIAL_SAMPLERS

//FOUT_COLOR

struct MaterialInputs {
    vec4 baseColor;
    float roughness;
    float metallic;
    float reflectance;
    float ambientOcclusion;
    vec4 emissive;
    vec3 normal;
};

void prepareMaterial(inout MaterialInputs material) {
//FS_PREPARE_NORMAL
}

#if defined(HAS_SHADOWING)
float shadowVisibility() {
    vec3 p = vertex_lightSpacePosition.xyz / vertex_lightSpacePosition.w;
    return texture(light_shadowMap, p * 0.5 + 0.5);
}
#endif

//FS_EVALUATE

//MATERIAL_CODE

void main() {
    MaterialInputs inputs;
    inputs.baseColor = vec4(1.0);
    inputs.roughness = 1.0;
    inputs.metallic = 0.0;
    inputs.reflectance = 0.5;
    inputs.ambientOcclusion = 1.0;
    inputs.emissive = vec4(0.0);
    inputs.normal = vec3(0.0, 0.0, 1.0);

    material(inputs);

    vec4 color = evaluateMaterial(inputs);
#if defined(BLEND_MODE_MASKED)
    if (color.a < materialParams._maskThreshold) {
        discard;
    }
#endif
    fragColor = color;
}
"#;
