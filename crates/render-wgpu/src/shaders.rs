use crate::error::RenderError;

/// Vertex attribute names, in location order.
pub const ATTRIBUTE_NAMES: [&str; 4] = ["a_Position", "a_Color", "a_Normal", "a_TexCoord"];

/// Names the unlit showcase program must declare.
pub const SHOWCASE_CONTRACT: &[&str] = &["a_Position", "a_Color", "u_MvpMatrix"];

/// Names the lit, textured scene program must declare.
pub const SCENE_CONTRACT: &[&str] = &[
    "a_Position",
    "a_Color",
    "a_Normal",
    "a_TexCoord",
    "u_MvpMatrix",
    "u_ModelMatrix",
    "u_NormalMatrix",
    "u_UseTexture",
    "u_LightColor",
    "u_LightDirection",
    "u_AmbientLight",
    "u_PointLightPosition",
    "u_Sampler",
];

/// Check that every contract name appears as an identifier in `source`.
///
/// Identifiers are matched whole, so `u_Color` does not satisfy `u_ColorMap`
/// and vice versa.
pub fn verify_contract(
    program: &'static str,
    source: &str,
    names: &[&'static str],
) -> Result<(), RenderError> {
    for &name in names {
        let found = source
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .any(|ident| ident == name);
        if !found {
            return Err(RenderError::MissingBinding { program, name });
        }
    }
    Ok(())
}

/// Unlit colour program for the four-cube showcase.
///
/// Shares the bind group layout of [`SCENE_SHADER`] but only reads the MVP.
pub const SHOWCASE_SHADER: &str = r#"
struct DrawUniforms {
    u_MvpMatrix: mat4x4<f32>,
    u_ModelMatrix: mat4x4<f32>,
    u_NormalMatrix: mat4x4<f32>,
    u_UseTexture: u32,
    pad0: u32,
    pad1: u32,
    pad2: u32,
};

@group(0) @binding(0)
var<uniform> per_draw: DrawUniforms;

struct VertexInput {
    @location(0) a_Position: vec3<f32>,
    @location(1) a_Color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = per_draw.u_MvpMatrix * vec4<f32>(vertex.a_Position, 1.0);
    out.color = vertex.a_Color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Per-vertex lit program with an optional sky texture.
///
/// Colour is `directional + point (attenuated) + ambient`, alpha passes
/// through. Textured draws sample the sky and skip lighting.
pub const SCENE_SHADER: &str = r#"
struct DrawUniforms {
    u_MvpMatrix: mat4x4<f32>,
    u_ModelMatrix: mat4x4<f32>,
    u_NormalMatrix: mat4x4<f32>,
    u_UseTexture: u32,
    pad0: u32,
    pad1: u32,
    pad2: u32,
};

struct FrameUniforms {
    u_LightColor: vec4<f32>,
    u_LightDirection: vec4<f32>,
    u_AmbientLight: vec4<f32>,
    u_PointLightPosition: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> per_draw: DrawUniforms;

@group(0) @binding(1)
var<uniform> per_frame: FrameUniforms;

@group(1) @binding(0)
var u_SkyTexture: texture_2d<f32>;

@group(1) @binding(1)
var u_Sampler: sampler;

struct VertexInput {
    @location(0) a_Position: vec3<f32>,
    @location(1) a_Color: vec4<f32>,
    @location(2) a_Normal: vec3<f32>,
    @location(3) a_TexCoord: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) tex_coord: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let position = vec4<f32>(vertex.a_Position, 1.0);
    let normal = normalize((per_draw.u_NormalMatrix * vec4<f32>(vertex.a_Normal, 0.0)).xyz);
    let world = (per_draw.u_ModelMatrix * position).xyz;

    let n_dot_l = max(dot(per_frame.u_LightDirection.xyz, normal), 0.0);

    let to_point = per_frame.u_PointLightPosition.xyz - world;
    let distance = length(to_point);
    let point_n_dot_l = max(dot(normalize(to_point), normal), 0.0);
    let attenuation = 1.0 / (1.0 + 0.1 * distance + 0.01 * distance * distance);

    let base = vertex.a_Color.rgb;
    let light = per_frame.u_LightColor.rgb;
    let diffuse = light * base * n_dot_l;
    let point_diffuse = light * base * point_n_dot_l * attenuation;
    let ambient = per_frame.u_AmbientLight.rgb * base;

    var out: VertexOutput;
    out.clip_position = per_draw.u_MvpMatrix * position;
    out.color = vec4<f32>(diffuse + point_diffuse + ambient, vertex.a_Color.a);
    out.tex_coord = vertex.a_TexCoord;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let sky = textureSample(u_SkyTexture, u_Sampler, in.tex_coord);
    if (per_draw.u_UseTexture != 0u) {
        return sky;
    }
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_programs_satisfy_their_contracts() {
        assert_eq!(verify_contract("showcase", SHOWCASE_SHADER, SHOWCASE_CONTRACT), Ok(()));
        assert_eq!(verify_contract("scene", SCENE_SHADER, SCENE_CONTRACT), Ok(()));
    }

    #[test]
    fn missing_name_is_reported() {
        let err = verify_contract("showcase", SHOWCASE_SHADER, SCENE_CONTRACT).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingBinding {
                program: "showcase",
                name: "a_Normal"
            }
        );
    }

    #[test]
    fn partial_identifier_does_not_match() {
        let source = "var<uniform> u_MvpMatrixes: mat4x4<f32>;";
        assert!(verify_contract("probe", source, &["u_MvpMatrix"]).is_err());
    }

    #[test]
    fn attribute_names_are_part_of_scene_contract() {
        for name in ATTRIBUTE_NAMES {
            assert!(SCENE_CONTRACT.contains(&name));
        }
    }
}
