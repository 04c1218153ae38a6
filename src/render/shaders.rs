/// Foliage vertex shader.
///
/// Interpolation, drift, colour and point size all happen here from static
/// attributes plus `u_time`/`u_progress`, mirroring `animation::motion`.
pub const FOLIAGE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_scatter;
layout(location = 1) in vec3 a_tree;
layout(location = 2) in float a_size;
layout(location = 3) in float a_phase;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_time;
uniform float u_progress;

// x = scattered, y = assembled
uniform float u_float_amplitude;
uniform vec2 u_float_intensity;
uniform vec2 u_float_speed;
uniform vec3 u_axis_frequency;
uniform vec3 u_axis_phase;
uniform vec2 u_alpha;
uniform float u_size_attenuation;

uniform float u_height_offset;
uniform float u_height_span;
uniform float u_height_gold;
uniform float u_pulse_gold;
uniform float u_pulse_phase;
uniform vec3 u_emerald;
uniform vec3 u_gold;

out vec3 v_color;
out float v_alpha;

void main() {
    float t = clamp(u_progress, 0.0, 1.0);
    float e = t * t * (3.0 - 2.0 * t);

    vec3 pos = mix(a_scatter, a_tree, e);

    float speed = mix(u_float_speed.x, u_float_speed.y, e);
    float amplitude = u_float_amplitude * mix(u_float_intensity.x, u_float_intensity.y, e);
    vec3 arg = u_time * speed * u_axis_frequency + a_phase * u_axis_phase;
    pos += vec3(sin(arg.x), cos(arg.y), sin(arg.z)) * amplitude;

    float height_mix = clamp((pos.y + u_height_offset) / u_height_span, 0.0, 1.0);
    float pulse = 0.5 + 0.5 * sin(u_time + a_phase * u_pulse_phase);
    float gold = clamp(u_height_gold * height_mix + u_pulse_gold * pulse, 0.0, 1.0);
    v_color = mix(u_emerald, u_gold, gold);
    v_alpha = mix(u_alpha.x, u_alpha.y, e);

    vec4 view_pos = u_view * u_model * vec4(pos, 1.0);
    float depth = -view_pos.z;
    gl_PointSize = depth > 0.0 ? a_size * u_size_attenuation / depth : 0.0;
    gl_Position = u_projection * view_pos;
}
"#;

/// Soft round point with a bright core
pub const FOLIAGE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_color;
in float v_alpha;

out vec4 fragColor;

void main() {
    float r = distance(gl_PointCoord, vec2(0.5));
    if (r > 0.5) {
        discard;
    }

    float glow = 1.0 - r * 2.0;
    glow = pow(glow, 1.5);

    fragColor = vec4(v_color * 2.0, v_alpha * glow);
}
"#;

/// Instanced ornament vertex shader. Each instance supplies its own model
/// matrix in locations 2..5.
pub const ORNAMENT_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in mat4 a_instance;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world_position;
out vec3 v_normal;

void main() {
    mat4 model = u_model * a_instance;
    vec4 world_pos = model * vec4(a_position, 1.0);

    // Uniform scale per instance, so the upper 3x3 is enough for normals
    v_normal = mat3(model) * a_normal;
    v_world_position = world_pos.xyz;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Metallic, satin or emissive ornament surface
pub const ORNAMENT_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_world_position;
in vec3 v_normal;

uniform vec3 u_camera_pos;
uniform vec3 u_color;
uniform float u_metalness;
uniform float u_roughness;
uniform float u_unlit;

uniform vec3 u_ambient;
uniform vec3 u_key_position;
uniform vec3 u_key_color;
uniform vec3 u_fill_position;
uniform vec3 u_fill_color;

out vec4 fragColor;

vec3 shade_light(vec3 light_pos, vec3 light_color, vec3 n, vec3 view_dir, vec3 diffuse_color, vec3 specular_color, float shininess) {
    vec3 l = normalize(light_pos - v_world_position);
    vec3 h = normalize(l + view_dir);
    float diffuse = max(dot(n, l), 0.0);
    float specular = pow(max(dot(n, h), 0.0), shininess) * (shininess + 8.0) / 25.0;
    return light_color * (diffuse_color * diffuse + specular_color * specular * diffuse);
}

void main() {
    if (u_unlit > 0.5) {
        fragColor = vec4(u_color * 1.5, 1.0);
        return;
    }

    vec3 n = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    vec3 diffuse_color = u_color * (1.0 - u_metalness);
    vec3 specular_color = mix(vec3(0.04), u_color, u_metalness);
    float shininess = mix(256.0, 4.0, u_roughness);

    vec3 color = u_ambient * u_color;
    color += shade_light(u_key_position, u_key_color, n, view_dir, diffuse_color, specular_color, shininess);
    color += shade_light(u_fill_position, u_fill_color, n, view_dir, diffuse_color, specular_color, shininess);

    // Cheap sky gradient standing in for an environment map
    vec3 r = reflect(-view_dir, n);
    vec3 sky = mix(vec3(0.05, 0.06, 0.08), vec3(0.9, 0.85, 0.75), r.y * 0.5 + 0.5);
    float fresnel = pow(1.0 - max(dot(n, view_dir), 0.0), 5.0);
    color += sky * specular_color * (1.0 - u_roughness) + sky * fresnel * 0.1;

    fragColor = vec4(color, 1.0);
}
"#;
