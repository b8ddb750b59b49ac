/// WGSL shader for the shadow map pass.
///
/// The decode mirrors `shadowcast_vertex::PackedVertex::decode`: 6-bit X,
/// 6-bit Y, 16-bit Z minus the 32768 bias, plus the per-draw chunk offset,
/// then the light-space view-projection. Bits 28-31 of the attribute are
/// masked off and never reach the position.
pub const SHADOW_SHADER: &str = r#"
struct Globals {
    light_view_proj: mat4x4<f32>,
    time: f32,
};

struct ChunkLocals {
    // xyz = world-space chunk origin, w unused.
    chunk_offset: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> locals: ChunkLocals;

const X_MASK: u32 = 0x3Fu;
const Y_SHIFT: u32 = 6u;
const Y_MASK: u32 = 0x3Fu;
const Z_SHIFT: u32 = 12u;
const Z_MASK: u32 = 0xFFFFu;
const Z_BIAS: i32 = 32768;

@vertex
fn vs_shadow(@location(0) packed: u32) -> @builtin(position) vec4<f32> {
    let x = f32(packed & X_MASK);
    let y = f32((packed >> Y_SHIFT) & Y_MASK);
    let z = f32(i32((packed >> Z_SHIFT) & Z_MASK) - Z_BIAS);
    let world = vec3<f32>(x, y, z) + locals.chunk_offset.xyz;
    return globals.light_view_proj * vec4<f32>(world, 1.0);
}
"#;
