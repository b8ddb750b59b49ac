use crate::frame::ShadowFrame;
use crate::light::DirectionalLight;

/// Renderer-agnostic shadow pass interface. All backends implement this.
///
/// The renderer reads the frame and the light configuration, then produces
/// output. It never mutates the frame; chunk data is owned by the caller.
pub trait ShadowRenderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one shadow pass over the given frame.
    fn render(&self, frame: &ShadowFrame, light: &DirectionalLight) -> Self::Output;
}

/// Summary of a CPU-side shadow pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShadowStats {
    pub draws: usize,
    pub vertices: usize,
    pub triangles: usize,
    /// Light-space depth range across all decoded vertices (NDC z).
    pub depth_min: f32,
    pub depth_max: f32,
}

/// CPU reference renderer.
///
/// Decodes every packed vertex exactly like the GPU vertex stage (mask the
/// fields, add the chunk offset, multiply by the light matrix) and reports
/// aggregate statistics. Useful for CLI output, logging, and testing the
/// pass without a device.
#[derive(Debug, Default)]
pub struct DebugShadowRenderer;

impl DebugShadowRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ShadowRenderer for DebugShadowRenderer {
    type Output = ShadowStats;

    fn render(&self, frame: &ShadowFrame, light: &DirectionalLight) -> ShadowStats {
        let matrix = light.view_projection();
        let mut stats = ShadowStats {
            draws: frame.draws.len(),
            vertices: frame.vertex_count(),
            triangles: frame.index_count() / 3,
            depth_min: f32::INFINITY,
            depth_max: f32::NEG_INFINITY,
        };

        for draw in &frame.draws {
            for vertex in &draw.mesh.vertices {
                let clip = matrix * vertex.decode(draw.offset);
                stats.depth_min = stats.depth_min.min(clip.z);
                stats.depth_max = stats.depth_max.max(clip.z);
            }
        }

        if stats.vertices == 0 {
            stats.depth_min = 0.0;
            stats.depth_max = 0.0;
        }

        tracing::debug!(
            draws = stats.draws,
            vertices = stats.vertices,
            depth_min = stats.depth_min,
            depth_max = stats.depth_max,
            "shadow pass (cpu)"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ChunkDraw;
    use shadowcast_common::ChunkPos;
    use shadowcast_mesh::{mesh_chunk, ChunkVolume};

    fn one_cell_frame() -> ShadowFrame {
        let mut vol = ChunkVolume::new();
        vol.fill(10, 10, 0).unwrap();
        let mut frame = ShadowFrame::new();
        frame.push(ChunkDraw::new(ChunkPos::new(0, 0), mesh_chunk(&vol).unwrap()));
        frame
    }

    #[test]
    fn empty_frame_renders_zero_stats() {
        let stats = DebugShadowRenderer::new().render(&ShadowFrame::new(), &DirectionalLight::default());
        assert_eq!(stats.draws, 0);
        assert_eq!(stats.vertices, 0);
        assert_eq!(stats.depth_min, 0.0);
        assert_eq!(stats.depth_max, 0.0);
    }

    #[test]
    fn one_cell_frame_has_finite_depth_range() {
        let stats = DebugShadowRenderer::new().render(&one_cell_frame(), &DirectionalLight::default());
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.vertices, 24);
        assert_eq!(stats.triangles, 12);
        assert!(stats.depth_min.is_finite());
        assert!(stats.depth_min <= stats.depth_max);
    }

    #[test]
    fn rendering_is_repeatable() {
        let frame = one_cell_frame();
        let light = DirectionalLight::default();
        let renderer = DebugShadowRenderer::new();
        assert_eq!(renderer.render(&frame, &light), renderer.render(&frame, &light));
    }

    #[test]
    fn depth_range_matches_manual_transform() {
        let frame = one_cell_frame();
        let light = DirectionalLight::default();
        let matrix = light.view_projection();

        let mut expected_min = f32::INFINITY;
        let mut expected_max = f32::NEG_INFINITY;
        let draw = &frame.draws[0];
        for v in &draw.mesh.vertices {
            let clip = matrix * v.decode(draw.offset);
            expected_min = expected_min.min(clip.z);
            expected_max = expected_max.max(clip.z);
        }

        let stats = DebugShadowRenderer::new().render(&frame, &light);
        assert_eq!(stats.depth_min, expected_min);
        assert_eq!(stats.depth_max, expected_max);
    }
}
