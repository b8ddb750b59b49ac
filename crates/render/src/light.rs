use glam::{Mat4, Vec3};

/// Directional light casting the shadow map.
///
/// The shadow pass rasterizes scene geometry from this light's point of
/// view; its orthographic view-projection is the matrix the vertex stage
/// applies after decoding.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Direction the light travels (normalized on use).
    pub direction: Vec3,
    /// World-space point the light frustum is centered on.
    pub focus: Vec3,
    /// Half-extent of the orthographic volume in the light's XY plane.
    pub half_extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.4, -0.3, -1.0),
            focus: Vec3::ZERO,
            half_extent: 64.0,
            near: 0.1,
            far: 512.0,
        }
    }
}

impl DirectionalLight {
    /// View matrix looking along the light direction toward the focus point.
    pub fn view_matrix(&self) -> Mat4 {
        let dir = self.direction.normalize();
        let eye = self.focus - dir * (self.far * 0.5);
        // Z is world-up; fall back when the light shines straight down.
        let up = if dir.cross(Vec3::Z).length_squared() < 1e-6 {
            Vec3::Y
        } else {
            Vec3::Z
        };
        Mat4::look_at_rh(eye, self.focus, up)
    }

    /// Orthographic projection covering the shadowed volume.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            -self.half_extent,
            self.half_extent,
            -self.half_extent,
            self.half_extent,
            self.near,
            self.far,
        )
    }

    /// Light-space view-projection applied to decoded positions.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
