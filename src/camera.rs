use glam::Vec3;

/// Perspective camera, fixed at startup and immutable thereafter.
///
/// The viewing basis is derived once from position, view direction and an
/// up hint; primary rays are generated for a framebuffer whose row 0 is
/// the bottom of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    tan_half_fovy: f32,
    aspect: f32,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, direction: Vec3, up: Vec3, aspect: f32, fovy_degrees: f32) -> Self {
        let forward = direction.normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        Self {
            position,
            forward,
            right,
            up,
            tan_half_fovy: (fovy_degrees.to_radians() * 0.5).tan(),
            aspect,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Primary ray through pixel (x, y) with sub-pixel offset (jx, jy) in
    /// [0, 1). Returns (origin, unit direction).
    pub fn primary_ray(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        jx: f32,
        jy: f32,
    ) -> (Vec3, Vec3) {
        let sx = ((x as f32 + jx) / width as f32) * 2.0 - 1.0;
        let sy = ((y as f32 + jy) / height as f32) * 2.0 - 1.0;
        let dir = (self.forward
            + self.right * (sx * self.aspect * self.tan_half_fovy)
            + self.up * (sy * self.tan_half_fovy))
            .normalize();
        (self.position, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> PerspectiveCamera {
        PerspectiveCamera::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            1.0,
            60.0,
        )
    }

    #[test]
    fn test_center_ray_follows_view_direction() {
        let camera = test_camera();
        let (origin, dir) = camera.primary_ray(50, 50, 100, 100, 0.5, 0.5);
        assert_eq!(origin, Vec3::new(0.0, 0.0, 5.0));
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_rays_are_unit_length() {
        let camera = test_camera();
        for (x, y) in [(0, 0), (99, 0), (0, 99), (99, 99), (13, 71)] {
            let (_, dir) = camera.primary_ray(x, y, 100, 100, 0.5, 0.5);
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_bottom_row_points_down() {
        let camera = test_camera();
        let (_, dir) = camera.primary_ray(50, 0, 100, 100, 0.5, 0.0);
        assert!(dir.y < 0.0, "row 0 is the bottom of the image: {:?}", dir);
    }

    #[test]
    fn test_basis_handles_non_axis_up() {
        // The viewer's fixed configuration uses up = +x.
        let camera = PerspectiveCamera::new(
            Vec3::new(-10.0, 10.0, 0.0),
            Vec3::new(0.3, -0.7, 0.0),
            Vec3::X,
            4.0 / 3.0,
            60.0,
        );
        let (_, dir) = camera.primary_ray(512, 384, 1024, 768, 0.0, 0.0);
        let forward = Vec3::new(0.3, -0.7, 0.0).normalize();
        assert!((dir - forward).length() < 1e-5);
    }

    #[test]
    fn test_aspect_widens_horizontal_spread() {
        let narrow = PerspectiveCamera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 1.0, 60.0);
        let wide = PerspectiveCamera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 2.0, 60.0);
        let (_, dn) = narrow.primary_ray(0, 50, 100, 100, 0.0, 0.5);
        let (_, dw) = wide.primary_ray(0, 50, 100, 100, 0.0, 0.5);
        assert!(
            dw.x.abs() > dn.x.abs(),
            "wider aspect should spread rays further horizontally"
        );
    }
}
