use glam::Vec3;

/// Which renderer variant drives the run. Chosen once at startup from the
/// command line; there is no mid-run switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Physically based path tracer (the default).
    #[default]
    PathTraced,
    /// Interactive-style ray caster with headlight shading.
    RayCast,
}

/// Fixed run configuration.
///
/// These values are burned into the tool and not exposed as flags; they are
/// collected in one struct (rather than set one string key at a time on the
/// backend) so that every recognized option is spelled out here and nothing
/// else can be configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub image_width: u32,
    pub image_height: u32,
    pub camera_position: Vec3,
    pub camera_direction: Vec3,
    pub camera_up: Vec3,
    /// Vertical field of view in degrees.
    pub camera_fovy: f32,
    /// World-space radius applied uniformly to every edge.
    pub edge_radius: f32,
    pub background: Vec3,
    /// Ambient-occlusion samples per shading point, per pass.
    pub ao_samples: u32,
    /// Accumulation passes issued after the first frame.
    pub accumulation_passes: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 1024,
            image_height: 768,
            camera_position: Vec3::new(-10.0, 10.0, 0.0),
            camera_direction: Vec3::new(0.3, -0.7, 0.0),
            camera_up: Vec3::new(1.0, 0.0, 0.0),
            camera_fovy: 60.0,
            edge_radius: 0.005,
            background: Vec3::new(0.1, 0.1, 0.3),
            ao_samples: 1,
            accumulation_passes: 10,
        }
    }
}

impl RenderSettings {
    pub fn aspect(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_image_size() {
        let settings = RenderSettings::default();
        assert_eq!(settings.image_width, 1024);
        assert_eq!(settings.image_height, 768);
        assert!((settings.aspect() - 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_camera_and_radius() {
        let settings = RenderSettings::default();
        assert_eq!(settings.camera_position, Vec3::new(-10.0, 10.0, 0.0));
        assert_eq!(settings.camera_up, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(settings.edge_radius, 0.005);
        assert_eq!(settings.accumulation_passes, 10);
        assert_eq!(settings.ao_samples, 1);
    }

    #[test]
    fn test_default_mode_is_path_traced() {
        assert_eq!(RenderMode::default(), RenderMode::PathTraced);
    }
}
