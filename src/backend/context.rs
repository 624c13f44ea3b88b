use crate::config::RenderSettings;
use crate::error::BackendInitError;

/// Backend process state, explicitly scoped.
///
/// Created once at startup, passed by reference to every component that
/// issues backend calls, and torn down when it drops at process end. The
/// settings it validated are the only configuration the backend ever sees.
#[derive(Debug)]
pub struct Context {
    settings: RenderSettings,
}

impl Context {
    /// Validate the run configuration and bring the backend up. This is
    /// the only operation that produces a `BackendInitError`; if it fails,
    /// no renderer or framebuffer can exist.
    pub fn init(settings: RenderSettings) -> Result<Self, BackendInitError> {
        if settings.image_width == 0 || settings.image_height == 0 {
            return Err(BackendInitError::invalid_argument(
                "framebuffer dimensions must be non-zero",
            ));
        }
        if settings.camera_direction.length_squared() < 1e-12 {
            return Err(BackendInitError::invalid_argument(
                "camera view direction must be non-zero",
            ));
        }
        if settings
            .camera_direction
            .normalize()
            .cross(settings.camera_up)
            .length_squared()
            < 1e-12
        {
            return Err(BackendInitError::invalid_argument(
                "camera up vector must not be parallel to the view direction",
            ));
        }
        if settings.edge_radius <= 0.0 {
            return Err(BackendInitError::invalid_argument(
                "edge radius must be positive",
            ));
        }
        if !(0.0..180.0).contains(&settings.camera_fovy) || settings.camera_fovy == 0.0 {
            return Err(BackendInitError::invalid_argument(
                "field of view must lie in (0, 180) degrees",
            ));
        }

        log::info!(
            "backend up: {}x{} framebuffer, {} accumulation passes",
            settings.image_width,
            settings.image_height,
            settings.accumulation_passes
        );
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }
}
