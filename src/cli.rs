use clap::Parser;
use std::path::PathBuf;

use crate::config::RenderMode;
use crate::error::ViewError;

/// Renders every line cell of a mesh file as a thin 3D edge and writes
/// two progressive checkpoint images to the working directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "edge-view", about = "Polyline mesh viewer", long_about = None)]
pub struct Cli {
    /// Renderer mode token: `-RC` selects the ray caster; anything else
    /// (`-PT` included) selects the path tracer.
    #[arg(allow_hyphen_values = true, value_name = "MODE")]
    pub mode: String,

    /// Mesh file to render (.vtk legacy polydata, or .gltf/.glb lines).
    #[arg(value_name = "MESH")]
    pub mesh: PathBuf,
}

impl Cli {
    /// Parse the process arguments. Any shape mismatch (missing or extra
    /// tokens) becomes a usage error carrying clap's rendered message.
    pub fn parse_args() -> Result<Self, ViewError> {
        Self::try_parse().map_err(|err| ViewError::Usage(err.to_string()))
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.mode == "-RC" {
            RenderMode::RayCast
        } else {
            RenderMode::PathTraced
        }
    }
}
