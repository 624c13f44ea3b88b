use std::path::Path;

use anyhow::{bail, Result};

use crate::mesh::PolyMesh;

mod gltf;
mod vtk;

pub use gltf::load_gltf_lines;
pub use vtk::{load_vtk_file, parse_vtk};

/// Load a polyline mesh, dispatching on the file extension.
///
/// Supported: legacy ASCII VTK (`.vtk`) and glTF line primitives
/// (`.gltf` / `.glb`).
pub fn load_mesh(path: &Path) -> Result<PolyMesh> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("vtk") => load_vtk_file(path),
        Some("gltf") | Some("glb") => load_gltf_lines(path),
        _ => bail!("unsupported mesh format: {}", path.display()),
    }
}
