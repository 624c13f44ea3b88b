use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::mesh::{Cell, PolyMesh};

/// Loads a glTF file and collects its line primitives into a polyline mesh.
///
/// Only primitives with `mode == Lines` contribute; triangles, strips and
/// point clouds are skipped. Node transforms are applied so the edges land
/// in world space.
pub fn load_gltf_lines(path: impl AsRef<Path>) -> Result<PolyMesh> {
    let path = path.as_ref();
    let (gltf, buffers, _images) =
        gltf::import(path).with_context(|| format!("failed to load glTF file {}", path.display()))?;

    log::info!(
        "glTF loaded: {} scenes, {} nodes, {} meshes",
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count()
    );

    let mut points: Vec<Vec3> = Vec::new();
    let mut cells: Vec<Cell> = Vec::new();

    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut points, &mut cells)?;
        }
    }

    log::info!(
        "glTF line extraction: {} points, {} cells",
        points.len(),
        cells.len()
    );
    Ok(PolyMesh::new(points, cells))
}

/// Recursively walks the node hierarchy, accumulating transforms.
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    points: &mut Vec<Vec3>,
    cells: &mut Vec<Cell>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, points, cells)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, points, cells)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    points: &mut Vec<Vec3>,
    cells: &mut Vec<Cell>,
) -> Result<()> {
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Lines {
            log::debug!(
                "skipping non-line primitive ({:?}) in mesh {:?}",
                primitive.mode(),
                mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let positions = reader
            .read_positions()
            .context("line primitive has no positions")?;

        // Every primitive appends its own point range.
        let base = points.len() as u32;
        points.extend(positions.map(|pos| transform.transform_point3(Vec3::from_array(pos))));

        if let Some(indices) = reader.read_indices() {
            let indices: Vec<u32> = indices.into_u32().collect();
            for pair in indices.chunks_exact(2) {
                cells.push(Cell::line(base + pair[0], base + pair[1]));
            }
        } else {
            // Unindexed: consecutive position pairs form the segments.
            let added = points.len() as u32 - base;
            for i in (0..added.saturating_sub(1)).step_by(2) {
                cells.push(Cell::line(base + i, base + i + 1));
            }
        }
    }

    Ok(())
}
