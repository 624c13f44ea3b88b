use glam::Vec3;

use crate::error::ViewError;
use crate::mesh::{CellKind, PolyMesh};

/// One line primitive: a pair of resolved endpoints.
///
/// Endpoints are copied out of the point array per edge; a point shared by
/// several edges is resolved independently each time, because the backend
/// primitive owns its vertex pairs and has no shared-index topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub v0: Vec3,
    pub v1: Vec3,
}

/// Resolve every 2-point line cell of the mesh into an edge segment, in
/// cell-iteration order. Cells of any other kind contribute nothing and
/// raise no error; a line cell referencing a point beyond the point array
/// aborts the run.
pub fn extract_edges(mesh: &PolyMesh) -> Result<Vec<EdgeSegment>, ViewError> {
    let point_count = mesh.point_count();
    let mut edges = Vec::new();

    for (cell_id, cell) in mesh.cells().iter().enumerate() {
        if cell.kind != CellKind::Line || cell.point_ids.len() != 2 {
            continue;
        }
        let p0 = cell.point_ids[0] as usize;
        let p1 = cell.point_ids[1] as usize;
        for &index in &[p0, p1] {
            if index >= point_count {
                return Err(ViewError::IndexOutOfRange {
                    cell: cell_id,
                    index,
                    point_count,
                });
            }
        }
        let points = mesh.points();
        edges.push(EdgeSegment {
            v0: points[p0],
            v1: points[p1],
        });
    }

    log::debug!(
        "extracted {} edges from {} cells",
        edges.len(),
        mesh.cell_count()
    );
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Cell;

    fn quad_points() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_line_cells_become_edges_in_order() {
        let mesh = PolyMesh::new(quad_points(), vec![Cell::line(0, 1), Cell::line(2, 3)]);
        let edges = extract_edges(&mesh).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].v0, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(edges[0].v1, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(edges[1].v0, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(edges[1].v1, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_non_line_cells_are_skipped() {
        let cells = vec![
            Cell {
                kind: CellKind::Polygon,
                point_ids: vec![0, 1, 2, 3],
            },
            Cell::line(0, 2),
            Cell {
                kind: CellKind::Vertex,
                point_ids: vec![1],
            },
        ];
        let mesh = PolyMesh::new(quad_points(), cells);
        let edges = extract_edges(&mesh).unwrap();
        assert_eq!(edges.len(), 1, "only the line cell should survive");
    }

    #[test]
    fn test_line_cell_with_wrong_arity_is_skipped() {
        let cells = vec![Cell {
            kind: CellKind::Line,
            point_ids: vec![0, 1, 2],
        }];
        let mesh = PolyMesh::new(quad_points(), cells);
        assert!(extract_edges(&mesh).unwrap().is_empty());
    }

    #[test]
    fn test_shared_vertex_is_duplicated() {
        let mesh = PolyMesh::new(quad_points(), vec![Cell::line(0, 1), Cell::line(1, 2)]);
        let edges = extract_edges(&mesh).unwrap();
        // Point 1 appears in both edges as an independent copy.
        assert_eq!(edges[0].v1, edges[1].v0);
    }

    #[test]
    fn test_out_of_range_index_aborts() {
        let mesh = PolyMesh::new(quad_points(), vec![Cell::line(0, 100)]);
        let err = extract_edges(&mesh).unwrap_err();
        match err {
            ViewError::IndexOutOfRange {
                cell,
                index,
                point_count,
            } => {
                assert_eq!(cell, 0);
                assert_eq!(index, 100);
                assert_eq!(point_count, 4);
            }
            other => panic!("expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_mesh_yields_no_edges() {
        let mesh = PolyMesh::default();
        assert!(extract_edges(&mesh).unwrap().is_empty());
    }
}
