use glam::Vec3;

/// Cell type tags the loaders can produce. Only `Line` cells are rendered;
/// every other kind is carried through so the extractor can skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Vertex,
    Line,
    PolyLine,
    Polygon,
    TriangleStrip,
    Other,
}

/// One mesh cell: a type tag plus an ordered list of point indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub point_ids: Vec<u32>,
}

impl Cell {
    pub fn line(p0: u32, p1: u32) -> Self {
        Self {
            kind: CellKind::Line,
            point_ids: vec![p0, p1],
        }
    }
}

/// In-memory polyline mesh: a flat point array plus a cell list.
///
/// Points are owned here for the lifetime of the run; later stages resolve
/// them by index and copy the coordinate values they need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyMesh {
    points: Vec<Vec3>,
    cells: Vec<Cell>,
}

impl PolyMesh {
    pub fn new(points: Vec<Vec3>, cells: Vec<Cell>) -> Self {
        Self { points, cells }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_accessor_in_range() {
        let mesh = PolyMesh::new(
            vec![Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)],
            vec![Cell::line(0, 1)],
        );
        assert_eq!(mesh.point_count(), 2);
        assert_eq!(mesh.point(1), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_point_accessor_out_of_range() {
        let mesh = PolyMesh::new(vec![Vec3::ZERO], vec![]);
        assert_eq!(mesh.point(1), None);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = PolyMesh::default();
        assert_eq!(mesh.point_count(), 0);
        assert_eq!(mesh.cell_count(), 0);
    }
}
