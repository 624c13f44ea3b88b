use glam::Vec3;

use crate::error::ViewError;
use crate::extract::EdgeSegment;

/// Which fixed buffer layout the backend's line primitive consumes.
///
/// Both layouts describe the same edges; they differ only in how the
/// backend walks the buffer: indexed vertex pairs for round curves, or an
/// interleaved six-float stride per cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryLayout {
    #[default]
    RoundCurve,
    Cylinders,
}

/// Flattened, backend-ready edge geometry.
///
/// `vertices[2i]` and `vertices[2i + 1]` are the endpoints of edge `i`;
/// `indices[i] == 2 * i` locates each pair. Index values are therefore
/// strictly increasing, even, and in range. Frozen on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeGeometry {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    radius: f32,
    layout: GeometryLayout,
}

impl EdgeGeometry {
    /// Flatten an edge sequence into the buffer form above. An empty
    /// sequence is a data error: the backend cannot hold a zero-primitive
    /// geometry and a silently blank render would hide a bad input file.
    pub fn build(
        edges: &[EdgeSegment],
        layout: GeometryLayout,
        radius: f32,
    ) -> Result<Self, ViewError> {
        if edges.is_empty() {
            return Err(ViewError::EmptyGeometry);
        }

        let mut vertices = Vec::with_capacity(edges.len() * 2);
        let mut indices = Vec::with_capacity(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            vertices.push(edge.v0);
            vertices.push(edge.v1);
            indices.push(2 * i as u32);
        }

        Ok(Self {
            vertices,
            indices,
            radius,
            layout,
        })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn layout(&self) -> GeometryLayout {
        self.layout
    }

    pub fn edge_count(&self) -> usize {
        self.indices.len()
    }

    /// Endpoints of edge `i`, resolved through the index array.
    pub fn edge(&self, i: usize) -> (Vec3, Vec3) {
        let base = self.indices[i] as usize;
        (self.vertices[base], self.vertices[base + 1])
    }

    /// Interleaved float stream for the `Cylinders` layout: six floats per
    /// edge, endpoint v0 at offset 0 and v1 at offset 3.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            out.extend_from_slice(&v.to_array());
        }
        out
    }
}
