//! Constrained Delaunay triangulation of the section boundaries.

use crate::common::points::mean_point;
use crate::geom2::Point2;
use crate::{MeshError, Result};
use itertools::Itertools;
use spade::{ConstrainedDelaunayTriangulation, Triangulation};

type Cdt = ConstrainedDelaunayTriangulation<spade::Point2<f64>>;

/// The vertices and triangles of a constrained triangulation. Vertex indices are assigned in
/// insertion order (including vertices created where two constraints cross), and faces refer to
/// vertices by those indices, so the same input always gives the same indexing.
#[derive(Debug, Clone)]
pub struct SectionTriangulation {
    vertices: Vec<Point2>,
    faces: Vec<[usize; 3]>,
}

impl SectionTriangulation {
    /// Triangulate a set of closed loops, each inserted as a ring of edge constraints. Where the
    /// constraints of different loops cross, both are split at a new vertex at the crossing.
    ///
    /// # Arguments
    ///
    /// * `loops`: the closed loops to constrain, each an ordered list of points with an implicit
    /// closing edge
    ///
    /// returns: Result<SectionTriangulation, MeshError>
    pub fn from_loops(loops: &[&[Point2]]) -> Result<Self> {
        let mut cdt = Cdt::new();

        for ring in loops {
            let handles = ring
                .iter()
                .map(|p| {
                    cdt.insert(spade::Point2::new(p.x, p.y))
                        .map_err(|_| MeshError::Triangulation { x: p.x, y: p.y })
                })
                .collect::<Result<Vec<_>>>()?;

            if handles.len() < 2 {
                continue;
            }

            for (a, b) in handles.iter().circular_tuple_windows() {
                // Repeated points collapse to the same vertex
                if a != b {
                    cdt.add_constraint_and_split(*a, *b, |v| v);
                }
            }
        }

        let vertices = cdt
            .vertices()
            .map(|v| {
                let p = v.position();
                Point2::new(p.x, p.y)
            })
            .collect();

        let faces = cdt
            .inner_faces()
            .map(|f| {
                let [a, b, c] = f.vertices();
                [a.fix().index(), b.fix().index(), c.fix().index()]
            })
            .collect();

        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// The three corner points of a face
    pub fn face_points(&self, face: &[usize; 3]) -> [Point2; 3] {
        [
            self.vertices[face[0]],
            self.vertices[face[1]],
            self.vertices[face[2]],
        ]
    }

    /// The centroid of a face, the mean of its three corners
    pub fn centroid(&self, face: &[usize; 3]) -> Point2 {
        mean_point(&self.face_points(face))
    }
}
