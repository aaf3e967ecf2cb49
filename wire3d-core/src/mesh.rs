//! Mesh container: vertex positions plus (currently unrendered) triangle faces
use nalgebra::Point3;
use thiserror::Error;

/// A mesh-local vertex position
pub type Vertex = Point3<f64>;

/// Errors raised while constructing a [`Mesh`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("all vertices must be a 3-tuple of coordinates, but vertex {index} has {len} components")]
    InvalidVertex { index: usize, len: usize },
    #[error("all faces must be a 3-tuple of vertex numbers, but face {index} has {len} components")]
    InvalidFace { index: usize, len: usize },
    #[error("vertex {vertex} in face {face} is out of range of the {vertex_count} vertices in the mesh")]
    VertexIndexOutOfRange {
        face: usize,
        vertex: i64,
        vertex_count: usize,
    },
}

/// A triangle face referencing three vertices by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face(pub [usize; 3]);

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self([a, b, c])
    }

    pub fn indices(&self) -> [usize; 3] {
        self.0
    }
}

/// An immutable, validated mesh.
///
/// Faces are checked against the vertex list but are not consumed by the
/// renderer, which connects every pair of vertices instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh from typed vertices and faces, checking every face index
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Result<Self, MeshError> {
        for (face_index, face) in faces.iter().enumerate() {
            for &vertex in &face.0 {
                if vertex >= vertices.len() {
                    return Err(MeshError::VertexIndexOutOfRange {
                        face: face_index,
                        vertex: i64::try_from(vertex).unwrap_or(i64::MAX),
                        vertex_count: vertices.len(),
                    });
                }
            }
        }

        Ok(Self { vertices, faces })
    }

    /// Build a mesh from untyped component lists.
    ///
    /// Every vertex must have exactly three coordinates and every face exactly
    /// three indices, each within `0..vertices.len()`. Vertices are checked
    /// before faces; the first violation wins.
    pub fn from_components(vertices: &[Vec<f64>], faces: &[Vec<i64>]) -> Result<Self, MeshError> {
        let mut checked_vertices = Vec::with_capacity(vertices.len());
        for (index, components) in vertices.iter().enumerate() {
            match components.as_slice() {
                &[x, y, z] => checked_vertices.push(Point3::new(x, y, z)),
                _ => {
                    return Err(MeshError::InvalidVertex {
                        index,
                        len: components.len(),
                    })
                }
            }
        }

        let vertex_count = checked_vertices.len();
        let mut checked_faces = Vec::with_capacity(faces.len());
        for (face_index, components) in faces.iter().enumerate() {
            if components.len() != 3 {
                return Err(MeshError::InvalidFace {
                    index: face_index,
                    len: components.len(),
                });
            }

            let mut indices = [0usize; 3];
            for (slot, &vertex) in indices.iter_mut().zip(components) {
                *slot = usize::try_from(vertex)
                    .ok()
                    .filter(|&v| v < vertex_count)
                    .ok_or(MeshError::VertexIndexOutOfRange {
                        face: face_index,
                        vertex,
                        vertex_count,
                    })?;
            }
            checked_faces.push(Face(indices));
        }

        Ok(Self {
            vertices: checked_vertices,
            faces: checked_faces,
        })
    }

    /// Axis-aligned cube with one corner at the origin and no faces
    pub fn cube(size: f64) -> Self {
        let s = size;
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, s, 0.0),
            Point3::new(s, s, 0.0),
            Point3::new(s, 0.0, 0.0),
            Point3::new(0.0, 0.0, s),
            Point3::new(0.0, s, s),
            Point3::new(s, s, s),
            Point3::new(s, 0.0, s),
        ];

        Self {
            vertices,
            faces: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vertex> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_cube_mesh() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.faces().len(), 0);
        assert_eq!(cube.vertices()[6], Point3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_valid_mesh_preserves_order() {
        let faces = vec![Face::new(0, 1, 2), Face::new(2, 1, 0)];
        let mesh = Mesh::new(triangle(), faces.clone()).unwrap();
        assert_eq!(mesh.vertices(), triangle().as_slice());
        assert_eq!(mesh.faces(), faces.as_slice());
    }

    #[test]
    fn test_face_index_past_end() {
        let result = Mesh::new(triangle(), vec![Face::new(0, 1, 3)]);
        assert_eq!(
            result,
            Err(MeshError::VertexIndexOutOfRange {
                face: 0,
                vertex: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_components_valid() {
        let vertices = vec![vec![0.0, 0.0, 0.0], vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let mesh = Mesh::from_components(&vertices, &[vec![0, 1, 2]]).unwrap();
        assert_eq!(mesh.vertices()[1], Point3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_components_invalid_vertex() {
        let vertices = vec![vec![0.0, 0.0, 0.0], vec![1.0, 2.0]];
        let result = Mesh::from_components(&vertices, &[]);
        assert_eq!(result, Err(MeshError::InvalidVertex { index: 1, len: 2 }));
    }

    #[test]
    fn test_components_invalid_face() {
        let vertices = vec![vec![0.0, 0.0, 0.0]; 4];
        let result = Mesh::from_components(&vertices, &[vec![0, 1, 2], vec![0, 1, 2, 3]]);
        assert_eq!(result, Err(MeshError::InvalidFace { index: 1, len: 4 }));
    }

    #[test]
    fn test_components_out_of_range() {
        let vertices = vec![vec![0.0, 0.0, 0.0]; 3];

        for bad in [-1, 3, 100] {
            let result = Mesh::from_components(&vertices, &[vec![0, bad, 1]]);
            assert!(
                matches!(result, Err(MeshError::VertexIndexOutOfRange { vertex, .. }) if vertex == bad),
                "index {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_faces_on_empty_mesh() {
        let result = Mesh::from_components(&[], &[vec![0, 0, 0]]);
        assert!(matches!(result, Err(MeshError::VertexIndexOutOfRange { .. })));
    }
}
