//! Mesh construction utilities.
//!
//! This module provides functions for building polygon meshes from
//! face-vertex lists as commonly found in mesh file formats.

use nalgebra::Point3;

use super::index::MeshIndex;
use super::polymesh::PolyMesh;
use crate::error::Result;

/// Build a polygon mesh from vertices and faces of any arity.
///
/// Each face is a list of at least three vertex indices in counter-clockwise
/// order. An empty face list yields a mesh with vertices but no faces.
///
/// # Example
/// ```
/// use hedra::mesh::{build_from_polygons, PolyMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.5, 1.5, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2, 3], vec![3, 2, 4]];
///
/// let mesh: PolyMesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 5);
/// assert_eq!(mesh.num_faces(), 2);
/// ```
pub fn build_from_polygons<I: MeshIndex, F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
) -> Result<PolyMesh<I>> {
    let mut mesh = PolyMesh::with_capacity(vertices.len(), faces.len());
    mesh.replace(vertices.to_vec(), faces)?;
    Ok(mesh)
}

/// Build a polygon mesh from vertices and triangle faces.
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<PolyMesh<I>> {
    build_from_polygons(vertices, faces)
}

/// Build a polygon mesh from vertices and quad faces.
pub fn build_from_quads<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 4]],
) -> Result<PolyMesh<I>> {
    build_from_polygons(vertices, faces)
}

/// Convert a polygon mesh back to a face-vertex representation.
///
/// Returns (vertices, faces) tuple.
pub fn to_face_vertex<I: MeshIndex>(mesh: &PolyMesh<I>) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let vertices = mesh.positions().to_vec();
    let faces = mesh
        .faces()
        .map(|(_, face)| face.vertices().iter().map(|v| v.index()).collect())
        .collect();
    (vertices, faces)
}
