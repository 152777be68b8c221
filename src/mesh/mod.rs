//! Core mesh data structures.
//!
//! This module provides the indexed polygon mesh representation and the
//! derived adjacency used by the topology operators.
//!
//! # Overview
//!
//! The primary type is [`PolyMesh`], which stores vertex positions and
//! arbitrary n-gon faces as flat index-addressed arrays. Edges are implied by
//! consecutive face corners. Neighbourhood queries go through [`Adjacency`],
//! which is rebuilt from the mesh whenever it is needed and borrows the mesh
//! for as long as it lives.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`FaceId`] - Identifies a face
//! - [`DirectedEdge`] / [`UndirectedEdge`] - Edge keys derived from face corners
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! Meshes are typically constructed from file I/O or from face-vertex lists:
//!
//! ```
//! use hedra::mesh::{PolyMesh, build_from_quads};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2, 3]];
//!
//! let mesh: PolyMesh = build_from_quads(&vertices, &faces).unwrap();
//! assert!(mesh.is_quad_mesh());
//! ```

mod builder;
mod index;
mod polymesh;
mod traversal;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::{build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex};
pub use index::{DirectedEdge, FaceId, MeshIndex, UndirectedEdge, VertexId};
pub use polymesh::{Face, PolyMesh};
pub(crate) use polymesh::check_capacity;
pub use traversal::{Adjacency, Corner};
