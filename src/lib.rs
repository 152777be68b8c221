//! # Hedra
//!
//! Polygon meshes and the polyhedral operators that rewrite them.
//!
//! Hedra stores meshes as shared vertex positions plus faces of any arity,
//! and provides:
//!
//! - **Conway operators**: dual, ambo and kis, the composites built from them,
//!   and an interpreter for operator strings such as `"tk"`
//! - **Subdivision**: quad split, Catmull-Clark, midpoint and tessellate
//! - **Face selection**: by corner count, centroid or normal, plus loop and
//!   checkerboard walks over face adjacency
//! - **Validation**: manifoldness, orientation and Euler characteristic
//! - **OBJ I/O**
//!
//! ## Quick Start
//!
//! ```no_run
//! use hedra::prelude::*;
//!
//! let mut mesh: PolyMesh = hedra::io::load("cube.obj").unwrap();
//! apply_operators(&mut mesh, "tk").unwrap();
//! subdivide(&mut mesh, &SubdivideOptions::new(2).with_scheme(Scheme::CatmullClark)).unwrap();
//!
//! println!("{}", MeshReport::new(&mesh));
//! hedra::io::save(&mesh, "out.obj").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use hedra::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(1.0, -1.0, -1.0),
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(-1.0, -1.0, 1.0),
//! ];
//! let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
//!
//! let mut mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
//! dual(&mut mesh).unwrap();
//!
//! // The tetrahedron is self-dual.
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_faces(), 4);
//! assert!(is_genus_zero(&mesh));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use hedra::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::conway::{
        ambo, apply_operators, apply_operators_strict, dual, kis, Operator, Strictness,
    };
    pub use crate::algo::select::{Axis, Comparison, FaceSelection};
    pub use crate::algo::subdivide::{subdivide, Scheme, SubdivideOptions};
    pub use crate::algo::validate::{check_closed_manifold, is_genus_zero, MeshReport};
    pub use crate::algo::Progress;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex, Face, FaceId,
        MeshIndex, PolyMesh, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
