//! Mesh subdivision.
//!
//! Every scheme works on arbitrary polygon meshes, open or closed, and rebuilds
//! the mesh once per iteration. New vertices are laid out as: original
//! vertices, then face points (one per face, in face order) for the schemes that
//! use them, then edge points (one per undirected edge, in the order edges are
//! first met walking faces in order).
//!
//! # Schemes
//!
//! - **Quad** (default): each n-gon becomes n quads joining its corners, its
//!   edge midpoints and its centroid. Positions are not smoothed.
//! - **Catmull-Clark**: the quad split with smoothing. Edge points average the
//!   edge endpoints with the adjacent face points, and original vertices move to
//!   `(Q + 2R + (n - 3)S) / n`. Boundary edges stay at their midpoints and
//!   boundary vertices follow the boundary curve.
//! - **Midpoint**: each n-gon becomes n corner triangles plus the inner n-gon
//!   through its edge midpoints.
//! - **Tessellate**: each n-gon becomes 2n triangles fanned around its centroid
//!   through its edge midpoints.
//!
//! # Example
//!
//! ```
//! use hedra::prelude::*;
//! use hedra::algo::subdivide::{subdivide, Scheme, SubdivideOptions};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mut mesh: PolyMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//!
//! subdivide(&mut mesh, &SubdivideOptions::new(2)).unwrap();
//! assert_eq!(mesh.num_faces(), 16);
//!
//! subdivide(&mut mesh, &SubdivideOptions::new(1).with_scheme(Scheme::Tessellate)).unwrap();
//! assert_eq!(mesh.num_faces(), 128);
//! ```
//!
//! # References
//!
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod quad;
mod triangle;

use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;
use rayon::prelude::*;
use tracing::debug;

use crate::algo::validate::num_edges;
use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{check_capacity, FaceId, MeshIndex, PolyMesh};

/// Face count above which face points are computed in parallel.
const PARALLEL_FACE_THRESHOLD: usize = 1024;

/// Subdivision scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Split every n-gon into n quads without smoothing.
    #[default]
    Quad,
    /// Quad split with Catmull-Clark smoothing.
    CatmullClark,
    /// Corner triangles plus an inner n-gon.
    Midpoint,
    /// 2n triangles around the centroid.
    Tessellate,
}

impl Scheme {
    /// Every scheme.
    pub const ALL: [Scheme; 4] = [
        Scheme::Quad,
        Scheme::CatmullClark,
        Scheme::Midpoint,
        Scheme::Tessellate,
    ];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Quad => "quad",
            Scheme::CatmullClark => "catmull-clark",
            Scheme::Midpoint => "midpoint",
            Scheme::Tessellate => "tessellate",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = MeshError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quad" => Ok(Scheme::Quad),
            "catmull-clark" | "catmull_clark" | "cc" => Ok(Scheme::CatmullClark),
            "midpoint" => Ok(Scheme::Midpoint),
            "tessellate" => Ok(Scheme::Tessellate),
            _ => Err(MeshError::invalid_param(
                "scheme",
                s,
                "expected quad, catmull-clark, midpoint or tessellate",
            )),
        }
    }
}

/// Options for subdivision.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Number of subdivision iterations.
    pub iterations: usize,

    /// Subdivision scheme.
    pub scheme: Scheme,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SubdivideOptions {
    /// Create options with the specified number of iterations.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            scheme: Scheme::default(),
            parallel: true,
        }
    }

    /// Set the subdivision scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Subdivide `mesh` in place.
///
/// Zero iterations, or a mesh without faces, leaves the mesh unchanged.
///
/// # Errors
///
/// Returns [`MeshError::IndexOverflow`] if an iteration would produce more
/// vertices or faces than the index type can address. The mesh is only
/// replaced once every iteration has succeeded.
pub fn subdivide<'a, I: MeshIndex>(
    mesh: &'a mut PolyMesh<I>,
    options: &SubdivideOptions,
) -> Result<&'a mut PolyMesh<I>> {
    subdivide_with_progress(mesh, options, &Progress::none())
}

/// Subdivision with progress reporting, one step per iteration.
pub fn subdivide_with_progress<'a, I: MeshIndex>(
    mesh: &'a mut PolyMesh<I>,
    options: &SubdivideOptions,
    progress: &Progress,
) -> Result<&'a mut PolyMesh<I>> {
    if options.iterations == 0 || mesh.num_faces() == 0 {
        return Ok(mesh);
    }

    let mut scratch = mesh.clone();
    for iteration in 0..options.iterations {
        progress.report(iteration, options.iterations, options.scheme.name());
        check_iteration(&scratch, options.scheme)?;
        match options.scheme {
            Scheme::Quad => quad::split_once(&mut scratch, false, options.parallel),
            Scheme::CatmullClark => quad::split_once(&mut scratch, true, options.parallel),
            Scheme::Midpoint => triangle::midpoint_once(&mut scratch),
            Scheme::Tessellate => triangle::tessellate_once(&mut scratch, options.parallel),
        }
        debug!(
            iteration,
            scheme = options.scheme.name(),
            vertices = scratch.num_vertices(),
            faces = scratch.num_faces(),
            "subdivided"
        );
    }
    progress.finish(options.iterations, options.scheme.name());

    *mesh = scratch;
    Ok(mesh)
}

/// Fail if one more iteration of `scheme` would overflow the index type.
fn check_iteration<I: MeshIndex>(mesh: &PolyMesh<I>, scheme: Scheme) -> Result<()> {
    let (v, f, e, corners) = (
        mesh.num_vertices(),
        mesh.num_faces(),
        num_edges(mesh),
        mesh.num_corners(),
    );
    match scheme {
        Scheme::Quad | Scheme::CatmullClark => check_capacity::<I>(v + f + e, corners),
        Scheme::Midpoint => check_capacity::<I>(v + e, corners + f),
        Scheme::Tessellate => check_capacity::<I>(v + f + e, 2 * corners),
    }
}

/// Centroid of every face, in face order.
fn face_points<I: MeshIndex>(mesh: &PolyMesh<I>, parallel: bool) -> Vec<Point3<f64>> {
    if parallel && mesh.num_faces() >= PARALLEL_FACE_THRESHOLD {
        (0..mesh.num_faces())
            .into_par_iter()
            .map(|i| mesh.face_centroid(FaceId::new(i)))
            .collect()
    } else {
        mesh.face_ids().map(|f| mesh.face_centroid(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::validate::{euler_characteristic, is_closed_manifold};
    use crate::mesh::fixtures::{cube, quad_grid, tetrahedron};

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("quad".parse::<Scheme>().unwrap(), Scheme::Quad);
        assert_eq!("Catmull-Clark".parse::<Scheme>().unwrap(), Scheme::CatmullClark);
        assert_eq!("tessellate".parse::<Scheme>().unwrap(), Scheme::Tessellate);
        assert!("loop".parse::<Scheme>().is_err());
        for scheme in Scheme::ALL {
            assert_eq!(scheme.to_string().parse::<Scheme>().unwrap(), scheme);
        }
    }

    #[test]
    fn test_zero_iterations_is_noop() {
        for scheme in Scheme::ALL {
            let mut mesh = cube();
            subdivide(&mut mesh, &SubdivideOptions::new(0).with_scheme(scheme)).unwrap();
            assert_eq!(mesh.num_vertices(), 8);
            assert_eq!(mesh.num_faces(), 6);
        }
    }

    #[test]
    fn test_empty_mesh_is_noop() {
        for scheme in Scheme::ALL {
            let mut mesh = PolyMesh::<u32>::new();
            subdivide(&mut mesh, &SubdivideOptions::new(3).with_scheme(scheme)).unwrap();
            assert!(mesh.is_empty());
        }
    }

    #[test]
    fn test_counts_per_scheme() {
        // Cube: V = 8, E = 12, F = 6, 24 corners.
        let expected = [
            (Scheme::Quad, 26, 24),
            (Scheme::CatmullClark, 26, 24),
            (Scheme::Midpoint, 20, 30),
            (Scheme::Tessellate, 26, 48),
        ];
        for (scheme, vertices, faces) in expected {
            let mut mesh = cube();
            subdivide(&mut mesh, &SubdivideOptions::new(1).with_scheme(scheme)).unwrap();
            assert_eq!((mesh.num_vertices(), mesh.num_faces()), (vertices, faces), "{}", scheme);
        }
    }

    #[test]
    fn test_every_scheme_keeps_closed_manifold() {
        for seed in [cube(), tetrahedron()] {
            for scheme in Scheme::ALL {
                let mut mesh = seed.clone();
                subdivide(&mut mesh, &SubdivideOptions::new(2).with_scheme(scheme)).unwrap();
                assert!(is_closed_manifold(&mesh), "{}", scheme);
                assert_eq!(euler_characteristic(&mesh), 2, "{}", scheme);
            }
        }
    }

    #[test]
    fn test_open_mesh_is_supported() {
        for scheme in Scheme::ALL {
            let mut mesh = quad_grid(2, 2);
            subdivide(&mut mesh, &SubdivideOptions::new(1).with_scheme(scheme)).unwrap();
            assert!(mesh.num_faces() > 4, "{}", scheme);
            assert_eq!(euler_characteristic(&mesh), 1, "{}", scheme);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for scheme in Scheme::ALL {
            let mut parallel = cube();
            subdivide(&mut parallel, &SubdivideOptions::new(4).with_scheme(scheme)).unwrap();
            let mut sequential = cube();
            subdivide(&mut sequential, &SubdivideOptions::new(4).with_scheme(scheme).sequential()).unwrap();
            assert_eq!(parallel.positions(), sequential.positions(), "{}", scheme);
        }
    }

    #[test]
    fn test_progress_per_iteration() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let progress = Progress::new(move |_, total, _| {
            assert_eq!(total, 3);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut mesh = cube();
        subdivide_with_progress(&mut mesh, &SubdivideOptions::new(3), &progress).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(mesh.num_faces(), 6 * 64);
    }

    #[test]
    fn test_overflowing_small_indices_fails_without_touching_mesh() {
        use crate::mesh::{build_from_polygons, to_face_vertex};

        let (vertices, faces) = to_face_vertex(&cube());
        let mut mesh = build_from_polygons::<u16, _>(&vertices, &faces).unwrap();
        // Seven quad splits need 98306 vertices, past the 65536 a u16 can address.
        let err = subdivide(&mut mesh, &SubdivideOptions::new(7)).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOverflow { element: "vertices", count: 98306, capacity: 65536 }
        ));
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_faces(), 6);

        for scheme in Scheme::ALL {
            assert!(subdivide(&mut mesh, &SubdivideOptions::new(7).with_scheme(scheme)).is_err());
        }
        subdivide(&mut mesh, &SubdivideOptions::new(6)).unwrap();
        assert_eq!(mesh.num_faces(), 24576);
    }
}
