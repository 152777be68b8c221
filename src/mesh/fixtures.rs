//! Small reference meshes shared by unit tests.

use std::f64::consts::PI;

use nalgebra::Point3;

use super::builder::build_from_polygons;
use super::polymesh::PolyMesh;

/// Axis-aligned cube spanning [-1, 1]^3.
///
/// Face order: bottom, top, front (-y), back (+y), left (-x), right (+x).
pub(crate) fn cube() -> PolyMesh {
    let vertices = vec![
        Point3::new(-1.0, -1.0, -1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(1.0, 1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
        Point3::new(1.0, -1.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(-1.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    build_from_polygons(&vertices, &faces).unwrap()
}

/// Regular tetrahedron inscribed in the cube [-1, 1]^3.
pub(crate) fn tetrahedron() -> PolyMesh {
    let vertices = vec![
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
    ];
    let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
    build_from_polygons(&vertices, &faces).unwrap()
}

/// Regular octahedron with vertices on the unit axes.
pub(crate) fn octahedron() -> PolyMesh {
    let vertices = vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let faces = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    build_from_polygons(&vertices, &faces).unwrap()
}

/// Unit sphere with triangle caps at the poles and quad bands between rings.
///
/// Vertex 0 is the north pole, then `rings - 1` rings of `segments` vertices
/// from north to south, then the south pole. Faces: `segments` north cap
/// triangles, `(rings - 2) * segments` band quads, `segments` south cap
/// triangles. The band quad between rings `r` and `r + 1` (rings counted from 1)
/// at segment `s` has index `segments * r + s`; its corner 0 edge runs north to
/// south.
pub(crate) fn uv_sphere(segments: usize, rings: usize) -> PolyMesh {
    assert!(segments >= 3 && rings >= 2);

    let mut vertices = vec![Point3::new(0.0, 0.0, 1.0)];
    for r in 1..rings {
        let theta = PI * r as f64 / rings as f64;
        for s in 0..segments {
            let phi = 2.0 * PI * s as f64 / segments as f64;
            vertices.push(Point3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            ));
        }
    }
    let south = vertices.len();
    vertices.push(Point3::new(0.0, 0.0, -1.0));

    let ring = |r: usize, s: usize| 1 + (r - 1) * segments + s % segments;

    let mut faces: Vec<Vec<usize>> = Vec::new();
    for s in 0..segments {
        faces.push(vec![0, ring(1, s), ring(1, s + 1)]);
    }
    for r in 1..rings - 1 {
        for s in 0..segments {
            faces.push(vec![
                ring(r, s),
                ring(r + 1, s),
                ring(r + 1, s + 1),
                ring(r, s + 1),
            ]);
        }
    }
    for s in 0..segments {
        faces.push(vec![south, ring(rings - 1, s + 1), ring(rings - 1, s)]);
    }

    build_from_polygons(&vertices, &faces).unwrap()
}

/// Flat `nx` by `ny` grid of unit quads in the z = 0 plane, facing +z.
///
/// Vertex `(i, j)` has index `j * (nx + 1) + i`; face `(i, j)` has index
/// `j * nx + i` and corners `(i, j), (i+1, j), (i+1, j+1), (i, j+1)`.
pub(crate) fn quad_grid(nx: usize, ny: usize) -> PolyMesh {
    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }
    let v = |i: usize, j: usize| j * (nx + 1) + i;

    let mut faces = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            faces.push([v(i, j), v(i + 1, j), v(i + 1, j + 1), v(i, j + 1)]);
        }
    }
    build_from_polygons(&vertices, &faces).unwrap()
}

/// The cube with its top face removed.
pub(crate) fn open_box() -> PolyMesh {
    let mesh = cube();
    let (vertices, mut faces) = super::builder::to_face_vertex(&mesh);
    faces.remove(1);
    build_from_polygons(&vertices, &faces).unwrap()
}
