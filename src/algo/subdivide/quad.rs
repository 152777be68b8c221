//! Quad split and Catmull-Clark subdivision.

use nalgebra::{Point3, Vector3};

use crate::algo::edge_points::EdgePoints;
use crate::mesh::{FaceId, MeshIndex, PolyMesh, VertexId};

use super::face_points;

/// One iteration of the quad split, optionally with Catmull-Clark smoothing.
///
/// Each n-gon `[v0 .. vn-1]` with face point `c` and edge points `e_i` on
/// `(v_i, v_i+1)` becomes the n quads `[v_i, e_i, c, e_i-1]`.
pub(super) fn split_once<I: MeshIndex>(mesh: &mut PolyMesh<I>, smooth: bool, parallel: bool) {
    let num_vertices = mesh.num_vertices();
    let num_faces = mesh.num_faces();

    let face_points = face_points(mesh, parallel);

    // Edge points and the faces on each side of every edge.
    let mut edge_points = EdgePoints::new(num_vertices + num_faces);
    let mut edge_faces: Vec<Vec<usize>> = Vec::new();
    let mut face_edge_points: Vec<Vec<VertexId<I>>> = Vec::with_capacity(num_faces);

    for f in mesh.face_ids() {
        let mut ring = Vec::with_capacity(mesh.face_arity(f));
        for e in mesh.face_edges(f) {
            let id = edge_points.get_or_insert(e, || mesh.edge_midpoint(e));
            let local = edge_points.local_index(id);
            if local == edge_faces.len() {
                edge_faces.push(Vec::with_capacity(2));
            }
            edge_faces[local].push(f.index());
            ring.push(id);
        }
        face_edge_points.push(ring);
    }

    let mut positions = mesh.positions().to_vec();
    if smooth {
        relax(mesh, &face_points, &mut edge_points, &edge_faces, &mut positions);
    }

    let mut faces = Vec::with_capacity(mesh.num_corners());
    for (f, ring) in face_edge_points.iter().enumerate() {
        let corners = mesh.face_vertices(FaceId::new(f));
        let centre = VertexId::new(num_vertices + f);
        let n = corners.len();
        for i in 0..n {
            faces.push(vec![corners[i], ring[i], centre, ring[(i + n - 1) % n]]);
        }
    }

    positions.extend(face_points);
    positions.extend(edge_points.into_points());
    mesh.replace_topology(positions, faces);
}

/// Move edge points and original vertices to their Catmull-Clark positions.
fn relax<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    face_points: &[Point3<f64>],
    edge_points: &mut EdgePoints<I>,
    edge_faces: &[Vec<usize>],
    positions: &mut [Point3<f64>],
) {
    let n = mesh.num_vertices();

    // Per-vertex sums of adjacent face points and edge midpoints.
    let mut face_sum = vec![Vector3::zeros(); n];
    let mut face_count = vec![0usize; n];
    for (f, fp) in face_points.iter().enumerate() {
        for &v in mesh.face_vertices(FaceId::new(f)) {
            face_sum[v.index()] += fp.coords;
            face_count[v.index()] += 1;
        }
    }

    let mut edge_sum = vec![Vector3::zeros(); n];
    let mut edge_count = vec![0usize; n];
    let mut boundary_neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];

    let edges = edge_points.edges().to_vec();
    let points = edge_points.points_mut();
    for (local, edge) in edges.iter().enumerate() {
        let (a, b) = (edge.lo().index(), edge.hi().index());
        let midpoint = points[local].coords;

        edge_sum[a] += midpoint;
        edge_sum[b] += midpoint;
        edge_count[a] += 1;
        edge_count[b] += 1;

        let faces = &edge_faces[local];
        if faces.len() < 2 {
            // Boundary edge: stays at its midpoint.
            boundary_neighbors[a].push(b);
            boundary_neighbors[b].push(a);
        } else {
            let around: Vector3<f64> = faces.iter().map(|&f| face_points[f].coords).sum();
            let ends = mesh.positions()[a].coords + mesh.positions()[b].coords;
            points[local] = Point3::from((ends + around) / (2 + faces.len()) as f64);
        }
    }

    for (i, pos) in positions.iter_mut().enumerate() {
        let s = pos.coords;
        let updated = if !boundary_neighbors[i].is_empty() {
            if boundary_neighbors[i].len() == 2 {
                // Regular boundary vertex: 1/8 * (left + right) + 3/4 * v
                let left = mesh.positions()[boundary_neighbors[i][0]].coords;
                let right = mesh.positions()[boundary_neighbors[i][1]].coords;
                (left + right) * (1.0 / 8.0) + s * (3.0 / 4.0)
            } else {
                // Corner: keep position
                s
            }
        } else if face_count[i] == 0 {
            s
        } else {
            // Interior vertex: (Q + 2R + (n-3)S) / n
            let valence = face_count[i] as f64;
            let q = face_sum[i] / valence;
            let r = edge_sum[i] / edge_count[i] as f64;
            (q + r * 2.0 + s * (valence - 3.0)) / valence
        };
        *pos = Point3::from(updated);
    }
}
