//! Triangle-producing subdivision: midpoint and tessellate.

use crate::algo::edge_points::EdgePoints;
use crate::mesh::{MeshIndex, PolyMesh, VertexId};

use super::face_points;

/// Edge point ids for every face, `ring[i]` on edge `(v_i, v_i+1)`.
fn edge_rings<I: MeshIndex>(mesh: &PolyMesh<I>, base: usize) -> (EdgePoints<I>, Vec<Vec<VertexId<I>>>) {
    let mut edge_points = EdgePoints::new(base);
    let rings = mesh
        .face_ids()
        .map(|f| {
            mesh.face_edges(f)
                .map(|e| edge_points.get_or_insert(e, || mesh.edge_midpoint(e)))
                .collect()
        })
        .collect();
    (edge_points, rings)
}

/// One midpoint iteration.
///
/// Each n-gon becomes the corner triangles `[v_i, m_i, m_i-1]` followed by the
/// inner n-gon `[m_0 .. m_n-1]`. No face points are created.
pub(super) fn midpoint_once<I: MeshIndex>(mesh: &mut PolyMesh<I>) {
    let num_vertices = mesh.num_vertices();
    let (edge_points, rings) = edge_rings(mesh, num_vertices);

    let mut faces = Vec::with_capacity(mesh.num_corners() + mesh.num_faces());
    for (f, ring) in mesh.face_ids().zip(&rings) {
        let corners = mesh.face_vertices(f);
        let n = corners.len();
        for i in 0..n {
            faces.push(vec![corners[i], ring[i], ring[(i + n - 1) % n]]);
        }
        faces.push(ring.clone());
    }

    let mut positions = mesh.positions().to_vec();
    positions.extend(edge_points.into_points());
    mesh.replace_topology(positions, faces);
}

/// One tessellate iteration.
///
/// Each n-gon with centroid `c` becomes the 2n triangles `[v_i, m_i, c]` and
/// `[m_i, v_i+1, c]`.
pub(super) fn tessellate_once<I: MeshIndex>(mesh: &mut PolyMesh<I>, parallel: bool) {
    let num_vertices = mesh.num_vertices();
    let num_faces = mesh.num_faces();
    let centres = face_points(mesh, parallel);
    let (edge_points, rings) = edge_rings(mesh, num_vertices + num_faces);

    let mut faces = Vec::with_capacity(2 * mesh.num_corners());
    for (f, ring) in mesh.face_ids().zip(&rings) {
        let corners = mesh.face_vertices(f);
        let centre = VertexId::new(num_vertices + f.index());
        let n = corners.len();
        for i in 0..n {
            faces.push(vec![corners[i], ring[i], centre]);
            faces.push(vec![ring[i], corners[(i + 1) % n], centre]);
        }
    }

    let mut positions = mesh.positions().to_vec();
    positions.extend(centres);
    positions.extend(edge_points.into_points());
    mesh.replace_topology(positions, faces);
}
