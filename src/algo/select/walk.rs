//! Selection by walking face adjacency.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::FaceSelection;
use crate::error::{MeshError, Result};
use crate::mesh::{Adjacency, FaceId, MeshIndex, PolyMesh};

/// Select a strip of faces by repeatedly crossing opposite edges.
///
/// Starts at `start`, crosses its edge number `edge` (the edge leaving corner
/// `edge`), and in every face entered leaves through the edge opposite the one
/// it came in by: corner `(k + n/2) mod n` for an entry at corner `k` of an
/// n-gon. On quad meshes this follows an edge ring. The walk stops when it
/// returns to `start`, reaches a face it already selected, or meets an open edge.
///
/// # Errors
///
/// [`MeshError::InvalidFaceIndex`] if `start` is out of range,
/// [`MeshError::InvalidEdgeIndex`] if `edge` is not a corner of `start`.
pub fn loop_select<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    start: FaceId<I>,
    edge: usize,
) -> Result<FaceSelection<I>> {
    let arity = mesh.try_face(start)?.arity();
    if edge >= arity {
        return Err(MeshError::InvalidEdgeIndex {
            face: start.index(),
            edge,
            arity,
        });
    }

    let adjacency = Adjacency::build(mesh);
    let mut selection = FaceSelection::new();
    selection.insert(start);

    let mut exit = mesh.face_edge(start, edge);
    while let Some(entry) = adjacency.corner_of(exit.reversed()) {
        if entry.face == start || !selection.insert(entry.face) {
            break;
        }
        let n = mesh.face_arity(entry.face);
        exit = mesh.face_edge(entry.face, (entry.index + n / 2) % n);
    }

    debug!(start = start.index(), edge, faces = selection.len(), "loop select");
    Ok(selection)
}

/// Thin out a selection so that no two kept faces share an edge, where possible.
///
/// The selected faces are split into edge-connected components. Each component
/// is walked depth-first from its lowest face id, which is kept; every newly
/// reached face gets the opposite keep flag from the face it was reached from.
/// Dropped faces are removed from `selection`, and their number is returned.
/// On components whose dual graph is bipartite, such as regular quad grids,
/// this yields a perfect checkerboard.
///
/// # Errors
///
/// [`MeshError::InvalidFaceIndex`] if the selection holds a face the mesh does
/// not have. The selection is left untouched.
pub fn checkerboard_deselect<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    selection: &mut FaceSelection<I>,
) -> Result<usize> {
    for f in selection.iter() {
        mesh.try_face(f)?;
    }

    let adjacency = Adjacency::build(mesh);
    let mut visited: BTreeSet<FaceId<I>> = BTreeSet::new();
    let mut dropped = Vec::new();
    let mut stack = Vec::new();

    for seed in selection.iter() {
        if !visited.insert(seed) {
            continue;
        }
        stack.push((seed, true));
        while let Some((f, keep)) = stack.pop() {
            if !keep {
                dropped.push(f);
            }
            for neighbor in adjacency.neighbor_faces(f).into_iter().flatten() {
                if selection.contains(neighbor) && visited.insert(neighbor) {
                    trace!(from = f.index(), to = neighbor.index(), keep = !keep, "checkerboard step");
                    stack.push((neighbor, !keep));
                }
            }
        }
    }

    for &f in &dropped {
        selection.remove(f);
    }
    debug!(dropped = dropped.len(), kept = selection.len(), "checkerboard");
    Ok(dropped.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures::{cube, quad_grid, uv_sphere};

    #[test]
    fn test_loop_select_around_sphere_band() {
        let mesh = uv_sphere(8, 6);
        let ring = loop_select(&mesh, FaceId::new(27), 0).unwrap();
        assert_eq!(ring.indices(), (24..=31).collect::<Vec<_>>());
    }

    #[test]
    fn test_loop_select_stops_at_open_edge() {
        let mesh = quad_grid(3, 4);
        let strip = loop_select(&mesh, FaceId::new(7), 0).unwrap();
        assert_eq!(strip.indices(), vec![1, 4, 7]);

        // Crossing the right-hand edge runs along the row instead.
        let row = loop_select(&mesh, FaceId::new(6), 1).unwrap();
        assert_eq!(row.indices(), vec![6, 7, 8]);
    }

    #[test]
    fn test_loop_select_around_cube() {
        let mesh = cube();
        // Bottom face edge 0 is 0 -> 3, shared with the left face.
        let ring = loop_select(&mesh, FaceId::new(0), 0).unwrap();
        assert_eq!(ring.len(), 4);
        assert!(ring.contains(FaceId::new(0)));
        assert!(ring.contains(FaceId::new(4)));
    }

    #[test]
    fn test_loop_select_open_start_edge() {
        let mesh = quad_grid(2, 2);
        // Edge 0 of face 0 is on the border.
        let ring = loop_select(&mesh, FaceId::new(0), 0).unwrap();
        assert_eq!(ring.indices(), vec![0]);
    }

    #[test]
    fn test_loop_select_rejects_bad_indices() {
        let mesh = quad_grid(2, 2);
        assert!(matches!(
            loop_select(&mesh, FaceId::new(9), 0),
            Err(MeshError::InvalidFaceIndex { face: 9, count: 4 })
        ));
        assert!(matches!(
            loop_select(&mesh, FaceId::new(0), 4),
            Err(MeshError::InvalidEdgeIndex { face: 0, edge: 4, arity: 4 })
        ));
    }

    #[test]
    fn test_checkerboard_on_grid() {
        let mesh = quad_grid(4, 4);
        let mut selection = FaceSelection::all(&mesh);
        assert_eq!(checkerboard_deselect(&mesh, &mut selection).unwrap(), 8);

        let expected: Vec<usize> = (0..16).filter(|f| (f % 4 + f / 4) % 2 == 0).collect();
        assert_eq!(selection.indices(), expected);
    }

    #[test]
    fn test_checkerboard_components_start_kept() {
        let mesh = quad_grid(4, 1);
        // Two separate components: {0} and {2, 3}.
        let mut selection: FaceSelection = [0, 2, 3].into_iter().map(FaceId::new).collect();
        assert_eq!(checkerboard_deselect(&mesh, &mut selection).unwrap(), 1);
        assert_eq!(selection.indices(), vec![0, 2]);
    }

    #[test]
    fn test_checkerboard_empty_selection() {
        let mesh = cube();
        let mut selection = FaceSelection::new();
        assert_eq!(checkerboard_deselect(&mesh, &mut selection).unwrap(), 0);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_checkerboard_rejects_face_outside_mesh() {
        let mesh = cube();
        let mut selection: FaceSelection = [0, 99].into_iter().map(FaceId::new).collect();
        assert!(matches!(
            checkerboard_deselect(&mesh, &mut selection),
            Err(MeshError::InvalidFaceIndex { face: 99, count: 6 })
        ));
        assert_eq!(selection.indices(), vec![0, 99]);
    }
}
