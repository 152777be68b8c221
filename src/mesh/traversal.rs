//! Derived adjacency for polygon meshes.
//!
//! [`Adjacency`] is built from a [`PolyMesh`] in one pass over its faces and
//! answers neighbourhood queries in O(1): which face owns a directed edge, which
//! face lies across it, and how to step from one outgoing edge of a vertex to the
//! next. It borrows the mesh immutably, so it cannot outlive a mutation of the
//! mesh it was built from; rebuild it after every topological change.
//!
//! # Walking around a vertex
//!
//! For an outgoing edge `v -> w` owned by face `F`, the reverse edge `w -> v`
//! belongs to the neighbour `G` across that edge. The edge after `w -> v` in `G`
//! leaves `v` again, so repeating the step visits every face around `v`. With
//! counter-clockwise faces the walk turns clockwise when viewed from outside.

use std::collections::HashMap;

use super::index::{DirectedEdge, FaceId, MeshIndex, VertexId};
use super::polymesh::PolyMesh;
use crate::error::{MeshError, Result};

/// Position of a directed edge inside its face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner<I: MeshIndex = u32> {
    /// Face owning the edge.
    pub face: FaceId<I>,
    /// Corner index of the edge's origin within the face.
    pub index: usize,
}

/// Adjacency lookup tables for a mesh.
pub struct Adjacency<'m, I: MeshIndex = u32> {
    mesh: &'m PolyMesh<I>,

    /// Directed edge -> owning face and corner.
    edges: HashMap<DirectedEdge<I>, Corner<I>>,

    /// One outgoing edge per vertex, if any face uses it.
    outgoing: Vec<Option<DirectedEdge<I>>>,

    /// Number of face corners at each vertex.
    outgoing_count: Vec<usize>,
}

impl<'m, I: MeshIndex> Adjacency<'m, I> {
    /// Build adjacency tables for `mesh`.
    ///
    /// If two faces share the same directed edge the first one wins; such
    /// meshes are reported as non-manifold by the fan walk.
    pub fn build(mesh: &'m PolyMesh<I>) -> Self {
        let mut edges = HashMap::with_capacity(mesh.num_corners());
        let mut outgoing = vec![None; mesh.num_vertices()];
        let mut outgoing_count = vec![0; mesh.num_vertices()];

        for (f, face) in mesh.faces() {
            for (k, e) in face.edges().enumerate() {
                edges.entry(e).or_insert(Corner { face: f, index: k });
                outgoing[e.from.index()].get_or_insert(e);
                outgoing_count[e.from.index()] += 1;
            }
        }

        Self {
            mesh,
            edges,
            outgoing,
            outgoing_count,
        }
    }

    /// The mesh these tables were built from.
    #[inline]
    pub fn mesh(&self) -> &'m PolyMesh<I> {
        self.mesh
    }

    /// Some outgoing edge of `v`, or `None` for an isolated vertex.
    #[inline]
    pub fn outgoing(&self, v: VertexId<I>) -> Option<DirectedEdge<I>> {
        self.outgoing[v.index()]
    }

    /// Number of face corners at `v`.
    #[inline]
    pub fn outgoing_count(&self, v: VertexId<I>) -> usize {
        self.outgoing_count[v.index()]
    }

    /// The face and corner owning a directed edge.
    #[inline]
    pub fn corner_of(&self, e: DirectedEdge<I>) -> Option<Corner<I>> {
        self.edges.get(&e).copied()
    }

    /// The face owning a directed edge.
    #[inline]
    pub fn face_of(&self, e: DirectedEdge<I>) -> Option<FaceId<I>> {
        self.corner_of(e).map(|c| c.face)
    }

    /// The face containing the directed edge `to -> from`, i.e. the face on
    /// the other side of `from -> to`.
    #[inline]
    pub fn face_sharing_reverse_edge(
        &self,
        from: VertexId<I>,
        to: VertexId<I>,
    ) -> Option<FaceId<I>> {
        self.face_of(DirectedEdge::new(to, from))
    }

    /// The face across edge `e`, or `None` if `e` is on an open boundary.
    #[inline]
    pub fn face_across(&self, e: DirectedEdge<I>) -> Option<FaceId<I>> {
        self.face_of(e.reversed())
    }

    /// Check whether a directed edge has no face on its other side.
    #[inline]
    pub fn is_boundary_edge(&self, e: DirectedEdge<I>) -> bool {
        self.face_across(e).is_none()
    }

    /// The next outgoing edge of `e.from`, one face further around the vertex.
    ///
    /// Returns `None` when `e` lies on an open boundary.
    pub fn next_around_vertex(&self, e: DirectedEdge<I>) -> Option<DirectedEdge<I>> {
        let twin = self.corner_of(e.reversed())?;
        Some(self.mesh.face_edge(twin.face, twin.index + 1))
    }

    /// All outgoing edges of `v`, in walk order starting from [`outgoing`](Self::outgoing).
    ///
    /// Each edge's owning face is a face around `v`; the faces come out in
    /// clockwise order viewed from outside. An isolated vertex has an empty fan.
    ///
    /// # Errors
    /// - [`MeshError::OpenBoundary`] if the walk meets an edge with no face across.
    /// - [`MeshError::NonManifoldVertex`] if the walk closes without visiting
    ///   every corner at `v`.
    pub fn vertex_fan(&self, v: VertexId<I>) -> Result<Vec<DirectedEdge<I>>> {
        let Some(start) = self.outgoing(v) else {
            return Ok(Vec::new());
        };
        let expected = self.outgoing_count(v);
        let mut fan = Vec::with_capacity(expected);

        let mut e = start;
        loop {
            fan.push(e);
            if fan.len() > expected {
                return Err(MeshError::NonManifoldVertex { vertex: v.index() });
            }
            e = self
                .next_around_vertex(e)
                .ok_or(MeshError::OpenBoundary { vertex: v.index() })?;
            if e == start {
                break;
            }
        }

        if fan.len() != expected {
            return Err(MeshError::NonManifoldVertex { vertex: v.index() });
        }
        Ok(fan)
    }

    /// Faces around `v` in clockwise order viewed from outside.
    pub fn vertex_faces(&self, v: VertexId<I>) -> Result<Vec<FaceId<I>>> {
        Ok(self
            .vertex_fan(v)?
            .into_iter()
            .filter_map(|e| self.face_of(e))
            .collect())
    }

    /// The face across each edge of `f`, in corner order.
    pub fn neighbor_faces(&self, f: FaceId<I>) -> Vec<Option<FaceId<I>>> {
        self.mesh
            .face_edges(f)
            .map(|e| self.face_across(e))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures::{cube, quad_grid, tetrahedron};

    #[test]
    fn test_cube_tables() {
        let mesh = cube();
        let adjacency = Adjacency::build(&mesh);

        for v in mesh.vertex_ids() {
            assert_eq!(adjacency.outgoing_count(v), 3);
            assert!(adjacency.outgoing(v).is_some());
        }
        for f in mesh.face_ids() {
            let neighbors = adjacency.neighbor_faces(f);
            assert_eq!(neighbors.len(), 4);
            assert!(neighbors.iter().all(|n| n.is_some_and(|n| n != f)));
        }
    }

    #[test]
    fn test_face_sharing_reverse_edge() {
        let mesh = cube();
        let adjacency = Adjacency::build(&mesh);
        // Bottom face [0, 3, 2, 1] contains 1 -> 0; front face [0, 1, 5, 4] contains 0 -> 1.
        let v0 = VertexId::new(0);
        let v1 = VertexId::new(1);
        assert_eq!(adjacency.face_sharing_reverse_edge(v0, v1), Some(FaceId::new(0)));
        assert_eq!(adjacency.face_sharing_reverse_edge(v1, v0), Some(FaceId::new(2)));
    }

    #[test]
    fn test_vertex_fan_closed() {
        let mesh = tetrahedron();
        let adjacency = Adjacency::build(&mesh);
        for v in mesh.vertex_ids() {
            let fan = adjacency.vertex_fan(v).unwrap();
            assert_eq!(fan.len(), 3);
            assert!(fan.iter().all(|e| e.from == v));

            let faces = adjacency.vertex_faces(v).unwrap();
            let mut sorted = faces.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), 3);
        }
    }

    #[test]
    fn test_next_around_vertex_steps_into_neighbor() {
        let mesh = cube();
        let adjacency = Adjacency::build(&mesh);
        let e = DirectedEdge::new(VertexId::new(0), VertexId::new(1));
        let next = adjacency.next_around_vertex(e).unwrap();
        assert_eq!(next.from, VertexId::new(0));
        // 1 -> 0 lives in the bottom face [0, 3, 2, 1]; the edge after it is 0 -> 3.
        assert_eq!(next.to, VertexId::new(3));
    }

    #[test]
    fn test_vertex_fan_open_boundary() {
        let mesh = quad_grid(2, 2);
        let adjacency = Adjacency::build(&mesh);

        // Centre vertex is interior.
        let centre = VertexId::new(4);
        assert_eq!(adjacency.vertex_fan(centre).unwrap().len(), 4);

        // Corner vertex touches the open border.
        let corner = VertexId::new(0);
        assert!(matches!(
            adjacency.vertex_fan(corner),
            Err(MeshError::OpenBoundary { vertex: 0 })
        ));
    }

    #[test]
    fn test_vertex_fan_non_manifold() {
        // Two tetrahedra glued at a single vertex.
        let mut mesh = tetrahedron();
        let offset = nalgebra::Vector3::new(2.0, 2.0, 2.0);
        let base = mesh.num_vertices();
        let copies: Vec<_> = mesh.positions()[1..].iter().map(|p| p + offset).collect();
        for p in copies {
            mesh.add_vertex(p).unwrap();
        }
        // Reuse vertex 0 as the pinch point.
        let remap = |i: usize| if i == 0 { 0 } else { base + i - 1 };
        let faces: Vec<Vec<usize>> = (0..4)
            .map(|f| {
                mesh.face_vertices(FaceId::new(f))
                    .iter()
                    .map(|v| remap(v.index()))
                    .collect()
            })
            .collect();
        for face in &faces {
            mesh.add_face(face).unwrap();
        }

        let adjacency = Adjacency::build(&mesh);
        assert!(matches!(
            adjacency.vertex_fan(VertexId::new(0)),
            Err(MeshError::NonManifoldVertex { vertex: 0 })
        ));
        assert!(adjacency.vertex_fan(VertexId::new(1)).is_ok());
    }

    #[test]
    fn test_isolated_vertex_has_empty_fan() {
        let mut mesh = tetrahedron();
        let v = mesh.add_vertex(nalgebra::Point3::new(5.0, 5.0, 5.0)).unwrap();
        let adjacency = Adjacency::build(&mesh);
        assert!(adjacency.outgoing(v).is_none());
        assert!(adjacency.vertex_fan(v).unwrap().is_empty());
    }
}
