//! Shared table of per-edge vertices.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::mesh::{DirectedEdge, MeshIndex, UndirectedEdge, VertexId};

/// One new vertex per undirected edge, numbered in first-encounter order.
///
/// New vertices are numbered from `base` so they can be appended after
/// existing vertex buffers. Both directions of an edge map to the same vertex.
pub(crate) struct EdgePoints<I: MeshIndex> {
    base: usize,
    lookup: HashMap<UndirectedEdge<I>, usize>,
    edges: Vec<UndirectedEdge<I>>,
    points: Vec<Point3<f64>>,
}

impl<I: MeshIndex> EdgePoints<I> {
    pub(crate) fn new(base: usize) -> Self {
        Self {
            base,
            lookup: HashMap::new(),
            edges: Vec::new(),
            points: Vec::new(),
        }
    }

    /// The vertex for `edge`, creating it at `position()` on first sight.
    pub(crate) fn get_or_insert(
        &mut self,
        edge: DirectedEdge<I>,
        position: impl FnOnce() -> Point3<f64>,
    ) -> VertexId<I> {
        let key = edge.undirected();
        let local = match self.lookup.get(&key) {
            Some(&local) => local,
            None => {
                let local = self.points.len();
                self.lookup.insert(key, local);
                self.edges.push(key);
                self.points.push(position());
                local
            }
        };
        VertexId::new(self.base + local)
    }

    /// Position in the table of a vertex returned by [`get_or_insert`](Self::get_or_insert).
    #[inline]
    pub(crate) fn local_index(&self, v: VertexId<I>) -> usize {
        v.index() - self.base
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    /// Edge keys, index-aligned with the points.
    #[inline]
    pub(crate) fn edges(&self) -> &[UndirectedEdge<I>] {
        &self.edges
    }

    #[inline]
    pub(crate) fn points_mut(&mut self) -> &mut [Point3<f64>] {
        &mut self.points
    }

    pub(crate) fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }
}
