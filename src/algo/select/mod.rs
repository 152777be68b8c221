//! Face selection.
//!
//! A [`FaceSelection`] is an ordered set of face ids. Selections are produced
//! by predicates over face properties ([`select_by_vertex_count`],
//! [`select_by_centroid`], [`select_by_normal`]) or by walks over face
//! adjacency ([`loop_select`], [`checkerboard_deselect`]), and combined with the
//! usual set operations.
//!
//! A selection is only meaningful for the mesh it was made from. Any operator
//! that rebuilds the mesh renumbers its faces.
//!
//! # Example
//!
//! ```
//! use hedra::prelude::*;
//! use hedra::algo::select::{select_by_centroid, select_by_vertex_count, Axis, Comparison};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//! ];
//! let faces = vec![vec![0, 1, 4, 3], vec![1, 2, 4]];
//! let mesh: PolyMesh = build_from_polygons(&vertices, &faces).unwrap();
//!
//! let quads = select_by_vertex_count(&mesh, Comparison::Equal, 4);
//! let right = select_by_centroid(&mesh, Axis::X, Comparison::Greater, 1.0);
//! assert_eq!(quads.len(), 1);
//! assert!(quads.intersection(&right).is_empty());
//! ```

mod predicate;
mod walk;

use std::collections::BTreeSet;

pub use predicate::{
    select_by_centroid, select_by_normal, select_by_vertex_count, select_where, Axis, Comparison,
};
pub use walk::{checkerboard_deselect, loop_select};

use crate::mesh::{FaceId, MeshIndex, PolyMesh};

/// An ordered set of faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceSelection<I: MeshIndex = u32> {
    faces: BTreeSet<FaceId<I>>,
}

impl<I: MeshIndex> Default for FaceSelection<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> FaceSelection<I> {
    /// An empty selection.
    pub fn new() -> Self {
        Self {
            faces: BTreeSet::new(),
        }
    }

    /// Every face of `mesh`.
    pub fn all(mesh: &PolyMesh<I>) -> Self {
        mesh.face_ids().collect()
    }

    /// Add a face. Returns false if it was already selected.
    pub fn insert(&mut self, f: FaceId<I>) -> bool {
        self.faces.insert(f)
    }

    /// Remove a face. Returns false if it was not selected.
    pub fn remove(&mut self, f: FaceId<I>) -> bool {
        self.faces.remove(&f)
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.faces.clear();
    }

    /// Keep only the faces for which `keep` holds.
    pub fn retain<F: FnMut(FaceId<I>) -> bool>(&mut self, mut keep: F) {
        self.faces.retain(|&f| keep(f));
    }

    /// Check whether a face is selected.
    #[inline]
    pub fn contains(&self, f: FaceId<I>) -> bool {
        self.faces.contains(&f)
    }

    /// Number of selected faces.
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True if nothing is selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Selected faces in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.faces.iter().copied()
    }

    /// Raw indices of the selected faces in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.faces.iter().map(|f| f.index()).collect()
    }

    /// Faces in either selection.
    pub fn union(&self, other: &Self) -> Self {
        self.faces.union(&other.faces).copied().collect()
    }

    /// Faces in both selections.
    pub fn intersection(&self, other: &Self) -> Self {
        self.faces.intersection(&other.faces).copied().collect()
    }

    /// Faces in this selection but not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.faces.difference(&other.faces).copied().collect()
    }

    /// Faces of `mesh` not in this selection.
    pub fn inverted(&self, mesh: &PolyMesh<I>) -> Self {
        mesh.face_ids().filter(|&f| !self.contains(f)).collect()
    }
}

impl<I: MeshIndex> FromIterator<FaceId<I>> for FaceSelection<I> {
    fn from_iter<T: IntoIterator<Item = FaceId<I>>>(iter: T) -> Self {
        Self {
            faces: iter.into_iter().collect(),
        }
    }
}

impl<I: MeshIndex> Extend<FaceId<I>> for FaceSelection<I> {
    fn extend<T: IntoIterator<Item = FaceId<I>>>(&mut self, iter: T) {
        self.faces.extend(iter);
    }
}

impl<'s, I: MeshIndex> IntoIterator for &'s FaceSelection<I> {
    type Item = FaceId<I>;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'s, FaceId<I>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures::cube;

    fn selection(ids: &[usize]) -> FaceSelection {
        ids.iter().map(|&i| FaceId::new(i)).collect()
    }

    #[test]
    fn test_set_operations() {
        let a = selection(&[0, 1, 2]);
        let b = selection(&[2, 3]);

        assert_eq!(a.union(&b).indices(), vec![0, 1, 2, 3]);
        assert_eq!(a.intersection(&b).indices(), vec![2]);
        assert_eq!(a.difference(&b).indices(), vec![0, 1]);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut s = FaceSelection::<u32>::new();
        assert!(s.insert(FaceId::new(4)));
        assert!(!s.insert(FaceId::new(4)));
        assert!(s.contains(FaceId::new(4)));
        assert!(s.remove(FaceId::new(4)));
        assert!(s.is_empty());

        s.extend([1, 2, 3, 4].into_iter().map(FaceId::new));
        s.retain(|f| f.index() % 2 == 0);
        assert_eq!(s.indices(), vec![2, 4]);
        s.clear();
        assert!(s.is_empty());
    }

    #[test]
    fn test_all_and_inverted() {
        let mesh = cube();
        let all = FaceSelection::all(&mesh);
        assert_eq!(all.len(), 6);

        let some = selection(&[1, 3, 5]);
        assert_eq!(some.inverted(&mesh).indices(), vec![0, 2, 4]);
        assert!(all.inverted(&mesh).is_empty());
    }

    #[test]
    fn test_iteration_is_ascending() {
        let s = selection(&[5, 1, 3]);
        let order: Vec<usize> = (&s).into_iter().map(|f| f.index()).collect();
        assert_eq!(order, vec![1, 3, 5]);
    }
}
