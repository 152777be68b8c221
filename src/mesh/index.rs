//! Index and edge-key types for mesh elements.
//!
//! Vertices and faces are addressed by position in the mesh's flat arrays.
//! The wrappers here keep the two kinds of index apart and are generic over the
//! underlying integer type (u16 for small meshes, u32 for typical meshes, u64 for
//! massive meshes).
//!
//! Edges are never stored by the mesh. They exist only as keys derived from
//! consecutive face corners: [`DirectedEdge`] for an ordered `(from, to)` pair and
//! [`UndirectedEdge`] for the orientation-free key shared by an edge and its
//! reverse.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for types that can be used as mesh indices.
///
/// This trait is implemented for `u16`, `u32`, and `u64`, allowing users to choose
/// the appropriate index size for their mesh. Every value of the type is a valid
/// index, so a mesh over `I` holds at most [`MeshIndex::CAPACITY`] vertices and
/// as many faces.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// Number of distinct indices, saturated at `usize::MAX`.
    const CAPACITY: usize;

    /// Convert from usize to this index type.
    ///
    /// # Panics
    /// Panics in debug builds if the value is too large for this index type.
    /// Mesh operations check [`fits`](MeshIndex::fits) first.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Whether `count` elements can all be addressed.
    #[inline]
    fn fits(count: usize) -> bool {
        count <= Self::CAPACITY
    }
}

impl MeshIndex for u16 {
    const CAPACITY: usize = u16::MAX as usize + 1;

    #[inline]
    fn from_usize(v: usize) -> Self {
        debug_assert!(v < Self::CAPACITY, "index {} too large for u16", v);
        v as u16
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl MeshIndex for u32 {
    const CAPACITY: usize = (u32::MAX as usize).saturating_add(1);

    #[inline]
    fn from_usize(v: usize) -> Self {
        debug_assert!(v <= u32::MAX as usize, "index {} too large for u32", v);
        v as u32
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl MeshIndex for u64 {
    const CAPACITY: usize = usize::MAX;

    #[inline]
    fn from_usize(v: usize) -> Self {
        v as u64
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// A type-safe face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $display, self.index())
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(FaceId, "F");

/// An ordered pair of vertex indices taken from consecutive face corners.
///
/// The reverse edge `(to, from)` belongs to the face on the other side.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DirectedEdge<I: MeshIndex = u32> {
    /// Origin vertex.
    pub from: VertexId<I>,
    /// Destination vertex.
    pub to: VertexId<I>,
}

impl<I: MeshIndex> DirectedEdge<I> {
    /// Create a directed edge.
    #[inline]
    pub fn new(from: VertexId<I>, to: VertexId<I>) -> Self {
        Self { from, to }
    }

    /// The same edge walked the other way.
    #[inline]
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// Orientation-free key for this edge.
    #[inline]
    pub fn undirected(self) -> UndirectedEdge<I> {
        UndirectedEdge::new(self.from, self.to)
    }
}

impl<I: MeshIndex> Debug for DirectedEdge<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from.index(), self.to.index())
    }
}

/// An edge key that compares equal for `(a, b)` and `(b, a)`.
///
/// The smaller vertex index is always stored first.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UndirectedEdge<I: MeshIndex = u32> {
    lo: VertexId<I>,
    hi: VertexId<I>,
}

impl<I: MeshIndex> UndirectedEdge<I> {
    /// Create the key for the edge between `a` and `b`.
    #[inline]
    pub fn new(a: VertexId<I>, b: VertexId<I>) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The endpoint with the smaller index.
    #[inline]
    pub fn lo(self) -> VertexId<I> {
        self.lo
    }

    /// The endpoint with the larger index.
    #[inline]
    pub fn hi(self) -> VertexId<I> {
        self.hi
    }
}

impl<I: MeshIndex> Debug for UndirectedEdge<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}", self.lo.index(), self.hi.index())
    }
}
