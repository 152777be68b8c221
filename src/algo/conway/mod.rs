//! Conway polyhedron operators.
//!
//! Conway notation describes a polyhedron as a seed shape with a string of
//! single-letter operators applied to it. Three primitives do all the work:
//!
//! - **Dual** (`d`): faces become vertices and vertices become faces
//! - **Ambo** (`a`): vertices are cut down to the edge midpoints
//! - **Kis** (`k`): a pyramid is raised on every face
//!
//! Every other operator is a fixed composition of those three:
//!
//! | Code | Name     | Composition (applied left to right) |
//! |------|----------|-------------------------------------|
//! | `j`  | join     | ambo, dual                          |
//! | `n`  | needle   | dual, kis                           |
//! | `z`  | zip      | kis, dual                           |
//! | `t`  | truncate | dual, kis, dual                     |
//! | `o`  | ortho    | join, join                          |
//! | `e`  | expand   | ambo, ambo                          |
//! | `m`  | meta     | join, kis                           |
//! | `b`  | bevel    | ambo, truncate                      |
//!
//! Dual and ambo need a closed manifold mesh. Kis works on any mesh. A
//! composite either completes every step or leaves the mesh untouched.
//!
//! # Example
//!
//! ```
//! use hedra::prelude::*;
//! use hedra::algo::conway::{apply_operators, truncate};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(1.0, -1.0, -1.0),
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(-1.0, -1.0, 1.0),
//! ];
//! let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
//! let mut mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
//!
//! // Truncated tetrahedron: 12 vertices, 4 hexagons and 4 triangles.
//! truncate(&mut mesh).unwrap();
//! assert_eq!(mesh.num_vertices(), 12);
//! assert_eq!(mesh.num_faces(), 8);
//!
//! // Operator strings apply right to left.
//! apply_operators(&mut mesh, "d").unwrap();
//! assert_eq!(mesh.num_faces(), 12);
//! ```

mod interpreter;
mod primitives;

use std::fmt;

pub use interpreter::{
    apply_operators, apply_operators_strict, apply_operators_with_progress,
    apply_sequence_with_progress, parse_operators, Strictness,
};
pub use primitives::{ambo, dual, kis, kis_with, KisOptions};

use crate::error::Result;
use crate::mesh::{MeshIndex, PolyMesh};

/// A named Conway operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `d`
    Dual,
    /// `a`
    Ambo,
    /// `k`
    Kis,
    /// `j`
    Join,
    /// `n`
    Needle,
    /// `z`
    Zip,
    /// `t`
    Truncate,
    /// `o`
    Ortho,
    /// `e`
    Expand,
    /// `m`
    Meta,
    /// `b`
    Bevel,
}

impl Operator {
    /// Every operator, primitives first.
    pub const ALL: [Operator; 11] = [
        Operator::Dual,
        Operator::Ambo,
        Operator::Kis,
        Operator::Join,
        Operator::Needle,
        Operator::Zip,
        Operator::Truncate,
        Operator::Ortho,
        Operator::Expand,
        Operator::Meta,
        Operator::Bevel,
    ];

    /// Look up an operator by its single-letter code.
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    /// The single-letter code of this operator.
    pub fn code(self) -> char {
        match self {
            Operator::Dual => 'd',
            Operator::Ambo => 'a',
            Operator::Kis => 'k',
            Operator::Join => 'j',
            Operator::Needle => 'n',
            Operator::Zip => 'z',
            Operator::Truncate => 't',
            Operator::Ortho => 'o',
            Operator::Expand => 'e',
            Operator::Meta => 'm',
            Operator::Bevel => 'b',
        }
    }

    /// Lowercase name of this operator.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Dual => "dual",
            Operator::Ambo => "ambo",
            Operator::Kis => "kis",
            Operator::Join => "join",
            Operator::Needle => "needle",
            Operator::Zip => "zip",
            Operator::Truncate => "truncate",
            Operator::Ortho => "ortho",
            Operator::Expand => "expand",
            Operator::Meta => "meta",
            Operator::Bevel => "bevel",
        }
    }

    /// True for dual, ambo and kis.
    pub fn is_primitive(self) -> bool {
        matches!(self, Operator::Dual | Operator::Ambo | Operator::Kis)
    }

    /// The primitive steps this operator performs, in application order.
    pub fn primitives(self) -> &'static [Operator] {
        use Operator::*;
        match self {
            Dual => &[Dual],
            Ambo => &[Ambo],
            Kis => &[Kis],
            Join => &[Ambo, Dual],
            Needle => &[Dual, Kis],
            Zip => &[Kis, Dual],
            Truncate => &[Dual, Kis, Dual],
            Ortho => &[Ambo, Dual, Ambo, Dual],
            Expand => &[Ambo, Ambo],
            Meta => &[Ambo, Dual, Kis],
            Bevel => &[Ambo, Dual, Kis, Dual],
        }
    }

    /// Whether this operator can run on a mesh with open boundaries.
    pub fn accepts_open_mesh(self) -> bool {
        self == Operator::Kis
    }

    /// Apply this operator to `mesh`.
    pub fn apply<'a, I: MeshIndex>(self, mesh: &'a mut PolyMesh<I>) -> Result<&'a mut PolyMesh<I>> {
        match self {
            Operator::Dual => dual(mesh),
            Operator::Ambo => ambo(mesh),
            Operator::Kis => kis(mesh),
            Operator::Join => join(mesh),
            Operator::Needle => needle(mesh),
            Operator::Zip => zip(mesh),
            Operator::Truncate => truncate(mesh),
            Operator::Ortho => ortho(mesh),
            Operator::Expand => expand(mesh),
            Operator::Meta => meta(mesh),
            Operator::Bevel => bevel(mesh),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Run `steps` on a scratch copy and commit it only if every step succeeds.
fn all_or_nothing<I, F>(mesh: &mut PolyMesh<I>, steps: F) -> Result<&mut PolyMesh<I>>
where
    I: MeshIndex,
    F: FnOnce(&mut PolyMesh<I>) -> Result<&mut PolyMesh<I>>,
{
    let mut scratch = mesh.clone();
    steps(&mut scratch)?;
    *mesh = scratch;
    Ok(mesh)
}

/// Join (`j`): ambo, then dual.
pub fn join<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    all_or_nothing(mesh, |m| dual(ambo(m)?))
}

/// Needle (`n`): dual, then kis.
pub fn needle<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    all_or_nothing(mesh, |m| kis(dual(m)?))
}

/// Zip (`z`): kis, then dual.
pub fn zip<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    all_or_nothing(mesh, |m| dual(kis(m)?))
}

/// Truncate (`t`): dual, kis, dual.
pub fn truncate<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    all_or_nothing(mesh, |m| dual(kis(dual(m)?)?))
}

/// Ortho (`o`): join twice.
pub fn ortho<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    all_or_nothing(mesh, |m| join(join(m)?))
}

/// Expand (`e`): ambo twice.
pub fn expand<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    all_or_nothing(mesh, |m| ambo(ambo(m)?))
}

/// Meta (`m`): join, then kis.
pub fn meta<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    all_or_nothing(mesh, |m| kis(join(m)?))
}

/// Bevel (`b`): ambo, then truncate.
pub fn bevel<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    all_or_nothing(mesh, |m| truncate(ambo(m)?))
}
