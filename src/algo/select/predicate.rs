//! Selection by face property.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;

use super::FaceSelection;
use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, MeshIndex, PolyMesh};

/// A comparison operator, parsed from `<`, `<=`, `==`, `=`, `!=`, `>=` or `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `==` or `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `>=`
    GreaterEqual,
    /// `>`
    Greater,
}

impl Comparison {
    /// Evaluate `lhs <op> rhs`.
    ///
    /// Comparisons involving NaN are false except for `!=`.
    pub fn eval<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            Comparison::Less => lhs < rhs,
            Comparison::LessEqual => lhs <= rhs,
            Comparison::Equal => lhs == rhs,
            Comparison::NotEqual => lhs != rhs,
            Comparison::GreaterEqual => lhs >= rhs,
            Comparison::Greater => lhs > rhs,
        }
    }

    /// Canonical symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::LessEqual => "<=",
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
            Comparison::GreaterEqual => ">=",
            Comparison::Greater => ">",
        }
    }
}

impl FromStr for Comparison {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "<" => Ok(Comparison::Less),
            "<=" => Ok(Comparison::LessEqual),
            "==" | "=" => Ok(Comparison::Equal),
            "!=" => Ok(Comparison::NotEqual),
            ">=" => Ok(Comparison::GreaterEqual),
            ">" => Ok(Comparison::Greater),
            other => Err(MeshError::InvalidComparison(other.to_string())),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// x
    X,
    /// y
    Y,
    /// z
    Z,
}

impl Axis {
    /// Component index of this axis.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl FromStr for Axis {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(MeshError::invalid_param("axis", s, "expected x, y or z")),
        }
    }
}

/// Select the faces for which `predicate` holds.
pub fn select_where<I, P>(mesh: &PolyMesh<I>, mut predicate: P) -> FaceSelection<I>
where
    I: MeshIndex,
    P: FnMut(&PolyMesh<I>, FaceId<I>) -> bool,
{
    mesh.face_ids().filter(|&f| predicate(mesh, f)).collect()
}

/// Select faces whose corner count compares true against `count`.
pub fn select_by_vertex_count<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    comparison: Comparison,
    count: usize,
) -> FaceSelection<I> {
    select_where(mesh, |m, f| comparison.eval(m.face_arity(f), count))
}

/// Select faces whose centroid coordinate on `axis` compares true against `value`.
pub fn select_by_centroid<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    axis: Axis,
    comparison: Comparison,
    value: f64,
) -> FaceSelection<I> {
    let k = axis.index();
    select_where(mesh, |m, f| comparison.eval(m.face_centroid(f)[k], value))
}

/// Select faces whose normal is within `max_angle` radians of `direction`.
///
/// Normals are recomputed from the current positions. Degenerate faces are
/// never selected.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] if `direction` has zero length or
/// `max_angle` is negative or NaN.
pub fn select_by_normal<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    direction: Vector3<f64>,
    max_angle: f64,
) -> Result<FaceSelection<I>> {
    if max_angle.is_nan() || max_angle < 0.0 {
        return Err(MeshError::invalid_param(
            "max_angle",
            max_angle,
            "must be a non-negative angle in radians",
        ));
    }
    let direction = direction.try_normalize(1e-12).ok_or_else(|| {
        MeshError::invalid_param("direction", format!("{:?}", direction), "must be non-zero")
    })?;

    Ok(select_where(mesh, |m, f| {
        let normal = m.compute_face_normal(f);
        if normal == Vector3::zeros() {
            return false;
        }
        // Clamp: rounding can push the dot product of unit vectors past 1.
        normal.dot(&direction).clamp(-1.0, 1.0).acos() <= max_angle
    }))
}
