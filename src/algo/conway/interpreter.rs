//! Operator-string interpreter.
//!
//! Conway strings read like function composition: `"dk"` means "dual of kis",
//! so operators run from the rightmost character to the leftmost.

use tracing::{debug, warn};

use super::Operator;
use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{MeshIndex, PolyMesh};

/// How to treat characters that name no operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Skip them with a warning.
    #[default]
    Lenient,
    /// Fail with [`MeshError::UnknownOperator`].
    Strict,
}

/// Parse an operator string into operators in application order.
///
/// The returned list is the string reversed: its first element runs first.
/// Whitespace is ignored in both modes. Positions in errors and warnings are
/// character offsets into `ops`.
pub fn parse_operators(ops: &str, strictness: Strictness) -> Result<Vec<Operator>> {
    let mut parsed = Vec::with_capacity(ops.len());
    for (position, code) in ops.chars().enumerate() {
        if code.is_whitespace() {
            continue;
        }
        match Operator::from_code(code) {
            Some(op) => parsed.push(op),
            None if strictness == Strictness::Strict => {
                return Err(MeshError::UnknownOperator { code, position });
            }
            None => warn!(%code, position, "ignoring unknown operator"),
        }
    }
    parsed.reverse();
    Ok(parsed)
}

/// Apply an operator string, skipping unknown characters.
///
/// An empty string leaves the mesh unchanged. If any operator fails the mesh
/// is left as it was before the call.
///
/// # Example
///
/// ```
/// use hedra::prelude::*;
/// use hedra::algo::conway::apply_operators;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(1.0, 1.0, 1.0),
///     Point3::new(1.0, -1.0, -1.0),
///     Point3::new(-1.0, 1.0, -1.0),
///     Point3::new(-1.0, -1.0, 1.0),
/// ];
/// let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
/// let mut mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
///
/// // Ambo of the tetrahedron is the octahedron; `x` is skipped.
/// apply_operators(&mut mesh, "xa").unwrap();
/// assert_eq!(mesh.num_vertices(), 6);
/// assert_eq!(mesh.num_faces(), 8);
/// ```
pub fn apply_operators<'a, I: MeshIndex>(
    mesh: &'a mut PolyMesh<I>,
    ops: &str,
) -> Result<&'a mut PolyMesh<I>> {
    run(mesh, ops, Strictness::Lenient, &Progress::none())
}

/// Apply an operator string, rejecting unknown characters.
///
/// The whole string is checked before any operator runs, so a bad character
/// leaves the mesh untouched.
pub fn apply_operators_strict<'a, I: MeshIndex>(
    mesh: &'a mut PolyMesh<I>,
    ops: &str,
) -> Result<&'a mut PolyMesh<I>> {
    run(mesh, ops, Strictness::Strict, &Progress::none())
}

/// Apply an operator string, reporting each operator to `progress` as it starts.
pub fn apply_operators_with_progress<'a, I: MeshIndex>(
    mesh: &'a mut PolyMesh<I>,
    ops: &str,
    strictness: Strictness,
    progress: &Progress,
) -> Result<&'a mut PolyMesh<I>> {
    run(mesh, ops, strictness, progress)
}

/// Apply operators already in application order, first element first.
///
/// This is what the string entry points run after parsing; callers that parse
/// once with [`parse_operators`] can hand the result straight here. The mesh is
/// only replaced if every operator succeeds.
pub fn apply_sequence_with_progress<'a, I: MeshIndex>(
    mesh: &'a mut PolyMesh<I>,
    operators: &[Operator],
    progress: &Progress,
) -> Result<&'a mut PolyMesh<I>> {
    if operators.is_empty() {
        return Ok(mesh);
    }

    let total = operators.len();
    let mut scratch = mesh.clone();
    for (step, op) in operators.iter().enumerate() {
        progress.report(step, total, op.name());
        op.apply(&mut scratch)?;
        debug!(
            step,
            operator = op.name(),
            vertices = scratch.num_vertices(),
            faces = scratch.num_faces(),
            "applied operator"
        );
    }
    progress.finish(total, "done");

    *mesh = scratch;
    Ok(mesh)
}

fn run<'a, I: MeshIndex>(
    mesh: &'a mut PolyMesh<I>,
    ops: &str,
    strictness: Strictness,
    progress: &Progress,
) -> Result<&'a mut PolyMesh<I>> {
    let operators = parse_operators(ops, strictness)?;
    apply_sequence_with_progress(mesh, &operators, progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::conway::{ambo, dual, join, kis};
    use crate::mesh::fixtures::{cube, open_box};
    use std::sync::{Arc, Mutex};

    fn same_mesh(a: &PolyMesh, b: &PolyMesh) -> bool {
        let fa: Vec<_> = a.faces().map(|(_, f)| f.vertices().to_vec()).collect();
        let fb: Vec<_> = b.faces().map(|(_, f)| f.vertices().to_vec()).collect();
        a.positions() == b.positions() && fa == fb
    }

    #[test]
    fn test_parse_order_is_right_to_left() {
        let ops = parse_operators("jkd", Strictness::Strict).unwrap();
        assert_eq!(ops, vec![Operator::Dual, Operator::Kis, Operator::Join]);
    }

    #[test]
    fn test_parse_skips_whitespace() {
        let ops = parse_operators(" d k ", Strictness::Strict).unwrap();
        assert_eq!(ops, vec![Operator::Kis, Operator::Dual]);
    }

    #[test]
    fn test_strict_reports_position() {
        let err = parse_operators("dqk", Strictness::Strict).unwrap_err();
        assert!(matches!(err, MeshError::UnknownOperator { code: 'q', position: 1 }));
        assert_eq!(
            parse_operators("dqk", Strictness::Lenient).unwrap(),
            vec![Operator::Kis, Operator::Dual]
        );
    }

    #[test]
    fn test_dk_is_dual_of_kis() {
        let mut by_string = cube();
        apply_operators(&mut by_string, "dk").unwrap();

        let mut by_hand = cube();
        kis(&mut by_hand).unwrap();
        dual(&mut by_hand).unwrap();

        assert!(same_mesh(&by_string, &by_hand));
    }

    #[test]
    fn test_jkk_matches_nested_calls() {
        let mut by_string = cube();
        apply_operators(&mut by_string, "jkk").unwrap();

        let mut by_hand = cube();
        join(kis(kis(&mut by_hand).unwrap()).unwrap()).unwrap();

        assert!(same_mesh(&by_string, &by_hand));
    }

    #[test]
    fn test_jkk_is_not_join_first() {
        let mut right_to_left = cube();
        apply_operators(&mut right_to_left, "jkk").unwrap();
        assert_eq!(right_to_left.num_vertices(), 110);
        assert_eq!(right_to_left.num_faces(), 108);

        // Reading the string left to right would join first.
        let mut left_to_right = cube();
        kis(kis(join(&mut left_to_right).unwrap()).unwrap()).unwrap();
        assert_eq!(left_to_right.num_vertices(), 74);
        assert_eq!(left_to_right.num_faces(), 144);

        assert!(!same_mesh(&right_to_left, &left_to_right));
    }

    #[test]
    fn test_sequence_matches_string() {
        let operators = parse_operators("t k", Strictness::Strict).unwrap();
        let mut by_sequence = cube();
        apply_sequence_with_progress(&mut by_sequence, &operators, &Progress::none()).unwrap();

        let mut by_string = cube();
        apply_operators(&mut by_string, "tk").unwrap();
        assert!(same_mesh(&by_sequence, &by_string));

        let mut untouched = cube();
        apply_sequence_with_progress(&mut untouched, &[], &Progress::none()).unwrap();
        assert!(same_mesh(&untouched, &cube()));
    }

    #[test]
    fn test_empty_string_is_identity() {
        let mut mesh = cube();
        apply_operators(&mut mesh, "").unwrap();
        assert!(same_mesh(&mesh, &cube()));
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let mut lenient = cube();
        apply_operators(&mut lenient, "a?!").unwrap();

        let mut plain = cube();
        ambo(&mut plain).unwrap();

        assert!(same_mesh(&lenient, &plain));
    }

    #[test]
    fn test_strict_rejects_before_running() {
        let mut mesh = cube();
        let err = apply_operators_strict(&mut mesh, "kx").unwrap_err();
        assert!(matches!(err, MeshError::UnknownOperator { code: 'x', position: 1 }));
        assert!(same_mesh(&mesh, &cube()));
    }

    #[test]
    fn test_failure_midway_rolls_back() {
        // "dk" on an open mesh: kis succeeds, dual fails.
        let mut mesh = open_box();
        let before = mesh.clone();
        assert!(apply_operators(&mut mesh, "dk").is_err());
        assert!(same_mesh(&mesh, &before));
    }

    #[test]
    fn test_progress_sees_every_operator() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = Progress::new(move |current, total, message| {
            sink.lock().unwrap().push((current, total, message.to_string()));
        });

        let mut mesh = cube();
        apply_operators_with_progress(&mut mesh, "ad", Strictness::Strict, &progress).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (0, 2, "dual".to_string()),
                (1, 2, "ambo".to_string()),
                (2, 2, "done".to_string()),
            ]
        );
    }
}
