//! Error types for hedra.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face index is out of range for the mesh.
    #[error("face index {face} is out of range (mesh has {count} faces)")]
    InvalidFaceIndex {
        /// The requested face index.
        face: usize,
        /// Number of faces in the mesh.
        count: usize,
    },

    /// An edge index is out of range for the given face.
    #[error("edge {edge} is out of range for face {face} with {arity} sides")]
    InvalidEdgeIndex {
        /// The face index.
        face: usize,
        /// The requested edge index.
        edge: usize,
        /// Number of edges of the face.
        arity: usize,
    },

    /// A face has fewer than three corners or repeats a vertex on consecutive corners.
    #[error("face {face} is degenerate (fewer than 3 corners or repeated consecutive vertex)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A result would need more vertices or faces than the index type can address.
    #[error("{count} {element} exceed the index capacity of {capacity}")]
    IndexOverflow {
        /// `"vertices"` or `"faces"`.
        element: &'static str,
        /// Number of elements the operation needed.
        count: usize,
        /// Largest count the index type supports.
        capacity: usize,
    },

    /// A vertex has too few incident faces to become a face of its own.
    #[error("vertex {vertex} has valence {valence}, at least 3 is required")]
    LowValence {
        /// The offending input vertex.
        vertex: usize,
        /// Number of faces around it.
        valence: usize,
    },

    /// A walk around a vertex ran into an edge with no face on the other side.
    #[error("vertex {vertex} lies on an open boundary")]
    OpenBoundary {
        /// The vertex being walked.
        vertex: usize,
    },

    /// The faces around a vertex do not form a single closed fan.
    #[error("vertex {vertex} is non-manifold")]
    NonManifoldVertex {
        /// The offending vertex.
        vertex: usize,
    },

    /// An edge does not have exactly two incident faces.
    #[error("edge ({v0}, {v1}) has {faces} incident faces")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
        /// Number of incident faces.
        faces: usize,
    },

    /// A directed edge is used by more than one face, or its reverse is missing.
    #[error("edge ({v0}, {v1}) is not consistently oriented")]
    InconsistentOrientation {
        /// Origin of the directed edge.
        v0: usize,
        /// Destination of the directed edge.
        v1: usize,
    },

    /// An operator string contained a character that names no operator.
    #[error("unknown operator '{code}' at position {position}")]
    UnknownOperator {
        /// The unrecognised character.
        code: char,
        /// Character position in the operator string.
        position: usize,
    },

    /// A comparison operator string could not be parsed.
    #[error("invalid comparison operator: {0:?}")]
    InvalidComparison(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Whether this error describes the shape of the mesh rather than bad arguments or I/O.
    pub fn is_topological(&self) -> bool {
        matches!(
            self,
            MeshError::OpenBoundary { .. }
                | MeshError::NonManifoldVertex { .. }
                | MeshError::LowValence { .. }
                | MeshError::NonManifoldEdge { .. }
                | MeshError::InconsistentOrientation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = MeshError::UnknownOperator { code: 'q', position: 2 };
        assert_eq!(err.to_string(), "unknown operator 'q' at position 2");

        let err = MeshError::IndexOverflow {
            element: "vertices",
            count: 70000,
            capacity: 65536,
        };
        assert_eq!(err.to_string(), "70000 vertices exceed the index capacity of 65536");

        let err = MeshError::invalid_param("max_angle", -1.0, "must be non-negative");
        assert_eq!(
            err.to_string(),
            "invalid parameter: max_angle = -1 (must be non-negative)"
        );
    }

    #[test]
    fn test_is_topological() {
        assert!(MeshError::OpenBoundary { vertex: 0 }.is_topological());
        assert!(!MeshError::DegenerateFace { face: 0 }.is_topological());
        assert!(MeshError::LowValence { vertex: 0, valence: 2 }.is_topological());
    }
}
