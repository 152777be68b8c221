//! Topological validation.
//!
//! These checks look only at face connectivity. They are what the operators in
//! this crate assume of their input (closed, manifold, consistently oriented)
//! and guarantee of their output.

use std::collections::HashMap;
use std::fmt;

use crate::error::{MeshError, Result};
use crate::mesh::{DirectedEdge, MeshIndex, PolyMesh, UndirectedEdge};

/// Number of face sides lying on each undirected edge.
pub fn edge_face_counts<I: MeshIndex>(mesh: &PolyMesh<I>) -> HashMap<UndirectedEdge<I>, usize> {
    let mut counts = HashMap::with_capacity(mesh.num_corners() / 2 + 1);
    for (_, face) in mesh.faces() {
        for e in face.edges() {
            *counts.entry(e.undirected()).or_insert(0) += 1;
        }
    }
    counts
}

/// Number of distinct undirected edges.
pub fn num_edges<I: MeshIndex>(mesh: &PolyMesh<I>) -> usize {
    edge_face_counts(mesh).len()
}

/// `V - E + F`, counting every stored vertex.
pub fn euler_characteristic<I: MeshIndex>(mesh: &PolyMesh<I>) -> i64 {
    mesh.num_vertices() as i64 - num_edges(mesh) as i64 + mesh.num_faces() as i64
}

/// True if every edge borders exactly two faces.
///
/// Vacuously true for a mesh without faces.
pub fn is_manifold<I: MeshIndex>(mesh: &PolyMesh<I>) -> bool {
    edge_face_counts(mesh).values().all(|&c| c == 2)
}

/// True if every edge borders at most two faces. Open boundaries are allowed.
pub fn is_edge_manifold<I: MeshIndex>(mesh: &PolyMesh<I>) -> bool {
    edge_face_counts(mesh).values().all(|&c| c <= 2)
}

/// True if the mesh has faces and every edge borders exactly two of them.
pub fn is_closed_manifold<I: MeshIndex>(mesh: &PolyMesh<I>) -> bool {
    mesh.num_faces() > 0 && is_manifold(mesh)
}

/// True if `V - E + F == 2`.
///
/// Only meaningful together with [`is_closed_manifold`].
pub fn is_genus_zero<I: MeshIndex>(mesh: &PolyMesh<I>) -> bool {
    euler_characteristic(mesh) == 2
}

/// True if no directed edge is used by more than one face.
///
/// Two faces sharing an edge must then walk it in opposite directions. Open
/// boundaries are allowed.
pub fn is_consistently_oriented<I: MeshIndex>(mesh: &PolyMesh<I>) -> bool {
    check_orientation(mesh).is_ok()
}

/// Check that `mesh` is a closed, consistently oriented manifold.
///
/// # Errors
///
/// Reports the first offending edge in face order:
/// [`MeshError::NonManifoldEdge`] for an edge without exactly two faces, then
/// [`MeshError::InconsistentOrientation`] for a directed edge used twice.
pub fn check_closed_manifold<I: MeshIndex>(mesh: &PolyMesh<I>) -> Result<()> {
    let counts = edge_face_counts(mesh);
    for (_, face) in mesh.faces() {
        for e in face.edges() {
            let faces = counts.get(&e.undirected()).copied().unwrap_or(0);
            if faces != 2 {
                return Err(MeshError::NonManifoldEdge {
                    v0: e.from.index(),
                    v1: e.to.index(),
                    faces,
                });
            }
        }
    }
    check_orientation(mesh)
}

fn check_orientation<I: MeshIndex>(mesh: &PolyMesh<I>) -> Result<()> {
    let mut directed: HashMap<DirectedEdge<I>, usize> = HashMap::with_capacity(mesh.num_corners());
    for (_, face) in mesh.faces() {
        for e in face.edges() {
            *directed.entry(e).or_insert(0) += 1;
        }
    }
    for (_, face) in mesh.faces() {
        for e in face.edges() {
            if directed.get(&e).copied().unwrap_or(0) > 1 {
                return Err(MeshError::InconsistentOrientation {
                    v0: e.from.index(),
                    v1: e.to.index(),
                });
            }
        }
    }
    Ok(())
}

/// Summary of a mesh's size and topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshReport {
    /// Stored vertices.
    pub vertices: usize,
    /// Distinct undirected edges.
    pub edges: usize,
    /// Faces.
    pub faces: usize,
    /// `V - E + F`.
    pub euler_characteristic: i64,
    /// Edges with one face.
    pub boundary_edges: usize,
    /// Edges with more than two faces.
    pub non_manifold_edges: usize,
    /// Whether no directed edge is used twice.
    pub consistently_oriented: bool,
}

impl MeshReport {
    /// Analyse `mesh`.
    pub fn new<I: MeshIndex>(mesh: &PolyMesh<I>) -> Self {
        let counts = edge_face_counts(mesh);
        let edges = counts.len();
        Self {
            vertices: mesh.num_vertices(),
            edges,
            faces: mesh.num_faces(),
            euler_characteristic: mesh.num_vertices() as i64 - edges as i64
                + mesh.num_faces() as i64,
            boundary_edges: counts.values().filter(|&&c| c == 1).count(),
            non_manifold_edges: counts.values().filter(|&&c| c > 2).count(),
            consistently_oriented: is_consistently_oriented(mesh),
        }
    }

    /// True if every edge has exactly two faces.
    pub fn is_closed_manifold(&self) -> bool {
        self.faces > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vertices:  {}", self.vertices)?;
        writeln!(f, "Edges:     {}", self.edges)?;
        writeln!(f, "Faces:     {}", self.faces)?;
        writeln!(f, "Euler:     {}", self.euler_characteristic)?;
        writeln!(f, "Boundary edges:     {}", self.boundary_edges)?;
        writeln!(f, "Non-manifold edges: {}", self.non_manifold_edges)?;
        writeln!(f, "Closed manifold:    {}", self.is_closed_manifold())?;
        write!(f, "Oriented:           {}", self.consistently_oriented)
    }
}
