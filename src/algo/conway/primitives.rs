//! The three primitive operators every other operator is built from.

use nalgebra::Point3;
use tracing::debug;

use crate::algo::edge_points::EdgePoints;
use crate::algo::validate::num_edges;
use crate::error::{MeshError, Result};
use crate::mesh::{check_capacity, Adjacency, FaceId, MeshIndex, PolyMesh, VertexId};

/// Parameters for [`kis_with`].
#[derive(Debug, Clone, Default)]
pub struct KisOptions {
    /// Distance to push each apex along its face normal. Zero keeps the apex
    /// at the face centroid.
    pub apex_offset: f64,

    /// Only raise pyramids on faces with exactly this many sides.
    /// `None` raises them on every face.
    pub sides: Option<usize>,
}

impl KisOptions {
    /// Set the apex offset.
    pub fn with_apex_offset(mut self, offset: f64) -> Self {
        self.apex_offset = offset;
        self
    }

    /// Restrict the operator to faces with `sides` corners.
    pub fn with_sides(mut self, sides: usize) -> Self {
        self.sides = Some(sides);
        self
    }
}

/// Dual (`d`): swap the roles of faces and vertices.
///
/// New vertex `i` sits at the centroid of old face `i`. Each old vertex with
/// faces around it becomes a face joining the centroids of those faces, wound
/// counter-clockwise. Isolated vertices are dropped.
///
/// # Errors
///
/// Requires a closed manifold mesh. Returns [`MeshError::OpenBoundary`] or
/// [`MeshError::NonManifoldVertex`] for the first vertex whose fan does not
/// close, and [`MeshError::LowValence`] if a vertex has fewer than three
/// faces around it. On error the mesh is unchanged.
pub fn dual<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    check_capacity::<I>(mesh.num_faces(), mesh.num_vertices())?;
    let (positions, faces) = {
        let adjacency = Adjacency::build(mesh);

        let positions: Vec<Point3<f64>> =
            mesh.face_ids().map(|f| mesh.face_centroid(f)).collect();

        let mut faces: Vec<Vec<VertexId<I>>> = Vec::with_capacity(mesh.num_vertices());
        for v in mesh.vertex_ids() {
            let around = adjacency.vertex_faces(v)?;
            if around.is_empty() {
                continue;
            }
            if around.len() < 3 {
                return Err(MeshError::LowValence {
                    vertex: v.index(),
                    valence: around.len(),
                });
            }
            // The fan runs clockwise; reverse it for outward winding.
            faces.push(around.iter().rev().map(|f| face_vertex(*f)).collect());
        }
        (positions, faces)
    };

    debug!(
        vertices = positions.len(),
        faces = faces.len(),
        "dual"
    );
    mesh.replace_topology(positions, faces);
    Ok(mesh)
}

/// Ambo (`a`): truncate every vertex down to the edge midpoints.
///
/// Each undirected edge gets one new vertex at its midpoint, numbered in the
/// order edges are first met walking faces in order. Every old face shrinks to
/// the polygon through its edge midpoints; every old vertex becomes a face
/// through the midpoints of its edges. Old faces come first in the output.
///
/// # Errors
///
/// Same conditions as [`dual`], plus [`MeshError::IndexOverflow`] when the
/// edge count does not fit the index type. On error the mesh is unchanged.
pub fn ambo<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    check_capacity::<I>(num_edges(mesh), mesh.num_faces() + mesh.num_vertices())?;
    let (positions, faces) = {
        let adjacency = Adjacency::build(mesh);
        let mut midpoints = EdgePoints::new(0);
        let mut faces: Vec<Vec<VertexId<I>>> =
            Vec::with_capacity(mesh.num_faces() + mesh.num_vertices());

        for f in mesh.face_ids() {
            let shrunk = mesh
                .face_edges(f)
                .map(|e| midpoints.get_or_insert(e, || mesh.edge_midpoint(e)))
                .collect();
            faces.push(shrunk);
        }

        for v in mesh.vertex_ids() {
            let fan = adjacency.vertex_fan(v)?;
            if fan.is_empty() {
                continue;
            }
            if fan.len() < 3 {
                return Err(MeshError::LowValence {
                    vertex: v.index(),
                    valence: fan.len(),
                });
            }
            faces.push(
                fan.iter()
                    .rev()
                    .map(|&e| midpoints.get_or_insert(e, || mesh.edge_midpoint(e)))
                    .collect(),
            );
        }
        (midpoints.into_points(), faces)
    };

    debug!(
        vertices = positions.len(),
        faces = faces.len(),
        "ambo"
    );
    mesh.replace_topology(positions, faces);
    Ok(mesh)
}

/// Kis (`k`): raise a pyramid on every face.
///
/// Equivalent to [`kis_with`] with default options: the apex sits at the face
/// centroid and every face is split.
pub fn kis<I: MeshIndex>(mesh: &mut PolyMesh<I>) -> Result<&mut PolyMesh<I>> {
    kis_with(mesh, &KisOptions::default())
}

/// Kis with an apex offset and an optional face-arity filter.
///
/// Each selected n-gon `[v0 .. vn-1]` is replaced by the n triangles
/// `[v_i, v_i+1, apex]`. Apex vertices are appended after the original
/// vertices in face order. Unselected faces are kept as they are.
///
/// Works on open meshes.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] if `apex_offset` is not finite and
/// [`MeshError::IndexOverflow`] if the result does not fit the index type.
pub fn kis_with<'a, I: MeshIndex>(
    mesh: &'a mut PolyMesh<I>,
    options: &KisOptions,
) -> Result<&'a mut PolyMesh<I>> {
    if !options.apex_offset.is_finite() {
        return Err(MeshError::invalid_param(
            "apex_offset",
            options.apex_offset,
            "must be finite",
        ));
    }

    let selected = |arity: usize| options.sides.map_or(true, |sides| arity == sides);
    let (apexes, new_faces) = mesh.faces().fold((0, 0), |(apexes, count), (_, face)| {
        if selected(face.arity()) {
            (apexes + 1, count + face.arity())
        } else {
            (apexes, count + 1)
        }
    });
    check_capacity::<I>(mesh.num_vertices() + apexes, new_faces)?;

    let mut positions = Vec::with_capacity(mesh.num_vertices() + apexes);
    positions.extend_from_slice(mesh.positions());
    let mut faces: Vec<Vec<VertexId<I>>> = Vec::with_capacity(new_faces);

    for (f, face) in mesh.faces() {
        if !selected(face.arity()) {
            faces.push(face.vertices().to_vec());
            continue;
        }

        let apex_position = if options.apex_offset == 0.0 {
            mesh.face_centroid(f)
        } else {
            mesh.face_centroid(f) + mesh.compute_face_normal(f) * options.apex_offset
        };
        let apex = VertexId::new(positions.len());
        positions.push(apex_position);

        for e in face.edges() {
            faces.push(vec![e.from, e.to, apex]);
        }
    }

    debug!(
        vertices = positions.len(),
        faces = faces.len(),
        "kis"
    );
    mesh.replace_topology(positions, faces);
    Ok(mesh)
}

/// The vertex standing in for face `f` in a dual mesh.
#[inline]
fn face_vertex<I: MeshIndex>(f: FaceId<I>) -> VertexId<I> {
    VertexId::new(f.index())
}
