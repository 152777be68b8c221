//! Indexed polygon mesh.
//!
//! A [`PolyMesh`] stores vertex positions and faces in flat, index-addressed
//! arrays. Faces are arbitrary n-gons given as cyclic lists of vertex indices;
//! edges are implied by consecutive corners and never stored. Adjacency is
//! derived on demand through [`Adjacency`](super::Adjacency).
//!
//! # Winding
//!
//! Faces are expected to be wound counter-clockwise when viewed from the side
//! their normal points to. All operators in this crate preserve the winding of
//! their input.

use std::collections::BTreeMap;

use nalgebra::{Point2, Point3, Vector3};
use rayon::prelude::*;

use super::index::{DirectedEdge, FaceId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Face count above which face normals are recomputed in parallel.
const PARALLEL_NORMAL_THRESHOLD: usize = 4096;

/// A polygonal face.
#[derive(Debug, Clone, PartialEq)]
pub struct Face<I: MeshIndex = u32> {
    /// Corner vertices in winding order.
    pub(crate) vertices: Vec<VertexId<I>>,

    /// Cached unit normal. Zero for degenerate faces.
    pub(crate) normal: Vector3<f64>,

    /// Optional per-corner indices into the mesh UV buffer.
    pub(crate) uv_indices: Option<Vec<usize>>,
}

impl<I: MeshIndex> Face<I> {
    pub(crate) fn new(vertices: Vec<VertexId<I>>) -> Self {
        Self {
            vertices,
            normal: Vector3::zeros(),
            uv_indices: None,
        }
    }

    /// Corner vertices in winding order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId<I>] {
        &self.vertices
    }

    /// Number of corners (and edges).
    #[inline]
    pub fn arity(&self) -> usize {
        self.vertices.len()
    }

    /// Cached face normal, as of the last [`PolyMesh::recompute_face_normals`].
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Per-corner UV indices, if assigned.
    #[inline]
    pub fn uv_indices(&self) -> Option<&[usize]> {
        self.uv_indices.as_deref()
    }

    /// The directed edge leaving corner `k`.
    #[inline]
    pub fn edge(&self, k: usize) -> DirectedEdge<I> {
        let n = self.vertices.len();
        DirectedEdge::new(self.vertices[k % n], self.vertices[(k + 1) % n])
    }

    /// Iterate over the directed edges of this face, starting at corner 0.
    pub fn edges(&self) -> impl Iterator<Item = DirectedEdge<I>> + '_ {
        (0..self.vertices.len()).map(move |k| self.edge(k))
    }

    /// Corner position of a vertex in this face.
    pub fn corner_of(&self, v: VertexId<I>) -> Option<usize> {
        self.vertices.iter().position(|&c| c == v)
    }
}

/// An indexed polygon mesh.
///
/// Vertices and faces live in flat arrays; their position in the array is their
/// identity. Per-vertex normals and UVs are optional auxiliary buffers.
#[derive(Debug, Clone, Default)]
pub struct PolyMesh<I: MeshIndex = u32> {
    /// Vertex positions.
    pub(crate) positions: Vec<Point3<f64>>,

    /// Faces in processing order.
    pub(crate) faces: Vec<Face<I>>,

    /// Optional per-vertex normals, index-aligned with `positions`.
    pub(crate) vertex_normals: Option<Vec<Vector3<f64>>>,

    /// Optional UV buffer.
    pub(crate) uvs: Option<Vec<Point2<f64>>>,
}

impl<I: MeshIndex> PolyMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces: Vec::new(),
            vertex_normals: None,
            uvs: None,
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            positions: Vec::with_capacity(num_vertices),
            faces: Vec::with_capacity(num_faces),
            vertex_normals: None,
            uvs: None,
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Total number of face corners (sum of face arities).
    pub fn num_corners(&self) -> usize {
        self.faces.iter().map(Face::arity).sum()
    }

    /// True if the mesh has neither vertices nor faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.faces.is_empty()
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.positions[v.index()] = pos;
    }

    /// All vertex positions in index order.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, f: FaceId<I>) -> &Face<I> {
        &self.faces[f.index()]
    }

    /// Get a face by ID, or an error if the ID is out of range.
    pub fn try_face(&self, f: FaceId<I>) -> Result<&Face<I>> {
        self.faces.get(f.index()).ok_or(MeshError::InvalidFaceIndex {
            face: f.index(),
            count: self.faces.len(),
        })
    }

    /// Corner vertices of a face.
    #[inline]
    pub fn face_vertices(&self, f: FaceId<I>) -> &[VertexId<I>] {
        &self.face(f).vertices
    }

    /// Number of corners of a face.
    #[inline]
    pub fn face_arity(&self, f: FaceId<I>) -> usize {
        self.face(f).arity()
    }

    /// The directed edge leaving corner `k` of face `f`.
    #[inline]
    pub fn face_edge(&self, f: FaceId<I>, k: usize) -> DirectedEdge<I> {
        self.face(f).edge(k)
    }

    /// Iterate over the directed edges of a face.
    pub fn face_edges(&self, f: FaceId<I>) -> impl Iterator<Item = DirectedEdge<I>> + '_ {
        self.face(f).edges()
    }

    /// Iterate over the corner positions of a face.
    pub fn face_positions(&self, f: FaceId<I>) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.face(f).vertices.iter().map(move |&v| self.position(v))
    }

    /// Optional per-vertex normals.
    #[inline]
    pub fn vertex_normals(&self) -> Option<&[Vector3<f64>]> {
        self.vertex_normals.as_deref()
    }

    /// Optional UV buffer.
    #[inline]
    pub fn uvs(&self) -> Option<&[Point2<f64>]> {
        self.uvs.as_deref()
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.positions.len()).map(VertexId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    // ==================== Geometry ====================

    /// Compute the centroid (vertex average) of a face.
    pub fn face_centroid(&self, f: FaceId<I>) -> Point3<f64> {
        let face = self.face(f);
        let sum: Vector3<f64> = face
            .vertices
            .iter()
            .map(|&v| self.position(v).coords)
            .sum();
        Point3::from(sum / face.arity() as f64)
    }

    /// Newell's vector for a face: its normal scaled by twice its area.
    ///
    /// Works for non-planar and concave polygons.
    pub fn newell_vector(&self, f: FaceId<I>) -> Vector3<f64> {
        let face = self.face(f);
        let n = face.arity();
        let mut normal = Vector3::zeros();
        for k in 0..n {
            let a = self.position(face.vertices[k]);
            let b = self.position(face.vertices[(k + 1) % n]);
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        normal
    }

    /// Compute the unit normal of a face.
    ///
    /// Returns the zero vector for degenerate (zero-area) faces.
    pub fn compute_face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        self.newell_vector(f)
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros)
    }

    /// The cached normal of a face.
    ///
    /// Only as fresh as the last [`recompute_face_normals`](Self::recompute_face_normals).
    #[inline]
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        self.face(f).normal
    }

    /// Compute the area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        0.5 * self.newell_vector(f).norm()
    }

    /// Compute the midpoint of an edge.
    pub fn edge_midpoint(&self, e: DirectedEdge<I>) -> Point3<f64> {
        let p0 = self.position(e.from);
        let p1 = self.position(e.to);
        Point3::from((p0.coords + p1.coords) * 0.5)
    }

    /// Compute the length of an edge.
    pub fn edge_length(&self, e: DirectedEdge<I>) -> f64 {
        (self.position(e.to) - self.position(e.from)).norm()
    }

    /// Average of all vertex positions.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.positions.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = self.positions.iter().map(|p| p.coords).sum();
        Some(Point3::from(sum / self.positions.len() as f64))
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.positions.first()?;
        let mut min = *first;
        let mut max = *first;

        for p in &self.positions {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        Some((min, max))
    }

    /// Compute the total surface area of the mesh.
    pub fn surface_area(&self) -> f64 {
        self.face_ids().map(|f| self.face_area(f)).sum()
    }

    /// Check whether every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        !self.faces.is_empty() && self.faces.iter().all(|f| f.arity() == 3)
    }

    /// Check whether every face is a quad.
    pub fn is_quad_mesh(&self) -> bool {
        !self.faces.is_empty() && self.faces.iter().all(|f| f.arity() == 4)
    }

    /// Number of faces for each arity.
    pub fn arity_histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for face in &self.faces {
            *histogram.entry(face.arity()).or_insert(0) += 1;
        }
        histogram
    }

    /// Refresh the cached normal of every face.
    pub fn recompute_face_normals(&mut self) {
        let normals: Vec<Vector3<f64>> = if self.faces.len() >= PARALLEL_NORMAL_THRESHOLD {
            let mesh = &*self;
            (0..mesh.faces.len())
                .into_par_iter()
                .map(|i| mesh.compute_face_normal(FaceId::new(i)))
                .collect()
        } else {
            self.face_ids().map(|f| self.compute_face_normal(f)).collect()
        };

        for (face, normal) in self.faces.iter_mut().zip(normals) {
            face.normal = normal;
        }
    }

    /// Fill the per-vertex normal buffer.
    ///
    /// Each vertex normal is the normalized sum of the area-weighted normals of
    /// the faces using it. Vertices without faces get the zero vector.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.positions.len()];
        for f in self.face_ids() {
            let weighted = self.newell_vector(f);
            for &v in self.face_vertices(f) {
                normals[v.index()] += weighted;
            }
        }
        for n in &mut normals {
            *n = n.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
        }
        self.vertex_normals = Some(normals);
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its ID.
    ///
    /// Fails with [`MeshError::IndexOverflow`] when the index type has no room
    /// left. Invalidates any per-vertex normals.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> Result<VertexId<I>> {
        check_capacity::<I>(self.positions.len() + 1, self.faces.len())?;
        let id = VertexId::new(self.positions.len());
        self.positions.push(position);
        self.vertex_normals = None;
        Ok(id)
    }

    /// Add a face from a list of vertex indices.
    ///
    /// Checks that the face has at least three corners, that every index refers
    /// to an existing vertex, and that no two cyclically consecutive corners are
    /// the same vertex. Manifoldness is not checked.
    pub fn add_face(&mut self, indices: &[usize]) -> Result<FaceId<I>> {
        let id = self.faces.len();
        validate_face(id, indices, self.positions.len())?;
        check_capacity::<I>(self.positions.len(), id + 1)?;

        let f = FaceId::new(id);
        self.faces
            .push(Face::new(indices.iter().map(|&i| VertexId::new(i)).collect()));
        let normal = self.compute_face_normal(f);
        self.faces[id].normal = normal;
        Ok(f)
    }

    /// Replace all vertices and faces at once.
    ///
    /// The input is validated as in [`add_face`](Self::add_face); on error the
    /// mesh is left unchanged.
    pub fn replace<F: AsRef<[usize]>>(
        &mut self,
        positions: Vec<Point3<f64>>,
        faces: &[F],
    ) -> Result<()> {
        check_capacity::<I>(positions.len(), faces.len())?;
        for (fi, face) in faces.iter().enumerate() {
            validate_face(fi, face.as_ref(), positions.len())?;
        }
        let faces = faces
            .iter()
            .map(|face| face.as_ref().iter().map(|&i| VertexId::new(i)).collect())
            .collect();
        self.replace_topology(positions, faces);
        Ok(())
    }

    /// Swap in freshly built vertex and face buffers.
    ///
    /// Callers guarantee the faces are valid for `positions`. Per-vertex normals
    /// and UVs are dropped; face normals are recomputed.
    pub(crate) fn replace_topology(
        &mut self,
        positions: Vec<Point3<f64>>,
        faces: Vec<Vec<VertexId<I>>>,
    ) {
        debug_assert!(faces
            .iter()
            .all(|f| f.len() >= 3 && f.iter().all(|v| v.index() < positions.len())));
        self.positions = positions;
        self.faces = faces.into_iter().map(Face::new).collect();
        self.vertex_normals = None;
        self.uvs = None;
        self.recompute_face_normals();
    }

    /// Remove all vertices, faces and auxiliary buffers.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.faces.clear();
        self.vertex_normals = None;
        self.uvs = None;
    }

    /// Set the UV buffer.
    ///
    /// Face UV indices that no longer fit the new buffer are dropped.
    pub fn set_uvs(&mut self, uvs: Vec<Point2<f64>>) {
        for face in &mut self.faces {
            if face
                .uv_indices
                .as_ref()
                .is_some_and(|idx| idx.iter().any(|&i| i >= uvs.len()))
            {
                face.uv_indices = None;
            }
        }
        self.uvs = Some(uvs);
    }

    /// Assign per-corner UV indices to a face.
    pub fn set_face_uv_indices(&mut self, f: FaceId<I>, indices: Vec<usize>) -> Result<()> {
        let uv_count = self.uvs.as_ref().map_or(0, Vec::len);
        let arity = self.try_face(f)?.arity();
        if indices.len() != arity {
            return Err(MeshError::invalid_param(
                "uv_indices",
                indices.len(),
                "must have one entry per face corner",
            ));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= uv_count) {
            return Err(MeshError::invalid_param(
                "uv_indices",
                bad,
                "refers past the end of the UV buffer",
            ));
        }
        self.faces[f.index()].uv_indices = Some(indices);
        Ok(())
    }
}

/// Check a face index list against the vertex count.
/// Check that `vertices` and `faces` elements are addressable by `I`.
pub(crate) fn check_capacity<I: MeshIndex>(vertices: usize, faces: usize) -> Result<()> {
    for (element, count) in [("vertices", vertices), ("faces", faces)] {
        if !I::fits(count) {
            return Err(MeshError::IndexOverflow {
                element,
                count,
                capacity: I::CAPACITY,
            });
        }
    }
    Ok(())
}

pub(crate) fn validate_face(face: usize, indices: &[usize], num_vertices: usize) -> Result<()> {
    if let Some(&vertex) = indices.iter().find(|&&i| i >= num_vertices) {
        return Err(MeshError::InvalidVertexIndex { face, vertex });
    }
    let n = indices.len();
    if n < 3 || (0..n).any(|k| indices[k] == indices[(k + 1) % n]) {
        return Err(MeshError::DegenerateFace { face });
    }
    Ok(())
}
