//! Wavefront OBJ format support.
//!
//! Reading goes through `tobj` with triangulation off, so faces keep their
//! original arity. Points and lines are skipped, as are materials, normals and
//! groups. All objects in a file are merged into one mesh, and every `v`
//! record stays its own vertex even when two of them coincide.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use nalgebra::{Point2, Point3};
use tracing::debug;

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_polygons, FaceId, MeshIndex, PolyMesh};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Read a mesh from OBJ text.
pub fn read<R: BufRead, I: MeshIndex>(reader: R) -> Result<PolyMesh<I>> {
    read_from(reader, Path::new("<stream>"))
}

/// Load a mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use hedra::io::obj;
/// use hedra::mesh::PolyMesh;
///
/// let mesh: PolyMesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<PolyMesh<I>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_from(BufReader::new(file), path)
}

fn read_from<R: BufRead, I: MeshIndex>(mut reader: R, path: &Path) -> Result<PolyMesh<I>> {
    let load_error = |e: tobj::LoadError| MeshError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = single_object(&text);

    let (models, _materials) =
        tobj::load_obj_buf(&mut text.as_bytes(), &load_options(), |_| Ok(Default::default()))
            .map_err(load_error)?;

    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();
    let mut uvs: Vec<Point2<f64>> = Vec::new();
    let mut face_uvs: Vec<Option<Vec<usize>>> = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let base = positions.len();
        positions.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Point3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))),
        );

        let uv_base = uvs.len();
        uvs.extend(
            mesh.texcoords
                .chunks_exact(2)
                .map(|t| Point2::new(f64::from(t[0]), f64::from(t[1]))),
        );
        let has_uvs = mesh.texcoord_indices.len() == mesh.indices.len();

        let arities: Vec<usize> = if mesh.face_arities.is_empty() {
            vec![3; mesh.indices.len() / 3]
        } else {
            mesh.face_arities.iter().map(|&n| n as usize).collect()
        };

        let mut start = 0;
        for n in arities {
            let end = start + n;
            let corners = mesh.indices.get(start..end).ok_or_else(|| MeshError::LoadError {
                path: path.to_path_buf(),
                message: format!("object '{}' has a truncated face", model.name),
            })?;
            faces.push(corners.iter().map(|&i| base + i as usize).collect());
            face_uvs.push(has_uvs.then(|| {
                mesh.texcoord_indices[start..end]
                    .iter()
                    .map(|&t| uv_base + t as usize)
                    .collect()
            }));
            start = end;
        }
    }

    let mut mesh: PolyMesh<I> = build_from_polygons(&positions, &faces)?;
    if !uvs.is_empty() {
        mesh.set_uvs(uvs);
        for (fi, indices) in face_uvs.into_iter().enumerate() {
            if let Some(indices) = indices {
                mesh.set_face_uv_indices(FaceId::new(fi), indices)?;
            }
        }
    }

    debug!(
        path = %path.display(),
        objects = models.len(),
        vertices = mesh.num_vertices(),
        faces = mesh.num_faces(),
        "read obj"
    );
    Ok(mesh)
}

/// Drop the statements that make `tobj` start a new model.
///
/// `tobj` numbers vertices per model, so a vertex shared by two objects would
/// come back as two copies. Keeping one model keeps the file's own indexing.
fn single_object(text: &str) -> String {
    text.lines()
        .filter(|line| {
            !matches!(
                line.split_whitespace().next(),
                Some("o") | Some("g") | Some("usemtl")
            )
        })
        .fold(String::with_capacity(text.len()), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
}

/// Write a mesh as OBJ text.
///
/// Emits `v` lines, then `vt` lines if the mesh has UVs, then one `f` line per
/// face with 1-based indices. Faces carrying UV indices are written as `v/vt`.
pub fn write<W: Write, I: MeshIndex>(mesh: &PolyMesh<I>, mut writer: W) -> std::io::Result<()> {
    writeln!(
        writer,
        "# {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    )?;
    for p in mesh.positions() {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    if let Some(uvs) = mesh.uvs() {
        for t in uvs {
            writeln!(writer, "vt {} {}", t.x, t.y)?;
        }
    }

    let mut line = String::new();
    for (_, face) in mesh.faces() {
        line.clear();
        line.push('f');
        match face.uv_indices() {
            Some(uv) => {
                for (v, t) in face.vertices().iter().zip(uv) {
                    line.push_str(&format!(" {}/{}", v.index() + 1, t + 1));
                }
            }
            None => {
                for v in face.vertices() {
                    line.push_str(&format!(" {}", v.index() + 1));
                }
            }
        }
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}

/// Save a mesh to an OBJ file.
///
/// # Example
///
/// ```no_run
/// use hedra::io::obj;
/// use hedra::mesh::PolyMesh;
///
/// let mesh: PolyMesh = PolyMesh::new();
/// obj::save(&mesh, "output.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &PolyMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write(mesh, BufWriter::new(file)).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), faces = mesh.num_faces(), "wrote obj");
    Ok(())
}
