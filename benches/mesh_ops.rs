//! Benchmarks for mesh operations.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hedra::algo::conway::Operator;
use hedra::mesh::Adjacency;
use hedra::prelude::*;
use nalgebra::Point3;

fn create_grid_mesh(n: usize) -> PolyMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n);

    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;
            faces.push([v00, v10, v11, v01]);
        }
    }

    build_from_quads(&vertices, &faces).unwrap()
}

/// A cube refined by `levels` Catmull-Clark steps: closed, 6 * 4^levels quads.
fn create_sphere_mesh(levels: usize) -> PolyMesh {
    let vertices = vec![
        Point3::new(-1.0, -1.0, -1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(1.0, 1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
        Point3::new(1.0, -1.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(-1.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    let mut mesh: PolyMesh = build_from_quads(&vertices, &faces).unwrap();
    subdivide(
        &mut mesh,
        &SubdivideOptions::new(levels).with_scheme(Scheme::CatmullClark),
    )
    .unwrap();
    mesh
}

fn bench_mesh_construction(c: &mut Criterion) {
    let grid = create_grid_mesh(50);
    let (vertices, faces) = to_face_vertex(&grid);

    c.bench_function("build_grid_50x50", |b| {
        b.iter(|| {
            let mesh: PolyMesh = build_from_polygons(&vertices, &faces).unwrap();
            mesh
        });
    });

    c.bench_function("adjacency_grid_50x50", |b| {
        b.iter(|| Adjacency::build(&grid).outgoing_count(VertexId::new(0)));
    });
}

fn bench_conway(c: &mut Criterion) {
    let seed = create_sphere_mesh(3);
    let mut group = c.benchmark_group("conway");

    for op in Operator::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(op.name()), &op, |b, &op| {
            b.iter(|| {
                let mut mesh = seed.clone();
                op.apply(&mut mesh).unwrap();
                mesh
            });
        });
    }

    group.bench_function("string_tk", |b| {
        b.iter(|| {
            let mut mesh = seed.clone();
            apply_operators(&mut mesh, "tk").unwrap();
            mesh
        });
    });

    group.finish();
}

fn bench_subdivide(c: &mut Criterion) {
    let seed = create_sphere_mesh(3);
    let mut group = c.benchmark_group("subdivide");

    for scheme in Scheme::ALL {
        for parallel in [true, false] {
            let id = format!("{}/{}", scheme, if parallel { "par" } else { "seq" });
            let options = SubdivideOptions::new(2)
                .with_scheme(scheme)
                .with_parallel(parallel);
            group.bench_function(id, |b| {
                b.iter(|| {
                    let mut mesh = seed.clone();
                    subdivide(&mut mesh, &options).unwrap();
                    mesh
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_mesh_construction, bench_conway, bench_subdivide);
criterion_main!(benches);
