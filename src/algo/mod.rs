//! Mesh processing algorithms.
//!
//! This module contains the topology-changing and analysis passes:
//!
//! - **Conway operators**: dual, ambo, kis and the composites built from them,
//!   plus an interpreter for operator strings such as `"dk"`
//! - **Subdivision**: quad split, Catmull-Clark, midpoint and tessellation
//! - **Selection**: face predicates, edge loops, checkerboard thinning
//! - **Validation**: manifoldness, orientation, Euler characteristic
//!
//! Every pass takes `&mut PolyMesh`, rebuilds its vertex and face buffers in
//! one step, and hands the same mesh back so calls can be chained.

pub mod conway;
mod edge_points;
pub mod progress;
pub mod select;
pub mod subdivide;
pub mod validate;

pub use progress::Progress;
