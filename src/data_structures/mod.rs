//! Scene data structures: geometries, materials, instances and the scene graph.
//!
//! - `geometry` holds generated vertex/index buffers and the parameters they were built from
//! - `material` holds surface appearance shared between meshes
//! - `instance` holds per-node transformation data and its packed GPU form
//! - `scene_graph` enables hierarchical scene organization and handle lookup

pub mod geometry;
pub mod instance;
pub mod material;
pub mod scene_graph;
