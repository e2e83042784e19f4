//! greenhouse-ngin
//!
//! A procedural greenhouse built on an instancing-oriented scene graph. This
//! crate turns a small configuration record into a complete greenhouse
//! (frame, arched roof, cover, planting boxes, door, shading net, light
//! sensor, exhaust fan and irrigation) and animates its moving parts with
//! explicitly ticked controllers. Geometry and materials are generated once
//! and shared between instances, so a renderer can draw the whole structure
//! with a handful of instanced draw calls.
//!
//! High-level modules
//! - `config`: the greenhouse configuration and its JSON loading
//! - `controllers`: shading net, light sensor and fan controllers
//! - `data_structures`: geometries, materials, instances and the scene graph
//! - `error`: error types of the geometry builders and scene lookups
//! - `flow`: high level flow control (one greenhouse session and its tick)
//! - `resources`: procedural geometry builders
//! - `render`: render composition into instanced batches
//! - `structures`: assembly of the greenhouse subsystems
//!

pub mod config;
pub mod controllers;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod render;
pub mod resources;
pub mod structures;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use config::Configuration;
pub use flow::{GreenhouseFlow, SceneSink};
pub use structures::assemble;
