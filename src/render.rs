//! Render composition and instanced batching.
//!
//! This module defines the [`Render`] enum, which describes what a renderer has
//! to draw for a scene tree. Visible mesh nodes sharing the same geometry and
//! material are grouped into one [`Instanced`] batch carrying a packed
//! [`InstanceRaw`] per node, so a GPU backend needs one draw call per batch.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the primary enum describing render operations
//! - [`Instanced<'a>`] contains data for instanced rendering (geometry, material + instance data)
//!

use std::rc::Rc;

use crate::data_structures::{
    geometry::Geometry,
    instance::{Instance, InstanceRaw},
    material::Material,
    scene_graph::SceneNode,
};

/// Data for instanced object rendering: one geometry/material pair and its instances.
///
/// The instances contain per-instance world transformation data in the layout
/// a vertex buffer expects.
pub struct Instanced<'a> {
    pub geometry: &'a Geometry,
    pub material: &'a Material,
    pub instances: Vec<InstanceRaw>,
    pub amount: usize,
}

/// Specifies how a scene tree should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Defaults(Vec<Instanced>)` renders a batch of opaque instanced objects
/// - `Transparents(Vec<Instanced>)` renders a batch of transparent objects, after the opaque ones
/// - `Composed(Vec<Render>)` recursively renders composition of multiple renders
///
pub enum Render<'a> {
    None,
    Defaults(Vec<Instanced<'a>>),
    Transparents(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /**
     * Walks `root` and batches every visible mesh node.
     *
     * A hidden node hides its whole subtree. Batches keep the order in which
     * their first node was met, instances keep traversal order.
     */
    pub fn collect(root: &'a SceneNode) -> Self {
        let mut batches: Vec<Instanced<'a>> = Vec::new();
        gather(root, &Instance::new(), &mut batches);

        let (transparents, defaults): (Vec<_>, Vec<_>) = batches
            .into_iter()
            .partition(|batch| batch.material.is_transparent());
        match (defaults.is_empty(), transparents.is_empty()) {
            (true, true) => Render::None,
            (false, true) => Render::Defaults(defaults),
            (true, false) => Render::Transparents(transparents),
            (false, false) => Render::Composed(vec![
                Render::Defaults(defaults),
                Render::Transparents(transparents),
            ]),
        }
    }

    /// All batches in draw order: opaque first, then transparent.
    pub fn batches(&self) -> Vec<&Instanced<'a>> {
        match self {
            Render::None => Vec::new(),
            Render::Defaults(vec) | Render::Transparents(vec) => vec.iter().collect(),
            Render::Composed(renders) => renders.iter().flat_map(Render::batches).collect(),
        }
    }

    /// Number of draw calls this render needs.
    pub fn draw_calls(&self) -> usize {
        self.batches().len()
    }

    /// Number of drawn instances over all batches.
    pub fn instance_count(&self) -> usize {
        self.batches().iter().map(|batch| batch.amount).sum()
    }
}

fn gather<'a>(
    node: &'a SceneNode,
    parent: &Instance,
    batches: &mut Vec<Instanced<'a>>,
) {
    if !node.visible {
        return;
    }
    let world = parent * node.get_local_transform();
    if let Some(mesh) = node.get_mesh() {
        let raw = world.to_raw();
        let existing = batches.iter_mut().find(|batch| {
            std::ptr::eq(batch.geometry, Rc::as_ptr(&mesh.geometry))
                && std::ptr::eq(batch.material, Rc::as_ptr(&mesh.material))
        });
        match existing {
            Some(batch) => {
                batch.instances.push(raw);
                batch.amount += 1;
            }
            None => batches.push(Instanced {
                geometry: &mesh.geometry,
                material: &mesh.material,
                instances: vec![raw],
                amount: 1,
            }),
        }
    }
    for child in node.get_children() {
        gather(child, &world, batches);
    }
}
