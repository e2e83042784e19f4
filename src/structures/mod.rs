//! Expansion of a [`Configuration`] into a populated scene tree.
//!
//! [`assemble`] builds every subsystem of the greenhouse as its own subtree
//! under one root. Subsystems are independent: one whose geometry cannot be
//! built is logged and left out while its siblings are kept. The only source
//! of randomness is the configured seed, so equal configurations produce
//! equal trees.

use std::rc::Rc;

use log::{debug, error, info};

use crate::{
    config::Configuration,
    data_structures::{material::Material, scene_graph::SceneNode},
    error::GeometryError,
};

pub mod arches;
pub mod columns;
pub mod cover;
pub mod door;
pub mod fan;
pub mod irrigation;
pub mod light_sensor;
pub mod planting;
pub mod shading_net;

/// Handle of the shading net plane.
pub const SHADING_NET: &str = "shadingNet";
/// Handle of the light sensor group.
pub const LIGHT_SENSOR: &str = "lightSensor";
/// Handle of the emissive bar inside the light sensor.
pub const LIGHT_SENSOR_INDICATOR: &str = "lightSensorIndicator";
/// Handle of the fan group, shell included.
pub const FAN: &str = "fan";
/// Handle of the spinning part of the fan.
pub const FAN_ROTOR: &str = "fanRotor";

type Builder = fn(&Configuration) -> Result<SceneNode, GeometryError>;

const SUBSYSTEMS: [(&str, Builder); 9] = [
    ("columns", columns::build),
    ("arches", arches::build),
    ("cover", cover::build),
    ("planting", planting::build),
    ("door", door::build),
    ("shading net", shading_net::build),
    ("light sensor", light_sensor::build),
    ("fan", fan::build),
    ("irrigation", irrigation::build),
];

/**
 * Builds the complete greenhouse for `config`.
 *
 * Fails only when the configuration itself is invalid. The returned root has
 * its world transforms computed and holds the handle of every controllable
 * node in its registry.
 */
pub fn assemble(config: &Configuration) -> Result<SceneNode, GeometryError> {
    config.validate()?;

    let mut root = SceneNode::group("greenhouse");
    for (name, build) in SUBSYSTEMS {
        match build(config) {
            Ok(node) => {
                debug!("Assembled {} with {} nodes", name, node.node_count());
                root.add_child(node);
            }
            Err(e) => error!("Skipping {}: {}", name, e),
        }
    }
    root.update_world_transform_all();

    let stats = root.resource_stats();
    info!(
        "Greenhouse assembled: {} nodes sharing {} geometries and {} materials",
        root.node_count(),
        stats.geometries,
        stats.materials
    );
    Ok(root)
}

/// Plain frame material in the configured structure colour.
pub(crate) fn frame_material(config: &Configuration) -> Rc<Material> {
    Rc::new(Material::phong("frame", config.color))
}

/// Translucent double-sided glazing used by the cover and the arch end caps.
pub(crate) fn cover_material(config: &Configuration) -> Rc<Material> {
    Rc::new(
        Material::phong("cover", 0x90caf9)
            .translucent(config.cover_opacity)
            .double_sided(),
    )
}
