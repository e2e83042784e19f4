//! Exhaust fan: an open shell around a spinning rotor.

use std::{
    f32::consts::{FRAC_PI_2, PI, TAU},
    rc::Rc,
};

use cgmath::Vector2;

use crate::{
    config::Configuration,
    data_structures::{instance::Instance, material::Material, scene_graph::SceneNode},
    error::GeometryError,
    resources::{arc_points, cylinder, extruded_polygon},
    structures::{FAN, FAN_ROTOR},
};

const SHELL_RADIUS: f32 = 0.5;
const BLADE_RADIUS: f32 = 0.45;
const BLADE_SWEEP: f32 = PI / 5.0;
const BLADE_THICKNESS: f32 = 0.03;
/// Elevation of the blades above the fan centre, along the hub axis.
const BLADE_LEVEL: f32 = 0.3;

/**
 * The rotor (hub plus `fan.blades` blade wedges) is a group of its own so a
 * controller can spin it about the hub axis (local y) without touching the
 * shell. The whole fan is placed with the configured position and rotation.
 */
pub fn build(config: &Configuration) -> Result<SceneNode, GeometryError> {
    let shell = Rc::new(cylinder(SHELL_RADIUS, SHELL_RADIUS, 1.0, 32, true)?);
    let hub = Rc::new(cylinder(0.1, 0.2, 0.3, 32, false)?);

    let mut outline = vec![Vector2::new(0.0, 0.0)];
    outline.extend(arc_points(Vector2::new(0.0, 0.0), BLADE_RADIUS, 0.0, BLADE_SWEEP, 32)?);
    let blade = Rc::new(extruded_polygon(&outline, &[], BLADE_THICKNESS)?);

    let casing = Rc::new(Material::standard("fanShell", 0x888888, 0.2, 0.8).double_sided());
    let hub_metal = Rc::new(Material::standard("fanHub", 0x888888, 0.3, 0.7).double_sided());
    let paint = Rc::new(Material::standard("fanBlade", 0xffcc00, 0.5, 0.5));

    let mut rotor = SceneNode::group("fanRotor").register(FAN_ROTOR);
    rotor.add_child(SceneNode::mesh("fanHub", &hub, &hub_metal).with_transform(Instance::at(0.0, 0.2, 0.0)));
    let blades = config.fan.blades;
    let step = TAU / blades.max(1) as f32;
    for k in 0..blades {
        rotor.add_child(
            SceneNode::mesh("fanBlade", &blade, &paint)
                .with_transform(Instance::at(0.0, BLADE_LEVEL, 0.0).rotated(FRAC_PI_2, 0.0, k as f32 * step)),
        );
    }

    let [x, y, z] = config.fan_position();
    let [rx, ry, rz] = config.fan.rotation;
    let mut group = SceneNode::group("fan")
        .with_transform(Instance::at(x, y, z).rotated(rx, ry, rz))
        .register(FAN);
    group.add_child(SceneNode::mesh("fanShell", &shell, &casing));
    group.add_child(rotor);
    Ok(group)
}
