//! Sliding double door in the side panel at `+length / 2`.

use std::{f32::consts::FRAC_PI_2, rc::Rc};

use crate::{
    config::Configuration,
    data_structures::{geometry::Geometry, instance::Instance, material::Material, scene_graph::SceneNode},
    error::GeometryError,
    resources::{cuboid, cylinder, extruded_polygon},
    structures::cover::{notched_outline, DOOR_HEIGHT, DOOR_WIDTH},
};

const DOOR_THICKNESS: f32 = 0.05;
const FRAME_THICKNESS: f32 = 0.08;

/// A handle: a horizontal bar held by two mounts.
fn handle(bar: &Rc<Geometry>, mount: &Rc<Geometry>, material: &Rc<Material>) -> SceneNode {
    let mut group = SceneNode::group("doorHandle");
    group.add_child(
        SceneNode::mesh("handleBar", bar, material)
            .with_transform(Instance::new().rotated(FRAC_PI_2, 0.0, 0.0)),
    );
    for z in [0.06, -0.06] {
        group.add_child(SceneNode::mesh("handleMount", mount, material).with_transform(Instance::at(0.0, 0.0, z)));
    }
    group
}

pub fn build(config: &Configuration) -> Result<SceneNode, GeometryError> {
    let x = config.length / 2.0;
    let z = config.width * 1.5;
    let frame_half = DOOR_WIDTH / 2.0 + FRAME_THICKNESS;
    let leaf_width = DOOR_WIDTH / 2.0;

    // the opening reaches the floor, so the frame is a notched ring, not a ring with a hole
    let outline = notched_outline(frame_half * 2.0, DOOR_HEIGHT + FRAME_THICKNESS, DOOR_WIDTH, DOOR_HEIGHT);
    let frame = Rc::new(extruded_polygon(&outline, &[], FRAME_THICKNESS * 2.0)?);
    let leaf = Rc::new(cuboid(leaf_width, DOOR_HEIGHT, DOOR_THICKNESS)?);
    let track = Rc::new(cuboid(DOOR_WIDTH + FRAME_THICKNESS * 2.0, 0.05, 0.05)?);
    let bar = Rc::new(cylinder(0.02, 0.02, 0.15, 8, false)?);
    let mount = Rc::new(cylinder(0.025, 0.025, 0.03, 8, false)?);

    let frame_material = Rc::new(Material::phong("doorFrame", 0x808080));
    let glass = Rc::new(
        Material::physical("frostedGlass", 0xffffff, 0.8)
            .translucent(0.5)
            .double_sided(),
    );
    let metal = Rc::new(Material::phong("doorMetal", 0x404040));

    let mut group = SceneNode::group("door");
    group.add_child(
        SceneNode::mesh("doorFrame", &frame, &frame_material)
            .with_transform(Instance::at(x - DOOR_THICKNESS / 2.0, 0.0, z).rotated(0.0, FRAC_PI_2, 0.0)),
    );
    // leaves sit on either side of the wall plane so they can slide past each other
    for side in [-1.0f32, 1.0] {
        group.add_child(
            SceneNode::mesh("doorLeaf", &leaf, &glass).with_transform(
                Instance::at(
                    x + side * DOOR_THICKNESS / 2.0,
                    DOOR_HEIGHT / 2.0,
                    z + side * leaf_width / 2.0,
                )
                .rotated(0.0, FRAC_PI_2, 0.0),
            ),
        );
    }
    group.add_child(
        SceneNode::mesh("doorTrack", &track, &metal)
            .with_transform(Instance::at(x, 0.0, z).rotated(0.0, FRAC_PI_2, 0.0)),
    );
    for side in [-1.0f32, 1.0] {
        group.add_child(
            handle(&bar, &mount, &metal).with_transform(
                Instance::at(
                    x + side * DOOR_THICKNESS / 2.0,
                    DOOR_HEIGHT / 2.0,
                    z + side * (leaf_width / 2.0 - DOOR_THICKNESS),
                )
                .rotated(0.0, side * -FRAC_PI_2, 0.0),
            ),
        );
    }
    Ok(group)
}
