//! Translucent cover: curved roof sheets, end panels and side panels.

use std::{
    f32::consts::{FRAC_PI_2, PI},
    rc::Rc,
};

use cgmath::{Vector2, Vector3};

use crate::{
    config::Configuration,
    data_structures::{instance::Instance, scene_graph::SceneNode},
    error::GeometryError,
    resources::{extruded_polygon, parametric_surface, plane, rectangle, shape},
    structures::cover_material,
};

const ROOF_SEGMENTS: u32 = 50;
const ARCH_ROWS: usize = 3;
const PANEL_THICKNESS: f32 = 0.01;

pub const DOOR_WIDTH: f32 = 1.5;
pub const DOOR_HEIGHT: f32 = 2.5;

/// Outline of a wall `span` wide and `height` tall, centred on x = 0, with a
/// door opening cut from its bottom edge.
///
/// The opening shares the wall's bottom edge, so it is expressed as a notch
/// in the outer ring rather than as a hole.
pub fn notched_outline(span: f32, height: f32, door_width: f32, door_height: f32) -> Vec<Vector2<f32>> {
    let (half, door) = (span / 2.0, door_width / 2.0);
    vec![
        Vector2::new(-half, 0.0),
        Vector2::new(-door, 0.0),
        Vector2::new(-door, door_height),
        Vector2::new(door, door_height),
        Vector2::new(door, 0.0),
        Vector2::new(half, 0.0),
        Vector2::new(half, height),
        Vector2::new(-half, height),
    ]
}

pub fn build(config: &Configuration) -> Result<SceneNode, GeometryError> {
    let (width, height, arch_height) = (config.width, config.height, config.arch_height);
    let length = config.length;
    let depth = config.depth();
    let material = cover_material(config);

    let roof = Rc::new(parametric_surface(
        "half_cylinder",
        |u, v| {
            Vector3::new(
                (u * PI).cos() * width / 2.0,
                (u * PI).sin() * arch_height + height,
                (v - 0.5) * length,
            )
        },
        ROOF_SEGMENTS,
        ROOF_SEGMENTS,
    )?);
    let end_panel = Rc::new(plane(length, height, 1, 1)?);
    let plain_side = Rc::new(shape(&rectangle(-depth / 2.0, 0.0, depth / 2.0, height), &[])?);
    // door opening cut as a notch in the outer ring
    let door_side = Rc::new(extruded_polygon(
        &notched_outline(depth, height, DOOR_WIDTH, DOOR_HEIGHT),
        &[],
        PANEL_THICKNESS,
    )?);

    let mut group = SceneNode::group("cover");
    for k in 0..ARCH_ROWS {
        let z = width / 2.0 + k as f32 * width;
        group.add_child(
            SceneNode::mesh("roofSheet", &roof, &material)
                .with_transform(Instance::at(0.0, 0.0, z).rotated(0.0, FRAC_PI_2, 0.0)),
        );
    }
    for z in [0.0, depth] {
        group.add_child(
            SceneNode::mesh("endPanel", &end_panel, &material)
                .with_transform(Instance::at(0.0, height / 2.0, z)),
        );
    }
    group.add_child(
        SceneNode::mesh("sidePanel", &plain_side, &material)
            .with_transform(Instance::at(-length / 2.0, 0.0, depth / 2.0).rotated(0.0, FRAC_PI_2, 0.0)),
    );
    group.add_child(
        SceneNode::mesh("doorPanel", &door_side, &material)
            .with_transform(Instance::at(length / 2.0, 0.0, depth / 2.0).rotated(0.0, FRAC_PI_2, 0.0)),
    );
    Ok(group)
}
