//! Raised planting boxes on support pillars.

use std::{f32::consts::FRAC_PI_2, rc::Rc};

use crate::{
    config::Configuration,
    data_structures::{instance::Instance, material::Material, scene_graph::SceneNode},
    error::GeometryError,
    resources::{cylinder, extruded_polygon, rectangle, require_positive, shape},
};

pub const BOX_HEIGHT: f32 = 0.4;
const WALL_THICKNESS: f32 = 0.05;
/// Elevation of the box rim.
pub const BOX_TOP: f32 = 1.4;
const SOIL_LEVEL: f32 = 1.36;
const PILLAR_RADIUS: f32 = 0.05;
const PILLAR_HEIGHT: f32 = 1.0;

/// Length of a planting box, leaving five units of walkway at either end.
pub fn box_length(config: &Configuration) -> f32 {
    config.length - 10.0
}

/// Distance between neighbouring box rows along the depth axis.
pub fn row_interval(config: &Configuration) -> f32 {
    config.width / 6.3
}

/**
 * Builds one box (hollow channel, soil plate, bottom plate and pillars) and
 * clones it into `planting.rows` rows. Row `i` sits at depth
 * `row_interval * (i + 1)`.
 */
pub fn build(config: &Configuration) -> Result<SceneNode, GeometryError> {
    let box_width = config.width / 30.0;
    let length = box_length(config);
    require_positive("planting_box", "length", length)?;
    let (hw, hl) = (box_width / 2.0, length / 2.0);
    let t = WALL_THICKNESS;

    let channel = Rc::new(extruded_polygon(
        &rectangle(-hw, -hl, hw, hl),
        &[rectangle(-hw + t, -hl + t, hw - t, hl - t)],
        BOX_HEIGHT,
    )?);
    let soil = Rc::new(shape(&rectangle(-hw + t, -hl + t, hw - t, hl - t), &[])?.with_occlusion_uv());
    let bottom = Rc::new(shape(&rectangle(-hw, -hl, hw, hl), &[])?);
    let pillar = Rc::new(cylinder(PILLAR_RADIUS, PILLAR_RADIUS, PILLAR_HEIGHT, 8, false)?);

    let plastic = Rc::new(Material::standard("plastic", 0xffffff, 0.3, 0.0));
    let earth = Rc::new(Material::standard("soil", 0x8b5a2b, 0.8, 0.1));
    let base = Rc::new(Material::phong("boxBottom", 0x808080).double_sided());
    let support = Rc::new(Material::phong("pillar", 0x404040));

    let mut planter = SceneNode::group("plantingBox");
    planter.add_child(
        SceneNode::mesh("channel", &channel, &plastic)
            .with_transform(Instance::at(0.0, BOX_TOP, 0.0).rotated(FRAC_PI_2, 0.0, FRAC_PI_2)),
    );
    planter.add_child(
        SceneNode::mesh("soil", &soil, &earth)
            .with_transform(Instance::at(0.0, SOIL_LEVEL, 0.0).rotated(-FRAC_PI_2, 0.0, FRAC_PI_2)),
    );
    planter.add_child(
        SceneNode::mesh("boxBottom", &bottom, &base)
            .with_transform(Instance::at(0.0, BOX_TOP - BOX_HEIGHT, 0.0).rotated(-FRAC_PI_2, 0.0, FRAC_PI_2)),
    );
    let pillars = config.planting.pillars_per_row;
    for j in 0..pillars {
        let x = length / (pillars + 1) as f32 * (j + 1) as f32 - hl;
        planter.add_child(
            SceneNode::mesh("pillar", &pillar, &support)
                .with_transform(Instance::at(x, PILLAR_HEIGHT / 2.0, 0.0)),
        );
    }

    let interval = row_interval(config);
    let mut group = SceneNode::group("planting");
    for i in 0..config.planting.rows {
        let z = interval * (i + 1) as f32;
        group.add_child(planter.clone_instance().with_transform(Instance::at(0.0, 0.0, z)));
    }
    Ok(group)
}
