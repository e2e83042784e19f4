//! Upright columns, corner columns and the beams closing the frame.

use std::{
    f32::consts::FRAC_PI_2,
    rc::Rc,
};

use crate::{
    config::Configuration,
    data_structures::{instance::Instance, scene_graph::SceneNode},
    error::GeometryError,
    resources::cylinder,
    structures::frame_material,
};

const COLUMN_RADIUS: f32 = 0.1;
const BEAM_RADIUS: f32 = 0.08;
const SEGMENTS: u32 = 8;
/// Column lines along the depth axis: the base row plus three more, `width` apart.
const DEPTH_ROWS: usize = 4;

/**
 * Builds one row of `columns` uprights and clones it into three further rows.
 *
 * The four corner positions carry taller corner columns reaching the raised
 * frame instead of regular uprights, so the subtree always holds
 * `columns * 4` vertical members.
 */
pub fn build(config: &Configuration) -> Result<SceneNode, GeometryError> {
    let height = config.height;
    let frame_height = config.ridge_height();
    let depth = config.depth();
    let half_length = config.length / 2.0;
    let spacing = config.column_spacing();

    let material = frame_material(config);
    let upright = Rc::new(cylinder(COLUMN_RADIUS, COLUMN_RADIUS, height, SEGMENTS, false)?);
    let corner = Rc::new(cylinder(COLUMN_RADIUS, COLUMN_RADIUS, frame_height, SEGMENTS, false)?);
    let crossbeam = Rc::new(cylinder(BEAM_RADIUS, BEAM_RADIUS, depth, SEGMENTS, false)?);
    let long_beam = Rc::new(cylinder(BEAM_RADIUS, BEAM_RADIUS, config.length, SEGMENTS, false)?);

    let column = SceneNode::mesh("column", &upright, &material);
    let corner_column = SceneNode::mesh("cornerColumn", &corner, &material);

    let mut base_row = SceneNode::group("columnRow");
    for i in 0..config.columns {
        let x = -half_length + i as f32 * spacing;
        base_row.add_child(column.clone_instance().with_transform(Instance::at(x, height / 2.0, 0.0)));
    }

    let mut group = SceneNode::group("columns");
    for row in 0..DEPTH_ROWS {
        let z = row as f32 * config.width;
        let mut instance = base_row.clone_instance().with_transform(Instance::at(0.0, 0.0, z));
        if row == 0 || row == DEPTH_ROWS - 1 {
            for idx in [0, config.columns - 1] {
                if let Some(end) = instance.get_child_mut(idx) {
                    let x = end.get_local_transform().position.x;
                    *end = corner_column
                        .clone_instance()
                        .with_transform(Instance::at(x, frame_height / 2.0, 0.0));
                }
            }
        }
        group.add_child(instance);
    }

    for i in 0..config.columns {
        let x = -half_length + i as f32 * spacing;
        group.add_child(
            SceneNode::mesh("crossbeam", &crossbeam, &material)
                .with_transform(Instance::at(x, height, depth / 2.0).rotated(FRAC_PI_2, 0.0, 0.0)),
        );
    }

    // raised frame: two beams along the length, two across the depth
    for z in [0.0, depth] {
        group.add_child(
            SceneNode::mesh("frameBeam", &long_beam, &material)
                .with_transform(Instance::at(0.0, frame_height, z).rotated(0.0, 0.0, FRAC_PI_2)),
        );
    }
    for x in [-half_length, half_length] {
        group.add_child(
            SceneNode::mesh("frameBeam", &crossbeam, &material)
                .with_transform(Instance::at(x, frame_height, depth / 2.0).rotated(FRAC_PI_2, 0.0, 0.0)),
        );
    }

    Ok(group)
}
