//! Arch ribs, end-cap panels, ridge beams and the secondary roof beams.

use std::{
    f32::consts::{FRAC_PI_2, PI},
    rc::Rc,
};

use cgmath::Vector2;

use crate::{
    config::Configuration,
    data_structures::{instance::Instance, scene_graph::SceneNode},
    error::GeometryError,
    resources::{arc_centerline, cylinder_sector, shape, tube, CircularArc},
    structures::{cover_material, frame_material},
};

const ARC_SEGMENTS: u32 = 20;
const RIB_RADIUS: f32 = 0.1;
const RIB_RADIAL_SEGMENTS: u32 = 16;
const RIDGE_RADIUS: f32 = 0.12;
const SECONDARY_RADIUS: f32 = 0.1;
const BEAM_SEGMENTS: u32 = 16;
const ARCH_ROWS: usize = 3;

/// Depth offsets of the secondary beams inside one row, as fractions of `width`.
const SECONDARY_OFFSETS: [f32; 4] = [1.0 / 6.0, 1.0 / 3.0, 2.0 / 3.0, 5.0 / 6.0];

/**
 * One sampled centerline is lofted into a single rib geometry shared by
 * every rib. Each of the three rows spans `width` along the depth axis and
 * carries `columns` ribs at the column lines, the half-arch panels closing
 * the two ends, a ridge beam at the apex and four secondary beams resting
 * on the canonical roof arc.
 */
pub fn build(config: &Configuration) -> Result<SceneNode, GeometryError> {
    let half_width = config.width / 2.0;
    let half_length = config.length / 2.0;
    let spacing = config.column_spacing();
    let apex = config.ridge_height();

    let centerline = arc_centerline(half_width, config.arch_height, ARC_SEGMENTS)?;
    let rib = Rc::new(tube(&centerline, RIB_RADIUS, RIB_RADIAL_SEGMENTS)?);

    let outline: Vec<Vector2<f32>> = centerline.iter().map(|p| Vector2::new(p.x, p.y)).collect();
    let end_cap = Rc::new(shape(&outline, &[])?);

    let ridge = Rc::new(cylinder_sector(
        RIDGE_RADIUS,
        RIDGE_RADIUS,
        config.length,
        BEAM_SEGMENTS,
        false,
        0.0,
        PI,
    )?);
    let secondary = Rc::new(cylinder_sector(
        SECONDARY_RADIUS,
        SECONDARY_RADIUS,
        config.length,
        BEAM_SEGMENTS,
        false,
        0.0,
        PI,
    )?);
    let roof = CircularArc::from_span(config.width, config.arch_height)?;
    let secondary_heights = SECONDARY_OFFSETS
        .iter()
        .map(|f| {
            let offset = f * config.width;
            roof.height_at(apex, offset - half_width).map(|y| (offset, y))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let frame = frame_material(config);
    let glazing = cover_material(config);

    // the centerline is centred on x = 0, so the row-local centre of the span
    // sits at half the width
    let mut row = SceneNode::group("archRow");
    for i in 0..config.columns {
        let x = -half_length + i as f32 * spacing;
        row.add_child(
            SceneNode::mesh("rib", &rib, &frame)
                .with_transform(Instance::at(x, config.height, half_width).rotated(0.0, FRAC_PI_2, 0.0)),
        );
    }
    for x in [-half_length, half_length] {
        row.add_child(
            SceneNode::mesh("archEndCap", &end_cap, &glazing)
                .with_transform(Instance::at(x, config.height, half_width).rotated(0.0, FRAC_PI_2, 0.0)),
        );
    }
    row.add_child(
        SceneNode::mesh("ridgeBeam", &ridge, &frame)
            .with_transform(Instance::at(0.0, apex, half_width).rotated(FRAC_PI_2, 0.0, FRAC_PI_2)),
    );
    for (z, y) in secondary_heights {
        row.add_child(
            SceneNode::mesh("secondaryBeam", &secondary, &frame)
                .with_transform(Instance::at(0.0, y, z).rotated(FRAC_PI_2, 0.0, FRAC_PI_2)),
        );
    }

    let mut group = SceneNode::group("arches");
    for k in 0..ARCH_ROWS {
        let z = k as f32 * config.width;
        group.add_child(row.clone_instance().with_transform(Instance::at(0.0, 0.0, z)));
    }
    Ok(group)
}
