//! Irrigation: one supply line with sprinklers along every planting row.

use std::{
    f32::consts::{FRAC_PI_2, PI},
    rc::Rc,
};

use cgmath::{Vector2, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::Configuration,
    data_structures::{instance::Instance, material::Material, scene_graph::SceneNode},
    error::GeometryError,
    resources::{arc_points, cone, cylinder, sphere, tube},
    structures::planting::{box_length, row_interval},
};

const PIPE_RADIUS: f32 = 0.05;
const PIPE_LEVEL: f32 = 1.65;
const ELBOW_RADIUS: f32 = 0.15;
const RISER_HEIGHT: f32 = 1.4;
/// Supply lines run this far in front of their planting row.
const ROW_OFFSET: f32 = 0.2;
const HEAD_LEVEL: f32 = 1.6;
const DROPLETS: usize = 6;
const SPREAD: f32 = 0.15;

/**
 * Every row gets a horizontal supply pipe, a quarter-circle elbow and a riser
 * down to the floor at the `+x` end, plus `sprinklers_per_row` evenly spaced
 * heads. Every second head sprays: six droplets jittered with the configured
 * seed and a translucent mist cone.
 */
pub fn build(config: &Configuration) -> Result<SceneNode, GeometryError> {
    let length = box_length(config);
    let interval = row_interval(config);
    let corner = length / 2.0 + ELBOW_RADIUS;

    let pipe = Rc::new(cylinder(PIPE_RADIUS, PIPE_RADIUS, length, 16, false)?);
    let elbow_path: Vec<Vector3<f32>> = arc_points(
        Vector2::new(corner, PIPE_LEVEL - ELBOW_RADIUS),
        ELBOW_RADIUS,
        0.0,
        FRAC_PI_2,
        8,
    )?
    .into_iter()
    .map(|p| Vector3::new(p.x, p.y, 0.0))
    .collect();
    let elbow = Rc::new(tube(&elbow_path, PIPE_RADIUS, 12)?);
    let riser = Rc::new(cylinder(PIPE_RADIUS, PIPE_RADIUS, RISER_HEIGHT, 16, false)?);
    let base = Rc::new(cylinder(0.06, 0.08, 0.06, 12, false)?);
    let head = Rc::new(cone(0.05, 0.08, 12, false)?);
    let droplet = Rc::new(sphere(1.0, 6, 6)?);
    let mist = Rc::new(cone(0.15, 0.25, 8, true)?);

    let pvc = Rc::new(Material::standard("pipe", 0xf5f5dc, 0.4, 0.1));
    let nozzle = Rc::new(Material::standard("sprinkler", 0x404040, 0.4, 0.6));
    let water = Rc::new(Material::standard("water", 0x77aaff, 0.1, 0.0).translucent(0.6));
    let spray = Rc::new(
        Material::standard("mist", 0xaaccff, 0.1, 0.0)
            .translucent(0.2)
            .double_sided(),
    );

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let sprinklers = config.planting.sprinklers_per_row;
    let spacing = length / (sprinklers + 1) as f32;

    let mut group = SceneNode::group("irrigation");
    for i in 0..config.planting.rows {
        let z = interval * (i + 1) as f32 - ROW_OFFSET;
        let mut row = SceneNode::group("irrigationRow").with_transform(Instance::at(0.0, 0.0, z));
        row.add_child(
            SceneNode::mesh("supplyPipe", &pipe, &pvc)
                .with_transform(Instance::at(0.0, PIPE_LEVEL, 0.0).rotated(FRAC_PI_2, 0.0, FRAC_PI_2)),
        );
        row.add_child(SceneNode::mesh("elbow", &elbow, &pvc).with_transform(Instance::at(-ELBOW_RADIUS, 0.0, 0.0)));
        row.add_child(
            SceneNode::mesh("riser", &riser, &pvc)
                .with_transform(Instance::at(corner, RISER_HEIGHT / 2.0 + ELBOW_RADIUS, 0.0)),
        );

        for j in 1..=sprinklers {
            let x = -length / 2.0 + j as f32 * spacing;
            let mut sprinkler = SceneNode::group("sprinkler").with_transform(Instance::at(x, 0.0, 0.0));
            sprinkler.add_child(
                SceneNode::mesh("sprinklerBase", &base, &nozzle).with_transform(Instance::at(0.0, 1.7, 0.0)),
            );
            sprinkler.add_child(
                SceneNode::mesh("sprinklerHead", &head, &nozzle)
                    .with_transform(Instance::at(0.0, HEAD_LEVEL, 0.0).rotated(PI, 0.0, 0.0)),
            );
            if j % 2 == 0 {
                for _ in 0..DROPLETS {
                    let size = 0.01 + rng.r#gen::<f32>() * 0.01;
                    let dy = -0.05 - rng.r#gen::<f32>() * 0.15;
                    let dx = (rng.r#gen::<f32>() - 0.5) * SPREAD;
                    let dz = (rng.r#gen::<f32>() - 0.5) * SPREAD;
                    sprinkler.add_child(
                        SceneNode::mesh("droplet", &droplet, &water)
                            .with_transform(Instance::at(dx, HEAD_LEVEL + dy, dz).scaled(size, size, size)),
                    );
                }
                sprinkler.add_child(
                    SceneNode::mesh("mist", &mist, &spray)
                        .with_transform(Instance::at(0.0, HEAD_LEVEL - 0.12, 0.0).rotated(PI, 0.0, 0.0)),
                );
            }
            row.add_child(sprinkler);
        }
        group.add_child(row);
    }
    Ok(group)
}
