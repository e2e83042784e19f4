//! Shading net stretched over the raised frame.

use std::{f32::consts::FRAC_PI_2, rc::Rc};

use crate::{
    config::Configuration,
    data_structures::{instance::Instance, material::Material, scene_graph::SceneNode},
    error::GeometryError,
    resources::plane,
    structures::SHADING_NET,
};

/// Clearance between the raised frame and the net.
const CLEARANCE: f32 = 0.11;

/// The net lies flat just above the frame and covers the whole footprint.
///
/// A configuration that starts rolled up yields the net in its rolled-up
/// pose: collapsed onto the `-length / 2` edge and hidden.
pub fn build(config: &Configuration) -> Result<SceneNode, GeometryError> {
    let net = &config.shading_net;
    let geometry = Rc::new(plane(config.length, config.depth(), net.segments, net.segments)?);
    let material = Rc::new(
        Material::phong("shadingNet", net.color)
            .translucent(net.opacity)
            .double_sided(),
    );

    let transform = Instance::at(0.0, config.ridge_height() + CLEARANCE, config.depth() / 2.0)
        .rotated(FRAC_PI_2, 0.0, 0.0);
    let node = SceneNode::mesh("shadingNet", &geometry, &material).register(SHADING_NET);
    if net.is_rolled_up {
        let mut rolled = transform;
        rolled.scale.x = 0.0;
        rolled.position.x = -config.length / 2.0;
        Ok(node.with_transform(rolled).hidden())
    } else {
        Ok(node.with_transform(transform))
    }
}
