//! Light sensor: base, dome, sensing disk and a bar indicator showing the reading.

use std::{
    f32::consts::{FRAC_PI_2, PI},
    rc::Rc,
};

use crate::{
    config::{Configuration, LightSensorConfig},
    data_structures::{geometry::Geometry, instance::Instance, material::Material, scene_graph::SceneNode},
    error::GeometryError,
    resources::{circle, cylinder, sphere_section},
    structures::{LIGHT_SENSOR, LIGHT_SENSOR_INDICATOR},
};

/// Smallest indicator bar height, shown for a zero reading.
pub const MIN_INDICATOR_HEIGHT: f32 = 0.01;

/// Indicator bar geometry for a given bar height.
pub fn indicator_geometry(sensor: &LightSensorConfig, height: f32) -> Result<Geometry, GeometryError> {
    cylinder(sensor.size * 0.1, sensor.size * 0.1, height, 8, false)
}

/// Emissive indicator material for a reading in `[0, 1]`.
pub fn indicator_material(sensor: &LightSensorConfig, value: f32) -> Material {
    Material::phong("lightIndicator", sensor.indicator_color)
        .with_emissive(sensor.indicator_color, 0.5 + 0.5 * value)
}

/// Bar height and centre elevation for a reading in `[0, 1]`.
pub fn indicator_extent(sensor: &LightSensorConfig, value: f32) -> (f32, f32) {
    let height = (value * sensor.max_height).max(MIN_INDICATOR_HEIGHT);
    (height, sensor.size * 1.2 + height / 2.0)
}

pub fn build(config: &Configuration) -> Result<SceneNode, GeometryError> {
    let sensor = &config.light_sensor;
    let s = sensor.size;

    let base = Rc::new(cylinder(s, s * 1.2, s * 0.5, 16, false)?);
    let dome = Rc::new(sphere_section(s * 0.7, 16, 12, 0.0, PI * 0.6)?);
    let disk = Rc::new(circle(s * 0.4, 16)?);
    let container = Rc::new(cylinder(s * 0.15, s * 0.15, sensor.max_height, 8, false)?);

    let value = sensor.sensor_value.clamp(0.0, 1.0);
    let (bar_height, bar_y) = indicator_extent(sensor, value);
    let indicator = Rc::new(indicator_geometry(sensor, bar_height)?);

    let body = Rc::new(Material::phong("sensorBody", sensor.color).with_shininess(100.0));
    let shell = Rc::new(
        Material::phong("sensorDome", sensor.color)
            .translucent(0.7)
            .with_shininess(100.0),
    );
    let element = Rc::new(Material::phong("sensorElement", 0x222222).with_shininess(10.0));
    let glass = Rc::new(Material::phong("indicatorContainer", 0xffffff).translucent(0.8));
    let glow = Rc::new(indicator_material(sensor, value));

    let [x, y, z] = config.sensor_position();
    let mut group = SceneNode::group("lightSensor")
        .with_transform(Instance::at(x, y, z))
        .register(LIGHT_SENSOR);
    group.add_child(SceneNode::mesh("sensorBase", &base, &body).with_transform(Instance::at(0.0, s * 0.25, 0.0)));
    group.add_child(
        SceneNode::mesh("sensorDome", &dome, &shell)
            .with_transform(Instance::at(0.0, s * 0.7, 0.0).rotated(PI, 0.0, 0.0)),
    );
    group.add_child(
        SceneNode::mesh("sensorElement", &disk, &element)
            .with_transform(Instance::at(0.0, s * 0.8, 0.0).rotated(-FRAC_PI_2, 0.0, 0.0)),
    );
    group.add_child(
        SceneNode::mesh("indicatorContainer", &container, &glass)
            .with_transform(Instance::at(0.0, s + sensor.max_height / 2.0, 0.0)),
    );
    group.add_child(
        SceneNode::mesh("indicator", &indicator, &glow)
            .with_transform(Instance::at(0.0, bar_y, 0.0))
            .register(LIGHT_SENSOR_INDICATOR),
    );
    Ok(group)
}
