use std::rc::Rc;

use greenhouse_ngin::{
    assemble,
    config::Configuration,
    data_structures::{geometry::GeometryParams, instance::Instance, scene_graph::SceneNode},
    error::GeometryError,
    structures::{FAN, FAN_ROTOR, LIGHT_SENSOR, LIGHT_SENSOR_INDICATOR, SHADING_NET},
};

use crate::common::test_utils::{assert_close, small_config};

mod common;

fn fingerprint(root: &SceneNode) -> Vec<(String, Option<GeometryParams>, Instance)> {
    let mut nodes = Vec::new();
    root.visit(&mut |node, world| {
        let params = node.get_mesh().map(|mesh| mesh.geometry.params().clone());
        nodes.push((node.name().to_string(), params, *world));
    });
    nodes
}

#[test]
fn should_assemble_every_subsystem() {
    let root = assemble(&small_config()).unwrap();
    for name in [
        "columns",
        "arches",
        "cover",
        "planting",
        "door",
        "shadingNet",
        "lightSensor",
        "fan",
        "irrigation",
    ] {
        assert!(root.find_child(name).is_some(), "{} is missing", name);
    }
}

#[test]
fn should_place_columns_times_four_uprights() {
    let config = Configuration::default();
    let root = assemble(&config).unwrap();
    let uprights = root.find_all("column").len();
    let corners = root.find_all("cornerColumn");
    assert_eq!(uprights + corners.len(), config.columns * 4);
    assert_eq!(corners.len(), 4);

    let half_length = config.length / 2.0;
    let depth = config.depth();
    let mut corner_positions = Vec::new();
    root.visit(&mut |node, world| {
        if node.name() == "cornerColumn" {
            corner_positions.push(world.position);
        }
    });
    for position in corner_positions {
        assert_close(position.x.abs(), half_length);
        assert!(position.z.abs() < 1e-4 || (position.z - depth).abs() < 1e-4);
        assert_close(position.y, config.ridge_height() / 2.0);
    }
}

#[test]
fn should_share_geometry_between_uprights() {
    let root = assemble(&small_config()).unwrap();
    let uprights = root.find_all("column");
    let first = uprights[0].get_mesh().unwrap();
    for upright in &uprights {
        let mesh = upright.get_mesh().unwrap();
        assert!(Rc::ptr_eq(&mesh.geometry, &first.geometry));
        assert!(Rc::ptr_eq(&mesh.material, &first.material));
    }
    let stats = root.resource_stats();
    assert!(stats.geometries < root.node_count() / 4);
}

#[test]
fn should_build_arch_rows() {
    let config = Configuration::default();
    let root = assemble(&config).unwrap();
    assert_eq!(root.find_all("rib").len(), config.columns * 3);
    assert_eq!(root.find_all("archEndCap").len(), 6);
    assert_eq!(root.find_all("ridgeBeam").len(), 3);
    assert_eq!(root.find_all("secondaryBeam").len(), 12);
}

#[test]
fn should_resolve_controller_handles_from_the_root() {
    let root = assemble(&small_config()).unwrap();
    for handle in [SHADING_NET, LIGHT_SENSOR, LIGHT_SENSOR_INDICATOR, FAN, FAN_ROTOR] {
        assert!(root.lookup(handle).is_ok(), "{} does not resolve", handle);
    }
    assert_eq!(root.lookup(FAN_ROTOR).unwrap().name(), "fanRotor");
    assert_eq!(root.lookup(LIGHT_SENSOR_INDICATOR).unwrap().name(), "indicator");
}

#[test]
fn should_place_the_rotor_at_the_fan_position() {
    let config = small_config();
    let root = assemble(&config).unwrap();
    let path = root.handle(FAN_ROTOR).unwrap();
    let world = root.world_transform_of(path).unwrap();
    let [x, y, z] = config.fan_position();
    assert_close(world.position.x, x);
    assert_close(world.position.y, y);
    assert_close(world.position.z, z);
    assert_eq!(root.lookup(FAN_ROTOR).unwrap().find_all("fanBlade").len(), 5);
}

#[test]
fn should_start_with_the_net_extended() {
    let root = assemble(&small_config()).unwrap();
    let net = root.lookup(SHADING_NET).unwrap();
    assert!(net.visible);
    assert_close(net.get_local_transform().scale.x, 1.0);

    let mut config = small_config();
    config.shading_net.is_rolled_up = true;
    let root = assemble(&config).unwrap();
    let net = root.lookup(SHADING_NET).unwrap();
    assert!(!net.visible);
    assert_close(net.get_local_transform().scale.x, 0.0);
}

#[test]
fn should_show_the_initial_sensor_value() {
    let config = small_config();
    let root = assemble(&config).unwrap();
    let indicator = root.lookup(LIGHT_SENSOR_INDICATOR).unwrap();
    assert_close(
        indicator.get_local_transform().position.y,
        config.light_sensor.size * 1.2 + 0.005,
    );
    let material = &indicator.get_mesh().unwrap().material;
    assert_close(material.emissive_intensity, 0.5);
}

#[test]
fn should_spray_from_every_second_sprinkler() {
    let config = small_config();
    let root = assemble(&config).unwrap();
    let rows = config.planting.rows;
    assert_eq!(root.find_all("sprinkler").len(), rows * 5);
    assert_eq!(root.find_all("mist").len(), rows * 2);
    assert_eq!(root.find_all("droplet").len(), rows * 2 * 6);
    assert_eq!(root.find_all("plantingBox").len(), rows);
    assert_eq!(root.find_all("pillar").len(), rows * 5);
}

#[test]
fn should_assemble_deterministically() {
    let config = small_config();
    let first = assemble(&config).unwrap();
    let second = assemble(&config).unwrap();
    assert_eq!(first.node_count(), second.node_count());
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

#[test]
fn should_jitter_droplets_by_seed() {
    let droplets = |seed| {
        let mut config = small_config();
        config.seed = seed;
        let root = assemble(&config).unwrap();
        let mut transforms = Vec::new();
        root.visit(&mut |node, world| {
            if node.name() == "droplet" {
                transforms.push(*world);
            }
        });
        transforms
    };
    assert_eq!(droplets(7), droplets(7));
    assert_ne!(droplets(7), droplets(8));
}

#[test]
fn should_reject_invalid_configurations() {
    let mut config = small_config();
    config.arch_height = 0.0;
    assert!(matches!(
        assemble(&config),
        Err(GeometryError::InvalidParameter { .. })
    ));

    let mut config = small_config();
    config.columns = 1;
    assert!(assemble(&config).is_err());
}

#[test]
fn should_skip_only_the_failing_subsystems() {
    // too short for planting boxes, which leave five units at either end
    let mut config = small_config();
    config.length = 9.0;
    let root = assemble(&config).unwrap();
    assert!(root.find_child("planting").is_none());
    assert!(root.find_child("irrigation").is_none());
    assert!(root.find_child("columns").is_some());
    assert!(root.find_child("door").is_some());
    assert!(root.lookup(SHADING_NET).is_ok());
    assert!(root.lookup(FAN_ROTOR).is_ok());
}

#[test]
fn should_ignore_the_informational_beam_count() {
    let mut config = small_config();
    config.beams = 11;
    assert_eq!(fingerprint(&assemble(&config).unwrap()), fingerprint(&assemble(&small_config()).unwrap()));
    let config = Configuration::from_json(r#"{ "beams": 3 }"#).unwrap();
    assert_eq!(config.beams, 3);
}

#[test]
fn should_load_partial_json() {
    let config = Configuration::from_json(r#"{ "length": 40.0, "shading_net": { "roll_speed": 0.1 } }"#).unwrap();
    assert_close(config.length, 40.0);
    assert_close(config.width, 14.0);
    assert_close(config.shading_net.roll_speed, 0.1);
    assert_eq!(config.shading_net.segments, 20);
    assert_eq!(config.fan.blades, 5);

    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Configuration::from_json(&json).unwrap(), config);

    assert!(Configuration::from_json(r#"{ "columns": 1 }"#).is_err());
    assert!(Configuration::from_json("not json").is_err());
}
