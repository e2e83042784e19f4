use std::rc::Rc;

use cgmath::Vector3;
use greenhouse_ngin::{
    data_structures::{
        geometry::Geometry,
        instance::Instance,
        material::Material,
        scene_graph::{Mesh, SceneNode},
    },
    error::SceneError,
    resources::cuboid,
};

use crate::common::test_utils::assert_close;

mod common;

fn block() -> (Rc<Geometry>, Rc<Material>) {
    (
        Rc::new(cuboid(1.0, 1.0, 1.0).unwrap()),
        Rc::new(Material::phong("block", 0xff0000)),
    )
}

#[test]
fn handles_are_hoisted_to_the_root() {
    let (geometry, material) = block();
    let leaf = SceneNode::mesh("leaf", &geometry, &material).register("target");
    let mut middle = SceneNode::group("middle");
    middle.add_child(SceneNode::group("padding"));
    middle.add_child(leaf);
    let mut root = SceneNode::group("root");
    root.add_child(SceneNode::group("first"));
    root.add_child(middle);

    assert_eq!(root.handle("target"), Some(&vec![1, 1]));
    assert_eq!(root.lookup("target").unwrap().name(), "leaf");
    root.lookup_mut("target").unwrap().visible = false;
    assert!(!root.node(&[1, 1]).unwrap().visible);
}

#[test]
fn unknown_handles_fail_lookup() {
    let root = SceneNode::group("root");
    assert_eq!(
        root.lookup("missing").unwrap_err(),
        SceneError::LookupFailure("missing".to_string())
    );
    let mut root = root;
    assert!(root.resolve_mut("missing", &[3]).is_err());
}

#[test]
fn duplicate_handles_keep_the_first_registration() {
    let mut root = SceneNode::group("root");
    root.add_child(SceneNode::group("a").register("shared"));
    root.add_child(SceneNode::group("b").register("shared"));
    assert_eq!(root.lookup("shared").unwrap().name(), "a");
    assert_eq!(root.handles().count(), 1);
}

#[test]
fn cloned_instances_share_resources_but_not_handles() {
    let (geometry, material) = block();
    let mut row = SceneNode::group("row").register("row");
    row.add_child(SceneNode::mesh("cell", &geometry, &material));
    let clone = row.clone_instance();

    assert_eq!(clone.handles().count(), 0);
    let original_mesh = row.get_children()[0].get_mesh().unwrap();
    let cloned_mesh = clone.get_children()[0].get_mesh().unwrap();
    assert!(Rc::ptr_eq(&original_mesh.geometry, &cloned_mesh.geometry));
    assert!(Rc::ptr_eq(&original_mesh.material, &cloned_mesh.material));
}

#[test]
fn cloned_instances_are_independent() {
    let (geometry, material) = block();
    let mut row = SceneNode::group("row");
    row.add_child(SceneNode::mesh("cell", &geometry, &material));
    let mut clone = row.clone_instance();
    clone.set_local_transform(Instance::at(0.0, 0.0, 5.0));
    clone
        .get_child_mut(0)
        .unwrap()
        .set_local_transform_with(&mut |instance| instance.position.x = 2.0);

    assert_eq!(*row.get_local_transform(), Instance::new());
    assert_eq!(*row.get_children()[0].get_local_transform(), Instance::new());
}

#[test]
fn world_transforms_compose_parent_first() {
    let (geometry, material) = block();
    let child = SceneNode::mesh("child", &geometry, &material)
        .with_transform(Instance::at(1.0, 0.0, 0.0))
        .register("child");
    let mut parent = SceneNode::group("parent")
        .with_transform(Instance::at(0.0, 2.0, 0.0).scaled(2.0, 2.0, 2.0));
    parent.add_child(child);
    let mut root = SceneNode::group("root");
    root.add_child(parent);
    root.update_world_transform_all();

    let world = root.lookup("child").unwrap().get_world_transform().position;
    assert_close(world.x, 2.0);
    assert_close(world.y, 2.0);
    assert_close(world.z, 0.0);

    let path = root.handle("child").unwrap().clone();
    let composed = root.world_transform_of(&path).unwrap();
    assert_eq!(composed.position, Vector3::new(2.0, 2.0, 0.0));
    assert!(root.world_transform_of(&[0, 7]).is_none());
}

#[test]
fn rotated_parents_rotate_child_offsets() {
    let mut parent = SceneNode::group("parent")
        .with_transform(Instance::new().rotated(0.0, std::f32::consts::FRAC_PI_2, 0.0));
    parent.add_child(SceneNode::group("child").with_transform(Instance::at(1.0, 0.0, 0.0)));
    let mut positions = Vec::new();
    parent.visit(&mut |node, world| {
        if node.name() == "child" {
            positions.push(world.position);
        }
    });
    assert_eq!(positions.len(), 1);
    assert_close(positions[0].x, 0.0);
    assert_close(positions[0].z, -1.0);
}

#[test]
fn stats_count_distinct_resources() {
    let (geometry, material) = block();
    let other = Rc::new(Material::phong("other", 0x00ff00));
    let mut root = SceneNode::group("root");
    for _ in 0..4 {
        root.add_child(SceneNode::mesh("cell", &geometry, &material));
    }
    root.add_child(SceneNode::mesh("odd", &geometry, &other));
    let stats = root.resource_stats();
    assert_eq!(stats.geometries, 1);
    assert_eq!(stats.materials, 2);
    assert_eq!(root.node_count(), 6);
    assert_eq!(root.find_all("cell").len(), 4);
    assert!(root.find_child("odd").is_some());
}

#[test]
fn set_mesh_releases_the_previous_payload() {
    let (geometry, material) = block();
    let mut node = SceneNode::mesh("cell", &geometry, &material);
    assert_eq!(Rc::strong_count(&geometry), 2);
    let replacement = Rc::new(cuboid(2.0, 2.0, 2.0).unwrap());
    node.set_mesh(Mesh::new(replacement.clone(), material.clone()));
    assert_eq!(Rc::strong_count(&geometry), 1);
    assert!(Rc::ptr_eq(&node.get_mesh().unwrap().geometry, &replacement));
}

#[test]
fn dispose_is_idempotent() {
    let (geometry, material) = block();
    let mut root = SceneNode::group("root");
    root.add_child(SceneNode::mesh("cell", &geometry, &material).register("cell"));
    root.dispose();
    assert_eq!(root.node_count(), 1);
    assert!(root.lookup("cell").is_err());
    assert_eq!(Rc::strong_count(&geometry), 1);
    root.dispose();
    assert_eq!(root.node_count(), 1);
}
