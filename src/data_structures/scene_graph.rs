//! Scene graph and hierarchical scene organization.
//!
//! A [`SceneNode`] owns its children exclusively: dropping a node drops its
//! whole subtree. Geometry and materials are held behind `Rc` so cloned
//! instances share them and only differ in their local transform.
//!
//! Every node also carries a handle registry mapping names to child-index
//! paths. When a child is attached its handles are hoisted into the parent
//! with the child's index prepended, so after assembly the root knows the
//! path to every named node without any back-references.

use std::{
    collections::{BTreeMap, HashSet},
    rc::Rc,
};

use log::warn;

use crate::{
    data_structures::{geometry::Geometry, instance::Instance, material::Material},
    error::SceneError,
};

/// Child-index path from a node to one of its descendants.
pub type NodePath = Vec<usize>;

/// Geometry/material pair drawn by a node.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Rc<Geometry>,
    pub material: Rc<Material>,
}

impl Mesh {
    pub fn new(geometry: Rc<Geometry>, material: Rc<Material>) -> Self {
        Self { geometry, material }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    name: String,
    local: Instance,
    world: Instance,
    pub visible: bool,
    mesh: Option<Mesh>,
    children: Vec<SceneNode>,
    handles: BTreeMap<String, NodePath>,
}

/// Count of distinct shared resources referenced by a subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResourceStats {
    pub geometries: usize,
    pub materials: usize,
}

impl SceneNode {
    /// A node without payload that only groups children.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local: Instance::default(),
            world: Instance::default(),
            visible: true,
            mesh: None,
            children: Vec::new(),
            handles: BTreeMap::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, geometry: &Rc<Geometry>, material: &Rc<Material>) -> Self {
        let mut node = Self::group(name);
        node.mesh = Some(Mesh::new(geometry.clone(), material.clone()));
        node
    }

    pub fn with_transform(mut self, instance: Instance) -> Self {
        self.local = instance;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Swaps the payload. The previous geometry/material are released when
    /// no other node shares them.
    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = Some(mesh);
    }

    pub fn get_local_transform(&self) -> &Instance {
        &self.local
    }

    pub fn set_local_transform(&mut self, instance: Instance) {
        self.local = instance;
    }

    pub fn set_local_transform_with(&mut self, mutation: &mut dyn FnMut(&mut Instance)) {
        mutation(&mut self.local);
    }

    /// The world transform cached by the last [`Self::update_world_transforms`].
    pub fn get_world_transform(&self) -> &Instance {
        &self.world
    }

    pub fn get_children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn get_child_mut(&mut self, idx: usize) -> Option<&mut SceneNode> {
        self.children.get_mut(idx)
    }

    /// Appends `child` and hoists its handles into this node's registry.
    ///
    /// Returns the index of the new child.
    pub fn add_child(&mut self, mut child: SceneNode) -> usize {
        let idx = self.children.len();
        for (name, path) in std::mem::take(&mut child.handles) {
            let mut hoisted = Vec::with_capacity(path.len() + 1);
            hoisted.push(idx);
            hoisted.extend(path);
            self.insert_handle(name, hoisted);
        }
        self.children.push(child);
        idx
    }

    /// Registers this node itself under `name`.
    pub fn register(mut self, name: impl Into<String>) -> Self {
        self.insert_handle(name.into(), Vec::new());
        self
    }

    fn insert_handle(&mut self, name: String, path: NodePath) {
        if self.handles.contains_key(&name) {
            warn!(
                "Handle `{}` is already registered under `{}`, keeping the first registration.",
                name, self.name
            );
            return;
        }
        self.handles.insert(name, path);
    }

    pub fn handle(&self, name: &str) -> Option<&NodePath> {
        self.handles.get(name)
    }

    pub fn handles(&self) -> impl Iterator<Item = (&str, &NodePath)> {
        self.handles.iter().map(|(name, path)| (name.as_str(), path))
    }

    pub fn node(&self, path: &[usize]) -> Option<&SceneNode> {
        path.iter()
            .try_fold(self, |node, &idx| node.children.get(idx))
    }

    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut SceneNode> {
        path.iter()
            .try_fold(self, |node, &idx| node.children.get_mut(idx))
    }

    /// Resolves a path previously taken from the registry.
    pub fn resolve_mut(&mut self, handle: &str, path: &[usize]) -> Result<&mut SceneNode, SceneError> {
        self.node_mut(path)
            .ok_or_else(|| SceneError::LookupFailure(handle.to_string()))
    }

    pub fn lookup(&self, handle: &str) -> Result<&SceneNode, SceneError> {
        self.handles
            .get(handle)
            .and_then(|path| self.node(path))
            .ok_or_else(|| SceneError::LookupFailure(handle.to_string()))
    }

    pub fn lookup_mut(&mut self, handle: &str) -> Result<&mut SceneNode, SceneError> {
        let path = self
            .handles
            .get(handle)
            .cloned()
            .ok_or_else(|| SceneError::LookupFailure(handle.to_string()))?;
        self.resolve_mut(handle, &path)
    }

    /// Composes local transforms from this node down `path`.
    pub fn world_transform_of(&self, path: &[usize]) -> Option<Instance> {
        let mut node = self;
        let mut transform = self.local;
        for &idx in path {
            node = node.children.get(idx)?;
            transform = transform * node.local;
        }
        Some(transform)
    }

    /// Recomputes the cached world transforms of this subtree.
    pub fn update_world_transforms(&mut self, parents_world_transform: &Instance) {
        self.world = parents_world_transform * &self.local;
        let world = self.world;
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world);
        }
    }

    pub fn update_world_transform_all(&mut self) {
        self.update_world_transforms(&Instance::default());
    }

    /**
     * Creates an independent instance of this subtree.
     *
     * Transforms are copied, geometry and materials are shared. Handles are
     * not carried over so a registry never points at two nodes.
     */
    pub fn clone_instance(&self) -> SceneNode {
        let mut clone = self.clone();
        clone.strip_handles();
        clone
    }

    fn strip_handles(&mut self) {
        self.handles.clear();
        self.children.iter_mut().for_each(SceneNode::strip_handles);
    }

    /// Depth-first traversal handing each node together with its world transform.
    pub fn visit(&self, f: &mut dyn FnMut(&SceneNode, &Instance)) {
        self.visit_from(&Instance::default(), f);
    }

    fn visit_from(&self, parent: &Instance, f: &mut dyn FnMut(&SceneNode, &Instance)) {
        let world = parent * &self.local;
        f(self, &world);
        for child in &self.children {
            child.visit_from(&world, f);
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// All descendants (including `self`) named `name`, in depth-first order.
    pub fn find_all(&self, name: &str) -> Vec<&SceneNode> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a SceneNode>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_named(name, found);
        }
    }

    pub fn find_child(&self, name: &str) -> Option<&SceneNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Distinct geometries and materials referenced by this subtree.
    pub fn resource_stats(&self) -> ResourceStats {
        let mut geometries: HashSet<*const Geometry> = HashSet::new();
        let mut materials: HashSet<*const Material> = HashSet::new();
        self.visit(&mut |node, _| {
            if let Some(mesh) = &node.mesh {
                geometries.insert(Rc::as_ptr(&mesh.geometry));
                materials.insert(Rc::as_ptr(&mesh.material));
            }
        });
        ResourceStats {
            geometries: geometries.len(),
            materials: materials.len(),
        }
    }

    /// Drops every child, payload and handle. Calling it again is a no-op.
    pub fn dispose(&mut self) {
        self.children.clear();
        self.mesh = None;
        self.handles.clear();
    }
}
