//! Tick-driven controllers acting on an assembled greenhouse.
//!
//! Controllers never hold references into the tree. Each one looks up the
//! child-index path of its node in the root's handle registry once, when it
//! is created, and resolves that path against the root it is handed on every
//! call. A handle that is missing, or a path that no longer resolves, turns
//! the call into a logged no-op returning [`SceneError::LookupFailure`].

use log::{error, warn};

use crate::{
    data_structures::scene_graph::{NodePath, SceneNode},
    error::SceneError,
};

pub mod fan;
pub mod light_sensor;
pub mod shading_net;

pub use fan::FanRotationController;
pub use light_sensor::{LightDescriptor, LightKind, LightSensorSimulator, LightSensorState};
pub use shading_net::{ShadingNetController, ShadingNetState};

/// Callback invoked once a transition has finished.
pub type OnComplete = Box<dyn FnOnce()>;

pub(crate) fn find_handle(root: &SceneNode, handle: &str) -> Option<NodePath> {
    let path = root.handle(handle).cloned();
    if path.is_none() {
        warn!("Handle `{}` is not registered under `{}`", handle, root.name());
    }
    path
}

pub(crate) fn resolve<'a>(
    root: &'a mut SceneNode,
    handle: &str,
    path: Option<&[usize]>,
) -> Result<&'a mut SceneNode, SceneError> {
    let found = match path {
        Some(path) => root.resolve_mut(handle, path),
        None => Err(SceneError::LookupFailure(handle.to_string())),
    };
    found.inspect_err(|e| error!("{}", e))
}
