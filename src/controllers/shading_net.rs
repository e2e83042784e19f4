//! Roll animation of the shading net.
//!
//! Rolling is faked by scaling the net along its length while moving its
//! centre so the edge at `-length / 2` stays put.

use log::{debug, info};

use crate::{
    config::Configuration,
    controllers::{find_handle, resolve, OnComplete},
    data_structures::scene_graph::{NodePath, SceneNode},
    error::SceneError,
    structures::SHADING_NET,
};

/// Progress this close to 1 counts as finished.
const SNAP: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShadingNetState {
    Extended,
    RolledUp,
    /// Moving toward rolled up (`roll_up == true`) or extended.
    Transitioning { roll_up: bool, progress: f32 },
}

pub struct ShadingNetController {
    path: Option<NodePath>,
    state: ShadingNetState,
    speed: f32,
    half_length: f32,
    on_complete: Option<OnComplete>,
}

impl ShadingNetController {
    /// Creates the controller for the net registered in `root`.
    ///
    /// The initial state follows `shading_net.is_rolled_up`.
    pub fn new(root: &SceneNode, config: &Configuration) -> Self {
        let state = if config.shading_net.is_rolled_up {
            ShadingNetState::RolledUp
        } else {
            ShadingNetState::Extended
        };
        Self {
            path: find_handle(root, SHADING_NET),
            state,
            speed: config.shading_net.roll_speed,
            half_length: config.length / 2.0,
            on_complete: None,
        }
    }

    pub fn state(&self) -> ShadingNetState {
        self.state
    }

    /// Progress of the running transition, `None` when at rest.
    pub fn progress(&self) -> Option<f32> {
        match self.state {
            ShadingNetState::Transitioning { progress, .. } => Some(progress),
            _ => None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Whether the net counts as extended for light sensing.
    ///
    /// A transition counts as its target, so a net that started rolling up
    /// already lets the light through.
    pub fn is_extended(&self) -> bool {
        match self.state {
            ShadingNetState::Extended => true,
            ShadingNetState::RolledUp => false,
            ShadingNetState::Transitioning { roll_up, .. } => !roll_up,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, ShadingNetState::Transitioning { .. })
    }

    /**
     * Starts rolling the net up (`roll_up == true`) or out.
     *
     * If the net already rests in the requested state `on_complete` runs
     * right away and nothing is touched. A request toward the target of the
     * running transition keeps its progress and queues its callback behind
     * the pending one, so both run on completion in call order. A request
     * toward the opposite target restarts from the beginning and drops the
     * pending callback without calling it.
     */
    pub fn set_state(
        &mut self,
        root: &mut SceneNode,
        roll_up: bool,
        on_complete: Option<OnComplete>,
    ) -> Result<(), SceneError> {
        let net = resolve(root, SHADING_NET, self.path.as_deref())?;

        match self.state {
            ShadingNetState::RolledUp | ShadingNetState::Extended if self.is_extended() != roll_up => {
                if let Some(callback) = on_complete {
                    callback();
                }
                return Ok(());
            }
            ShadingNetState::Transitioning { roll_up: target, .. } if target == roll_up => {
                self.on_complete = match (self.on_complete.take(), on_complete) {
                    (Some(first), Some(second)) => {
                        let chained: OnComplete = Box::new(move || {
                            first();
                            second();
                        });
                        Some(chained)
                    }
                    (first, second) => first.or(second),
                };
                return Ok(());
            }
            _ => (),
        }

        let half_length = self.half_length;
        net.set_local_transform_with(&mut |instance| {
            if roll_up {
                instance.scale.x = 1.0;
                instance.position.x = 0.0;
            } else {
                instance.scale.x = 0.0;
                instance.position.x = -half_length;
            }
        });
        if !roll_up {
            net.visible = true;
        }

        info!("Shading net starts {}", if roll_up { "rolling up" } else { "extending" });
        self.on_complete = on_complete;
        self.state = ShadingNetState::Transitioning {
            roll_up,
            progress: 0.0,
        };
        Ok(())
    }

    /// Advances a running transition by one tick. Does nothing at rest.
    pub fn update(&mut self, root: &mut SceneNode) -> Result<(), SceneError> {
        let ShadingNetState::Transitioning { roll_up, progress } = self.state else {
            return Ok(());
        };
        let net = resolve(root, SHADING_NET, self.path.as_deref())?;

        let mut progress = (progress + self.speed).min(1.0);
        if 1.0 - progress < SNAP {
            progress = 1.0;
        }
        let scale = if roll_up { 1.0 - progress } else { progress };
        let half_length = self.half_length;
        net.set_local_transform_with(&mut |instance| {
            instance.scale.x = scale;
            instance.position.x = -half_length * (1.0 - scale);
        });
        debug!("Shading net progress {:.3}", progress);

        if progress < 1.0 {
            self.state = ShadingNetState::Transitioning { roll_up, progress };
            return Ok(());
        }

        net.visible = !roll_up;
        self.state = if roll_up {
            ShadingNetState::RolledUp
        } else {
            ShadingNetState::Extended
        };
        info!("Shading net {}", if roll_up { "rolled up" } else { "extended" });
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
        Ok(())
    }
}
