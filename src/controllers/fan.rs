//! Fan rotor spin.

use std::f32::consts::TAU;

use cgmath::{Rad, Rotation3};
use log::info;

use crate::{
    config::FanConfig,
    controllers::{find_handle, resolve},
    data_structures::scene_graph::{NodePath, SceneNode},
    error::SceneError,
    structures::FAN_ROTOR,
};

pub struct FanRotationController {
    path: Option<NodePath>,
    speed: f32,
    running: bool,
    angle: f32,
}

impl FanRotationController {
    pub fn new(root: &SceneNode, fan: &FanConfig) -> Self {
        Self {
            path: find_handle(root, FAN_ROTOR),
            speed: fan.speed,
            running: fan.running,
            angle: 0.0,
        }
    }

    pub fn start(&mut self) {
        info!("Fan started");
        self.running = true;
    }

    pub fn stop(&mut self) {
        info!("Fan stopped");
        self.running = false;
    }

    /// Radians per tick. Negative values spin the other way.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current spin angle in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Turns the rotor by `speed` about its hub axis when running.
    pub fn update(&mut self, root: &mut SceneNode) -> Result<(), SceneError> {
        if !self.running {
            return Ok(());
        }
        let rotor = resolve(root, FAN_ROTOR, self.path.as_deref())?;
        self.angle = (self.angle + self.speed).rem_euclid(TAU);
        let spin = cgmath::Quaternion::from_angle_y(Rad(self.angle));
        rotor.set_local_transform_with(&mut |instance| instance.rotation = spin);
        Ok(())
    }
}
