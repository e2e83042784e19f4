//! Simulated light sensor and its bar indicator.

use std::rc::Rc;

use cgmath::{InnerSpace, Vector3};
use log::{debug, error};

use crate::{
    config::{Configuration, LightSensorConfig},
    controllers::{find_handle, resolve},
    data_structures::scene_graph::{Mesh, NodePath, SceneNode},
    error::SceneError,
    structures::{
        light_sensor::{indicator_extent, indicator_geometry, indicator_material},
        LIGHT_SENSOR, LIGHT_SENSOR_INDICATOR,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

/// A light in the scene as far as the sensor is concerned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightDescriptor {
    pub kind: LightKind,
    pub intensity: f32,
    pub position: Vector3<f32>,
}

impl LightDescriptor {
    pub fn new(kind: LightKind, intensity: f32, position: Vector3<f32>) -> Self {
        Self {
            kind,
            intensity,
            position,
        }
    }

    /// Light reaching `point`, before any shading.
    fn contribution(&self, point: Vector3<f32>) -> f32 {
        match self.kind {
            LightKind::Directional => self.intensity * 0.5,
            LightKind::Point | LightKind::Spot => {
                self.intensity / (self.position - point).magnitude2().max(1.0)
            }
        }
    }
}

/// Last reading shown by the indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightSensorState {
    pub value: f32,
}

pub struct LightSensorSimulator {
    sensor: LightSensorConfig,
    sensor_path: Option<NodePath>,
    indicator_path: Option<NodePath>,
    state: LightSensorState,
}

impl LightSensorSimulator {
    pub fn new(root: &SceneNode, config: &Configuration) -> Self {
        Self {
            sensor: config.light_sensor.clone(),
            sensor_path: find_handle(root, LIGHT_SENSOR),
            indicator_path: find_handle(root, LIGHT_SENSOR_INDICATOR),
            state: LightSensorState {
                value: config.light_sensor.sensor_value.clamp(0.0, 1.0),
            },
        }
    }

    pub fn state(&self) -> LightSensorState {
        self.state
    }

    pub fn value(&self) -> f32 {
        self.state.value
    }

    /**
     * Sums the light reaching `sensor_position`, clamped to `[0, 1]`.
     *
     * Directional lights contribute half their intensity, point and spot
     * lights fall off with the squared distance (never amplified below one
     * unit). An extended net halves the running sum after every light, so
     * earlier lights are attenuated more than later ones.
     */
    pub fn compute_intensity(
        lights: &[LightDescriptor],
        sensor_position: Vector3<f32>,
        net_extended: bool,
    ) -> f32 {
        let mut total = 0.0;
        for light in lights {
            total += light.contribution(sensor_position);
            if net_extended {
                total *= 0.5;
            }
        }
        total.clamp(0.0, 1.0)
    }

    /// World position of the sensor, read from the tree.
    pub fn sensor_position(&self, root: &SceneNode) -> Result<Vector3<f32>, SceneError> {
        self.sensor_path
            .as_deref()
            .and_then(|path| root.world_transform_of(path))
            .map(|transform| transform.position)
            .ok_or_else(|| SceneError::LookupFailure(LIGHT_SENSOR.to_string()))
    }

    /// Shows `value` (clamped to `[0, 1]`) on the indicator.
    ///
    /// The bar gets a new geometry of the matching height and a new material
    /// with the matching glow; the previous ones are released once no longer
    /// shared.
    pub fn update_indicator(&mut self, root: &mut SceneNode, value: f32) -> Result<(), SceneError> {
        let value = value.clamp(0.0, 1.0);
        let indicator = resolve(root, LIGHT_SENSOR_INDICATOR, self.indicator_path.as_deref())?;

        let (height, y) = indicator_extent(&self.sensor, value);
        let geometry = Rc::new(
            indicator_geometry(&self.sensor, height)
                .inspect_err(|e| error!("Could not rebuild the light indicator: {}", e))?,
        );
        let material = Rc::new(indicator_material(&self.sensor, value));
        indicator.set_mesh(Mesh::new(geometry, material));
        indicator.set_local_transform_with(&mut |instance| instance.position.y = y);

        self.state.value = value;
        Ok(())
    }

    /// One sensing step: read the sensor position, sum the lights and show the result.
    pub fn update(
        &mut self,
        root: &mut SceneNode,
        lights: &[LightDescriptor],
        net_extended: bool,
    ) -> Result<f32, SceneError> {
        let position = self
            .sensor_position(root)
            .inspect_err(|e| error!("{}", e))?;
        let value = Self::compute_intensity(lights, position, net_extended);
        debug!("Light sensor reads {:.3} from {} lights", value, lights.len());
        self.update_indicator(root, value)?;
        Ok(value)
    }
}
