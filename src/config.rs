//! Greenhouse configuration.
//!
//! A [`Configuration`] is fixed for the lifetime of one assembled structure.
//! All fields have defaults matching the reference greenhouse, so a partial
//! JSON document only needs to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Seed used for decorative jitter when none is configured.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub length: f32,
    pub width: f32,
    pub height: f32,
    pub arch_height: f32,
    pub columns: usize,
    /// Informational only. The beam layout is fixed: four frame beams, and
    /// one ridge plus four secondary beams per arch row.
    pub beams: usize,
    pub color: u32,
    pub cover_opacity: f32,
    /// Seed for the irrigation droplet jitter.
    pub seed: u64,
    pub shading_net: ShadingNetConfig,
    pub light_sensor: LightSensorConfig,
    pub fan: FanConfig,
    pub planting: PlantingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingNetConfig {
    pub color: u32,
    pub opacity: f32,
    /// Plane subdivisions per axis.
    pub segments: u32,
    pub is_rolled_up: bool,
    /// Progress added per tick while rolling.
    pub roll_speed: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSensorConfig {
    pub size: f32,
    pub color: u32,
    pub indicator_color: u32,
    /// Initial reading in `[0, 1]`.
    pub sensor_value: f32,
    pub max_height: f32,
    /// Sensor position in structure space. `None` places it at
    /// `(length - 0.5, 0, 1.5 * width)`.
    pub position: Option<[f32; 3]>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    pub blades: u32,
    /// Radians per tick.
    pub speed: f32,
    pub running: bool,
    /// `None` places the fan at `(length / 2 + 3, 10, width / 2)`.
    pub position: Option<[f32; 3]>,
    /// Euler angles (XYZ order) of the whole fan.
    pub rotation: [f32; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantingConfig {
    pub rows: usize,
    pub pillars_per_row: usize,
    pub sprinklers_per_row: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            length: 30.0,
            width: 14.0,
            height: 8.0,
            arch_height: 5.0,
            columns: 8,
            beams: 5,
            color: 0x808080,
            cover_opacity: 0.4,
            seed: DEFAULT_SEED,
            shading_net: ShadingNetConfig::default(),
            light_sensor: LightSensorConfig::default(),
            fan: FanConfig::default(),
            planting: PlantingConfig::default(),
        }
    }
}

impl Default for ShadingNetConfig {
    fn default() -> Self {
        Self {
            color: 0xCCCCCC,
            opacity: 0.8,
            segments: 20,
            is_rolled_up: false,
            roll_speed: 0.05,
        }
    }
}

impl Default for LightSensorConfig {
    fn default() -> Self {
        Self {
            size: 0.15,
            color: 0xc0c0c0,
            indicator_color: 0xFFFF00,
            sensor_value: 0.0,
            max_height: 0.1,
            position: None,
        }
    }
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            blades: 5,
            speed: 0.01,
            running: true,
            position: None,
            rotation: [0.0, std::f32::consts::PI, std::f32::consts::FRAC_PI_2],
        }
    }
}

impl Default for PlantingConfig {
    fn default() -> Self {
        Self {
            rows: 18,
            pillars_per_row: 5,
            sprinklers_per_row: 5,
        }
    }
}

impl Configuration {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Configuration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants every assembled structure relies on.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let positive = [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("arch_height", self.arch_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(GeometryError::invalid(
                    "configuration",
                    format!("{name} must be positive, got {value}"),
                ));
            }
        }
        if self.columns < 2 {
            return Err(GeometryError::invalid(
                "configuration",
                format!("at least 2 columns are required, got {}", self.columns),
            ));
        }
        if !(self.shading_net.roll_speed > 0.0) {
            return Err(GeometryError::invalid(
                "configuration",
                "shading net roll speed must be positive",
            ));
        }
        Ok(())
    }

    /// Distance between neighbouring column lines along the length axis.
    pub fn column_spacing(&self) -> f32 {
        self.length / (self.columns - 1) as f32
    }

    /// Full depth of the structure: three arch rows of `width` each.
    pub fn depth(&self) -> f32 {
        3.0 * self.width
    }

    /// Elevation of the raised corner frame.
    pub fn ridge_height(&self) -> f32 {
        self.height + self.arch_height
    }

    pub fn sensor_position(&self) -> [f32; 3] {
        self.light_sensor
            .position
            .unwrap_or([self.length - 0.5, 0.0, self.width * 1.5])
    }

    pub fn fan_position(&self) -> [f32; 3] {
        self.fan
            .position
            .unwrap_or([self.length / 2.0 + 3.0, 10.0, self.width / 2.0])
    }
}
