//! Flow control for one greenhouse session.
//!
//! A [`GreenhouseFlow`] owns an assembled greenhouse together with its three
//! controllers. The host drives it with one [`GreenhouseFlow::on_tick`] per
//! frame and hands it a [`SceneSink`], the collaborator that displays the
//! tree (a renderer, a scene exporter, a test double).
//!
//! # Lifecycle Flow
//!
//! 1. [`GreenhouseFlow::new`] assembles the tree, creates the controllers and attaches the root to the sink
//! 2. The host calls `on_tick` once per frame; each tick advances the shading net, spins the fan, re-reads the light sensor and refreshes world transforms
//! 3. `set_net_state` and the fan controls can be called between ticks
//! 4. [`GreenhouseFlow::teardown`] detaches the root and drops the tree; dropping the flow does the same

use anyhow::Context;
use log::{info, warn};

use crate::{
    config::Configuration,
    controllers::{
        FanRotationController, LightDescriptor, LightSensorSimulator, OnComplete, ShadingNetController,
    },
    data_structures::scene_graph::SceneNode,
    error::SceneError,
    render::Render,
    structures::{assemble, SHADING_NET},
};

/// Initialises `env_logger` once; later calls only report that a logger exists.
pub fn init_logging() {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };
}

/// Receives the assembled tree for display.
pub trait SceneSink {
    /// Called once after assembly with the fully built root.
    fn attach(&mut self, root: &SceneNode);

    /// Called once on teardown, before the tree is dropped.
    fn detach(&mut self);
}

pub struct GreenhouseFlow<S: SceneSink> {
    config: Configuration,
    root: Option<SceneNode>,
    sink: S,
    shading_net: ShadingNetController,
    light_sensor: LightSensorSimulator,
    fan: FanRotationController,
    ticks: u64,
}

impl<S: SceneSink> GreenhouseFlow<S> {
    pub fn new(config: Configuration, mut sink: S) -> anyhow::Result<Self> {
        let root = assemble(&config).context("Could not assemble the greenhouse")?;
        let shading_net = ShadingNetController::new(&root, &config);
        let light_sensor = LightSensorSimulator::new(&root, &config);
        let fan = FanRotationController::new(&root, &config.fan);

        sink.attach(&root);
        info!("Greenhouse flow started with {} nodes", root.node_count());
        Ok(Self {
            config,
            root: Some(root),
            sink,
            shading_net,
            light_sensor,
            fan,
            ticks: 0,
        })
    }

    /// Parses a JSON configuration and starts a flow with it.
    pub fn from_json(json: &str, sink: S) -> anyhow::Result<Self> {
        let config = Configuration::from_json(json)?;
        Self::new(config, sink)
    }

    /**
     * Advances the session by one frame.
     *
     * The controllers run in a fixed order: shading net, fan, light sensor.
     * The sensor sees the net state after this tick's net update. A controller
     * whose node is missing logs the failure and the others still run. After
     * teardown ticks do nothing.
     */
    pub fn on_tick(&mut self, lights: &[LightDescriptor]) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        self.ticks += 1;
        // failures are logged by the controllers
        let _ = self.shading_net.update(root);
        let _ = self.fan.update(root);
        let _ = self
            .light_sensor
            .update(root, lights, self.shading_net.is_extended());
        root.update_world_transform_all();
    }

    /// Rolls the shading net up (`true`) or out (`false`), see [`ShadingNetController::set_state`].
    pub fn set_net_state(&mut self, roll_up: bool, on_complete: Option<OnComplete>) -> Result<(), SceneError> {
        match self.root.as_mut() {
            Some(root) => self.shading_net.set_state(root, roll_up, on_complete),
            None => {
                warn!("Shading net requested after teardown");
                Err(SceneError::LookupFailure(SHADING_NET.to_string()))
            }
        }
    }

    pub fn fan(&mut self) -> &mut FanRotationController {
        &mut self.fan
    }

    pub fn shading_net(&self) -> &ShadingNetController {
        &self.shading_net
    }

    pub fn light_sensor(&self) -> &LightSensorSimulator {
        &self.light_sensor
    }

    /// The assembled tree, `None` after teardown.
    pub fn root(&self) -> Option<&SceneNode> {
        self.root.as_ref()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_torn_down(&self) -> bool {
        self.root.is_none()
    }

    /// Instanced draw batches for the current tree.
    pub fn on_render(&self) -> Render<'_> {
        match &self.root {
            Some(root) => Render::collect(root),
            None => Render::None,
        }
    }

    /// Detaches and drops the tree. Later calls are no-ops.
    pub fn teardown(&mut self) {
        if let Some(mut root) = self.root.take() {
            self.sink.detach();
            let stats = root.resource_stats();
            root.dispose();
            info!(
                "Greenhouse flow torn down after {} ticks, released {} geometries and {} materials",
                self.ticks, stats.geometries, stats.materials
            );
        }
    }
}

impl<S: SceneSink> Drop for GreenhouseFlow<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
