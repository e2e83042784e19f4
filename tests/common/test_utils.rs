use std::{cell::Cell, rc::Rc};

use greenhouse_ngin::{
    config::Configuration,
    controllers::OnComplete,
    data_structures::scene_graph::SceneNode,
    flow::SceneSink,
};

/// Counts how often the flow talks to its sink.
pub(crate) struct RecordingSink {
    attach_invocations: Rc<Cell<u32>>,
    detach_invocations: Rc<Cell<u32>>,
    attached_nodes: Rc<Cell<usize>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            attach_invocations: Rc::new(Cell::new(0)),
            detach_invocations: Rc::new(Cell::new(0)),
            attached_nodes: Rc::new(Cell::new(0)),
        }
    }

    /// A handle that stays readable after the sink moved into a flow.
    pub fn probe(&self) -> SinkProbe {
        SinkProbe {
            attach_invocations: self.attach_invocations.clone(),
            detach_invocations: self.detach_invocations.clone(),
            attached_nodes: self.attached_nodes.clone(),
        }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSink for RecordingSink {
    fn attach(&mut self, root: &SceneNode) {
        self.attach_invocations.set(self.attach_invocations.get() + 1);
        self.attached_nodes.set(root.node_count());
    }

    fn detach(&mut self) {
        self.detach_invocations.set(self.detach_invocations.get() + 1);
    }
}

pub(crate) struct SinkProbe {
    attach_invocations: Rc<Cell<u32>>,
    detach_invocations: Rc<Cell<u32>>,
    attached_nodes: Rc<Cell<usize>>,
}

impl SinkProbe {
    pub fn attach_invocations(&self) -> u32 {
        self.attach_invocations.get()
    }

    pub fn detach_invocations(&self) -> u32 {
        self.detach_invocations.get()
    }

    pub fn attached_nodes(&self) -> usize {
        self.attached_nodes.get()
    }
}

/// A completion callback that bumps the returned counter.
pub(crate) fn counting_callback() -> (OnComplete, Rc<Cell<u32>>) {
    let counter = Rc::new(Cell::new(0));
    let inner = counter.clone();
    (Box::new(move || inner.set(inner.get() + 1)), counter)
}

/// The reference greenhouse with a smaller planting layout to keep trees small.
pub(crate) fn small_config() -> Configuration {
    let mut config = Configuration::default();
    config.planting.rows = 3;
    config
}

pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {} to be close to {}",
        actual,
        expected
    );
}
