// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::layers::BaseLayer;
use crate::surface::{MapEngine, MapHandle, MapUnavailable};
use common::position::Position;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Observable trace of everything a [`RecordingMapEngine`] was asked to do.
#[derive(Default)]
pub struct EngineState {
    ops: Mutex<Vec<String>>,
    attached: Mutex<Vec<String>>,
    creates: AtomicUsize,
    destroys: AtomicUsize,
    fail_creates: AtomicUsize,
}

impl EngineState {
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }

    pub fn ops_starting_with(&self, prefix: &str) -> usize {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| op.starts_with(prefix))
            .count()
    }

    /// Keys of the base layers currently attached to the map.
    pub fn attached_layers(&self) -> Vec<String> {
        self.attached.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::Relaxed)
    }

    pub fn destroys(&self) -> usize {
        self.destroys.load(Ordering::Relaxed)
    }

    /// Makes the next `count` create calls fail with [`MapUnavailable`].
    pub fn fail_next_creates(&self, count: usize) {
        self.fail_creates.store(count, Ordering::Relaxed);
    }

    fn record(&self, op: String) {
        self.ops.lock().unwrap().push(op);
    }
}

/// Map engine double that records operations instead of rendering.
#[derive(Default)]
pub struct RecordingMapEngine {
    state: Arc<EngineState>,
}

impl RecordingMapEngine {
    pub fn new() -> Self {
        RecordingMapEngine::default()
    }

    /// Handle for inspecting recorded operations after the engine was moved.
    pub fn state(&self) -> Arc<EngineState> {
        Arc::clone(&self.state)
    }
}

impl MapEngine for RecordingMapEngine {
    fn create_map(
        &self,
        container: &str,
        center: &Position,
        zoom: u8,
    ) -> Result<Box<dyn MapHandle>, MapUnavailable> {
        let remaining = self.state.fail_creates.load(Ordering::Relaxed);
        if remaining > 0 {
            self.state
                .fail_creates
                .store(remaining - 1, Ordering::Relaxed);
            return Err(MapUnavailable {
                reason: "no renderer".to_string(),
            });
        }
        self.state.record(format!(
            "create({container},{},{},z{zoom})",
            center.latitude, center.longitude
        ));
        self.state.creates.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(RecordingMap {
            state: Arc::clone(&self.state),
        }))
    }
}

struct RecordingMap {
    state: Arc<EngineState>,
}

impl MapHandle for RecordingMap {
    fn attach_base_layer(&mut self, layer: &BaseLayer) {
        self.state.record(format!("attach({})", layer.key));
        self.state.attached.lock().unwrap().push(layer.key.clone());
    }

    fn detach_base_layers(&mut self) {
        self.state.record("detach".to_string());
        self.state.attached.lock().unwrap().clear();
    }

    fn place_marker(&mut self, position: &Position) {
        self.state.record(format!(
            "marker({},{})",
            position.latitude, position.longitude
        ));
    }

    fn move_marker(&mut self, position: &Position) {
        self.state.record(format!(
            "marker_move({},{})",
            position.latitude, position.longitude
        ));
    }

    fn place_proximity(&mut self, position: &Position, radius_m: f64) {
        self.state.record(format!(
            "proximity({},{},{radius_m})",
            position.latitude, position.longitude
        ));
    }

    fn move_proximity(&mut self, position: &Position) {
        self.state.record(format!(
            "proximity_move({},{})",
            position.latitude, position.longitude
        ));
    }

    fn bind_popup(&mut self, summary: &str) {
        self.state.record(format!("popup({summary})"));
    }

    fn pan_to(&mut self, position: &Position) {
        self.state
            .record(format!("pan({},{})", position.latitude, position.longitude));
    }

    fn destroy(self: Box<Self>) {
        self.state.record("destroy".to_string());
        self.state.destroys.fetch_add(1, Ordering::Relaxed);
    }
}
