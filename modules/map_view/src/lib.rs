// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::layers::{BaseLayer, DEFAULT_LAYER_KEY, default_layers};
use crate::surface::{MapEngine, MapHandle};
use async_trait::async_trait;
use common::position::LocationSample;
use common::vehicle::VehicleStatus;
use module_core::{EventKind, Module, ModuleCtx};
use tracing::{debug, error, info, warn};

pub mod layers;
pub mod surface;
pub mod test_helper;

/// Zoom level a freshly created map starts with.
pub const INITIAL_ZOOM: u8 = 15;

/// Radius of the proximity circle drawn around the vehicle, in meters.
pub const PROXIMITY_RADIUS_M: f64 = 100.0;

/// What the adapter currently has on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderState {
    /// No location has arrived yet, nothing to draw.
    Pending,
    /// A map exists and follows the vehicle.
    Live,
    /// The engine refused to create a map, waiting to retry.
    Unavailable,
}

/// Projects tracking snapshots onto a map owned by a [`MapEngine`].
///
/// The map is created lazily on the first snapshot that carries a location
/// and destroyed when tracking stops. Marker, proximity circle and popup
/// are placed once and moved afterwards.
pub struct MapAdapter {
    engine: Box<dyn MapEngine>,
    container: String,
    layers: Vec<BaseLayer>,
    active_layer: usize,
    map: Option<Box<dyn MapHandle>>,
    unavailable: bool,
}

impl MapAdapter {
    pub fn new(engine: Box<dyn MapEngine>, container: &str) -> Self {
        let layers = default_layers();
        let active_layer = layers
            .iter()
            .position(|layer| layer.key == DEFAULT_LAYER_KEY)
            .unwrap_or(0);
        MapAdapter {
            engine,
            container: container.to_string(),
            layers,
            active_layer,
            map: None,
            unavailable: false,
        }
    }

    pub fn render_state(&self) -> RenderState {
        if self.map.is_some() {
            RenderState::Live
        } else if self.unavailable {
            RenderState::Unavailable
        } else {
            RenderState::Pending
        }
    }

    /// Brings the map in line with the latest tracking snapshot.
    ///
    /// Without a location this is a no-op, the map keeps its last content.
    /// A failed map creation is retried on the next call with a location.
    pub fn project(&mut self, location: Option<&LocationSample>, status: Option<&VehicleStatus>) {
        let Some(location) = location else {
            return;
        };
        match &mut self.map {
            Some(map) => {
                let position = location.position();
                map.move_marker(&position);
                map.move_proximity(&position);
                if let Some(status) = status {
                    map.bind_popup(&popup_summary(status));
                }
                map.pan_to(&position);
            }
            None => self.create_map(location, status),
        }
    }

    /// Makes the layer with the given key the only attached base layer.
    ///
    /// An unknown key leaves the current layer in place.
    pub fn set_layer(&mut self, key: &str) {
        let Some(index) = self.layers.iter().position(|layer| layer.key == key) else {
            warn!("Unknown base layer \"{key}\", keeping the current one");
            return;
        };
        self.active_layer = index;
        if let Some(map) = &mut self.map {
            map.detach_base_layers();
            map.attach_base_layer(&self.layers[index]);
            debug!("Base layer switched to \"{key}\"");
        }
    }

    /// Destroys the map if one exists. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if let Some(map) = self.map.take() {
            map.destroy();
        }
        self.unavailable = false;
    }

    fn create_map(&mut self, location: &LocationSample, status: Option<&VehicleStatus>) {
        let position = location.position();
        match self
            .engine
            .create_map(&self.container, &position, INITIAL_ZOOM)
        {
            Ok(mut map) => {
                map.attach_base_layer(&self.layers[self.active_layer]);
                map.place_marker(&position);
                map.place_proximity(&position, PROXIMITY_RADIUS_M);
                if let Some(status) = status {
                    map.bind_popup(&popup_summary(status));
                }
                self.map = Some(map);
                self.unavailable = false;
            }
            Err(e) => {
                if !self.unavailable {
                    warn!("{e}");
                }
                self.unavailable = true;
            }
        }
    }
}

fn popup_summary(status: &VehicleStatus) -> String {
    let mut summary = format!(
        "Bus {} | Driver: {} | Updated: {}",
        status.id,
        status.operator_name,
        status.last_updated_at.format("%H:%M:%S")
    );
    if status.is_stale {
        summary.push_str(" (stale)");
    }
    summary
}

/// Module that keeps a map in sync with the tracking session.
pub struct MapView {
    ctx: ModuleCtx,
    adapter: MapAdapter,
}

impl MapView {
    pub fn new(engine: Box<dyn MapEngine>, container: &str, ctx: ModuleCtx) -> Self {
        MapView {
            ctx,
            adapter: MapAdapter::new(engine, container),
        }
    }
}

#[async_trait]
impl Module for MapView {
    async fn run(&mut self) -> Result<(), ()> {
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => match event.kind {
                            EventKind::QuitEvent => {
                                self.adapter.dispose();
                                run = false;
                            }
                            EventKind::TrackingSnapshotEvent(snapshot) => {
                                if let Some(error) = &snapshot.error {
                                    warn!("Tracking reported: {error}");
                                }
                                self.adapter
                                    .project(snapshot.location.as_ref(), snapshot.status.as_ref());
                            }
                            EventKind::TrackingStoppedEvent => {
                                info!("Tracking stopped, removing the map");
                                self.adapter.dispose();
                            }
                            EventKind::SelectLayerEvent(key) => self.adapter.set_layer(&key),
                            _ => (),
                        },
                        Err(e) => {
                            error!("Failed to receive event in module MapView. Error:{e}");
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
