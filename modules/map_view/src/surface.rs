// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::layers::BaseLayer;
use common::position::Position;
use thiserror::Error;
use tracing::info;

/// Error reported when a map instance cannot be provided.
#[derive(Clone, Debug, Error)]
#[error("Map engine unavailable: {reason}")]
pub struct MapUnavailable {
    pub reason: String,
}

/// Factory for live map instances.
pub trait MapEngine: Send {
    /// Creates a map inside the named container, centered and zoomed as given.
    fn create_map(
        &self,
        container: &str,
        center: &Position,
        zoom: u8,
    ) -> Result<Box<dyn MapHandle>, MapUnavailable>;
}

/// One live map together with its overlays.
///
/// The adapter guarantees that place operations are called once per map
/// lifetime before the corresponding move operations.
pub trait MapHandle: Send {
    fn attach_base_layer(&mut self, layer: &BaseLayer);
    fn detach_base_layers(&mut self);
    fn place_marker(&mut self, position: &Position);
    fn move_marker(&mut self, position: &Position);
    fn place_proximity(&mut self, position: &Position, radius_m: f64);
    fn move_proximity(&mut self, position: &Position);
    fn bind_popup(&mut self, summary: &str);
    fn pan_to(&mut self, position: &Position);
    fn destroy(self: Box<Self>);
}

/// Map engine that narrates every operation to the log.
///
/// Stands in for a real tile renderer in headless deployments.
#[derive(Default)]
pub struct ConsoleMapEngine;

impl MapEngine for ConsoleMapEngine {
    fn create_map(
        &self,
        container: &str,
        center: &Position,
        zoom: u8,
    ) -> Result<Box<dyn MapHandle>, MapUnavailable> {
        info!(
            "Map created in \"{container}\" at ({}, {}) zoom {zoom}",
            center.latitude, center.longitude
        );
        Ok(Box::new(ConsoleMap))
    }
}

struct ConsoleMap;

impl MapHandle for ConsoleMap {
    fn attach_base_layer(&mut self, layer: &BaseLayer) {
        info!("Base layer attached: {} ({})", layer.key, layer.name);
    }

    fn detach_base_layers(&mut self) {
        info!("Base layers detached");
    }

    fn place_marker(&mut self, position: &Position) {
        info!("Marker placed at ({}, {})", position.latitude, position.longitude);
    }

    fn move_marker(&mut self, position: &Position) {
        info!("Marker moved to ({}, {})", position.latitude, position.longitude);
    }

    fn place_proximity(&mut self, position: &Position, radius_m: f64) {
        info!(
            "Proximity circle of {radius_m}m placed at ({}, {})",
            position.latitude, position.longitude
        );
    }

    fn move_proximity(&mut self, position: &Position) {
        info!(
            "Proximity circle moved to ({}, {})",
            position.latitude, position.longitude
        );
    }

    fn bind_popup(&mut self, summary: &str) {
        info!("Popup text set: {summary}");
    }

    fn pan_to(&mut self, position: &Position) {
        info!("Map panned to ({}, {})", position.latitude, position.longitude);
    }

    fn destroy(self: Box<Self>) {
        info!("Map destroyed");
    }
}
