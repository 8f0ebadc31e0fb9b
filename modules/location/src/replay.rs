// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! [`LocationFetcher`] implementation that replays a recorded route.
//!
//! Meant for demos and development without a reachable location service.
//! Every fetch answers with the next point of the route, cycling back to
//! the start once the route is exhausted.

use crate::{FetchError, LocationFetcher, VehicleReport};
use chrono::Utc;
use common::position::{LocationSample, Position};
use common::vehicle::{VehicleId, VehicleStatus};
use std::io::{Error, ErrorKind};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Operator name reported for replayed routes.
const REPLAY_OPERATOR: &str = "Replay";

/// Serves positions from a fixed route instead of the network.
///
/// The fetcher answers for whatever vehicle id it is asked about, so the
/// tracked target behaves exactly as with the live service.
pub struct ReplayLocationFetcher {
    route: Vec<Position>,
    cursor: AtomicUsize,
}

impl ReplayLocationFetcher {
    /// Creates a new fetcher cycling through `route`.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidData`] when `route` is empty.
    pub fn new(route: &[Position]) -> Result<Self, Error> {
        if route.is_empty() {
            return Err(Error::new(ErrorKind::InvalidData, "route parameter is empty"));
        }
        Ok(ReplayLocationFetcher {
            route: route.to_vec(),
            cursor: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl LocationFetcher for ReplayLocationFetcher {
    async fn fetch(&self, id: &VehicleId) -> Result<VehicleReport, FetchError> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.route.len();
        let point = &self.route[index];
        let now = Utc::now();
        let location = LocationSample::new(point.latitude, point.longitude, &now)
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(VehicleReport {
            status: VehicleStatus {
                id: id.clone(),
                operator_name: REPLAY_OPERATOR.to_string(),
                last_updated_at: now,
                is_stale: false,
            },
            location,
        })
    }
}
