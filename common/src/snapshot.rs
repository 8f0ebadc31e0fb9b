// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::position::LocationSample;
use crate::vehicle::{VehicleId, VehicleStatus};
use serde::{Deserialize, Serialize};

/// Immutable projection of a tracking session, published on the event bus
/// after every state change.
///
/// Consumers never share state with the session; they only ever see these
/// by-value snapshots. `target` is `None` exactly when the session is idle.
/// A snapshot never carries a location next to an error: a failed fetch
/// clears the stored sample before the snapshot is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    pub target: Option<VehicleId>,
    pub status: Option<VehicleStatus>,
    pub location: Option<LocationSample>,
    pub error: Option<String>,
}

impl TrackingSnapshot {
    /// Snapshot of a session that tracks nothing.
    pub fn idle() -> Self {
        TrackingSnapshot {
            target: None,
            status: None,
            location: None,
            error: None,
        }
    }

    /// Returns `true` when the snapshot describes an idle session.
    pub fn is_idle(&self) -> bool {
        self.target.is_none()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
