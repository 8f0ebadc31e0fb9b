// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::position::LocationSample;
use crate::vehicle::{VehicleId, VehicleStatus};
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Returns the vehicle id used by tests across the workspace.
pub fn get_vehicle_id() -> VehicleId {
    VehicleId::parse("TN01AB1234").unwrap()
}

/// Returns a fixed capture timestamp so assertions stay reproducible.
pub fn get_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::from_str("2026-08-23T10:15:30.000Z").unwrap()
}

/// Returns a status for [`get_vehicle_id`] as the location service would report it.
pub fn get_status() -> VehicleStatus {
    VehicleStatus {
        id: get_vehicle_id(),
        operator_name: "Kumar".to_string(),
        last_updated_at: get_timestamp(),
        is_stale: false,
    }
}

/// Returns a sample placed in Chennai, matching [`get_status`].
pub fn get_location() -> LocationSample {
    LocationSample::new(13.0827, 80.2707, &get_timestamp()).unwrap()
}
