// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::serde::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported when a raw vehicle identifier is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Vehicle id must not be empty")]
pub struct InvalidVehicleId;

/// Identifier of a tracked vehicle, e.g. a bus registration number.
///
/// A `VehicleId` can only be built through [`VehicleId::parse`], which
/// normalizes the raw input. Two identifiers that differ only in case or
/// surrounding whitespace therefore always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Normalizes `raw` and builds a [`VehicleId`] from it.
    ///
    /// The input is trimmed and uppercased, so `" tn01ab1234 "` and
    /// `"TN01AB1234"` name the same vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidVehicleId`] when nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<VehicleId, InvalidVehicleId> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(InvalidVehicleId);
        }
        Ok(VehicleId(normalized))
    }

    /// Returns the normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive state of the tracked vehicle as reported by the location service.
///
/// # Fields
///
/// - `id` – The normalized identifier of the vehicle.
/// - `operator_name` – Name of the driver or operator on duty.
/// - `last_updated_at` – When the service last heard from the vehicle.
/// - `is_stale` – Staleness flag computed by the service, not by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleStatus {
    pub id: VehicleId,
    pub operator_name: String,
    #[serde(with = "timestamp")]
    pub last_updated_at: DateTime<Utc>,
    pub is_stale: bool,
}

impl VehicleStatus {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
