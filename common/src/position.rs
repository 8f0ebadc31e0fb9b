// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::serde::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents a geographical coordinate with latitude and longitude.
///
/// The `Position` struct stores a point on Earth in decimal degrees.
/// Latitude values range from -90.0 to 90.0, and longitude values range
/// from -180.0 to 180.0. It is the unit the map surface works with; a
/// [`LocationSample`] adds the capture time on top of it.
///
/// # Example
///
/// ```rust
/// use common::position::Position;
///
/// let pos = Position {
///     latitude: 13.0827,
///     longitude: 80.2707,
/// };
///
/// println!("{:?}", pos);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Creates a new [`Position`] with the given latitude and longitude in decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Position {
            latitude,
            longitude,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Error reported when a coordinate pair is outside the WGS84 value range.
#[derive(Debug, Error, PartialEq)]
#[error("Coordinate out of range: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One position report of the tracked vehicle.
///
/// `captured_at` is the freshness time supplied by the location service for
/// this fix. The service gives no ordering guarantee between consecutive
/// samples, so no monotonicity check is performed here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    latitude: f64,
    longitude: f64,
    #[serde(with = "timestamp")]
    captured_at: DateTime<Utc>,
}

impl LocationSample {
    /// Creates a new [`LocationSample`] with the specified coordinates and capture time.
    ///
    /// # Arguments
    ///
    /// * `latitude` – Latitude in decimal degrees. Positive for northern hemisphere.
    /// * `longitude` – Longitude in decimal degrees. Positive for eastern hemisphere.
    /// * `captured_at` – Freshness timestamp of the fix in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinate`] when the latitude is outside [-90, 90]
    /// or the longitude is outside [-180, 180].
    pub fn new(
        latitude: f64,
        longitude: f64,
        captured_at: &DateTime<Utc>,
    ) -> Result<LocationSample, InvalidCoordinate> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(LocationSample {
            latitude,
            longitude,
            captured_at: *captured_at,
        })
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Returns the latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the freshness timestamp of the fix.
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Projects the sample down to its plain coordinate.
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}
