// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! [`LocationFetcher`] implementation backed by the HTTP location service.
//!
//! The service is queried with `GET <base>/<vehicleId>` and answers with a
//! JSON body wrapping the vehicle report. Non-success answers may carry a
//! human-readable `error` field, which is surfaced verbatim.

use crate::{FetchError, GENERIC_FETCH_ERROR, LocationFetcher, VehicleReport};
use chrono::{DateTime, Utc};
use common::position::LocationSample;
use common::vehicle::{VehicleId, VehicleStatus};
use serde::Deserialize;
use tracing::debug;

/// Fetches vehicle reports from the remote location service.
///
/// Holds a reusable [`reqwest::Client`] with connection pooling. No request
/// timeout is configured; a slow answer only delays the tick it belongs to,
/// the polling cadence is not affected.
pub struct HttpLocationFetcher {
    /// Reusable HTTP client.
    http: reqwest::Client,

    /// Base URL of the location service, without a trailing slash.
    base_url: String,
}

impl HttpLocationFetcher {
    /// Creates a new fetcher that queries the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the HTTP client could not
    /// be initialized.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(HttpLocationFetcher {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl LocationFetcher for HttpLocationFetcher {
    async fn fetch(&self, id: &VehicleId) -> Result<VehicleReport, FetchError> {
        let url = format!("{}/{}", self.base_url, id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string());
            debug!("Location service answered {} for {}: {}", status, id, message);
            return Err(FetchError::Remote(message));
        }
        let envelope = serde_json::from_slice::<ReportBody>(&body)
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!(
            "Fetched report for {}: ({}, {})",
            id, envelope.bus.location.latitude, envelope.bus.location.longitude
        );
        envelope.bus.try_into()
    }
}

/// Success body of the location service, `{"bus": {...}}`.
#[derive(Debug, Deserialize)]
struct ReportBody {
    bus: WireReport,
}

/// Error body of the location service. The `error` field is optional;
/// services answering with bare status codes still map to the generic message.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReport {
    bus_number: String,
    driver_name: String,
    last_updated: DateTime<Utc>,
    #[serde(default)]
    is_stale: bool,
    location: WirePoint,
}

#[derive(Debug, Deserialize)]
struct WirePoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<WireReport> for VehicleReport {
    type Error = FetchError;

    fn try_from(wire: WireReport) -> Result<Self, Self::Error> {
        let id =
            VehicleId::parse(&wire.bus_number).map_err(|e| FetchError::Decode(e.to_string()))?;
        let location = LocationSample::new(
            wire.location.latitude,
            wire.location.longitude,
            &wire.last_updated,
        )
        .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(VehicleReport {
            status: VehicleStatus {
                id,
                operator_name: wire.driver_name,
                last_updated_at: wire.last_updated,
                is_stale: wire.is_stale,
            },
            location,
        })
    }
}
