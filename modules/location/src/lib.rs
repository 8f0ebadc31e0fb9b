// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Location acquisition for tracked vehicles.
//!
//! The [`LocationFetcher`] trait abstracts over the source of vehicle
//! positions, allowing the tracker to work against the live location
//! service, a recorded route or a test double. Every call is one
//! stateless request; retrying and scheduling are the caller's job.

use common::position::LocationSample;
use common::vehicle::{VehicleId, VehicleStatus};
use thiserror::Error;

pub mod http;
pub mod replay;
pub mod test_helper;

/// Fallback message surfaced when a fetch fails without a usable
/// remote-supplied error detail.
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch bus location";

/// Errors that can occur when fetching the position of a vehicle.
///
/// The [`Display`](std::fmt::Display) representation is the message meant for
/// the passenger: remote-supplied messages are surfaced verbatim, everything
/// else collapses to [`GENERIC_FETCH_ERROR`]. The wrapped strings carry the
/// underlying cause for logging.
#[derive(Clone, Debug, Error)]
pub enum FetchError {
    /// The remote service rejected the request with an application-level message.
    #[error("{0}")]
    Remote(String),

    /// The request failed before a response arrived.
    #[error("{}", GENERIC_FETCH_ERROR)]
    Transport(String),

    /// The response body could not be interpreted as a vehicle report.
    #[error("{}", GENERIC_FETCH_ERROR)]
    Decode(String),
}

/// One fully resolved answer from a location source.
///
/// Couples the vehicle's descriptive state with the position it was
/// last seen at. Both parts come from the same response, so they are
/// always consistent with each other.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleReport {
    pub status: VehicleStatus,
    pub location: LocationSample,
}

/// Source of vehicle positions.
///
/// Implementations perform exactly one lookup per call, without retries
/// or caching. The `id` must already be normalized; fetchers do not
/// normalize input.
#[async_trait::async_trait]
pub trait LocationFetcher: Send + Sync {
    /// Fetches the current status and position of the vehicle with the given id.
    async fn fetch(&self, id: &VehicleId) -> Result<VehicleReport, FetchError>;
}
