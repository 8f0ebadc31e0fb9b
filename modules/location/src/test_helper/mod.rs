// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{FetchError, LocationFetcher, VehicleReport};
use common::position::LocationSample;
use common::test_helper::vehicle::{get_location, get_status, get_timestamp};
use common::vehicle::VehicleId;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Returns the report the canned test vehicle would be fetched with.
pub fn get_report() -> VehicleReport {
    VehicleReport {
        status: get_status(),
        location: get_location(),
    }
}

/// Returns a report like [`get_report`] but placed at the given coordinate.
pub fn get_report_at(latitude: f64, longitude: f64) -> VehicleReport {
    VehicleReport {
        status: get_status(),
        location: LocationSample::new(latitude, longitude, &get_timestamp()).unwrap(),
    }
}

/// A [`LocationFetcher`] that answers from a prepared script.
///
/// Each fetch pops the next scripted outcome; once the script is empty the
/// fetcher keeps answering with the fallback outcome. All requested ids are
/// recorded so tests can assert what was asked for and how often.
pub struct ScriptedLocationFetcher {
    script: Mutex<VecDeque<Result<VehicleReport, FetchError>>>,
    fallback: Result<VehicleReport, FetchError>,
    requested: Mutex<Vec<VehicleId>>,
}

impl ScriptedLocationFetcher {
    pub fn new(fallback: Result<VehicleReport, FetchError>) -> Self {
        ScriptedLocationFetcher {
            script: Mutex::new(VecDeque::new()),
            fallback,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Queues `outcome` as the answer for the next unanswered fetch.
    pub fn push(&self, outcome: Result<VehicleReport, FetchError>) {
        self.script.lock().unwrap().push_back(outcome);
    }

    /// Returns every id fetched so far, in call order.
    pub fn requested_ids(&self) -> Vec<VehicleId> {
        self.requested.lock().unwrap().clone()
    }

    /// Returns how many fetches were issued.
    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LocationFetcher for ScriptedLocationFetcher {
    async fn fetch(&self, id: &VehicleId) -> Result<VehicleReport, FetchError> {
        self.requested.lock().unwrap().push(id.clone());
        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(outcome) => outcome,
            None => self.fallback.clone(),
        }
    }
}
