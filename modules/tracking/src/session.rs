// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::LocationSample;
use common::snapshot::TrackingSnapshot;
use common::vehicle::{InvalidVehicleId, VehicleId, VehicleStatus};
use location::{FetchError, LocationFetcher, VehicleReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Internal messages of a [`TrackingSession`], produced by its polling timer
/// and by the fetch tasks it spawns.
///
/// The session never mutates its own state from a spawned task. All messages
/// travel back through one channel and are applied by whoever drives the
/// session, so state changes stay on a single task.
#[derive(Debug)]
pub enum SessionMsg {
    /// The polling timer fired; a fetch should be issued for the current target.
    Tick,

    /// A fetch finished. `target` and `seq` identify the request as it was
    /// issued, so outdated completions can be recognized and discarded.
    Fetched {
        target: VehicleId,
        seq: u64,
        outcome: Result<VehicleReport, FetchError>,
    },
}

/// State machine of one vehicle tracking session.
///
/// A session is either idle or actively following exactly one vehicle. While
/// active it owns the repeating polling timer, the most recent successful
/// report and the current error, if any. Starting a new target replaces the
/// timer, never stacks a second one; stopping returns the session to idle and
/// is idempotent.
///
/// Fetches are issued tagged with the target and a monotonically increasing
/// request number. A completion is only applied when it still matches the
/// current target and is the most recent request issued, so responses of
/// superseded targets or overtaken ticks can never resurface.
pub struct TrackingSession {
    fetcher: Arc<dyn LocationFetcher>,
    poll_interval: Duration,
    messages: UnboundedSender<SessionMsg>,
    target: Option<VehicleId>,
    status: Option<VehicleStatus>,
    location: Option<LocationSample>,
    error: Option<String>,
    poll_task: Option<tokio::task::JoinHandle<()>>,
    request_seq: u64,
}

impl TrackingSession {
    /// Creates an idle session.
    ///
    /// `messages` is the sending half of the channel the session reports
    /// [`SessionMsg`]s on; the receiving half stays with the caller, which
    /// feeds ticks back via [`TrackingSession::tick`] and completions via
    /// [`TrackingSession::apply_completion`].
    pub fn new(
        fetcher: Arc<dyn LocationFetcher>,
        poll_interval: Duration,
        messages: UnboundedSender<SessionMsg>,
    ) -> Self {
        TrackingSession {
            fetcher,
            poll_interval,
            messages,
            target: None,
            status: None,
            location: None,
            error: None,
            poll_task: None,
            request_seq: 0,
        }
    }

    /// Starts tracking the vehicle named by `raw_id`.
    ///
    /// The input is normalized first; an id that is empty after trimming is
    /// rejected without touching the running session and without any network
    /// traffic. On success any previous target is dropped: sample and error
    /// are cleared, the old timer is cancelled and a fresh one is scheduled.
    /// The new timer fires immediately, so the first fetch needs no extra
    /// trigger, and then keeps firing at the configured interval.
    pub fn start(&mut self, raw_id: &str) -> Result<(), InvalidVehicleId> {
        let id = VehicleId::parse(raw_id)?;
        self.cancel_poll_task();
        self.target = Some(id);
        self.status = None;
        self.location = None;
        self.error = None;
        self.schedule_polling();
        Ok(())
    }

    /// Stops tracking and returns the session to idle.
    ///
    /// Cancels the polling timer and discards target, sample and error.
    /// Calling stop on an idle session is a no-op. Returns whether the
    /// session was active before the call.
    pub fn stop(&mut self) -> bool {
        let was_active = self.target.is_some();
        self.cancel_poll_task();
        self.target = None;
        self.status = None;
        self.location = None;
        self.error = None;
        was_active
    }

    /// Issues one fetch for the current target.
    ///
    /// Does nothing while idle, which also covers timer messages that were
    /// already queued when the session got stopped. The fetch runs as its own
    /// task and reports back as [`SessionMsg::Fetched`]; overlapping fetches
    /// are allowed, ordering is resolved in [`TrackingSession::apply_completion`].
    pub fn tick(&mut self) {
        let Some(target) = self.target.clone() else {
            return;
        };
        self.request_seq += 1;
        let seq = self.request_seq;
        let fetcher = self.fetcher.clone();
        let messages = self.messages.clone();
        tokio::spawn(async move {
            let outcome = fetcher.fetch(&target).await;
            let _ = messages.send(SessionMsg::Fetched {
                target,
                seq,
                outcome,
            });
        });
    }

    /// Applies a finished fetch to the session state.
    ///
    /// The completion is discarded when the session no longer tracks `target`
    /// or when a newer request has been issued since; in that case nothing
    /// changes and `None` is returned. An applied success stores status and
    /// location and clears the error. An applied failure stores the error
    /// message and drops status and location, so a failure can never be shown
    /// next to an outdated position.
    ///
    /// Returns the snapshot to publish when the completion was applied.
    pub fn apply_completion(
        &mut self,
        target: VehicleId,
        seq: u64,
        outcome: Result<VehicleReport, FetchError>,
    ) -> Option<TrackingSnapshot> {
        if self.target.as_ref() != Some(&target) || seq != self.request_seq {
            debug!("Discarding outdated completion {} for {}", seq, target);
            return None;
        }
        match outcome {
            Ok(report) => {
                self.status = Some(report.status);
                self.location = Some(report.location);
                self.error = None;
            }
            Err(e) => {
                debug!("Fetch for {} failed: {:?}", target, e);
                self.status = None;
                self.location = None;
                self.error = Some(e.to_string());
            }
        }
        Some(self.snapshot())
    }

    /// Returns the current state as an immutable snapshot.
    pub fn snapshot(&self) -> TrackingSnapshot {
        TrackingSnapshot {
            target: self.target.clone(),
            status: self.status.clone(),
            location: self.location,
            error: self.error.clone(),
        }
    }

    /// Returns the currently tracked vehicle, if any.
    pub fn target(&self) -> Option<&VehicleId> {
        self.target.as_ref()
    }

    /// Returns whether the session currently tracks a vehicle.
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    fn schedule_polling(&mut self) {
        let interval = self.poll_interval;
        let messages = self.messages.clone();
        self.poll_task = Some(tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            loop {
                timer.tick().await;
                if messages.send(SessionMsg::Tick).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel_poll_task(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
    }
}

/// The timer must not outlive the session, whatever drops it.
impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.cancel_poll_task();
    }
}
