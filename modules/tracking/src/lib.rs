// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::session::{SessionMsg, TrackingSession};
use async_trait::async_trait;
use common::snapshot::TrackingSnapshot;
use location::LocationFetcher;
use module_core::{EventKind, Module, ModuleCtx};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub mod session;

#[cfg(test)]
mod tests;

/// Polling cadence used when no custom interval is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Module owning the vehicle tracking session.
///
/// Reacts to [`TrackVehicleEvent`](EventKind::TrackVehicleEvent) and
/// [`StopTrackingEvent`](EventKind::StopTrackingEvent) commands, drives the
/// [`TrackingSession`] and publishes every applied state change as a
/// [`TrackingSnapshotEvent`](EventKind::TrackingSnapshotEvent).
pub struct Tracking {
    ctx: ModuleCtx,
    session: TrackingSession,
    messages: mpsc::UnboundedReceiver<SessionMsg>,
}

impl Tracking {
    /// Creates a new tracking module polling through `fetcher` every
    /// `poll_interval`.
    pub fn new(
        fetcher: Arc<dyn LocationFetcher>,
        poll_interval: Duration,
        ctx: ModuleCtx,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Tracking {
            ctx,
            session: TrackingSession::new(fetcher, poll_interval, tx),
            messages: rx,
        }
    }

    fn on_track_vehicle(&mut self, raw_id: &str) {
        match self.session.start(raw_id) {
            Ok(()) => {
                if let Some(target) = self.session.target() {
                    info!("Tracking started for {}", target);
                }
            }
            Err(e) => {
                warn!("Rejected tracking request {:?}: {}", raw_id, e);
                self.publish_snapshot(TrackingSnapshot {
                    target: None,
                    status: None,
                    location: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    fn on_stop_tracking(&mut self) {
        if self.session.stop() {
            info!("Tracking stopped");
            let _ = self.ctx.publish_event(EventKind::TrackingStoppedEvent);
        }
    }

    fn on_session_message(&mut self, msg: SessionMsg) {
        match msg {
            SessionMsg::Tick => self.session.tick(),
            SessionMsg::Fetched {
                target,
                seq,
                outcome,
            } => {
                if let Some(snapshot) = self.session.apply_completion(target, seq, outcome) {
                    self.publish_snapshot(snapshot);
                }
            }
        }
    }

    fn publish_snapshot(&self, snapshot: TrackingSnapshot) {
        let _ = self
            .ctx
            .publish_event(EventKind::TrackingSnapshotEvent(Arc::new(snapshot)));
    }
}

#[async_trait]
impl Module for Tracking {
    async fn run(&mut self) -> Result<(), ()> {
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            match event.kind {
                                EventKind::QuitEvent => {
                                    self.session.stop();
                                    run = false;
                                }
                                EventKind::TrackVehicleEvent(raw_id) => {
                                    self.on_track_vehicle(&raw_id);
                                }
                                EventKind::StopTrackingEvent => {
                                    self.on_stop_tracking();
                                }
                                _ => (),
                            }
                        }
                        Err(e) => {
                            error!("Failed to receive event in module Tracking. Error:{e}");
                        }
                    }
                }
                msg = self.messages.recv() => {
                    if let Some(msg) = msg {
                        self.on_session_message(msg);
                    }
                }
            }
        }
        Ok(())
    }
}
