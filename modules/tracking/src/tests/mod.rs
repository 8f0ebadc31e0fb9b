use crate::session::{SessionMsg, TrackingSession};
use common::vehicle::VehicleId;
use location::test_helper::ScriptedLocationFetcher;
use location::{FetchError, VehicleReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

const POLL_INTERVAL: Duration = Duration::from_millis(40);

fn create_session(
    fallback: Result<VehicleReport, FetchError>,
) -> (
    TrackingSession,
    Arc<ScriptedLocationFetcher>,
    UnboundedReceiver<SessionMsg>,
) {
    let fetcher = Arc::new(ScriptedLocationFetcher::new(fallback));
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let session = TrackingSession::new(fetcher.clone(), POLL_INTERVAL, tx);
    (session, fetcher, rx)
}

/// Waits for the next finished fetch on the session channel, skipping over
/// queued timer ticks.
async fn next_completion(
    rx: &mut UnboundedReceiver<SessionMsg>,
) -> (VehicleId, u64, Result<VehicleReport, FetchError>) {
    loop {
        let msg = timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("No session message received in time")
            .unwrap();
        if let SessionMsg::Fetched {
            target,
            seq,
            outcome,
        } = msg
        {
            return (target, seq, outcome);
        }
    }
}

pub mod test_session;
