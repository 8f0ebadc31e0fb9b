use super::*;
use common::test_helper::vehicle::get_vehicle_id;
use location::test_helper::{get_report, get_report_at};

#[tokio::test]
pub async fn start_normalizes_target_and_schedules_polling() {
    let (mut session, _fetcher, mut rx) = create_session(Ok(get_report()));
    session.start(" tn01ab1234 ").unwrap();
    assert!(session.is_active());
    assert_eq!(session.target(), Some(&get_vehicle_id()));
    // The freshly scheduled timer fires immediately.
    let msg = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("No immediate tick after start")
        .unwrap();
    assert!(matches!(msg, SessionMsg::Tick));
}

#[tokio::test]
pub async fn empty_target_is_rejected_without_fetch() {
    let (mut session, fetcher, mut rx) = create_session(Ok(get_report()));
    assert!(session.start("   ").is_err());
    assert!(!session.is_active());
    assert!(session.snapshot().is_idle());
    assert_eq!(fetcher.calls(), 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
pub async fn tick_fetches_the_current_target() {
    let (mut session, fetcher, mut rx) = create_session(Ok(get_report()));
    session.start("TN01AB1234").unwrap();
    session.tick();
    let (target, seq, outcome) = next_completion(&mut rx).await;
    assert_eq!(target, get_vehicle_id());
    assert_eq!(seq, 1);
    assert_eq!(outcome.unwrap(), get_report());
    assert_eq!(fetcher.requested_ids(), vec![get_vehicle_id()]);
}

#[tokio::test]
pub async fn applied_completion_updates_the_sample() {
    let (mut session, _fetcher, mut rx) = create_session(Ok(get_report()));
    session.start("TN01AB1234").unwrap();
    session.tick();
    let (target, seq, outcome) = next_completion(&mut rx).await;
    let snapshot = session
        .apply_completion(target, seq, outcome)
        .expect("Fresh completion must apply");
    assert_eq!(snapshot.target, Some(get_vehicle_id()));
    assert_eq!(snapshot.status, Some(get_report().status));
    assert_eq!(snapshot.location, Some(get_report().location));
    assert_eq!(snapshot.error, None);
}

#[tokio::test]
pub async fn overtaken_completion_is_discarded() {
    let (mut session, fetcher, mut rx) = create_session(Ok(get_report()));
    fetcher.push(Ok(get_report_at(13.0001, 80.0001)));
    fetcher.push(Ok(get_report_at(13.0002, 80.0002)));
    session.start("TN01AB1234").unwrap();
    session.tick();
    session.tick();
    let first = next_completion(&mut rx).await;
    let second = next_completion(&mut rx).await;
    let (stale, latest) = if first.1 < second.1 {
        (first, second)
    } else {
        (second, first)
    };
    assert_eq!(latest.1, 2);

    let applied = latest.2.clone().unwrap();
    let snapshot = session
        .apply_completion(latest.0, latest.1, latest.2)
        .expect("Latest issued request must apply");
    assert_eq!(snapshot.location, Some(applied.location));

    // The older request finishes afterwards and must not overwrite anything.
    assert!(session.apply_completion(stale.0, stale.1, stale.2).is_none());
    assert_eq!(session.snapshot().location, Some(applied.location));
}

#[tokio::test]
pub async fn completion_for_replaced_target_is_discarded() {
    let (mut session, _fetcher, mut rx) = create_session(Ok(get_report()));
    session.start("TN01AB1234").unwrap();
    session.tick();
    let (target, seq, outcome) = next_completion(&mut rx).await;

    session.start("ka05cd6789").unwrap();
    assert!(session.apply_completion(target, seq, outcome).is_none());

    let snapshot = session.snapshot();
    assert_eq!(snapshot.target.unwrap().as_str(), "KA05CD6789");
    assert!(snapshot.status.is_none());
    assert!(snapshot.location.is_none());
}

#[tokio::test]
pub async fn failed_fetch_replaces_sample_with_error() {
    let (mut session, fetcher, mut rx) = create_session(Ok(get_report()));
    session.start("TN01AB1234").unwrap();
    session.tick();
    let (target, seq, outcome) = next_completion(&mut rx).await;
    assert!(session.apply_completion(target, seq, outcome).is_some());
    assert!(session.snapshot().location.is_some());

    fetcher.push(Err(FetchError::Remote("Bus not found".to_string())));
    session.tick();
    let (target, seq, outcome) = next_completion(&mut rx).await;
    let snapshot = session
        .apply_completion(target, seq, outcome)
        .expect("Fresh completion must apply");
    assert_eq!(snapshot.error, Some("Bus not found".to_string()));
    assert!(snapshot.status.is_none());
    assert!(snapshot.location.is_none());
    assert_eq!(snapshot.target, Some(get_vehicle_id()));
}

#[tokio::test]
pub async fn stop_cancels_polling_and_inflight_results() {
    let (mut session, _fetcher, mut rx) = create_session(Ok(get_report()));
    session.start("TN01AB1234").unwrap();
    session.tick();
    let (target, seq, outcome) = next_completion(&mut rx).await;

    assert!(session.stop());
    // The fetch that was in flight during stop resolves into nothing.
    assert!(session.apply_completion(target, seq, outcome).is_none());
    assert!(session.snapshot().is_idle());
    // Stopping an idle session stays a no-op.
    assert!(!session.stop());

    // The timer is cancelled: once drained, the channel stays empty.
    while rx.try_recv().is_ok() {}
    tokio::time::sleep(POLL_INTERVAL * 2).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
pub async fn restart_replaces_the_timer_instead_of_stacking() {
    let (mut session, _fetcher, mut rx) = create_session(Ok(get_report()));
    session.start("TN01AB1234").unwrap();
    session.start("KA05CD6789").unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    let mut ticks = 0;
    while rx.try_recv().is_ok() {
        ticks += 1;
    }
    // One immediate fire per start plus the restarted timer's ticks. Two live
    // timers would roughly double this.
    assert!(ticks <= 5, "Expected a single active timer, got {ticks} ticks");
}
