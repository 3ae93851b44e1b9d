use super::{RebuildScheduler, RebuildTrigger};
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_rebuild_falls_due_after_delay() {
    let start = Instant::now();
    let mut scheduler = RebuildScheduler::default();
    scheduler.schedule(RebuildTrigger::Load, start);

    assert_eq!(scheduler.take_due(start + ms(99)), None);
    assert_eq!(scheduler.take_due(start + ms(100)), Some(RebuildTrigger::Load));
    assert!(!scheduler.is_pending());
    assert_eq!(scheduler.take_due(start + ms(500)), None, "fires only once");
}

#[test]
fn test_navigation_uses_shorter_delay() {
    let start = Instant::now();
    let mut scheduler = RebuildScheduler::default();
    scheduler.schedule(RebuildTrigger::Navigation, start);

    assert_eq!(scheduler.timeout(start), Some(ms(50)));
    assert_eq!(
        scheduler.take_due(start + ms(50)),
        Some(RebuildTrigger::Navigation)
    );
}

#[test]
fn test_burst_coalesces_into_one_rebuild() {
    let start = Instant::now();
    let mut scheduler = RebuildScheduler::new(ms(100), ms(50));

    scheduler.schedule(RebuildTrigger::Load, start);
    scheduler.schedule(RebuildTrigger::Navigation, start + ms(30));
    scheduler.schedule(RebuildTrigger::Navigation, start + ms(60));

    // The first deadline (100ms) has been superseded by the last one (110ms).
    assert_eq!(scheduler.take_due(start + ms(100)), None);
    assert_eq!(
        scheduler.take_due(start + ms(110)),
        Some(RebuildTrigger::Navigation)
    );
    assert_eq!(scheduler.take_due(start + ms(1000)), None);
}

#[test]
fn test_cancel_discards_pending() {
    let start = Instant::now();
    let mut scheduler = RebuildScheduler::default();
    scheduler.schedule(RebuildTrigger::ContentChanged, start);
    scheduler.cancel();

    assert_eq!(scheduler.timeout(start), None);
    assert_eq!(scheduler.take_due(start + ms(200)), None);
}

#[test]
fn test_timeout_saturates_when_overdue() {
    let start = Instant::now();
    let mut scheduler = RebuildScheduler::default();
    assert_eq!(scheduler.timeout(start), None);

    scheduler.schedule(RebuildTrigger::Load, start);
    assert_eq!(scheduler.timeout(start + ms(40)), Some(ms(60)));
    assert_eq!(scheduler.timeout(start + ms(400)), Some(Duration::ZERO));
}
