//! Scripted lifecycle sequences from cold start to steady state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use adsched_core::{
    AdScheduler, InventorySource, Phase, PresentationSurface, SchedulerConfig, Time,
};

const TTL: Duration = Duration::from_secs(600);
const MIN_INTERVAL: Duration = Duration::from_secs(600);

struct RecordingSource {
    fetches: Arc<AtomicU64>,
}

impl InventorySource for RecordingSource {
    fn begin_fetch(&mut self) {
        self.fetches.fetch_add(1, Ordering::SeqCst);
    }
}

struct RecordingSurface {
    shown: Arc<std::sync::Mutex<Vec<String>>>,
}

impl PresentationSurface<String> for RecordingSurface {
    fn present(&mut self, unit: &String) {
        self.shown.lock().unwrap().push(unit.clone());
    }
}

fn make_scheduler(
    fetches: &Arc<AtomicU64>,
) -> AdScheduler<String, RecordingSource, RecordingSurface> {
    AdScheduler::new(
        RecordingSource {
            fetches: Arc::clone(fetches),
        },
        SchedulerConfig::new(TTL, MIN_INTERVAL),
    )
}

fn make_surface(shown: &Arc<std::sync::Mutex<Vec<String>>>) -> RecordingSurface {
    RecordingSurface {
        shown: Arc::clone(shown),
    }
}

#[test]
fn cold_start_load_then_foreground_presents_once() {
    // request_load at t=0 → success at t=1 → foreground at t=2:
    // exactly one present, machine in Presenting.
    let fetches = Arc::new(AtomicU64::new(0));
    let shown = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut sched = make_scheduler(&fetches);

    sched.request_load(Time::ZERO);
    assert_eq!(sched.phase(Time::ZERO), Phase::FetchInFlight);

    sched
        .on_load_succeeded("launch-ad".to_string(), Time::from_secs(1))
        .unwrap();
    assert_eq!(sched.phase(Time::from_secs(1)), Phase::Ready);

    sched.on_foreground(make_surface(&shown), Time::from_secs(2));
    assert_eq!(*shown.lock().unwrap(), vec!["launch-ad".to_string()]);
    assert_eq!(sched.phase(Time::from_secs(2)), Phase::Presenting);
    assert!(sched.is_presenting());
}

#[test]
fn cold_start_foreground_first_primes_then_presents_on_next_resume() {
    // The common path on a fresh process: the first foreground has
    // nothing to show and primes a fetch; the next one presents.
    let fetches = Arc::new(AtomicU64::new(0));
    let shown = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut sched = make_scheduler(&fetches);

    sched.on_foreground(make_surface(&shown), Time::ZERO);
    assert!(shown.lock().unwrap().is_empty());
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    sched
        .on_load_succeeded("resume-ad".to_string(), Time::from_secs(5))
        .unwrap();
    sched.on_foreground(make_surface(&shown), Time::from_secs(40));
    assert_eq!(*shown.lock().unwrap(), vec!["resume-ad".to_string()]);
}

#[test]
fn full_cycle_show_dismiss_reprime_show_again() {
    let fetches = Arc::new(AtomicU64::new(0));
    let shown = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut sched = make_scheduler(&fetches);

    sched.request_load(Time::ZERO);
    sched
        .on_load_succeeded("first".to_string(), Time::from_secs(1))
        .unwrap();
    sched.on_foreground(make_surface(&shown), Time::from_secs(2));
    sched.on_presentation_started(Time::from_secs(2)).unwrap();
    sched
        .on_presentation_dismissed(Time::from_secs(20))
        .unwrap();

    // Dismissal primed the next fetch immediately.
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert_eq!(sched.phase(Time::from_secs(20)), Phase::FetchInFlight);

    sched
        .on_load_succeeded("second".to_string(), Time::from_secs(21))
        .unwrap();

    // Inside the frequency window: Ready but suppressed.
    let suppressed_at = Time::from_secs(120);
    sched.on_foreground(make_surface(&shown), suppressed_at);
    assert_eq!(shown.lock().unwrap().len(), 1);

    // Past the window: the held unit is shown. Its age (~600 s from
    // t=21) is still under the TTL.
    let open_at = Time::from_secs(20).advanced_by(MIN_INTERVAL);
    sched.on_foreground(make_surface(&shown), open_at);
    assert_eq!(
        *shown.lock().unwrap(),
        vec!["first".to_string(), "second".to_string()]
    );

    let stats = sched.stats();
    assert_eq!(stats.fetches_dispatched, 2);
    assert_eq!(stats.presentations_dispatched, 2);
    assert_eq!(stats.impressions_confirmed, 1);
}

#[test]
fn stale_inventory_on_foreground_fetches_instead_of_presenting() {
    // Inventory loaded at t=0, foreground at TTL+1: no present, one
    // fresh fetch.
    let fetches = Arc::new(AtomicU64::new(0));
    let shown = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut sched = make_scheduler(&fetches);

    sched.request_load(Time::ZERO);
    sched
        .on_load_succeeded("stale-to-be".to_string(), Time::ZERO)
        .unwrap();

    let late = Time::ZERO.advanced_by(TTL + Duration::from_secs(1));
    sched.on_foreground(make_surface(&shown), late);
    assert!(shown.lock().unwrap().is_empty());
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert_eq!(sched.stats().inventory_expired, 1);
}

#[test]
fn surface_is_recaptured_even_while_presenting() {
    // "Always track most recent foreground surface": the replacement
    // surface is the one used for the next presentation after the
    // current one ends.
    let fetches = Arc::new(AtomicU64::new(0));
    let first_shown = Arc::new(std::sync::Mutex::new(Vec::new()));
    let second_shown = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut sched = make_scheduler(&fetches);

    sched.request_load(Time::ZERO);
    sched
        .on_load_succeeded("first".to_string(), Time::ZERO)
        .unwrap();
    sched.on_foreground(make_surface(&first_shown), Time::from_secs(1));
    assert_eq!(first_shown.lock().unwrap().len(), 1);

    // New surface arrives mid-presentation; captured, not presented on.
    sched.on_foreground(make_surface(&second_shown), Time::from_secs(2));
    assert!(second_shown.lock().unwrap().is_empty());

    sched
        .on_presentation_dismissed(Time::from_secs(10))
        .unwrap();
    sched
        .on_load_succeeded("second".to_string(), Time::from_secs(11))
        .unwrap();
    let open_at = Time::from_secs(10).advanced_by(MIN_INTERVAL);

    // The most recent surface (from open_at's foreground) presents.
    let third_shown = Arc::new(std::sync::Mutex::new(Vec::new()));
    sched.on_foreground(make_surface(&third_shown), open_at);
    assert_eq!(*third_shown.lock().unwrap(), vec!["second".to_string()]);
    assert_eq!(first_shown.lock().unwrap().len(), 1);
}
