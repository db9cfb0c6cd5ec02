use keyscope_core::engine::Engine;
use keyscope_core::types::{HighlightCommand, KeyLocation, Platform, RawKeyEvent, TestState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn raw(code: u32, location: KeyLocation) -> RawKeyEvent {
    RawKeyEvent {
        code,
        location,
        modifiers_active: false,
        num_lock_on: false,
        os_text: String::new(),
    }
}

/// Raw events for every key visible in the compact Mac laptop view, as the
/// hardware would deliver them. Entries self-map, so the canonical identity
/// doubles as the raw pair.
fn laptop_events(engine: &Engine) -> Vec<RawKeyEvent> {
    engine
        .entries()
        .iter()
        .filter(|e| e.compact_visible)
        .map(|e| raw(e.identity.code, e.identity.location))
        .collect()
}

#[test]
fn pressing_every_laptop_key_completes_the_test() {
    init_tracing();
    let mut engine = Engine::new(Platform::MacOS, true).expect("layout tables build");
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    engine.set_on_completion(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let events = laptop_events(&engine);
    assert_eq!(events.len(), keyscope_core::MAC_LAPTOP_KEY_COUNT);

    let start = Instant::now();
    for (i, ev) in events.iter().enumerate() {
        let now = start + Duration::from_millis(5 * i as u64);
        match engine.on_raw_key_event(ev, now) {
            HighlightCommand::Matched { expand_layout, .. } => {
                assert!(!expand_layout, "laptop keys never expand the layout")
            }
            other => panic!("laptop key did not match: {other:?}"),
        }
        engine.tick(now);
    }

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(engine.is_complete());

    // Completion flushes the keys still waiting out their confirm delay.
    for entry in engine.entries().iter().filter(|e| e.compact_visible) {
        assert_eq!(entry.state, TestState::Confirmed, "{}", entry.identity);
    }

    // Repeat presses on the finished board never re-fire.
    let later = start + Duration::from_secs(5);
    for ev in &events {
        engine.on_raw_key_event(ev, later);
    }
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn reset_rearms_completion() {
    init_tracing();
    let mut engine = Engine::new(Platform::MacOS, true).expect("layout tables build");
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    engine.set_on_completion(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let events = laptop_events(&engine);
    let start = Instant::now();
    for ev in &events {
        engine.on_raw_key_event(ev, start);
    }
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    let steps = engine.on_reset_requested();
    assert_eq!(steps.len(), events.len());
    assert!(!engine.is_complete());
    assert!(engine
        .entries()
        .iter()
        .all(|e| e.state == TestState::Untested));

    let again = start + Duration::from_secs(10);
    for ev in &events {
        engine.on_raw_key_event(ev, again);
    }
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn missing_one_key_never_completes() {
    init_tracing();
    let mut engine = Engine::new(Platform::MacOS, true).expect("layout tables build");
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    engine.set_on_completion(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let events = laptop_events(&engine);
    let start = Instant::now();
    for ev in events.iter().skip(1) {
        engine.on_raw_key_event(ev, start);
    }
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(!engine.is_complete());
}
