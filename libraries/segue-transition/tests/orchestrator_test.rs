//! Integration tests for the transition orchestrator
//!
//! All tests run on a paused clock, so animation waits complete instantly
//! while keeping their relative timing.

mod common;

use common::{full_loader, harness, journal, MockLoader, MockTrack};
use segue_core::{PlayMode, Presentation, Rgba, TrackId, TrackMetadata, UNKNOWN_TITLE};
use segue_transition::{TransitionEvent, TransitionOutcome, TransitionPhase};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

fn track(outcome: &TransitionOutcome) -> &str {
    outcome.track().map_or("-", TrackId::as_str)
}

fn position(entries: &[String], entry: &str) -> usize {
    entries
        .iter()
        .position(|e| e == entry)
        .unwrap_or_else(|| panic!("{} not in journal: {:?}", entry, entries))
}

fn last_position(entries: &[String], entry: &str) -> usize {
    entries
        .iter()
        .rposition(|e| e == entry)
        .unwrap_or_else(|| panic!("{} not in journal: {:?}", entry, entries))
}

// ===== End to end =====

#[tokio::test(start_paused = true)]
async fn test_sequential_next_clamps_at_end() {
    let ids = ["A", "B", "C"];
    let journal = journal();
    let h = harness(&ids, PlayMode::Sequential, journal.clone(), full_loader(&journal, &ids));

    let mut resolved = Vec::new();
    for _ in 0..3 {
        resolved.push(track(&h.orchestrator.go_next().await).to_string());
    }

    assert_eq!(resolved, vec!["B", "C", "C"]);
    assert_eq!(h.current_index(), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_shuffle_full_coverage_then_exact_retrace() {
    let ids = ["1", "2", "3", "4", "5"];
    let journal = journal();
    let h = harness(&ids, PlayMode::Shuffle, journal.clone(), full_loader(&journal, &ids));
    let start = h.current_index().unwrap();

    let mut forward = Vec::new();
    for _ in 0..5 {
        h.orchestrator.go_next().await;
        forward.push(h.current_index().unwrap());
    }
    let visited: HashSet<usize> = forward.iter().copied().collect();
    assert_eq!(visited.len(), 5, "forward path {:?} repeated an index", forward);

    let mut backward = Vec::new();
    for _ in 0..5 {
        h.orchestrator.go_previous().await;
        backward.push(h.current_index().unwrap());
    }

    let mut expected: Vec<usize> = std::iter::once(start)
        .chain(forward[..4].iter().copied())
        .collect();
    expected.reverse();
    assert_eq!(backward, expected);
}

#[tokio::test(start_paused = true)]
async fn test_go_to_index_is_clamped() {
    let ids = ["A", "B", "C"];
    let journal = journal();
    let h = harness(&ids, PlayMode::Sequential, journal.clone(), full_loader(&journal, &ids));

    let outcome = h.orchestrator.go_to_index(17).await;
    assert_eq!(track(&outcome), "C");
}

// ===== Busy guard =====

#[tokio::test(start_paused = true)]
async fn test_second_trigger_while_busy_is_ignored() {
    let ids = ["A", "B", "C"];
    let journal = journal();
    let h = harness(&ids, PlayMode::Sequential, journal.clone(), full_loader(&journal, &ids));

    let orchestrator = Arc::clone(&h.orchestrator);
    let (first, second) = tokio::join!(h.orchestrator.go_next(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(orchestrator.is_busy());
        assert_eq!(orchestrator.phase(), TransitionPhase::Covering);
        orchestrator.go_next().await
    });

    assert_eq!(track(&first), "B");
    assert_eq!(second, TransitionOutcome::Ignored);
    assert_eq!(h.current_index(), Some(1));
    assert_eq!(h.count("slide-in"), 5);
    assert_eq!(h.count("start:"), 1);
    assert!(!h.orchestrator.is_busy());
    assert!(!h.lock.is_locked());
}

#[tokio::test(start_paused = true)]
async fn test_externally_held_lock_ignores_trigger() {
    let ids = ["A", "B"];
    let journal = journal();
    let h = harness(&ids, PlayMode::Sequential, journal.clone(), full_loader(&journal, &ids));

    let guard = h.lock.try_acquire().unwrap();
    assert_eq!(h.orchestrator.go_next().await, TransitionOutcome::Ignored);
    assert_eq!(h.current_index(), Some(0));
    assert!(!h.orchestrator.is_busy());
    drop(guard);

    assert!(h.orchestrator.go_next().await.is_completed());
}

#[tokio::test(start_paused = true)]
async fn test_lock_held_for_whole_transition() {
    let ids = ["A", "B"];
    let journal = journal();
    let h = harness(&ids, PlayMode::Sequential, journal.clone(), full_loader(&journal, &ids));

    let lock = h.lock.clone();
    let (_, samples) = tokio::join!(h.orchestrator.go_next(), async {
        let mut samples = Vec::new();
        for _ in 0..15 {
            samples.push(lock.is_locked());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        samples
    });

    // Cover and reveal take 770ms each; the lock spans both
    assert!(samples[..15].iter().all(|&locked| locked));
    assert!(!h.lock.is_locked());
}

// ===== Ordering =====

#[tokio::test(start_paused = true)]
async fn test_load_and_start_ordering() {
    let ids = ["A", "B"];
    let journal = journal();
    let loader = full_loader(&journal, &ids).with_load_delay(Duration::from_millis(30));
    let h = harness(&ids, PlayMode::Sequential, journal.clone(), loader);

    h.orchestrator.go_next().await;
    let entries = h.entries();

    let last_cover = position(&entries, "slide-in:4");
    let close = position(&entries, "close-navigation");
    let open = position(&entries, "open-panels");
    let metadata = last_position(&entries, "metadata:B");
    let audio = position(&entries, "audio:B");
    let visual = position(&entries, "visual:B");
    let start = position(&entries, "start:B");
    let first_reveal = position(&entries, "slide-out:4");

    assert!(position(&entries, "metadata:B") < last_cover, "preview before cover");
    assert!(last_cover < close && close < open);
    assert!(open < metadata);
    assert!(metadata < audio && audio < visual && visual < start);
    assert!(start < first_reveal);

    let reveal: Vec<&String> = entries
        .iter()
        .filter(|e| e.starts_with("slide-out"))
        .collect();
    assert_eq!(
        reveal,
        vec!["slide-out:4", "slide-out:3", "slide-out:2", "slide-out:1", "slide-out:0"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_transition_duration_is_cover_plus_loads_plus_reveal() {
    let ids = ["A", "B"];
    let journal = journal();
    let loader = full_loader(&journal, &ids).with_load_delay(Duration::from_millis(50));
    let h = harness(&ids, PlayMode::Sequential, journal.clone(), loader);

    let started = Instant::now();
    h.orchestrator.go_next().await;
    assert_eq!(started.elapsed(), Duration::from_millis(770 + 100 + 770));
}

#[tokio::test(start_paused = true)]
async fn test_events_in_order_and_lock_released_before_completed() {
    let ids = ["A", "B"];
    let journal = journal();
    let h = harness(&ids, PlayMode::Sequential, journal.clone(), full_loader(&journal, &ids));

    let seen: Arc<Mutex<Vec<TransitionEvent>>> = Arc::default();
    let locked_at_completion = Arc::new(Mutex::new(None));
    {
        let seen = Arc::clone(&seen);
        let locked = Arc::clone(&locked_at_completion);
        let lock = h.lock.clone();
        h.orchestrator.subscribe(move |event| {
            if matches!(event, TransitionEvent::Completed { .. }) {
                *locked.lock().unwrap() = Some(lock.is_locked());
            }
            seen.lock().unwrap().push(event.clone());
        });
    }

    h.orchestrator.go_next().await;

    let b = TrackId::new("B");
    let phase = |phase| TransitionEvent::PhaseChanged { phase };
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            TransitionEvent::Started {
                navigation: segue_core::Navigation::Next,
                preview: b.clone(),
            },
            phase(TransitionPhase::Covering),
            phase(TransitionPhase::Loading),
            TransitionEvent::TrackResolved {
                track: b.clone(),
                index: 1,
            },
            phase(TransitionPhase::Revealing),
            phase(TransitionPhase::Idle),
            TransitionEvent::Completed {
                track: b,
                presentation: Presentation::AudioVideo,
            },
        ]
    );
    assert_eq!(*locked_at_completion.lock().unwrap(), Some(false));
}

// ===== Palettes =====

#[tokio::test(start_paused = true)]
async fn test_cover_palettes_follow_current_and_incoming_tracks() {
    let red = Rgba::from_rgb8(255, 0, 0);
    let green = Rgba::from_rgb8(0, 255, 0);
    let blue = Rgba::from_rgb8(0, 0, 255);
    let white = Rgba::WHITE;
    let black = Rgba::BLACK;

    let journal = journal();
    let loader = MockLoader::new(journal.clone())
        .with_full_track("A", red, green)
        .with_full_track("B", blue, white);
    let h = harness(&["A", "B"], PlayMode::Sequential, journal, loader);

    // Startup: nothing loaded yet, so the outgoing palette is black
    h.orchestrator.play_current().await;
    h.orchestrator.go_next().await;

    let paints = h.surface.paints.lock().unwrap().clone();
    assert_eq!(
        paints,
        vec![
            [black, black, black, black, red],
            [red, green, red, green, red],
            [green, red, green, red, blue],
            [blue, white, blue, white, blue],
        ]
    );
}

// ===== Missing resources =====

#[tokio::test(start_paused = true)]
async fn test_missing_everything_falls_back_to_placeholder() {
    let journal = journal();
    let loader = MockLoader::new(journal.clone()).with_full_track("A", Rgba::WHITE, Rgba::WHITE);
    let h = harness(&["A", "ghost"], PlayMode::Sequential, journal, loader);

    let outcome = h.orchestrator.go_next().await;
    assert_eq!(
        outcome,
        TransitionOutcome::Completed {
            track: TrackId::new("ghost"),
            presentation: Presentation::Placeholder,
        }
    );

    let entries = h.entries();
    assert!(entries.contains(&format!("apply:ghost:{}", UNKNOWN_TITLE)));
    assert!(entries.contains(&"presentation:Placeholder".to_string()));

    let paints = h.surface.paints.lock().unwrap().clone();
    assert_eq!(paints.last(), Some(&[Rgba::BLACK; 5]));

    let (_, metadata) = h.orchestrator.current().unwrap();
    assert_eq!(metadata, TrackMetadata::unknown());
}

#[tokio::test(start_paused = true)]
async fn test_missing_video_is_audio_only() {
    let journal = journal();
    let loader = MockLoader::new(journal.clone()).with_track(
        "A",
        MockTrack {
            metadata: Some(TrackMetadata::default()),
            audio: true,
            videos: 0,
        },
    );
    let h = harness(&["A"], PlayMode::RepeatAll, journal, loader);

    let outcome = h.orchestrator.play_current().await;
    assert_eq!(
        outcome,
        TransitionOutcome::Completed {
            track: TrackId::new("A"),
            presentation: Presentation::AudioOnly,
        }
    );
    let started = h.loader.started.lock().unwrap();
    assert_eq!(started.len(), 1);
    assert!(started[0].audio.is_some());
}

// ===== Empty playlist =====

#[tokio::test(start_paused = true)]
async fn test_empty_playlist_is_a_silent_no_op() {
    let journal = journal();
    let h = harness(&[], PlayMode::Shuffle, journal.clone(), MockLoader::new(journal));

    let started = Instant::now();
    assert_eq!(h.orchestrator.go_next().await, TransitionOutcome::NoTrack);
    assert_eq!(h.orchestrator.go_previous().await, TransitionOutcome::NoTrack);

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(h.count("slide"), 0);
    assert!(!h.orchestrator.is_busy());
    assert!(!h.lock.is_locked());
    assert_eq!(h.orchestrator.phase(), TransitionPhase::Idle);
}
