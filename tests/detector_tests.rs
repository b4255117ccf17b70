use std::time::Duration;

use voxscan::analysis::overall_confidence;
use voxscan::{ProcessOutcome, SettingsPatch, VoiceDetector};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[tokio::test]
async fn process_without_source_is_a_noop() {
    init_logs();
    let detector = VoiceDetector::new();

    assert_eq!(detector.process_audio().await, ProcessOutcome::NoSource);
    assert!(detector.latest_run().await.is_none());
    assert!(!detector.is_processing().await);
}

#[tokio::test]
async fn completed_run_commits_consistent_state() {
    init_logs();
    let detector = VoiceDetector::new();
    detector.load_source("meeting.wav", 2_000_000).await;
    // Disable the noise filter so the run keeps every generated segment.
    detector
        .update_settings(SettingsPatch {
            filter_noise: Some(false),
            ..Default::default()
        })
        .await;

    let outcome = detector.process_audio().await;
    let ProcessOutcome::Completed {
        segment_count,
        confidence,
    } = outcome
    else {
        panic!("expected a completed run, got {outcome:?}");
    };

    let results = detector.results().await;
    assert!(segment_count >= 1);
    assert_eq!(results.len(), segment_count);
    assert_eq!(detector.confidence().await, confidence);
    // The stored confidence is exactly the duration-weighted mean of the
    // stored segments.
    assert_eq!(overall_confidence(&results), confidence);

    let run = detector.latest_run().await.expect("run was committed");
    assert_eq!(run.filename, "meeting.wav");
    assert!(!detector.is_processing().await);
}

#[tokio::test]
async fn second_request_while_in_flight_is_busy() {
    init_logs();
    let detector = VoiceDetector::new();
    detector.load_source("meeting.wav", 2_000_000).await;

    let worker = detector.clone();
    let in_flight = tokio::spawn(async move { worker.process_audio().await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(detector.is_processing().await);
    assert_eq!(detector.process_audio().await, ProcessOutcome::Busy);

    detector.cancel_processing().await;
    assert_eq!(in_flight.await.unwrap(), ProcessOutcome::Cancelled);
}

#[tokio::test]
async fn cancel_before_analysis_completes_leaves_state_unchanged() {
    init_logs();
    let detector = VoiceDetector::new();
    detector.load_source("meeting.wav", 2_000_000).await;

    let worker = detector.clone();
    let in_flight = tokio::spawn(async move { worker.process_audio().await });

    tokio::time::sleep(Duration::from_millis(200)).await;
    detector.cancel_processing().await;

    assert_eq!(in_flight.await.unwrap(), ProcessOutcome::Cancelled);
    assert!(
        detector.latest_run().await.is_none(),
        "cancelled run must not commit results"
    );
    assert_eq!(detector.confidence().await, 0);
    assert!(!detector.is_processing().await);
}

#[tokio::test]
async fn cancel_is_idempotent() {
    init_logs();
    let detector = VoiceDetector::new();

    // No run in flight: both calls are harmless no-ops.
    detector.cancel_processing().await;
    detector.cancel_processing().await;
    assert!(!detector.is_processing().await);
}

#[tokio::test]
async fn settings_edit_during_a_run_applies_to_the_next_run_only() {
    init_logs();
    let detector = VoiceDetector::new();
    detector.load_source("meeting.wav", 2_000_000).await;
    detector
        .update_settings(SettingsPatch {
            filter_noise: Some(false),
            ..Default::default()
        })
        .await;

    let worker = detector.clone();
    let in_flight = tokio::spawn(async move { worker.process_audio().await });

    // Edit while the run is in flight: it must keep its snapshot.
    tokio::time::sleep(Duration::from_millis(300)).await;
    detector
        .update_settings(SettingsPatch {
            min_segment_duration: Some(100.0),
            ..Default::default()
        })
        .await;

    let outcome = in_flight.await.unwrap();
    let ProcessOutcome::Completed { segment_count, .. } = outcome else {
        panic!("expected a completed run, got {outcome:?}");
    };
    assert!(
        segment_count >= 1,
        "in-flight run must not see the 100s minimum duration"
    );

    // The next run does see it: no generated segment spans 100 seconds,
    // so everything is filtered out. Empty results are a valid state.
    let outcome = detector.process_audio().await;
    assert_eq!(
        outcome,
        ProcessOutcome::Completed {
            segment_count: 0,
            confidence: 0,
        }
    );
    assert!(detector.results().await.is_empty());

    // And exporting the empty result set is rejected as a no-op.
    let exported = detector
        .export_results(&std::env::temp_dir())
        .await
        .unwrap();
    assert!(exported.is_none(), "empty export must not write a file");
}

#[tokio::test]
async fn unreadable_source_fails_and_resets_processing_state() {
    init_logs();
    let detector = VoiceDetector::new();
    detector.load_source("broken.wav", 0).await;

    assert_eq!(detector.process_audio().await, ProcessOutcome::Failed);
    assert!(detector.latest_run().await.is_none());
    assert!(!detector.is_processing().await, "failure resets the session");
}

#[tokio::test]
async fn playback_toggle_requires_a_source() {
    init_logs();
    let detector = VoiceDetector::new();

    assert!(!detector.toggle_playback().await);
    assert!(!detector.is_playing().await);

    detector.load_source("meeting.wav", 2_000_000).await;
    assert!(detector.toggle_playback().await);
    assert!(detector.is_playing().await);
    assert!(!detector.toggle_playback().await);
}

#[tokio::test]
async fn loading_a_source_resets_prior_results() {
    init_logs();
    let detector = VoiceDetector::new();
    detector.load_source("first.wav", 2_000_000).await;

    let outcome = detector.process_audio().await;
    assert!(matches!(outcome, ProcessOutcome::Completed { .. }));
    assert!(detector.latest_run().await.is_some());

    detector.load_source("second.wav", 1_000_000).await;
    assert!(detector.latest_run().await.is_none());
    assert_eq!(detector.confidence().await, 0);

    detector.clear_source().await;
    assert!(detector.source().await.is_none());
}

#[tokio::test]
async fn source_changes_are_suppressed_while_processing() {
    init_logs();
    let detector = VoiceDetector::new();
    detector.load_source("meeting.wav", 2_000_000).await;

    let worker = detector.clone();
    let in_flight = tokio::spawn(async move { worker.process_audio().await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    detector.load_source("other.wav", 500).await;
    detector.clear_source().await;

    let source = detector.source().await.expect("source must survive");
    assert_eq!(source.filename, "meeting.wav");

    detector.cancel_processing().await;
    assert_eq!(in_flight.await.unwrap(), ProcessOutcome::Cancelled);
}
