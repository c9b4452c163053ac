use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio_test::assert_ok;

use consilium_core::{CoreError, RecordingOutcome, RecordingPipeline, NO_SPEECH_PLACEHOLDER};
use consilium_gateway::{FileAudioSource, STUB_TRANSCRIPT_SENTINEL};

use crate::fixtures::harness::{fake_webm, Harness};

#[tokio::test]
async fn record_produces_normalized_transcript() {
    let harness = Harness::spawn().await;

    let outcome = harness.pipeline.record(&harness.session).await.unwrap();

    match outcome {
        RecordingOutcome::Transcribed(transcript) => assert_eq!(
            transcript.as_str(),
            "patient reports chest pain and shortness of breath"
        ),
        other => panic!("expected a transcript, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_failure_routes_to_manual_entry() {
    let harness = Harness::spawn().await;
    harness.server.scenario.configure(|s| s.fail_upload = true);

    let err = harness.pipeline.record(&harness.session).await.unwrap_err();
    assert!(matches!(err, CoreError::UploadFailed(_)));

    // Nothing downstream of the upload ran.
    assert_eq!(
        harness
            .server
            .scenario
            .transcribe_calls
            .load(Ordering::SeqCst),
        0
    );

    // The clinician falls back to typing the conversation in.
    let manual = RecordingPipeline::manual_transcript("patient reports mild fever");
    assert_eq!(manual.as_str(), "patient reports mild fever");
}

#[tokio::test]
async fn slow_transcription_times_out() {
    let harness = Harness::spawn_with(Duration::from_millis(200)).await;
    harness
        .server
        .scenario
        .configure(|s| s.transcribe_delay = Duration::from_millis(800));

    let err = harness.pipeline.record(&harness.session).await.unwrap_err();
    assert!(matches!(err, CoreError::TranscriptionTimeout(_)));
}

#[tokio::test]
async fn transcription_hard_failure_is_classified() {
    let harness = Harness::spawn().await;
    harness.server.scenario.configure(|s| s.fail_transcribe = true);

    let err = harness.pipeline.record(&harness.session).await.unwrap_err();
    assert!(matches!(err, CoreError::TranscriptionFailed(_)));
}

#[tokio::test]
async fn stub_flag_means_no_transcript_available() {
    let harness = Harness::spawn().await;
    harness
        .server
        .scenario
        .configure(|s| s.transcript_is_stub = true);

    let outcome = harness.pipeline.record(&harness.session).await.unwrap();
    assert_eq!(outcome, RecordingOutcome::NoTranscriptAvailable);
}

#[tokio::test]
async fn sentinel_text_means_no_transcript_available() {
    let harness = Harness::spawn().await;
    harness
        .server
        .scenario
        .configure(|s| s.transcript = STUB_TRANSCRIPT_SENTINEL.to_string());

    let outcome = harness.pipeline.record(&harness.session).await.unwrap();
    assert_eq!(outcome, RecordingOutcome::NoTranscriptAvailable);
}

#[tokio::test]
async fn silent_recording_yields_placeholder() {
    let harness = Harness::spawn().await;
    harness
        .server
        .scenario
        .configure(|s| s.transcript = "   ".to_string());

    let outcome = harness.pipeline.record(&harness.session).await.unwrap();
    match outcome {
        RecordingOutcome::Transcribed(transcript) => {
            assert_eq!(transcript.as_str(), NO_SPEECH_PLACEHOLDER)
        }
        other => panic!("expected the placeholder transcript, got {other:?}"),
    }
}

#[tokio::test]
async fn file_capture_source_feeds_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("encounter.webm");
    tokio::fs::write(&path, fake_webm()).await.unwrap();

    let harness = Harness::spawn_with_capture(Arc::new(FileAudioSource::new(path))).await;

    let outcome = assert_ok!(harness.pipeline.record(&harness.session).await);
    assert!(matches!(outcome, RecordingOutcome::Transcribed(_)));
}
