use std::sync::Arc;
use std::time::Duration;

use consilium_gateway::{AudioCapture, AudioStore, SpeechToText};
use consilium_models::{SessionContext, Transcript};
use tracing::{info, warn};

use crate::error::CoreError;
use crate::transcript::{self, NO_SPEECH_PLACEHOLDER};

/// What the recording pipeline produced for downstream analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingOutcome {
    /// A usable transcript (possibly the no-speech placeholder).
    Transcribed(Transcript),
    /// The speech backend has no real speech-to-text configured. Proceed
    /// with an empty transcript; this is not a failure.
    NoTranscriptAvailable,
}

/// Drives audio capture → upload → transcription with a bounded wait.
///
/// Every error here is recoverable by routing the clinician to manual
/// transcript entry; nothing is retried automatically.
pub struct RecordingPipeline {
    capture: Arc<dyn AudioCapture>,
    store: Arc<dyn AudioStore>,
    speech: Arc<dyn SpeechToText>,
    transcribe_timeout: Duration,
}

impl RecordingPipeline {
    pub fn new(
        capture: Arc<dyn AudioCapture>,
        store: Arc<dyn AudioStore>,
        speech: Arc<dyn SpeechToText>,
        transcribe_timeout: Duration,
    ) -> Self {
        Self {
            capture,
            store,
            speech,
            transcribe_timeout,
        }
    }

    /// Records one encounter and returns its transcript.
    pub async fn record(&self, session: &SessionContext) -> Result<RecordingOutcome, CoreError> {
        let audio = self
            .capture
            .capture()
            .await
            .map_err(CoreError::CaptureFailed)?;
        info!(
            source = self.capture.name(),
            bytes = audio.len(),
            "Encounter audio captured"
        );

        let handle = self
            .store
            .upload(session, audio)
            .await
            .map_err(CoreError::UploadFailed)?;

        let transcribe = self.speech.transcribe(session, &handle);
        let reply = match tokio::time::timeout(self.transcribe_timeout, transcribe).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => return Err(CoreError::TranscriptionFailed(e)),
            Err(_) => {
                // The collaborator request is not cancelled server-side;
                // dropping the future discards whatever arrives late.
                warn!(
                    upload_id = %handle.as_str(),
                    timeout = ?self.transcribe_timeout,
                    "Transcription wait exceeded its bound, routing to manual entry"
                );
                return Err(CoreError::TranscriptionTimeout(self.transcribe_timeout));
            }
        };

        if reply.is_stub_reply() {
            info!("Speech backend returned a stub transcript, proceeding without one");
            return Ok(RecordingOutcome::NoTranscriptAvailable);
        }

        if reply.transcript.trim().is_empty() {
            return Ok(RecordingOutcome::Transcribed(Transcript::new(
                NO_SPEECH_PLACEHOLDER,
            )));
        }

        Ok(RecordingOutcome::Transcribed(transcript::normalize(
            &reply.transcript,
        )))
    }

    /// Manual-entry fallback: clinician-typed text goes through the same
    /// normalization as a transcribed one.
    pub fn manual_transcript(text: &str) -> Transcript {
        transcript::normalize(text)
    }
}
