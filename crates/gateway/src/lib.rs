pub mod artifact;
pub mod capture;
pub mod inference;
pub mod records;
pub mod speech;
pub mod storage;

pub use artifact::{ArtifactRenderer, HttpArtifactRenderer};
pub use capture::{AudioCapture, FileAudioSource};
pub use inference::{
    ClassifierPrediction, ClassifierReply, DiagnosisClassifier, HttpClassifier, HttpPatientTwin,
    PatientTwin, TwinPrediction, TwinReply, TwinSymptom,
};
pub use records::{EncounterDraft, EncounterStore, HttpEncounterStore, PersistedEncounter};
pub use speech::{HttpSpeechToText, SpeechToText, TranscribeReply, STUB_TRANSCRIPT_SENTINEL};
pub use storage::{AudioStore, HttpAudioStore};

use reqwest::Response;
use thiserror::Error;

/// Classified collaborator failure. Raw transport errors never cross this
/// boundary; every client maps them here before returning.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("collaborator unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("collaborator returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("collaborator response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Maps a non-2xx response into `GatewayError::Status`, carrying whatever
/// body text the collaborator sent.
pub(crate) async fn expect_ok(response: Response) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(GatewayError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Builds the shared HTTP client every `Http*` collaborator uses.
pub fn build_http_client(
    settings: &consilium_config::HttpSettings,
) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(settings.request_timeout_secs))
        .build()
        .map_err(GatewayError::Transport)
}
