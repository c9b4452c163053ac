use consilium_gateway::GatewayError;
use consilium_models::Encounter;
use thiserror::Error;

/// Faults from the recording pipeline, inference orchestration, and read
/// path. All are user-visible; the recording-pipeline kinds are recoverable
/// by falling back to manual transcript entry.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bad input, rejected before any collaborator effect.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Device capture failed before anything left the machine.
    #[error("audio capture failed: {0}")]
    CaptureFailed(#[source] anyhow::Error),

    /// The audio blob upload failed; no retry is attempted.
    #[error("audio upload failed: {0}")]
    UploadFailed(#[source] GatewayError),

    /// The transcription wait exceeded its bound. The in-flight request is
    /// not cancelled server-side; any late result is discarded.
    #[error("transcription timed out after {0:?}")]
    TranscriptionTimeout(std::time::Duration),

    /// The speech collaborator answered with a hard failure.
    #[error("transcription failed: {0}")]
    TranscriptionFailed(#[source] GatewayError),

    /// Either inference call failed; carries the first error encountered.
    /// No partial result is surfaced.
    #[error("encounter analysis failed: {0}")]
    AnalysisFailed(#[source] GatewayError),

    /// The patient read path failed.
    #[error("patient record fetch failed: {0}")]
    FetchFailed(#[source] GatewayError),
}

/// Faults from the confirmation transaction.
#[derive(Debug, Error)]
pub enum ConfirmError {
    /// Bad input, rejected before any collaborator effect.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A confirmation for this session is already in flight; the repeat is
    /// rejected, not queued.
    #[error("a confirmation is already in flight for this session")]
    AlreadyInFlight,

    /// Persistence failed; nothing downstream ran.
    #[error("encounter persistence failed: {0}")]
    Persist(#[source] GatewayError),

    /// Persistence succeeded but the document could not be rendered. The
    /// encounter carried here is already persisted; only the artifact must
    /// be regenerated.
    #[error("artifact generation failed: {source}")]
    Artifact {
        encounter: Box<Encounter>,
        #[source]
        source: GatewayError,
    },
}
