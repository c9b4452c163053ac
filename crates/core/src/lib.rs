pub mod analysis;
pub mod bus;
pub mod confirm;
pub mod edge_case;
pub mod error;
pub mod patient;
pub mod recording;
pub mod transcript;

pub use analysis::InferenceOrchestrator;
pub use bus::CompletionBus;
pub use confirm::{artifact_filename, ConfirmRequest, Confirmation, ConfirmationTransaction};
pub use error::{ConfirmError, CoreError};
pub use patient::patient_view;
pub use recording::{RecordingOutcome, RecordingPipeline};
pub use transcript::{normalize, NO_SPEECH_PLACEHOLDER};
