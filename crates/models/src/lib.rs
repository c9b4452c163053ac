pub mod analysis;
pub mod encounter;
pub mod session;
pub mod transcript;

pub use analysis::{AnalysisResult, DiagnosisPrediction, EdgeCase, RiskLevel, SymptomObservation};
pub use encounter::{
    Artifact, Encounter, EncounterCompleted, PatientDiagnosis, PatientRecord, Prescription,
};
pub use session::{Role, SessionContext};
pub use transcript::{Transcript, UploadHandle};
