use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{DiagnosisPrediction, EdgeCase, RiskLevel, SymptomObservation};

/// A prescription as entered by the clinician.
///
/// Every field is optional on its own, but a `Prescription` value (possibly
/// all-empty) is structurally required once confirmation begins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// The confirmed encounter record. Created exactly once per confirmation
/// transaction and immutable afterwards; the persistence collaborator owns
/// the stored copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: String,
    pub patient_identifier: String,
    pub final_diagnosis: String,
    pub prescription: Prescription,
    pub symptoms: Vec<SymptomObservation>,
    pub predictions: Vec<DiagnosisPrediction>,
    pub edge_cases: Vec<EdgeCase>,
    pub created_at: DateTime<Utc>,
}

/// A downloadable document produced by the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Completion-notification payload published on the process-local bus when a
/// confirmation transaction lands. A summary projection of the encounter for
/// any listening dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterCompleted {
    pub id: String,
    pub patient_name: String,
    /// `yyyy-mm-dd`, UTC.
    pub date: String,
    /// `HH:MM`, UTC.
    pub time: String,
    pub diagnosis: String,
    pub risk: RiskLevel,
    pub status: String,
    pub symptoms: Vec<SymptomObservation>,
    pub predictions: Vec<DiagnosisPrediction>,
    pub prescription: Prescription,
    pub summary: String,
}

/// One historical diagnosis row in the patient read path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDiagnosis {
    pub final_diagnosis: String,
    #[serde(default)]
    pub symptoms: Vec<SymptomObservation>,
    #[serde(default)]
    pub predictions: Vec<DiagnosisPrediction>,
}

/// Read-only projection of a patient's persisted encounters, as served by
/// the persistence collaborator for patient consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    #[serde(default)]
    pub diagnoses: Vec<PatientDiagnosis>,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
    #[serde(default)]
    pub edge_cases: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}
