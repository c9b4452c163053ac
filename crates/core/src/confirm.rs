use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use consilium_gateway::{ArtifactRenderer, EncounterDraft, EncounterStore};
use consilium_models::{
    Artifact, DiagnosisPrediction, EdgeCase, Encounter, EncounterCompleted, Prescription,
    RiskLevel, SessionContext, SymptomObservation,
};
use dashmap::DashSet;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::bus::CompletionBus;
use crate::error::ConfirmError;

/// Everything the clinician finalized, handed to `confirm` in one piece.
///
/// `risk_level` and `narrative_summary` ride along for the completion
/// notification only; the persisted payload is the draft subset.
#[derive(Debug, Clone, Validate)]
pub struct ConfirmRequest {
    #[validate(custom(function = non_blank))]
    pub patient_identifier: String,
    #[validate(custom(function = non_blank))]
    pub final_diagnosis: String,
    pub prescription: Prescription,
    pub symptoms: Vec<SymptomObservation>,
    pub predictions: Vec<DiagnosisPrediction>,
    pub edge_cases: Vec<EdgeCase>,
    pub risk_level: RiskLevel,
    pub narrative_summary: String,
}

fn non_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("non_blank"));
    }
    Ok(())
}

/// Result of a fully successful confirmation.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub encounter: Encounter,
    pub artifact: Artifact,
}

/// Runs the multi-step confirm transaction: validate, persist exactly once,
/// render the downloadable document, announce completion.
///
/// Single-flight per session: while one confirmation is pending, a repeat
/// from the same session is rejected rather than queued, so double
/// submission cannot create duplicate encounters. Separate sequential
/// confirmations do create separate encounters; that is accepted behavior.
pub struct ConfirmationTransaction {
    records: Arc<dyn EncounterStore>,
    artifacts: Arc<dyn ArtifactRenderer>,
    bus: CompletionBus,
    in_flight: DashSet<String>,
}

/// Releases the session's in-flight slot on every exit path.
struct FlightGuard<'a> {
    set: &'a DashSet<String>,
    key: String,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.key);
    }
}

impl ConfirmationTransaction {
    pub fn new(
        records: Arc<dyn EncounterStore>,
        artifacts: Arc<dyn ArtifactRenderer>,
        bus: CompletionBus,
    ) -> Self {
        Self {
            records,
            artifacts,
            bus,
            in_flight: DashSet::new(),
        }
    }

    pub async fn confirm(
        &self,
        session: &SessionContext,
        request: ConfirmRequest,
    ) -> Result<Confirmation, ConfirmError> {
        // Fail fast, before any collaborator effect.
        request
            .validate()
            .map_err(|_| ConfirmError::Validation(
                "patient identifier and final diagnosis must be non-empty".to_string(),
            ))?;

        if !self.in_flight.insert(session.user_id.clone()) {
            return Err(ConfirmError::AlreadyInFlight);
        }
        let _guard = FlightGuard {
            set: &self.in_flight,
            key: session.user_id.clone(),
        };

        let draft = EncounterDraft {
            patient_identifier: request.patient_identifier.trim().to_string(),
            final_diagnosis: request.final_diagnosis.trim().to_string(),
            prescription: request.prescription.clone(),
            symptoms: request.symptoms.clone(),
            predictions: request.predictions.clone(),
            edge_cases: request.edge_cases.clone(),
        };

        // Step 1: persist. Failure here aborts the whole transaction.
        let persisted = self
            .records
            .persist(session, &draft)
            .await
            .map_err(ConfirmError::Persist)?;

        let created_at = Utc::now();
        let encounter = Encounter {
            id: persisted
                .encounter_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            patient_identifier: draft.patient_identifier.clone(),
            final_diagnosis: draft.final_diagnosis.clone(),
            prescription: draft.prescription.clone(),
            symptoms: draft.symptoms.clone(),
            predictions: draft.predictions.clone(),
            edge_cases: draft.edge_cases.clone(),
            created_at,
        };
        info!(
            encounter_id = %encounter.id,
            patient = %encounter.patient_identifier,
            "Encounter persisted"
        );

        // Step 2: render the document from the same finalized data. The
        // encounter stays persisted even when this fails.
        let rendered = self.artifacts.render(session, &draft).await;

        // Step 4 runs on both arms: the notification describes the persisted
        // encounter, which exists regardless of the document.
        match rendered {
            Ok(bytes) => {
                let artifact = Artifact {
                    filename: artifact_filename(
                        &encounter.patient_identifier,
                        created_at.date_naive(),
                    ),
                    content_type: "application/pdf".to_string(),
                    bytes,
                };
                self.publish_completion(&encounter, &request, created_at);
                Ok(Confirmation { encounter, artifact })
            }
            Err(source) => {
                warn!(
                    encounter_id = %encounter.id,
                    %source,
                    "Artifact generation failed; encounter remains persisted"
                );
                self.publish_completion(&encounter, &request, created_at);
                Err(ConfirmError::Artifact {
                    encounter: Box::new(encounter),
                    source,
                })
            }
        }
    }

    fn publish_completion(
        &self,
        encounter: &Encounter,
        request: &ConfirmRequest,
        created_at: DateTime<Utc>,
    ) {
        self.bus.publish(EncounterCompleted {
            id: encounter.id.clone(),
            patient_name: encounter.patient_identifier.clone(),
            date: created_at.format("%Y-%m-%d").to_string(),
            time: created_at.format("%H:%M").to_string(),
            diagnosis: encounter.final_diagnosis.clone(),
            risk: request.risk_level,
            status: "completed".to_string(),
            symptoms: encounter.symptoms.clone(),
            predictions: encounter.predictions.clone(),
            prescription: encounter.prescription.clone(),
            summary: request.narrative_summary.clone(),
        });
    }
}

/// Deterministic artifact filename:
/// `prescription_{identifier local-part}_{yyyy-mm-dd}.pdf`.
pub fn artifact_filename(patient_identifier: &str, date: NaiveDate) -> String {
    let local_part = patient_identifier
        .split('@')
        .next()
        .unwrap_or(patient_identifier);
    format!("prescription_{}_{}.pdf", local_part, date.format("%Y-%m-%d"))
}
