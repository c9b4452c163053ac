use async_trait::async_trait;
use consilium_models::{
    DiagnosisPrediction, EdgeCase, PatientRecord, Prescription, SessionContext, SymptomObservation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{expect_ok, GatewayError, GatewayResult};

/// The finalized encounter data handed to the persistence collaborator.
/// The artifact renderer consumes the exact same payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterDraft {
    pub patient_identifier: String,
    pub final_diagnosis: String,
    pub prescription: Prescription,
    pub symptoms: Vec<SymptomObservation>,
    pub predictions: Vec<DiagnosisPrediction>,
    pub edge_cases: Vec<EdgeCase>,
}

/// Acknowledgement from the persistence collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistedEncounter {
    pub success: bool,
    #[serde(default)]
    pub encounter_id: Option<String>,
}

/// Encounter persistence collaborator: the confirm write path and the
/// patient-facing read path.
#[async_trait]
pub trait EncounterStore: Send + Sync + 'static {
    /// Persists a finalized encounter keyed by its patient identifier.
    async fn persist(
        &self,
        session: &SessionContext,
        draft: &EncounterDraft,
    ) -> GatewayResult<PersistedEncounter>;

    /// Fetches the read-only projection of a patient's encounters.
    async fn fetch(
        &self,
        session: &SessionContext,
        patient_id: &str,
    ) -> GatewayResult<PatientRecord>;
}

/// Persistence collaborator over HTTP.
pub struct HttpEncounterStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEncounterStore {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EncounterStore for HttpEncounterStore {
    async fn persist(
        &self,
        session: &SessionContext,
        draft: &EncounterDraft,
    ) -> GatewayResult<PersistedEncounter> {
        let response = self
            .http
            .post(format!("{}/diagnosis/confirm", self.base_url))
            .bearer_auth(&session.access_token)
            .json(draft)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let reply: PersistedEncounter = expect_ok(response)
            .await?
            .json()
            .await
            .map_err(GatewayError::Decode)?;

        debug!(
            patient = %draft.patient_identifier,
            encounter_id = reply.encounter_id.as_deref().unwrap_or("none"),
            "Encounter persisted"
        );
        Ok(reply)
    }

    async fn fetch(
        &self,
        session: &SessionContext,
        patient_id: &str,
    ) -> GatewayResult<PatientRecord> {
        let response = self
            .http
            .get(format!("{}/patient/{patient_id}", self.base_url))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        expect_ok(response)
            .await?
            .json()
            .await
            .map_err(GatewayError::Decode)
    }
}
