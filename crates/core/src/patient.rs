use consilium_gateway::EncounterStore;
use consilium_models::{PatientRecord, SessionContext};

use crate::error::CoreError;

/// Read-only projection of a patient's persisted encounters.
///
/// Rendering is the embedding application's business; this boundary only
/// fetches and classifies failures.
pub async fn patient_view(
    session: &SessionContext,
    store: &dyn EncounterStore,
    patient_id: &str,
) -> Result<PatientRecord, CoreError> {
    store
        .fetch(session, patient_id)
        .await
        .map_err(CoreError::FetchFailed)
}
