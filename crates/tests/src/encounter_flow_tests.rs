use consilium_core::{edge_case, ConfirmRequest, RecordingOutcome};
use consilium_models::{Prescription, RiskLevel};
use serde_json::json;

use crate::fixtures::harness::Harness;

/// The whole clinician journey against the stub collaborators: record,
/// analyze, review edge cases, confirm.
#[tokio::test]
async fn full_encounter_flow_from_recording_to_confirmation() {
    let harness = Harness::spawn().await;
    let mut completions = harness.bus.subscribe();

    let outcome = harness.pipeline.record(&harness.session).await.unwrap();
    let transcript = match outcome {
        RecordingOutcome::Transcribed(transcript) => transcript,
        other => panic!("expected a transcript, got {other:?}"),
    };

    let analysis = harness
        .orchestrator
        .analyze(&harness.session, &transcript, Some("patient-7"))
        .await
        .unwrap();
    assert_eq!(analysis.edge_case_seeds, vec!["influenza", "angina"]);

    // The clinician reviews the suggestions: drops one, notes another, adds
    // their own.
    let mut edge_cases = edge_case::consolidate(&analysis.edge_case_seeds, &[], None);
    edge_case::remove_edge_case(&mut edge_cases, "influenza");
    let mut edge_cases = edge_case::consolidate(&[], &edge_cases, Some("pericarditis"));
    edge_case::edit_further_steps(&mut edge_cases, "angina", "repeat ECG in two weeks");

    let request = ConfirmRequest {
        patient_identifier: "jane.doe@example.com".to_string(),
        final_diagnosis: analysis.predictions[0].disease.clone(),
        prescription: Prescription {
            medication: Some("nitroglycerin".to_string()),
            dosage: Some("0.4 mg".to_string()),
            instructions: Some("as needed for chest pain".to_string()),
        },
        symptoms: analysis.symptoms.clone(),
        predictions: analysis.predictions.clone(),
        edge_cases: edge_cases.clone(),
        risk_level: analysis.risk_level,
        narrative_summary: analysis.narrative_summary.clone(),
    };

    let confirmation = harness
        .confirmations
        .confirm(&harness.session, request)
        .await
        .unwrap();
    assert_eq!(confirmation.encounter.final_diagnosis, "angina");
    assert_eq!(confirmation.encounter.edge_cases, edge_cases);

    let persisted = harness.server.scenario.persisted();
    assert_eq!(
        persisted[0]["edge_cases"],
        json!([
            { "name": "angina", "further_steps": "repeat ECG in two weeks" },
            { "name": "pericarditis", "further_steps": "" }
        ])
    );

    let event = completions.recv().await.unwrap();
    assert_eq!(event.patient_name, "jane.doe@example.com");
    assert_eq!(event.risk, RiskLevel::High);
    assert_eq!(event.status, "completed");
}
