use std::sync::Arc;
use std::time::Instant;

use consilium_gateway::{ClassifierReply, DiagnosisClassifier, PatientTwin, TwinReply};
use consilium_models::{
    AnalysisResult, DiagnosisPrediction, RiskLevel, SessionContext, SymptomObservation, Transcript,
};
use tracing::info;

use crate::error::CoreError;

/// Fans the two inference calls out against the same transcript and joins
/// them into one `AnalysisResult`.
///
/// Join semantics are all-or-nothing: if either call fails, the whole
/// analysis fails with the first error encountered and no partial result is
/// surfaced. No caching; repeat calls re-issue both requests.
pub struct InferenceOrchestrator {
    classifier: Arc<dyn DiagnosisClassifier>,
    twin: Arc<dyn PatientTwin>,
}

impl InferenceOrchestrator {
    pub fn new(classifier: Arc<dyn DiagnosisClassifier>, twin: Arc<dyn PatientTwin>) -> Self {
        Self { classifier, twin }
    }

    /// Analyzes a non-empty transcript.
    pub async fn analyze(
        &self,
        session: &SessionContext,
        transcript: &Transcript,
        patient_id: Option<&str>,
    ) -> Result<AnalysisResult, CoreError> {
        if transcript.is_empty() {
            return Err(CoreError::Validation(
                "transcript is empty; record or enter one before analysis".to_string(),
            ));
        }

        let started = Instant::now();
        let (classifier_reply, twin_reply) = tokio::try_join!(
            self.classifier.analyze(session, transcript),
            self.twin.synthesize(session, transcript, patient_id),
        )
        .map_err(CoreError::AnalysisFailed)?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            predictions = classifier_reply.predictions.len(),
            "Inference calls joined"
        );

        Ok(merge(classifier_reply, twin_reply))
    }
}

/// Reconciles the two sources' differently-shaped replies into the unified
/// view. Field mapping happens here and nowhere else.
fn merge(classifier: ClassifierReply, twin: TwinReply) -> AnalysisResult {
    // Symptom union: classifier names first, twin extras after. A twin
    // confidence backfills a name the classifier already produced.
    let mut symptoms: Vec<SymptomObservation> = Vec::new();
    for name in classifier.symptoms {
        if !symptoms.iter().any(|s| s.name == name) {
            symptoms.push(SymptomObservation {
                name,
                confidence: None,
            });
        }
    }
    for twin_symptom in twin.extracted_symptoms {
        match symptoms.iter_mut().find(|s| s.name == twin_symptom.symptom) {
            Some(existing) => {
                if existing.confidence.is_none() {
                    existing.confidence = twin_symptom.confidence;
                }
            }
            None => symptoms.push(SymptomObservation {
                name: twin_symptom.symptom,
                confidence: twin_symptom.confidence,
            }),
        }
    }

    let twin_edge_names: Vec<String> = twin
        .diagnosis_predictions
        .iter()
        .filter(|p| p.is_edge_case)
        .map(|p| p.disease.clone())
        .collect();

    // Predictions come from the classifier; the edge flag is corroborated
    // against the twin's edge-flagged diseases by name.
    let mut predictions: Vec<DiagnosisPrediction> = classifier
        .predictions
        .into_iter()
        .map(|p| {
            let corroborated = p.is_edge_case || twin_edge_names.iter().any(|n| *n == p.disease);
            DiagnosisPrediction {
                disease: p.disease,
                score: p.confidence,
                is_edge_case: corroborated,
            }
        })
        .collect();

    // Descending by score; the sort is stable, so ties keep source order.
    predictions.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Seed union: classifier edge-case list first, then twin edge-flagged
    // diseases, first-seen order, no duplicates.
    let mut edge_case_seeds: Vec<String> = Vec::new();
    for name in classifier.edge_cases.into_iter().chain(twin_edge_names) {
        if !edge_case_seeds.iter().any(|n| *n == name) {
            edge_case_seeds.push(name);
        }
    }

    AnalysisResult {
        symptoms,
        predictions,
        risk_level: RiskLevel::from_wire(twin.risk_score.as_deref()),
        narrative_summary: twin.patient_story,
        edge_case_seeds,
    }
}
