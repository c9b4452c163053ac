use async_trait::async_trait;
use consilium_models::{SessionContext, Transcript};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{expect_ok, GatewayError, GatewayResult};

/// The classifier's own response shape. Scores arrive as `confidence`;
/// mapping into the unified result happens once, at the orchestrator.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierReply {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub predictions: Vec<ClassifierPrediction>,
    /// Diseases the classifier considers common presentations.
    #[serde(default)]
    pub common: Vec<String>,
    /// Diseases the classifier itself flags as edge cases.
    #[serde(default)]
    pub edge_cases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierPrediction {
    pub disease: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub is_edge_case: bool,
}

/// The patient twin's own response shape. Scores arrive as `probability`,
/// symptoms as `{ symptom, confidence }` pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct TwinReply {
    #[serde(default)]
    pub extracted_symptoms: Vec<TwinSymptom>,
    #[serde(default)]
    pub diagnosis_predictions: Vec<TwinPrediction>,
    /// Risk label ("LOW" / "MEDIUM" / "HIGH"); may be absent.
    #[serde(default)]
    pub risk_score: Option<String>,
    /// Plain-language narrative of the encounter.
    #[serde(default)]
    pub patient_story: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwinSymptom {
    pub symptom: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwinPrediction {
    pub disease: String,
    #[serde(default)]
    pub probability: f32,
    #[serde(default)]
    pub is_edge_case: bool,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    transcript: &'a str,
}

#[derive(Debug, Serialize)]
struct TwinRequest<'a> {
    transcript: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    patient_id: Option<&'a str>,
}

/// Symptom/disease classifier collaborator.
#[async_trait]
pub trait DiagnosisClassifier: Send + Sync + 'static {
    async fn analyze(
        &self,
        session: &SessionContext,
        transcript: &Transcript,
    ) -> GatewayResult<ClassifierReply>;
}

/// Patient-twin synthesis collaborator (LLM-backed).
#[async_trait]
pub trait PatientTwin: Send + Sync + 'static {
    async fn synthesize(
        &self,
        session: &SessionContext,
        transcript: &Transcript,
        patient_id: Option<&str>,
    ) -> GatewayResult<TwinReply>;
}

/// Classifier collaborator over HTTP.
pub struct HttpClassifier {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClassifier {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DiagnosisClassifier for HttpClassifier {
    async fn analyze(
        &self,
        session: &SessionContext,
        transcript: &Transcript,
    ) -> GatewayResult<ClassifierReply> {
        let response = self
            .http
            .post(format!("{}/diagnosis/analyze", self.base_url))
            .bearer_auth(&session.access_token)
            .json(&AnalyzeRequest {
                transcript: transcript.as_str(),
            })
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let reply: ClassifierReply = expect_ok(response)
            .await?
            .json()
            .await
            .map_err(GatewayError::Decode)?;

        debug!(
            predictions = reply.predictions.len(),
            symptoms = reply.symptoms.len(),
            "Classifier reply received"
        );
        Ok(reply)
    }
}

/// Patient-twin collaborator over HTTP.
pub struct HttpPatientTwin {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPatientTwin {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PatientTwin for HttpPatientTwin {
    async fn synthesize(
        &self,
        session: &SessionContext,
        transcript: &Transcript,
        patient_id: Option<&str>,
    ) -> GatewayResult<TwinReply> {
        let response = self
            .http
            .post(format!("{}/diagnosis/twin", self.base_url))
            .bearer_auth(&session.access_token)
            .json(&TwinRequest {
                transcript: transcript.as_str(),
                patient_id,
            })
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let reply: TwinReply = expect_ok(response)
            .await?
            .json()
            .await
            .map_err(GatewayError::Decode)?;

        debug!(
            predictions = reply.diagnosis_predictions.len(),
            risk = reply.risk_score.as_deref().unwrap_or("absent"),
            "Patient-twin reply received"
        );
        Ok(reply)
    }
}
