use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use consilium_config::Settings;
use consilium_core::{
    CompletionBus, ConfirmationTransaction, InferenceOrchestrator, RecordingPipeline,
};
use consilium_gateway::{
    build_http_client, AudioCapture, HttpArtifactRenderer, HttpAudioStore, HttpClassifier,
    HttpEncounterStore, HttpPatientTwin, HttpSpeechToText,
};
use consilium_models::{Role, SessionContext};

use super::collab::CollabServer;

/// Capture source that hands back a canned blob, standing in for the device
/// boundary.
pub struct StaticMic(pub Vec<u8>);

#[async_trait]
impl AudioCapture for StaticMic {
    async fn capture(&self) -> anyhow::Result<Vec<u8>> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// The assembled core wired against the stub collaborators.
pub struct Harness {
    pub server: CollabServer,
    pub session: SessionContext,
    pub pipeline: RecordingPipeline,
    pub orchestrator: InferenceOrchestrator,
    pub confirmations: ConfirmationTransaction,
    pub bus: CompletionBus,
    pub records: Arc<HttpEncounterStore>,
}

impl Harness {
    pub async fn spawn() -> Self {
        Self::spawn_with(Duration::from_secs(30)).await
    }

    /// Spawns the harness with a custom transcription bound (timeout tests
    /// shrink it instead of waiting 30 wall-clock seconds).
    pub async fn spawn_with(transcribe_timeout: Duration) -> Self {
        let server = CollabServer::spawn().await;
        Self::assemble(server, transcribe_timeout, Arc::new(StaticMic(fake_webm()))).await
    }

    /// Spawns the harness with a caller-provided capture source.
    pub async fn spawn_with_capture(capture: Arc<dyn AudioCapture>) -> Self {
        let server = CollabServer::spawn().await;
        Self::assemble(server, Duration::from_secs(30), capture).await
    }

    async fn assemble(
        server: CollabServer,
        transcribe_timeout: Duration,
        capture: Arc<dyn AudioCapture>,
    ) -> Self {
        let settings = Settings::single_host(&server.base_url);
        let http: reqwest::Client = build_http_client(&settings.http).unwrap();

        let store = Arc::new(HttpAudioStore::new(
            http.clone(),
            &settings.collaborators.storage_url,
        ));
        let speech = Arc::new(HttpSpeechToText::new(
            http.clone(),
            &settings.collaborators.speech_url,
        ));
        let classifier = Arc::new(HttpClassifier::new(
            http.clone(),
            &settings.collaborators.classifier_url,
        ));
        let twin = Arc::new(HttpPatientTwin::new(
            http.clone(),
            &settings.collaborators.twin_url,
        ));
        let records = Arc::new(HttpEncounterStore::new(
            http.clone(),
            &settings.collaborators.records_url,
        ));
        let artifacts = Arc::new(HttpArtifactRenderer::new(
            http,
            &settings.collaborators.artifact_url,
        ));

        let bus = CompletionBus::new();
        let pipeline = RecordingPipeline::new(capture, store, speech, transcribe_timeout);
        let orchestrator = InferenceOrchestrator::new(classifier, twin);
        let confirmations =
            ConfirmationTransaction::new(records.clone(), artifacts, bus.clone());

        Self {
            server,
            session: SessionContext::establish(
                "doctor-1",
                "doctor@example.com",
                Role::Doctor,
                "test-token",
            ),
            pipeline,
            orchestrator,
            confirmations,
            bus,
            records,
        }
    }
}

/// A tiny stand-in blob; the stub storage never inspects the payload.
pub fn fake_webm() -> Vec<u8> {
    b"\x1a\x45\xdf\xa3consilium-test-audio".to_vec()
}
