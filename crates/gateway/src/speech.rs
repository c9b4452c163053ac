use async_trait::async_trait;
use consilium_models::{SessionContext, UploadHandle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{expect_ok, GatewayError, GatewayResult};

/// Literal sentinel some deployments return when no real speech-to-text
/// backend is configured. Must never be treated as transcript content.
pub const STUB_TRANSCRIPT_SENTINEL: &str =
    "[Stub transcript: speech-to-text backend not configured]";

/// What the speech collaborator said about one upload.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeReply {
    pub transcript: String,
    pub upload_id: String,
    /// Explicit stub flag; older deployments only send the sentinel text.
    #[serde(default)]
    pub is_stub: bool,
}

impl TranscribeReply {
    /// True when the backend has no real speech-to-text configured, whether
    /// it said so via the flag or via the literal sentinel.
    pub fn is_stub_reply(&self) -> bool {
        self.is_stub || self.transcript.contains(STUB_TRANSCRIPT_SENTINEL)
    }
}

#[derive(Debug, Serialize)]
struct TranscribeRequest<'a> {
    upload_id: &'a str,
}

/// Speech-to-text collaborator.
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Requests transcription of a previously uploaded blob. The handle is
    /// consumed: the collaborator discards the blob after answering.
    async fn transcribe(
        &self,
        session: &SessionContext,
        handle: &UploadHandle,
    ) -> GatewayResult<TranscribeReply>;
}

/// Speech-to-text collaborator over HTTP.
pub struct HttpSpeechToText {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSpeechToText {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SpeechToText for HttpSpeechToText {
    async fn transcribe(
        &self,
        session: &SessionContext,
        handle: &UploadHandle,
    ) -> GatewayResult<TranscribeReply> {
        let response = self
            .http
            .post(format!("{}/record/transcribe", self.base_url))
            .bearer_auth(&session.access_token)
            .json(&TranscribeRequest {
                upload_id: handle.as_str(),
            })
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let reply: TranscribeReply = expect_ok(response)
            .await?
            .json()
            .await
            .map_err(GatewayError::Decode)?;

        debug!(
            upload_id = %reply.upload_id,
            is_stub = reply.is_stub_reply(),
            chars = reply.transcript.len(),
            "Transcription reply received"
        );
        Ok(reply)
    }
}
