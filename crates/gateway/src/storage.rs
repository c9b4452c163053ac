use async_trait::async_trait;
use consilium_models::{SessionContext, UploadHandle};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::{expect_ok, GatewayError, GatewayResult};

/// Audio blob storage collaborator.
#[async_trait]
pub trait AudioStore: Send + Sync + 'static {
    /// Uploads an encoded audio blob and returns the handle a later
    /// transcription request correlates against.
    async fn upload(&self, session: &SessionContext, audio: Vec<u8>) -> GatewayResult<UploadHandle>;
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    upload_id: String,
}

/// Storage collaborator over HTTP (multipart upload).
pub struct HttpAudioStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAudioStore {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AudioStore for HttpAudioStore {
    async fn upload(&self, session: &SessionContext, audio: Vec<u8>) -> GatewayResult<UploadHandle> {
        let size = audio.len();
        let part = Part::bytes(audio)
            .file_name("encounter.webm")
            .mime_str("audio/webm")
            .map_err(GatewayError::Transport)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/record/upload", self.base_url))
            .bearer_auth(&session.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let reply: UploadReply = expect_ok(response)
            .await?
            .json()
            .await
            .map_err(GatewayError::Decode)?;

        debug!(upload_id = %reply.upload_id, size, "Audio blob uploaded");
        Ok(UploadHandle::new(reply.upload_id))
    }
}
