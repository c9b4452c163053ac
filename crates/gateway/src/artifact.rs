use async_trait::async_trait;
use consilium_models::SessionContext;
use tracing::debug;

use crate::records::EncounterDraft;
use crate::{expect_ok, GatewayError, GatewayResult};

/// Prescription-document rendering collaborator. Rendering internals are the
/// collaborator's business; the core only handles the returned bytes.
#[async_trait]
pub trait ArtifactRenderer: Send + Sync + 'static {
    /// Renders the downloadable document from the same finalized data the
    /// persistence call received.
    async fn render(&self, session: &SessionContext, draft: &EncounterDraft)
        -> GatewayResult<Vec<u8>>;
}

/// Artifact renderer over HTTP.
pub struct HttpArtifactRenderer {
    http: reqwest::Client,
    base_url: String,
}

impl HttpArtifactRenderer {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ArtifactRenderer for HttpArtifactRenderer {
    async fn render(
        &self,
        session: &SessionContext,
        draft: &EncounterDraft,
    ) -> GatewayResult<Vec<u8>> {
        let response = self
            .http
            .post(format!("{}/artifact/prescription", self.base_url))
            .bearer_auth(&session.access_token)
            .json(draft)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let bytes = expect_ok(response)
            .await?
            .bytes()
            .await
            .map_err(GatewayError::Decode)?;

        debug!(size = bytes.len(), "Prescription artifact rendered");
        Ok(bytes.to_vec())
    }
}
