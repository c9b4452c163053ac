use async_trait::async_trait;

/// Device-side audio capture boundary.
///
/// Capture mechanics (codecs, devices, permissions) live with the embedding
/// application; the pipeline only needs the finished encounter recording as
/// one encoded blob.
#[async_trait]
pub trait AudioCapture: Send + Sync + 'static {
    /// Captures one encounter recording and returns the encoded audio blob.
    async fn capture(&self) -> anyhow::Result<Vec<u8>>;

    /// Human-readable source name, for logging.
    fn name(&self) -> &str;
}

/// Capture source that replays a pre-recorded audio file.
pub struct FileAudioSource {
    path: std::path::PathBuf,
}

impl FileAudioSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AudioCapture for FileAudioSource {
    async fn capture(&self) -> anyhow::Result<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "file"
    }
}
