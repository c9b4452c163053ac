use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level settings for the encounter core.
///
/// Layered: built-in defaults → optional `consilium.toml` → environment
/// overrides with the `CONSILIUM_` prefix (`__` as section separator), e.g.
/// `CONSILIUM_RECORDING__TRANSCRIBE_TIMEOUT_SECS=45`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub collaborators: CollaboratorSettings,
    pub recording: RecordingSettings,
    pub http: HttpSettings,
}

/// Base URLs of the external collaborators the core talks to.
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorSettings {
    /// Audio blob storage (upload endpoint).
    pub storage_url: String,
    /// Speech-to-text service.
    pub speech_url: String,
    /// Symptom/disease classifier.
    pub classifier_url: String,
    /// Patient-twin synthesis service.
    pub twin_url: String,
    /// Encounter persistence (confirm + patient read path).
    pub records_url: String,
    /// Prescription artifact renderer.
    pub artifact_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordingSettings {
    /// Bound on the transcription wait before the caller is routed to
    /// manual entry.
    pub transcribe_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Outer request timeout applied to the shared HTTP client.
    pub request_timeout_secs: u64,
}

/// The deployment default: every collaborator behind one API host.
const DEFAULT_BASE: &str = "http://localhost:8000/api";

impl Settings {
    /// Loads settings from file + environment on top of the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        // Populate the process env from .env before the Environment source reads it.
        let _ = dotenvy::dotenv();

        Self::builder()?
            .add_source(File::with_name("consilium").required(false))
            .add_source(Environment::with_prefix("CONSILIUM").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Settings with every collaborator rooted at `base` and no file/env
    /// sources. Used by the integration harness against a single stub host.
    pub fn single_host(base: &str) -> Self {
        Self {
            collaborators: CollaboratorSettings {
                storage_url: base.to_string(),
                speech_url: base.to_string(),
                classifier_url: base.to_string(),
                twin_url: base.to_string(),
                records_url: base.to_string(),
                artifact_url: base.to_string(),
            },
            recording: RecordingSettings {
                transcribe_timeout_secs: 30,
            },
            http: HttpSettings {
                request_timeout_secs: 60,
            },
        }
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("collaborators.storage_url", DEFAULT_BASE)?
            .set_default("collaborators.speech_url", DEFAULT_BASE)?
            .set_default("collaborators.classifier_url", DEFAULT_BASE)?
            .set_default("collaborators.twin_url", DEFAULT_BASE)?
            .set_default("collaborators.records_url", DEFAULT_BASE)?
            .set_default("collaborators.artifact_url", DEFAULT_BASE)?
            .set_default("recording.transcribe_timeout_secs", 30)?
            .set_default("http.request_timeout_secs", 60)
    }
}
