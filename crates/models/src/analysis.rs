use serde::{Deserialize, Serialize};

/// A symptom surfaced by inference.
///
/// The classifier reports bare names; the patient twin scores them. Both end
/// up here, confidence retained where the source provided one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomObservation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// A candidate diagnosis with its normalized score.
///
/// `score` is the one field both inference sources map into, whatever they
/// called it on the wire. Lists are presented descending by score; ties keep
/// source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisPrediction {
    pub disease: String,
    pub score: f32,
    #[serde(default)]
    pub is_edge_case: bool,
}

/// Overall encounter risk as reported by the patient twin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Parses a collaborator-reported risk string.
    ///
    /// Absent or unrecognized input is `Low`: the fail-safe default, not a
    /// fail-loud one.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value
            .map(|v| v.trim().to_ascii_uppercase())
            .as_deref()
        {
            Some("HIGH") => Self::High,
            Some("MEDIUM") => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        f.write_str(label)
    }
}

/// A diagnosis or condition flagged as worth monitoring though not the
/// primary diagnosis. `name` is the unique key (case-sensitive, trimmed)
/// within a consolidated list; `further_steps` is clinician-authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCase {
    pub name: String,
    #[serde(default)]
    pub further_steps: String,
}

impl EdgeCase {
    /// A freshly suggested edge case with no clinician notes yet.
    pub fn suggested(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            further_steps: String::new(),
        }
    }
}

/// The unified view produced by joining both inference calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symptoms: Vec<SymptomObservation>,
    pub predictions: Vec<DiagnosisPrediction>,
    pub risk_level: RiskLevel,
    pub narrative_summary: String,
    /// De-duplicated edge-case names from both sources, in first-seen order.
    pub edge_case_seeds: Vec<String>,
}
