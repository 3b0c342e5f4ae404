use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use utoipa::ToSchema;

/// How a control is implemented within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ControlType {
    Technical,
    Operational,
    Management,
    /// A value outside the known set, preserved verbatim so the validator
    /// can itemize it instead of the parser silently rewriting it.
    #[serde(untagged)]
    Other(String),
}

impl ControlType {
    /// Parse a loosely-formatted value from an import document.
    /// A missing value falls back to `Operational`; an unrecognized one is
    /// carried through as [`ControlType::Other`].
    pub fn from_import_value(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "" => ControlType::Operational,
            "technical" => ControlType::Technical,
            "operational" => ControlType::Operational,
            "management" => ControlType::Management,
            _ => ControlType::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlType::Technical => write!(f, "technical"),
            ControlType::Operational => write!(f, "operational"),
            ControlType::Management => write!(f, "management"),
            ControlType::Other(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    /// Parse a loosely-formatted value from an import document.
    pub fn from_import_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Criticality::Low),
            "medium" => Some(Criticality::Medium),
            "high" => Some(Criticality::High),
            "critical" => Some(Criticality::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criticality::Low => write!(f, "low"),
            Criticality::Medium => write!(f, "medium"),
            Criticality::High => write!(f, "high"),
            Criticality::Critical => write!(f, "critical"),
        }
    }
}

/// A single atomic compliance requirement within a framework.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Control {
    /// Stable hierarchical identifier in dot notation (e.g. `A.5.1.1`).
    pub id: String,
    /// Category the control belongs to; must name a category defined by the
    /// owning framework.
    pub category: String,
    pub title: String,
    pub description: String,
    pub control_type: ControlType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criticality: Option<Criticality>,
    /// Ids of related controls in the same framework. Lookup only, not
    /// ownership.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_controls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objectives: Option<Vec<String>>,
}

/// A named grouping of controls within a framework.
///
/// `control_count` is derived and recomputed on demand; it is never stored
/// alongside mutable control data where it could drift.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FrameworkCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub control_count: usize,
}

/// Provenance tag recording how a framework document entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkSource {
    CsvUpload,
    JsonUpload,
    TextUploadLlm,
    PdfUpload,
}

/// Supported input document formats for framework ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Csv,
    Json,
    Text,
    Pdf,
}

/// The normalized output of framework document ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParsedFramework {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    pub source: FrameworkSource,
    /// Ordered control list. Must be non-empty for the framework to be
    /// usable downstream; enforced by the validator, not here.
    pub controls: Vec<Control>,
    /// Import diagnostics (row counts, timestamps).
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ParsedFramework {
    /// Standard import diagnostics recorded by every parser path.
    pub fn import_metadata(rows: usize) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        metadata.insert("imported_controls".to_string(), rows.to_string());
        metadata.insert("imported_at".to_string(), Utc::now().to_rfc3339());
        metadata
    }
}
