use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One source-to-target control matching result.
///
/// `target_control_ids` and `target_control_titles` are parallel arrays,
/// ranked best-first. Inputs to the mapper are plain descriptive strings, so
/// id and title carry the same value by design.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ControlMapping {
    pub source_control_id: String,
    pub source_control_title: String,
    pub target_control_ids: Vec<String>,
    pub target_control_titles: Vec<String>,
    /// Similarity score of the top-ranked match, in [0, 1].
    pub confidence_score: f64,
    pub reasoning: String,
}

/// Aggregate mapping result for a source/target framework pair.
///
/// Pure computation result; not persisted by this core and owned by nothing
/// beyond the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FrameworkMapping {
    pub source_framework: String,
    pub target_framework: String,
    pub mappings: Vec<ControlMapping>,
    /// Mean of all mapping confidence scores, rounded to 2 decimals.
    /// Zero when `mappings` is empty.
    pub completeness: f64,
    pub timestamp: DateTime<Utc>,
}
