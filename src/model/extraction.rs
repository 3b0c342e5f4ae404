//! Wire shapes for LLM framework extraction.
//!
//! The extractor derives its submission schema from these types; fields are
//! deliberately loose (defaults everywhere) because model output drifts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedFramework {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub controls: Vec<ExtractedControl>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedControl {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "controlType", alias = "control_type")]
    pub control_type: Option<String>,
    #[serde(default)]
    pub criticality: Option<String>,
}
