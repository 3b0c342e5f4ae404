//! Free-text framework extraction via the LLM collaborator
//!
//! The collaborator is treated as configured or unconfigured: unconfigured
//! is a hard failure raised before any network attempt. A failed call and a
//! response that does not deserialize into the extraction shape are
//! distinct errors.

use rig::client::CompletionClient;
use rig::extractor::ExtractionError;

use crate::model::extraction::ExtractedFramework;
use crate::model::{Control, ControlType, Criticality, FrameworkSource, ParsedFramework};
use crate::service::llm::LlmClient;
use crate::service::parser::error::ParseError;
use crate::service::parser::prompts::{EXTRACTION_SYSTEM_PROMPT, build_extraction_prompt};
use crate::service::parser::{extract_category_from_control_id, normalize_control_id};

/// Extract a framework from free text using the LLM collaborator.
pub async fn parse_text(
    llm_client: Option<&LlmClient>,
    model: &str,
    document: &str,
    source: FrameworkSource,
) -> Result<ParsedFramework, ParseError> {
    let Some(client) = llm_client else {
        return Err(ParseError::ExtractorUnavailable);
    };

    let prompt = build_extraction_prompt(document);
    let start_time = std::time::Instant::now();

    tracing::debug!(
        model = %model,
        document_length = document.len(),
        "Initiating LLM call for framework extraction"
    );

    // Use temperature=0.0 for deterministic, reproducible outputs
    let extractor = client
        .openai_client()
        .extractor::<ExtractedFramework>(model)
        .preamble(EXTRACTION_SYSTEM_PROMPT)
        .additional_params(serde_json::json!({
            "temperature": 0.0
        }))
        .build();

    let extracted = match extractor.extract(prompt.as_str()).await {
        Ok(extracted) => {
            tracing::info!(
                model = %model,
                elapsed_ms = start_time.elapsed().as_millis(),
                controls_extracted = extracted.controls.len(),
                "LLM framework extraction completed"
            );
            extracted
        }
        Err(e @ (ExtractionError::NoData | ExtractionError::DeserializationError(_))) => {
            tracing::error!(
                model = %model,
                elapsed_ms = start_time.elapsed().as_millis(),
                error = %e,
                "LLM response did not match the extraction shape"
            );
            return Err(ParseError::InvalidExtractionResponse(e.to_string()));
        }
        Err(e) => {
            tracing::error!(
                model = %model,
                elapsed_ms = start_time.elapsed().as_millis(),
                error = %e,
                "LLM framework extraction failed"
            );
            return Err(ParseError::ExtractionFailed(e.to_string()));
        }
    };

    Ok(into_framework(extracted, source))
}

/// Convert the loose extraction wire shape into the normalized framework.
fn into_framework(extracted: ExtractedFramework, source: FrameworkSource) -> ParsedFramework {
    let controls: Vec<Control> = extracted
        .controls
        .into_iter()
        .map(|c| {
            let id = normalize_control_id(c.id.as_deref().unwrap_or_default());
            let category = match c.category {
                Some(category) if !category.trim().is_empty() => category.trim().to_string(),
                _ if !id.is_empty() => extract_category_from_control_id(&id),
                _ => "Uncategorized".to_string(),
            };
            Control {
                id,
                category,
                title: c.title.unwrap_or_default(),
                description: c.description.unwrap_or_default(),
                control_type: ControlType::from_import_value(
                    c.control_type.as_deref().unwrap_or_default(),
                ),
                criticality: c
                    .criticality
                    .as_deref()
                    .and_then(Criticality::from_import_value),
                related_controls: None,
                objectives: None,
            }
        })
        .collect();

    let metadata = ParsedFramework::import_metadata(controls.len());

    ParsedFramework {
        name: extracted.name,
        version: extracted.version.unwrap_or_default(),
        description: extracted.description.unwrap_or_default(),
        source,
        controls,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_extractor_fails_before_any_call() {
        let err = parse_text(None, "gpt-4o-mini", "some text", FrameworkSource::TextUploadLlm)
            .await
            .expect_err("no credential");
        assert!(matches!(err, ParseError::ExtractorUnavailable));
    }

    #[test]
    fn extraction_shape_converts_with_fallbacks() {
        let extracted: ExtractedFramework = serde_json::from_str(
            r#"{
                "name": "NIST-ish",
                "controls": [
                    {"id": "pr.ac-1", "title": "Identity management",
                     "controlType": "technical"},
                    {"title": "Orphan control"}
                ]
            }"#,
        )
        .expect("wire shape parses");

        let framework = into_framework(extracted, FrameworkSource::TextUploadLlm);
        assert_eq!(framework.name, "NIST-ish");
        assert_eq!(framework.controls[0].id, "PR.AC-1");
        assert_eq!(framework.controls[0].category, "PR.AC-1");
        assert_eq!(framework.controls[0].control_type, ControlType::Technical);
        assert_eq!(framework.controls[1].category, "Uncategorized");
        assert_eq!(framework.controls[1].control_type, ControlType::Operational);
    }
}
