//! Framework document ingestion
//!
//! Converts an input document (CSV, JSON, free text, or PDF) into a
//! normalized `ParsedFramework`. All four paths converge on the same output
//! shape; a parse failure is fatal to that single document's ingestion and
//! no partial framework is ever returned.

use crate::model::{DocumentFormat, FrameworkSource, ParsedFramework};
use crate::service::llm::LlmClient;

pub mod csv;
pub mod error;
pub mod json;
pub mod pdf;
pub mod prompts;
pub mod text;

pub use error::ParseError;

/// Environment variable for the extraction model (defaults to gpt-4o-mini)
const ENV_EXTRACTION_MODEL: &str = "EXTRACTION_MODEL";

/// Default model for framework extraction
const DEFAULT_MODEL: &str = rig::providers::openai::GPT_4O_MINI;

/// Service for parsing framework documents into normalized frameworks.
///
/// The LLM client is optional: CSV and JSON parsing never need it, while
/// the text and PDF paths fail fast with a configuration error when it is
/// absent.
pub struct ParserService {
    llm_client: Option<LlmClient>,
    model: String,
}

impl ParserService {
    /// Create a new parser service
    /// Optionally uses EXTRACTION_MODEL env var (defaults to gpt-4o-mini).
    pub fn new(llm_client: Option<LlmClient>) -> Self {
        let model =
            std::env::var(ENV_EXTRACTION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(
            model = %model,
            extractor_configured = llm_client.is_some(),
            "Framework parser service initialized"
        );

        Self { llm_client, model }
    }

    /// Whether the text/PDF extraction collaborator is configured.
    pub fn extractor_configured(&self) -> bool {
        self.llm_client.is_some()
    }

    /// Parse a framework document in the given format.
    pub async fn parse_framework_document(
        &self,
        document: &[u8],
        format: DocumentFormat,
    ) -> Result<ParsedFramework, ParseError> {
        let framework = match format {
            DocumentFormat::Csv => csv::parse_csv(as_text(document)?)?,
            DocumentFormat::Json => json::parse_json(as_text(document)?)?,
            DocumentFormat::Text => {
                text::parse_text(
                    self.llm_client.as_ref(),
                    &self.model,
                    as_text(document)?,
                    FrameworkSource::TextUploadLlm,
                )
                .await?
            }
            DocumentFormat::Pdf => {
                pdf::parse_pdf(self.llm_client.as_ref(), &self.model, document).await?
            }
        };

        tracing::info!(
            framework = %framework.name,
            controls = framework.controls.len(),
            format = ?format,
            "Parsed framework document"
        );

        Ok(framework)
    }
}

fn as_text(document: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(document).map_err(|_| ParseError::NotUtf8)
}

/// Normalize an imported control id: trim, uppercase, strip a literal
/// `"CONTROL "` prefix.
pub fn normalize_control_id(id: &str) -> String {
    let normalized = id.trim().to_uppercase();
    normalized
        .strip_prefix("CONTROL ")
        .unwrap_or(&normalized)
        .to_string()
}

/// Derive the parent category of a dotted control id: the first two
/// dot-segments, or the whole id when fewer than two exist.
pub fn extract_category_from_control_id(id: &str) -> String {
    let segments: Vec<&str> = id.split('.').collect();
    if segments.len() >= 2 {
        format!("{}.{}", segments[0], segments[1])
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_control_prefix_and_uppercases() {
        assert_eq!(normalize_control_id("control a.5.1.1"), "A.5.1.1");
        assert_eq!(normalize_control_id("  A.5.1  "), "A.5.1");
        assert_eq!(normalize_control_id("pr.ac-1"), "PR.AC-1");
        assert_eq!(normalize_control_id(""), "");
    }

    #[test]
    fn category_is_first_two_dot_segments() {
        assert_eq!(extract_category_from_control_id("A.5.1.1"), "A.5");
        assert_eq!(extract_category_from_control_id("A.5"), "A.5");
        assert_eq!(extract_category_from_control_id("CC6"), "CC6");
    }

    #[tokio::test]
    async fn dispatch_routes_csv() {
        let service = ParserService {
            llm_client: None,
            model: "unused".to_string(),
        };
        let doc = b"control_id,category,title\nA.5.1,A.5,Policy\n";
        let framework = service
            .parse_framework_document(doc, DocumentFormat::Csv)
            .await
            .expect("valid csv");
        assert_eq!(framework.source, FrameworkSource::CsvUpload);
    }

    #[tokio::test]
    async fn text_without_credential_is_a_config_error() {
        let service = ParserService {
            llm_client: None,
            model: "unused".to_string(),
        };
        let err = service
            .parse_framework_document(b"free text", DocumentFormat::Text)
            .await
            .expect_err("unconfigured");
        assert!(matches!(err, ParseError::ExtractorUnavailable));
    }

    #[tokio::test]
    async fn non_utf8_csv_is_rejected() {
        let service = ParserService {
            llm_client: None,
            model: "unused".to_string(),
        };
        let err = service
            .parse_framework_document(&[0xff, 0xfe, 0x00], DocumentFormat::Csv)
            .await
            .expect_err("invalid utf-8");
        assert!(matches!(err, ParseError::NotUtf8));
    }
}
