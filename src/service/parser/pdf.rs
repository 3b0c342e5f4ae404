//! PDF framework document parsing
//!
//! Runs real PDF text extraction ahead of the shared text path. The
//! extraction collaborator then sees plain text; the `ParsedFramework`
//! contract is unchanged.

use crate::model::{FrameworkSource, ParsedFramework};
use crate::service::llm::LlmClient;
use crate::service::parser::error::ParseError;
use crate::service::parser::text::parse_text;

/// Extract text from a PDF byte buffer and feed it to the text path.
pub async fn parse_pdf(
    llm_client: Option<&LlmClient>,
    model: &str,
    document: &[u8],
) -> Result<ParsedFramework, ParseError> {
    // Fail on a missing credential before doing any extraction work
    if llm_client.is_none() {
        return Err(ParseError::ExtractorUnavailable);
    }

    let text = pdf_extract::extract_text_from_mem(document)
        .map_err(|e| ParseError::PdfExtraction(e.to_string()))?;

    tracing::debug!(
        pdf_bytes = document.len(),
        extracted_chars = text.len(),
        "Extracted text from PDF document"
    );

    parse_text(llm_client, model, &text, FrameworkSource::PdfUpload).await
}
