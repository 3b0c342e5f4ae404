//! Error types for framework document parsing

use thiserror::Error;

/// Error type for framework document parsing.
///
/// Each variant names a distinct ingestion failure so callers (and API
/// consumers) can tell malformed local input apart from collaborator
/// problems. Parsing errors are fatal to the single document being
/// ingested; no partial framework is ever returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// CSV document has fewer than a header row plus one data row
    #[error("CSV document must contain a header row and at least one data row")]
    CsvTooShort,

    /// CSV header is missing one or more required columns
    #[error("CSV missing required columns: {0}")]
    CsvMissingColumns(String),

    /// Document is not syntactically valid JSON
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),

    /// JSON document is missing a required top-level field
    #[error("JSON document missing required field: {0}")]
    MissingField(&'static str),

    /// Document bytes are not valid UTF-8 text
    #[error("Document is not valid UTF-8 text")]
    NotUtf8,

    /// No extraction credential configured; raised before any network attempt
    #[error("Text extraction is not configured: no LLM credential supplied")]
    ExtractorUnavailable,

    /// The extraction collaborator call itself failed
    #[error("LLM extraction failed: {0}")]
    ExtractionFailed(String),

    /// The collaborator responded, but not with parseable JSON
    #[error("LLM extraction response was not valid JSON: {0}")]
    InvalidExtractionResponse(String),

    /// PDF text extraction failed
    #[error("PDF text extraction failed: {0}")]
    PdfExtraction(String),
}
