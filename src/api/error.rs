//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::service::parser::ParseError;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Catalog framework not found (404)
    #[error("Framework not found in catalog: {0}")]
    FrameworkNotFound(String),

    /// Bad request / malformed document (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Extraction collaborator not configured (503)
    #[error("Extraction unavailable: {0}")]
    ExtractorUnavailable(String),

    /// Extraction collaborator failed (502)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::FrameworkNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ExtractorUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::FrameworkNotFound(_) => "framework_not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::ExtractorUnavailable(_) => "extractor_unavailable",
            ApiError::ExternalService(_) => "external_service_error",
            ApiError::Internal(_) => "internal_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::ExtractorUnavailable => {
                ApiError::ExtractorUnavailable(err.to_string())
            }
            ParseError::ExtractionFailed(_) | ParseError::InvalidExtractionResponse(_) => {
                ApiError::ExternalService(err.to_string())
            }
            ParseError::CsvTooShort
            | ParseError::CsvMissingColumns(_)
            | ParseError::InvalidJson(_)
            | ParseError::MissingField(_)
            | ParseError::NotUtf8
            | ParseError::PdfExtraction(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_map_to_distinct_statuses() {
        let bad = ApiError::from(ParseError::CsvTooShort);
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);

        let unconfigured = ApiError::from(ParseError::ExtractorUnavailable);
        assert_eq!(unconfigured.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let upstream = ApiError::from(ParseError::ExtractionFailed("timeout".to_string()));
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);

        let unparseable =
            ApiError::from(ParseError::InvalidExtractionResponse("not json".to_string()));
        assert_eq!(unparseable.status_code(), StatusCode::BAD_GATEWAY);
    }
}
