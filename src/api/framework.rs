//! REST API endpoints for framework ingestion and validation

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::error::ApiError;
use crate::model::{DocumentFormat, ParsedFramework};
use crate::service::ParserService;
use crate::service::validation::validate_framework;

/// Query parameters for document parsing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ParseParams {
    /// Input document format (csv, json, text, pdf)
    pub format: DocumentFormat,
}

/// Parse a framework document into a normalized framework
///
/// The request body carries the raw document bytes; CSV, JSON and free text
/// must be UTF-8, PDF is a binary buffer.
#[utoipa::path(
    post,
    path = "/v1/frameworks/parse",
    params(ParseParams),
    request_body(content = Vec<u8>, description = "Raw document bytes"),
    responses(
        (status = 200, description = "Framework parsed successfully", body = ParsedFramework),
        (status = 400, description = "Malformed document"),
        (status = 502, description = "Extraction collaborator failed"),
        (status = 503, description = "Extraction collaborator not configured")
    ),
    tag = "frameworks"
)]
#[post("/v1/frameworks/parse")]
pub async fn parse_framework(
    parser: web::Data<ParserService>,
    query: web::Query<ParseParams>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let framework = parser
        .parse_framework_document(&body, query.format)
        .await?;

    Ok(HttpResponse::Ok().json(framework))
}

/// Validate a parsed framework for structural completeness
///
/// Always returns 200 with the itemized result; validation is a value, not
/// a failure.
#[utoipa::path(
    post,
    path = "/v1/frameworks/validate",
    request_body = ParsedFramework,
    responses(
        (status = 200, description = "Validation result",
         body = crate::service::validation::FrameworkValidationResult)
    ),
    tag = "frameworks"
)]
#[post("/v1/frameworks/validate")]
pub async fn validate(framework: web::Json<ParsedFramework>) -> HttpResponse {
    let result = validate_framework(&framework);

    tracing::debug!(
        framework = %framework.name,
        is_valid = result.is_valid,
        errors = result.errors.len(),
        "Validated framework"
    );

    HttpResponse::Ok().json(result)
}

/// Configure framework routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(parse_framework).service(validate);
}
