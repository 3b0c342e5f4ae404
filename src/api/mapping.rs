//! REST API endpoints for control mapping and compatibility lookup

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::{FrameworkMapping, MapperConfig};
use crate::service::mapper::{create_framework_mapping, framework_compatibility, map_controls};

/// Request body for a framework-to-framework mapping computation
#[derive(Debug, Deserialize, ToSchema)]
pub struct MappingRequest {
    pub source_framework: String,
    pub target_framework: String,
    /// One descriptive string per source control (title/description
    /// concatenation is the caller's responsibility)
    pub source_controls: Vec<String>,
    /// One descriptive string per target control
    pub target_controls: Vec<String>,
}

/// Query parameters for the compatibility prior lookup
#[derive(Debug, Deserialize, IntoParams)]
pub struct CompatibilityParams {
    pub source: String,
    pub target: String,
}

/// Compatibility prior lookup result
#[derive(Debug, Serialize, ToSchema)]
pub struct CompatibilityResponse {
    pub source: String,
    pub target: String,
    /// Static historical prior, not a live mapping result
    pub score: f64,
}

/// Compute similarity-based control mappings between two frameworks
#[utoipa::path(
    post,
    path = "/v1/mappings",
    request_body = MappingRequest,
    responses(
        (status = 200, description = "Mapping computed", body = FrameworkMapping)
    ),
    tag = "mappings"
)]
#[post("/v1/mappings")]
pub async fn compute_mapping(
    config: web::Data<MapperConfig>,
    request: web::Json<MappingRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    let mappings = map_controls(&request.source_controls, &request.target_controls, &config);
    let mapping = create_framework_mapping(
        &request.source_framework,
        &request.target_framework,
        mappings,
    );

    tracing::info!(
        source = %mapping.source_framework,
        target = %mapping.target_framework,
        source_controls = request.source_controls.len(),
        mapped = mapping.mappings.len(),
        completeness = mapping.completeness,
        "Computed framework mapping"
    );

    HttpResponse::Ok().json(mapping)
}

/// Look up the static compatibility prior for a framework pair
///
/// Returns the historical prior only; it never reflects a live mapping
/// computation.
#[utoipa::path(
    get,
    path = "/v1/compatibility",
    params(CompatibilityParams),
    responses(
        (status = 200, description = "Compatibility prior", body = CompatibilityResponse)
    ),
    tag = "mappings"
)]
#[get("/v1/compatibility")]
pub async fn compatibility(query: web::Query<CompatibilityParams>) -> HttpResponse {
    let score = framework_compatibility(&query.source, &query.target);

    HttpResponse::Ok().json(CompatibilityResponse {
        source: query.source.clone(),
        target: query.target.clone(),
        score,
    })
}

/// Configure mapping routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(compute_mapping).service(compatibility);
}
