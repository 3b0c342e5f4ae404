//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::framework::parse_framework,
        crate::api::framework::validate,
        crate::api::mapping::compute_mapping,
        crate::api::mapping::compatibility,
        crate::api::catalog::list_frameworks,
        crate::api::catalog::get_framework,
        crate::api::catalog::query_controls,
        crate::api::catalog::get_category,
        crate::api::catalog::get_related,
        crate::api::catalog::get_hierarchy,
        crate::api::catalog::get_stats,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    tags(
        (name = "frameworks", description = "Framework document ingestion and validation"),
        (name = "mappings", description = "Cross-framework control mapping"),
        (name = "catalog", description = "Read-only reference control catalog"),
        (name = "health", description = "Service health probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
