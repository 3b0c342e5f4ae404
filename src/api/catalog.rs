//! REST API endpoints for the read-only control catalog

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::error::ApiError;
use crate::model::{ControlType, Criticality};
use crate::service::catalog::{
    self, CatalogFramework, ControlFilter, available_framework_names,
};

/// Query parameters for catalog control filtering
#[derive(Debug, Deserialize, IntoParams)]
pub struct ControlQueryParams {
    /// Filter by category id (e.g. `A.9`)
    pub category: Option<String>,
    /// Filter by criticality (low, medium, high, critical)
    pub criticality: Option<Criticality>,
    /// Filter by control type (technical, operational, management)
    pub control_type: Option<ControlType>,
    /// Free-text keyword matched across id, title and description
    pub q: Option<String>,
}

fn lookup(name: &str) -> Result<&'static CatalogFramework, ApiError> {
    catalog::find_framework(name).ok_or_else(|| ApiError::FrameworkNotFound(name.to_string()))
}

/// List all reference framework names held by the catalog
#[utoipa::path(
    get,
    path = "/v1/catalog/frameworks",
    responses(
        (status = 200, description = "Available framework names", body = Vec<String>)
    ),
    tag = "catalog"
)]
#[get("/v1/catalog/frameworks")]
pub async fn list_frameworks() -> HttpResponse {
    HttpResponse::Ok().json(available_framework_names())
}

/// Get a reference framework by name
#[utoipa::path(
    get,
    path = "/v1/catalog/{name}",
    params(("name" = String, Path, description = "Framework name (fuzzy matched)")),
    responses(
        (status = 200, description = "Framework found", body = CatalogFramework),
        (status = 404, description = "Framework not in catalog")
    ),
    tag = "catalog"
)]
#[get("/v1/catalog/{name}")]
pub async fn get_framework(path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let framework = lookup(&path)?;
    Ok(HttpResponse::Ok().json(framework))
}

/// Filter and search a framework's controls
#[utoipa::path(
    get,
    path = "/v1/catalog/{name}/controls",
    params(
        ("name" = String, Path, description = "Framework name (fuzzy matched)"),
        ControlQueryParams
    ),
    responses(
        (status = 200, description = "Matching controls", body = Vec<crate::model::Control>),
        (status = 404, description = "Framework not in catalog")
    ),
    tag = "catalog"
)]
#[get("/v1/catalog/{name}/controls")]
pub async fn query_controls(
    path: web::Path<String>,
    query: web::Query<ControlQueryParams>,
) -> Result<HttpResponse, ApiError> {
    let framework = lookup(&path)?;

    let filter = ControlFilter {
        category: query.category.clone(),
        criticality: query.criticality,
        control_type: query.control_type.clone(),
        query: query.q.clone(),
    };

    Ok(HttpResponse::Ok().json(catalog::filter_controls(framework, &filter)))
}

/// Get category detail with its control count recomputed
#[utoipa::path(
    get,
    path = "/v1/catalog/{name}/categories/{id}",
    params(
        ("name" = String, Path, description = "Framework name (fuzzy matched)"),
        ("id" = String, Path, description = "Category id (e.g. A.9)")
    ),
    responses(
        (status = 200, description = "Category detail", body = crate::model::FrameworkCategory),
        (status = 404, description = "Framework or category not found")
    ),
    tag = "catalog"
)]
#[get("/v1/catalog/{name}/categories/{id}")]
pub async fn get_category(path: web::Path<(String, String)>) -> Result<HttpResponse, ApiError> {
    let (name, category_id) = path.into_inner();
    let framework = lookup(&name)?;

    let detail = catalog::category_detail(framework, &category_id)
        .ok_or_else(|| ApiError::NotFound(format!("category {}", category_id)))?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Expand a control's related-control references
#[utoipa::path(
    get,
    path = "/v1/catalog/{name}/controls/{id}/related",
    params(
        ("name" = String, Path, description = "Framework name (fuzzy matched)"),
        ("id" = String, Path, description = "Control id")
    ),
    responses(
        (status = 200, description = "Related controls", body = Vec<crate::model::Control>),
        (status = 404, description = "Framework not in catalog")
    ),
    tag = "catalog"
)]
#[get("/v1/catalog/{name}/controls/{id}/related")]
pub async fn get_related(path: web::Path<(String, String)>) -> Result<HttpResponse, ApiError> {
    let (name, control_id) = path.into_inner();
    let framework = lookup(&name)?;
    Ok(HttpResponse::Ok().json(catalog::related_controls(framework, &control_id)))
}

/// Decompose a dotted control id into its hierarchy levels
#[utoipa::path(
    get,
    path = "/v1/catalog/{name}/controls/{id}/hierarchy",
    params(
        ("name" = String, Path, description = "Framework name (fuzzy matched)"),
        ("id" = String, Path, description = "Control id")
    ),
    responses(
        (status = 200, description = "Hierarchy levels, shallowest first", body = Vec<String>),
        (status = 404, description = "Framework not in catalog")
    ),
    tag = "catalog"
)]
#[get("/v1/catalog/{name}/controls/{id}/hierarchy")]
pub async fn get_hierarchy(path: web::Path<(String, String)>) -> Result<HttpResponse, ApiError> {
    let (name, control_id) = path.into_inner();
    lookup(&name)?;
    Ok(HttpResponse::Ok().json(catalog::control_hierarchy(&control_id)))
}

/// Aggregate statistics over a framework's controls
#[utoipa::path(
    get,
    path = "/v1/catalog/{name}/stats",
    params(("name" = String, Path, description = "Framework name (fuzzy matched)")),
    responses(
        (status = 200, description = "Catalog statistics",
         body = crate::service::catalog::CatalogStats),
        (status = 404, description = "Framework not in catalog")
    ),
    tag = "catalog"
)]
#[get("/v1/catalog/{name}/stats")]
pub async fn get_stats(path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let framework = lookup(&path)?;
    Ok(HttpResponse::Ok().json(catalog::statistics(framework)))
}

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_frameworks)
        .service(query_controls)
        .service(get_category)
        .service(get_related)
        .service(get_hierarchy)
        .service(get_stats)
        // Registered last: `{name}` would otherwise shadow the fixed segments
        .service(get_framework);
}
