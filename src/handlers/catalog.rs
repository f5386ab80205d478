use axum::{
    extract::{Path, RawQuery, State},
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::handlers::common::{map_service_error, success_response};
use crate::services::catalog::CatalogFilter;
use crate::{errors::ApiError, AppState};

/// Creates the router for catalog listing endpoints
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/variants", get(list_variants))
}

/// Catalog listing: one item per product
#[utoipa::path(
    get,
    path = "/api/v1/catalog/products",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match against product name or description"),
        ("gender" = Option<Vec<String>>, Query, description = "Gender slugs (repeatable)"),
        ("brand" = Option<Vec<String>>, Query, description = "Brand slugs (repeatable)"),
        ("category" = Option<Vec<String>>, Query, description = "Category slugs (repeatable)"),
        ("color" = Option<Vec<String>>, Query, description = "Color slugs (repeatable)"),
        ("size" = Option<Vec<String>>, Query, description = "Size slugs (repeatable)"),
        ("price" = Option<Vec<String>>, Query, description = "Price bands: `min-max`, `min-` or `-max` (repeatable)"),
        ("min_price" = Option<f64>, Query, description = "Explicit lower bound on effective price"),
        ("max_price" = Option<f64>, Query, description = "Explicit upper bound on effective price"),
        ("sort" = Option<String>, Query, description = "`newest` (default), `price_asc` or `price_desc`"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size, clamped to 60")
    ),
    responses(
        (status = 200, description = "Catalog page", body = crate::services::catalog::Listing<crate::services::catalog::CatalogItem>),
        (status = 500, description = "Query failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let filter = CatalogFilter::from_query(query.as_deref().unwrap_or(""));
    let listing = state
        .services
        .catalog
        .list_products(&filter)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(listing))
}

/// Variant/SKU listing: one item per variant
#[utoipa::path(
    get,
    path = "/api/v1/catalog/variants",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match against product name or description"),
        ("gender" = Option<Vec<String>>, Query, description = "Gender slugs (repeatable)"),
        ("brand" = Option<Vec<String>>, Query, description = "Brand slugs (repeatable)"),
        ("category" = Option<Vec<String>>, Query, description = "Category slugs (repeatable)"),
        ("color" = Option<Vec<String>>, Query, description = "Color slugs (repeatable)"),
        ("size" = Option<Vec<String>>, Query, description = "Size slugs (repeatable)"),
        ("price" = Option<Vec<String>>, Query, description = "Price bands: `min-max`, `min-` or `-max` (repeatable)"),
        ("sort" = Option<String>, Query, description = "`newest` (default), `price_asc` or `price_desc`"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size, clamped to 60")
    ),
    responses(
        (status = 200, description = "Variant page", body = crate::services::catalog::Listing<crate::services::catalog::VariantItem>),
        (status = 500, description = "Query failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn list_variants(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let filter = CatalogFilter::from_query(query.as_deref().unwrap_or(""));
    let listing = state
        .services
        .catalog
        .list_variants(&filter)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(listing))
}

/// Product detail with variants and images
#[utoipa::path(
    get,
    path = "/api/v1/catalog/products/:id",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product retrieved", body = crate::services::catalog::ProductDetail),
        (status = 404, description = "Product not found or unpublished", body = crate::errors::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let detail = state
        .services
        .catalog
        .get_product(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(detail))
}
