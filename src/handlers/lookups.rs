use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{brand, category, color, gender, size};
use crate::handlers::common::{map_service_error, success_response};
use crate::{errors::ApiError, AppState};

/// Creates the router for the dimension lookup endpoints that feed the
/// storefront filter UI.
pub fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/brands", get(list_brands))
        .route("/categories", get(list_categories))
        .route("/colors", get(list_colors))
        .route("/sizes", get(list_sizes))
        .route("/genders", get(list_genders))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrandResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<brand::Model> for BrandResponse {
    fn from(model: brand::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<Uuid>,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            parent_id: model.parent_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ColorResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub hex_code: String,
}

impl From<color::Model> for ColorResponse {
    fn from(model: color::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            hex_code: model.hex_code,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SizeResponse {
    pub id: Uuid,
    pub label: String,
    pub slug: String,
}

impl From<size::Model> for SizeResponse {
    fn from(model: size::Model) -> Self {
        Self {
            id: model.id,
            label: model.label,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenderResponse {
    pub id: Uuid,
    pub label: String,
    pub slug: String,
}

impl From<gender::Model> for GenderResponse {
    fn from(model: gender::Model) -> Self {
        Self {
            id: model.id,
            label: model.label,
            slug: model.slug,
        }
    }
}

/// List brands
#[utoipa::path(
    get,
    path = "/api/v1/brands",
    responses(
        (status = 200, description = "Brands retrieved", body = Vec<BrandResponse>)
    ),
    tag = "Lookups"
)]
pub async fn list_brands(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let brands = state
        .services
        .lookups
        .list_brands()
        .await
        .map_err(map_service_error)?;
    let brands: Vec<BrandResponse> = brands.into_iter().map(BrandResponse::from).collect();

    Ok(success_response(brands))
}

/// List active categories in display order
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Categories retrieved", body = Vec<CategoryResponse>)
    ),
    tag = "Lookups"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let categories = state
        .services
        .lookups
        .list_categories()
        .await
        .map_err(map_service_error)?;
    let categories: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();

    Ok(success_response(categories))
}

/// List colors
#[utoipa::path(
    get,
    path = "/api/v1/colors",
    responses(
        (status = 200, description = "Colors retrieved", body = Vec<ColorResponse>)
    ),
    tag = "Lookups"
)]
pub async fn list_colors(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let colors = state
        .services
        .lookups
        .list_colors()
        .await
        .map_err(map_service_error)?;
    let colors: Vec<ColorResponse> = colors.into_iter().map(ColorResponse::from).collect();

    Ok(success_response(colors))
}

/// List sizes in display order
#[utoipa::path(
    get,
    path = "/api/v1/sizes",
    responses(
        (status = 200, description = "Sizes retrieved", body = Vec<SizeResponse>)
    ),
    tag = "Lookups"
)]
pub async fn list_sizes(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let sizes = state
        .services
        .lookups
        .list_sizes()
        .await
        .map_err(map_service_error)?;
    let sizes: Vec<SizeResponse> = sizes.into_iter().map(SizeResponse::from).collect();

    Ok(success_response(sizes))
}

/// List genders
#[utoipa::path(
    get,
    path = "/api/v1/genders",
    responses(
        (status = 200, description = "Genders retrieved", body = Vec<GenderResponse>)
    ),
    tag = "Lookups"
)]
pub async fn list_genders(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let genders = state
        .services
        .lookups
        .list_genders()
        .await
        .map_err(map_service_error)?;
    let genders: Vec<GenderResponse> = genders.into_iter().map(GenderResponse::from).collect();

    Ok(success_response(genders))
}
