use utoipa::OpenApi;

use crate::errors::ErrorResponse;
use crate::handlers::health::HealthResponse;
use crate::handlers::lookups::{
    BrandResponse, CategoryResponse, ColorResponse, GenderResponse, SizeResponse,
};
use crate::services::catalog::{
    CatalogItem, Listing, ProductDetail, ProductImageInfo, VariantDetail, VariantItem,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Faceted catalog listings over products and variants"
    ),
    paths(
        crate::handlers::catalog::list_products,
        crate::handlers::catalog::list_variants,
        crate::handlers::catalog::get_product,
        crate::handlers::lookups::list_brands,
        crate::handlers::lookups::list_categories,
        crate::handlers::lookups::list_colors,
        crate::handlers::lookups::list_sizes,
        crate::handlers::lookups::list_genders,
        crate::handlers::health::health,
    ),
    components(schemas(
        Listing<CatalogItem>,
        Listing<VariantItem>,
        CatalogItem,
        VariantItem,
        ProductDetail,
        VariantDetail,
        ProductImageInfo,
        BrandResponse,
        CategoryResponse,
        ColorResponse,
        SizeResponse,
        GenderResponse,
        HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Catalog", description = "Faceted product and variant listings"),
        (name = "Lookups", description = "Dimension tables for the filter UI"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
