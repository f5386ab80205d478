use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{product, product_variant};

/// Appended to the gender label when deriving an item subtitle.
const SUBTITLE_SUFFIX: &str = "Shoes";

/// One page of listing results plus the unpaged match count.
#[derive(Debug, Serialize, ToSchema)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Listing<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// Grouped MIN/MAX effective price per product, read straight off the
/// aggregate query.
#[derive(Debug, FromQueryResult)]
pub struct PriceAggRow {
    pub product_id: Uuid,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

/// Catalog-mode listing item (one row per product).
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogItem {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub default_variant_id: Option<Uuid>,
}

/// Variant-mode listing item (one row per SKU).
#[derive(Debug, Serialize, ToSchema)]
pub struct VariantItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    pub image_url: Option<String>,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub color_name: Option<String>,
    pub size_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Image row as exposed on the product detail page.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductImageInfo {
    pub id: Uuid,
    pub url: String,
    pub color_id: Option<Uuid>,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub is_primary: bool,
}

impl From<crate::entities::product_image::Model> for ProductImageInfo {
    fn from(model: crate::entities::product_image::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            color_id: model.color_id,
            alt_text: model.alt_text,
            sort_order: model.sort_order,
            is_primary: model.is_primary,
        }
    }
}

/// Variant row as exposed on the product detail page.
#[derive(Debug, Serialize, ToSchema)]
pub struct VariantDetail {
    pub id: Uuid,
    pub sku: String,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub color_name: Option<String>,
    pub size_name: Option<String>,
    pub stock_count: i32,
    pub in_stock: bool,
    pub low_stock: bool,
    pub max_per_order: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub brand_name: Option<String>,
    pub category_name: Option<String>,
    pub default_variant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub variants: Vec<VariantDetail>,
    pub images: Vec<ProductImageInfo>,
}

#[allow(clippy::too_many_arguments)]
pub fn product_detail(
    model: &product::Model,
    image_url: Option<String>,
    brand_name: Option<String>,
    category_name: Option<String>,
    gender_label: Option<&str>,
    variants: &[product_variant::Model],
    color_names: &std::collections::HashMap<Uuid, String>,
    size_labels: &std::collections::HashMap<Uuid, String>,
    images: Vec<crate::entities::product_image::Model>,
) -> ProductDetail {
    ProductDetail {
        id: model.id,
        name: model.name.clone(),
        description: model.description.clone(),
        image_url,
        subtitle: subtitle_for(gender_label),
        brand_name,
        category_name,
        default_variant_id: model.default_variant_id,
        created_at: model.created_at,
        variants: variants
            .iter()
            .map(|variant| VariantDetail {
                id: variant.id,
                sku: variant.sku.clone(),
                price: price_to_f64(variant.price),
                sale_price: variant.sale_price.map(price_to_f64),
                color_name: variant.color_id.and_then(|id| color_names.get(&id).cloned()),
                size_name: variant.size_id.and_then(|id| size_labels.get(&id).cloned()),
                stock_count: variant.stock_count,
                in_stock: variant.stock_count > 0,
                low_stock: variant.stock_count > 0
                    && variant.stock_count <= variant.low_stock_threshold,
                max_per_order: variant.max_per_order,
            })
            .collect(),
        images: images.into_iter().map(ProductImageInfo::from).collect(),
    }
}

/// "{gender label} Shoes" when a gender label is present, else nothing.
pub fn subtitle_for(gender_label: Option<&str>) -> Option<String> {
    gender_label.map(|label| format!("{label} {SUBTITLE_SUFFIX}"))
}

/// Decimal columns surface as floats in the public shapes.
pub fn price_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

pub fn catalog_item(
    model: &product::Model,
    image_url: Option<String>,
    aggregate: Option<&PriceAggRow>,
    gender_label: Option<&str>,
) -> CatalogItem {
    CatalogItem {
        id: model.id,
        name: model.name.clone(),
        image_url,
        min_price: aggregate.and_then(|agg| agg.min_price).map(price_to_f64),
        max_price: aggregate.and_then(|agg| agg.max_price).map(price_to_f64),
        created_at: model.created_at,
        subtitle: subtitle_for(gender_label),
        default_variant_id: model.default_variant_id,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn variant_item(
    model: &product_variant::Model,
    product_name: &str,
    image_url: Option<String>,
    color_name: Option<String>,
    size_name: Option<String>,
    gender_label: Option<&str>,
) -> VariantItem {
    VariantItem {
        id: model.id,
        product_id: model.product_id,
        product_name: product_name.to_string(),
        sku: model.sku.clone(),
        image_url,
        price: price_to_f64(model.price),
        sale_price: model.sale_price.map(price_to_f64),
        color_name,
        size_name,
        created_at: model.created_at,
        subtitle: subtitle_for(gender_label),
    }
}
