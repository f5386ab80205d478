#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use storefront_api::{
    config::AppConfig,
    db::{self, DbConfig},
    entities::{brand, category, color, gender, product, product_image, product_variant, size},
    services::CatalogService,
    AppState,
};

/// Test harness over an in-memory SQLite database migrated by the crate's
/// own migrator. The pool is pinned to a single connection so every query
/// sees the same in-memory database.
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_config = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = db::establish_connection_with_config(&db_config)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let config = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        let state = AppState::new(Arc::new(pool), config);
        Self { state }
    }

    pub fn catalog(&self) -> CatalogService {
        self.state.services.catalog.clone()
    }
}

pub async fn insert_brand(app: &TestApp, name: &str, slug: &str) -> Uuid {
    let id = Uuid::new_v4();
    brand::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
    }
    .insert(&*app.state.db)
    .await
    .expect("failed to insert brand");
    id
}

pub async fn insert_category(app: &TestApp, name: &str, slug: &str) -> Uuid {
    let id = Uuid::new_v4();
    category::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        description: Set(None),
        slug: Set(slug.to_string()),
        parent_id: Set(None),
        sort_order: Set(0),
        is_active: Set(true),
    }
    .insert(&*app.state.db)
    .await
    .expect("failed to insert category");
    id
}

pub async fn insert_color(app: &TestApp, name: &str, slug: &str) -> Uuid {
    let id = Uuid::new_v4();
    color::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        hex_code: Set("#000000".to_string()),
    }
    .insert(&*app.state.db)
    .await
    .expect("failed to insert color");
    id
}

pub async fn insert_size(app: &TestApp, label: &str, slug: &str, sort_order: i32) -> Uuid {
    let id = Uuid::new_v4();
    size::ActiveModel {
        id: Set(id),
        label: Set(label.to_string()),
        slug: Set(slug.to_string()),
        sort_order: Set(sort_order),
    }
    .insert(&*app.state.db)
    .await
    .expect("failed to insert size");
    id
}

pub async fn insert_gender(app: &TestApp, label: &str, slug: &str) -> Uuid {
    let id = Uuid::new_v4();
    gender::ActiveModel {
        id: Set(id),
        label: Set(label.to_string()),
        slug: Set(slug.to_string()),
    }
    .insert(&*app.state.db)
    .await
    .expect("failed to insert gender");
    id
}

/// Published product with no dimension refs.
pub async fn insert_product(app: &TestApp, name: &str) -> Uuid {
    insert_product_at(app, name, Utc::now()).await
}

pub async fn insert_product_at(app: &TestApp, name: &str, created_at: DateTime<Utc>) -> Uuid {
    insert_product_full(app, name, None, None, None, true, created_at).await
}

pub async fn insert_product_full(
    app: &TestApp,
    name: &str,
    brand_id: Option<Uuid>,
    category_id: Option<Uuid>,
    gender_id: Option<Uuid>,
    is_published: bool,
    created_at: DateTime<Utc>,
) -> Uuid {
    let id = Uuid::new_v4();
    product::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        description: Set(format!("{name} description")),
        brand_id: Set(brand_id),
        category_id: Set(category_id),
        gender_id: Set(gender_id),
        default_variant_id: Set(None),
        is_published: Set(is_published),
        created_at: Set(created_at),
        updated_at: Set(created_at),
    }
    .insert(&*app.state.db)
    .await
    .expect("failed to insert product");
    id
}

pub async fn set_default_variant(app: &TestApp, product_id: Uuid, variant_id: Uuid) {
    use sea_orm::EntityTrait;

    let model = product::Entity::find_by_id(product_id)
        .one(&*app.state.db)
        .await
        .expect("failed to load product")
        .expect("product exists");
    let mut active: product::ActiveModel = model.into();
    active.default_variant_id = Set(Some(variant_id));
    active
        .update(&*app.state.db)
        .await
        .expect("failed to set default variant");
}

/// Active, non-deleted variant with stock.
pub async fn insert_variant(
    app: &TestApp,
    product_id: Uuid,
    sku: &str,
    price: Decimal,
    sale_price: Option<Decimal>,
    color_id: Option<Uuid>,
    size_id: Option<Uuid>,
) -> Uuid {
    insert_variant_flags(
        app, product_id, sku, price, sale_price, color_id, size_id, true, false,
    )
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_variant_flags(
    app: &TestApp,
    product_id: Uuid,
    sku: &str,
    price: Decimal,
    sale_price: Option<Decimal>,
    color_id: Option<Uuid>,
    size_id: Option<Uuid>,
    is_active: bool,
    is_deleted: bool,
) -> Uuid {
    let id = Uuid::new_v4();
    let now = Utc::now();
    product_variant::ActiveModel {
        id: Set(id),
        product_id: Set(product_id),
        sku: Set(sku.to_string()),
        price: Set(price),
        sale_price: Set(sale_price),
        cost_price: Set(None),
        color_id: Set(color_id),
        size_id: Set(size_id),
        stock_count: Set(5),
        low_stock_threshold: Set(1),
        max_per_order: Set(None),
        weight_kg: Set(None),
        dimensions_cm: Set(None),
        is_active: Set(is_active),
        is_deleted: Set(is_deleted),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&*app.state.db)
    .await
    .expect("failed to insert variant");
    id
}

pub async fn insert_image(
    app: &TestApp,
    product_id: Uuid,
    color_id: Option<Uuid>,
    url: &str,
    sort_order: i32,
    is_primary: bool,
) -> Uuid {
    let id = Uuid::new_v4();
    product_image::ActiveModel {
        id: Set(id),
        product_id: Set(product_id),
        color_id: Set(color_id),
        url: Set(url.to_string()),
        alt_text: Set(None),
        sort_order: Set(sort_order),
        is_primary: Set(is_primary),
    }
    .insert(&*app.state.db)
    .await
    .expect("failed to insert image");
    id
}
