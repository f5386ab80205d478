pub mod filter;
pub mod images;
pub mod projection;
pub mod query;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sea_orm::sea_query::{Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::entities::{
    brand, category, color, gender, product, product_image, product_variant, size,
};
use crate::errors::ServiceError;

pub use filter::{CatalogFilter, PriceRange, SortKey};
pub use projection::{
    CatalogItem, Listing, ProductDetail, ProductImageInfo, VariantDetail, VariantItem,
};

use projection::PriceAggRow;

/// Read-only listing service over the catalog tables. Stateless apart
/// from the connection pool; every request threads its own immutable
/// `CatalogFilter` through the stages.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Catalog listing: one item per matching product, with min/max
    /// effective prices aggregated over its qualifying variants and a
    /// representative image resolved per the color context.
    #[instrument(skip(self, filter), fields(sort = ?filter.sort, page = filter.page, limit = filter.limit))]
    pub async fn list_products(
        &self,
        filter: &CatalogFilter,
    ) -> Result<Listing<CatalogItem>, ServiceError> {
        let predicate = query::product_predicates(filter);

        let total_count = product::Entity::find()
            .filter(predicate.clone())
            .count(&*self.db)
            .await
            .map_err(|err| self.query_failure("count products", filter, err))?;
        if total_count == 0 {
            return Ok(Listing::empty());
        }

        let page = query::apply_product_order(product::Entity::find().filter(predicate), filter)
            .limit(filter.limit)
            .offset(filter.offset())
            .all(&*self.db)
            .await
            .map_err(|err| self.query_failure("fetch product page", filter, err))?;
        debug!(rows = page.len(), total_count, "catalog page fetched");

        let product_ids: Vec<Uuid> = page.iter().map(|p| p.id).collect();

        let aggregates = self.price_aggregates(filter, &product_ids).await?;
        let preferred_colors = self.color_ids_for_slugs(&filter.colors).await?;
        let default_colors = if preferred_colors.is_empty() {
            self.default_variant_colors(&page).await?
        } else {
            HashMap::new()
        };
        let image_index = self.images_for_products(&product_ids).await?;
        let gender_labels = self
            .gender_labels(page.iter().filter_map(|p| p.gender_id))
            .await?;

        let items = page
            .iter()
            .map(|model| {
                let scoped: Vec<Uuid> = if preferred_colors.is_empty() {
                    default_colors.get(&model.id).copied().into_iter().collect()
                } else {
                    preferred_colors.clone()
                };
                let image_url = image_index
                    .get(&model.id)
                    .and_then(|candidates| images::resolve_image(candidates, &scoped))
                    .map(|image| image.url.clone());
                let gender_label = model
                    .gender_id
                    .and_then(|id| gender_labels.get(&id))
                    .map(String::as_str);
                projection::catalog_item(model, image_url, aggregates.get(&model.id), gender_label)
            })
            .collect();

        Ok(Listing { items, total_count })
    }

    /// Variant/SKU listing: one item per matching variant. The image
    /// color context is the variant's own color, falling back to the
    /// product's default-variant color.
    #[instrument(skip(self, filter), fields(sort = ?filter.sort, page = filter.page, limit = filter.limit))]
    pub async fn list_variants(
        &self,
        filter: &CatalogFilter,
    ) -> Result<Listing<VariantItem>, ServiceError> {
        let predicate = query::variant_listing_predicates(filter);

        let total_count = product_variant::Entity::find()
            .filter(predicate.clone())
            .count(&*self.db)
            .await
            .map_err(|err| self.query_failure("count variants", filter, err))?;
        if total_count == 0 {
            return Ok(Listing::empty());
        }

        let page = query::apply_variant_order(
            product_variant::Entity::find().filter(predicate),
            filter.sort,
        )
        .limit(filter.limit)
        .offset(filter.offset())
        .all(&*self.db)
        .await
        .map_err(|err| self.query_failure("fetch variant page", filter, err))?;
        debug!(rows = page.len(), total_count, "variant page fetched");

        let product_ids: Vec<Uuid> = dedupe(page.iter().map(|v| v.product_id));
        let products: HashMap<Uuid, product::Model> = product::Entity::find()
            .filter(product::Column::Id.is_in(product_ids.clone()))
            .all(&*self.db)
            .await
            .map_err(|err| self.query_failure("fetch variant products", filter, err))?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let page_products: Vec<product::Model> = products.values().cloned().collect();
        let default_colors = self.default_variant_colors(&page_products).await?;
        let color_names = self
            .color_names(page.iter().filter_map(|v| v.color_id))
            .await?;
        let size_labels = self.size_labels(page.iter().filter_map(|v| v.size_id)).await?;
        let image_index = self.images_for_products(&product_ids).await?;
        let gender_labels = self
            .gender_labels(products.values().filter_map(|p| p.gender_id))
            .await?;

        let items = page
            .iter()
            .filter_map(|variant| {
                let product = products.get(&variant.product_id)?;
                let scoped: Vec<Uuid> = variant
                    .color_id
                    .or_else(|| default_colors.get(&product.id).copied())
                    .into_iter()
                    .collect();
                let image_url = image_index
                    .get(&product.id)
                    .and_then(|candidates| images::resolve_image(candidates, &scoped))
                    .map(|image| image.url.clone());
                let gender_label = product
                    .gender_id
                    .and_then(|id| gender_labels.get(&id))
                    .map(String::as_str);
                Some(projection::variant_item(
                    variant,
                    &product.name,
                    image_url,
                    variant.color_id.and_then(|id| color_names.get(&id).cloned()),
                    variant.size_id.and_then(|id| size_labels.get(&id).cloned()),
                    gender_label,
                ))
            })
            .collect();

        Ok(Listing { items, total_count })
    }

    /// Product detail: the published product with its listed variants,
    /// full image set, and the same representative-image resolution the
    /// listings use.
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: Uuid) -> Result<ProductDetail, ServiceError> {
        let model = product::Entity::find_by_id(product_id)
            .filter(product::Column::IsPublished.eq(true))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

        let variants = product_variant::Entity::find()
            .filter(product_variant::Column::ProductId.eq(product_id))
            .filter(product_variant::Column::IsActive.eq(true))
            .filter(product_variant::Column::IsDeleted.eq(false))
            .order_by_asc(product_variant::Column::CreatedAt)
            .order_by_asc(product_variant::Column::Id)
            .all(&*self.db)
            .await?;

        let images = product_image::Entity::find()
            .filter(product_image::Column::ProductId.eq(product_id))
            .order_by_asc(product_image::Column::SortOrder)
            .all(&*self.db)
            .await?;

        let color_names = self.color_names(variants.iter().filter_map(|v| v.color_id)).await?;
        let size_labels = self.size_labels(variants.iter().filter_map(|v| v.size_id)).await?;
        let gender_labels = self.gender_labels(model.gender_id.into_iter()).await?;
        let brand_name = match model.brand_id {
            Some(id) => brand::Entity::find_by_id(id)
                .one(&*self.db)
                .await?
                .map(|b| b.name),
            None => None,
        };
        let category_name = match model.category_id {
            Some(id) => category::Entity::find_by_id(id)
                .one(&*self.db)
                .await?
                .map(|c| c.name),
            None => None,
        };

        let default_color = model
            .default_variant_id
            .and_then(|id| variants.iter().find(|v| v.id == id))
            .and_then(|v| v.color_id);
        let scoped: Vec<Uuid> = default_color.into_iter().collect();
        let image_url = images::resolve_image(&images, &scoped).map(|image| image.url.clone());
        let gender_label = model
            .gender_id
            .and_then(|id| gender_labels.get(&id))
            .map(String::as_str);

        Ok(projection::product_detail(
            &model,
            image_url,
            brand_name,
            category_name,
            gender_label,
            &variants,
            &color_names,
            &size_labels,
            images,
        ))
    }

    async fn price_aggregates(
        &self,
        filter: &CatalogFilter,
        product_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, PriceAggRow>, ServiceError> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = product_variant::Entity::find()
            .select_only()
            .column(product_variant::Column::ProductId)
            .column_as(SimpleExpr::from(Func::min(query::effective_price())), "min_price")
            .column_as(SimpleExpr::from(Func::max(query::effective_price())), "max_price")
            .filter(query::variant_predicates(filter))
            .filter(product_variant::Column::ProductId.is_in(product_ids.to_vec()))
            .group_by(product_variant::Column::ProductId)
            .into_model::<PriceAggRow>()
            .all(&*self.db)
            .await
            .map_err(|err| self.query_failure("aggregate prices", filter, err))?;

        Ok(rows.into_iter().map(|row| (row.product_id, row)).collect())
    }

    async fn color_ids_for_slugs(&self, slugs: &[String]) -> Result<Vec<Uuid>, ServiceError> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }
        let rows = color::Entity::find()
            .filter(color::Column::Slug.is_in(slugs.to_vec()))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(|c| c.id).collect())
    }

    /// Color of each product's designated default variant, for rows where
    /// no explicit color context exists.
    async fn default_variant_colors(
        &self,
        products: &[product::Model],
    ) -> Result<HashMap<Uuid, Uuid>, ServiceError> {
        let default_ids: Vec<Uuid> = products
            .iter()
            .filter_map(|p| p.default_variant_id)
            .collect();
        if default_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let variants = product_variant::Entity::find()
            .filter(product_variant::Column::Id.is_in(default_ids))
            .all(&*self.db)
            .await?;
        Ok(variants
            .into_iter()
            .filter_map(|v| v.color_id.map(|color| (v.product_id, color)))
            .collect())
    }

    async fn images_for_products(
        &self,
        product_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<product_image::Model>>, ServiceError> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = product_image::Entity::find()
            .filter(product_image::Column::ProductId.is_in(product_ids.to_vec()))
            .all(&*self.db)
            .await?;
        Ok(images::index_by_product(rows))
    }

    async fn gender_labels<I>(&self, ids: I) -> Result<HashMap<Uuid, String>, ServiceError>
    where
        I: Iterator<Item = Uuid>,
    {
        let ids = dedupe(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = gender::Entity::find()
            .filter(gender::Column::Id.is_in(ids))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(|g| (g.id, g.label)).collect())
    }

    async fn color_names<I>(&self, ids: I) -> Result<HashMap<Uuid, String>, ServiceError>
    where
        I: Iterator<Item = Uuid>,
    {
        let ids = dedupe(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = color::Entity::find()
            .filter(color::Column::Id.is_in(ids))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
    }

    async fn size_labels<I>(&self, ids: I) -> Result<HashMap<Uuid, String>, ServiceError>
    where
        I: Iterator<Item = Uuid>,
    {
        let ids = dedupe(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = size::Entity::find()
            .filter(size::Column::Id.is_in(ids))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(|s| (s.id, s.label)).collect())
    }

    /// Failed queries propagate, but first log which filters were active.
    fn query_failure(&self, operation: &str, filter: &CatalogFilter, err: DbErr) -> ServiceError {
        error!(operation, filter = ?filter, error = %err, "catalog query failed");
        ServiceError::DatabaseError(err)
    }
}

fn dedupe<I>(ids: I) -> Vec<Uuid>
where
    I: Iterator<Item = Uuid>,
{
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
