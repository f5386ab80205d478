use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::instrument;

use crate::entities::{brand, category, color, gender, size};
use crate::errors::ServiceError;

/// Read-only access to the dimension tables that drive the filter UI.
#[derive(Clone)]
pub struct LookupService {
    db: Arc<DatabaseConnection>,
}

impl LookupService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_brands(&self) -> Result<Vec<brand::Model>, ServiceError> {
        brand::Entity::find()
            .order_by_asc(brand::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        category::Entity::find()
            .filter(category::Column::IsActive.eq(true))
            .order_by_asc(category::Column::SortOrder)
            .order_by_asc(category::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn list_colors(&self) -> Result<Vec<color::Model>, ServiceError> {
        color::Entity::find()
            .order_by_asc(color::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Sizes come back in display sequence, not label order.
    #[instrument(skip(self))]
    pub async fn list_sizes(&self) -> Result<Vec<size::Model>, ServiceError> {
        size::Entity::find()
            .order_by_asc(size::Column::SortOrder)
            .order_by_asc(size::Column::Label)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn list_genders(&self) -> Result<Vec<gender::Model>, ServiceError> {
        gender::Entity::find()
            .order_by_asc(gender::Column::Label)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }
}
