pub mod catalog;
pub mod common;
pub mod health;
pub mod lookups;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::{CatalogService, LookupService};

/// Aggregate of the services used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: CatalogService,
    pub lookups: LookupService,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            catalog: CatalogService::new(db.clone()),
            lookups: LookupService::new(db),
        }
    }
}
