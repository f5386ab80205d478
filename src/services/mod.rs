// Core services
pub mod catalog;
pub mod lookups;

pub use catalog::CatalogService;
pub use lookups::LookupService;
