mod category_cache;
mod category_service;

pub use category_cache::{CategoryCache, CategoryListing, ListingOrigin};
pub use category_service::CategoryService;
