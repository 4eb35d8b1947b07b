mod category;
mod snapshot;

pub use category::{fallback_categories, Category};
pub use snapshot::CategorySnapshot;
