mod admin_handler;
mod category_handler;

pub use admin_handler::*;
pub use category_handler::*;
