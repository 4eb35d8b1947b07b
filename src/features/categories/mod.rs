//! Item categories of the character sheet.
//!
//! Categories live in a remote `categories` table (Supabase or plain Postgres). Reads go
//! through [`CategoryCache`], which keeps one list for a fixed lifetime and degrades to a
//! built-in list of five categories when the backend cannot be reached. The `selection`
//! module renders that list into dropdowns and filter bars.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | List active categories (cached) |
//! | GET | `/api/categories/options` | Picker entries, optionally led by "all" |
//! | GET | `/api/categories/{slug}` | Get cached category by slug |
//! | GET | `/api/categories/{slug}/label` | Display name and icon for a slug |
//! | GET | `/api/categories/fragments/select` | `<option>` markup |
//! | GET | `/api/categories/fragments/buttons` | `<button>` markup |
//! | GET | `/api/admin/categories/{slug}` | Read from the backend (admin) |
//! | PUT | `/api/admin/categories` | Create or update by slug (admin) |
//! | POST | `/api/admin/categories/refresh` | Force a backend read (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod selection;
pub mod services;
pub mod sources;

pub use services::{CategoryCache, CategoryService};
pub use sources::{CategorySource, PgCategorySource, SupabaseCategorySource};
