use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::list_category_options,
        categories_handlers::get_category,
        categories_handlers::get_category_label,
        categories_handlers::select_fragment,
        categories_handlers::buttons_fragment,
        // Categories (admin)
        categories_handlers::get_category_from_source,
        categories_handlers::upsert_category,
        categories_handlers::refresh_categories,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryOptionDto,
            categories_dtos::CategoryLabelDto,
            categories_dtos::UpsertCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryOptionDto>>,
            ApiResponse<categories_dtos::CategoryLabelDto>,
        )
    ),
    tags(
        (name = "categories", description = "Item categories and selection fragments (public)"),
        (name = "admin", description = "Category administration (admin token required)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Astoria Codex API",
        version = "0.1.0",
        description = "Category service of the Astoria character sheet",
    )
)]
pub struct ApiDoc;

/// Registers the admin bearer token scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
