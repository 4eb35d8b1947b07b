use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::core::error::Result;
use crate::features::categories::dtos::{
    CategoryLabelDto, CategoryOptionDto, CategoryResponseDto,
};
use crate::features::categories::selection::{
    populate_select_from, render_buttons_from, ButtonGroupConfig, CategoryChangeHandler,
    HtmlButtonGroup, HtmlSelect, SelectConfig,
};
use crate::features::categories::services::{CategoryListing, CategoryService};
use crate::shared::types::{ApiResponse, Meta};

/// Query params for the option list
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OptionsQuery {
    /// Lead with the "every category" entry. Default: true
    #[serde(default = "default_include_all")]
    pub include_all: bool,
}

fn default_include_all() -> bool {
    true
}

pub(crate) fn listing_meta(listing: &CategoryListing) -> (Option<String>, Meta) {
    let meta = Meta {
        total: listing.categories().len() as i64,
        degraded: listing.is_degraded(),
    };
    let message = listing.is_degraded().then(|| "degraded".to_string());
    (message, meta)
}

/// List active categories
///
/// Served from the cache. When the backend is unreachable the built-in list is
/// returned with `message = "degraded"`.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let (categories, listing) = service.list().await;
    let (message, meta) = listing_meta(&listing);
    Ok(Json(ApiResponse::success(Some(categories), message, Some(meta))))
}

/// List picker entries
#[utoipa::path(
    get,
    path = "/api/categories/options",
    params(OptionsQuery),
    responses(
        (status = 200, description = "Picker entries", body = ApiResponse<Vec<CategoryOptionDto>>),
    ),
    tag = "categories"
)]
pub async fn list_category_options(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<OptionsQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryOptionDto>>>> {
    let options = service.options(query.include_all).await;
    let meta = Meta::total(options.len());
    Ok(Json(ApiResponse::success(Some(options), None, Some(meta))))
}

/// Get category by slug
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_cached(&slug).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Display name and icon for a slug
///
/// Unknown slugs answer with the slug itself as name and an empty icon.
#[utoipa::path(
    get,
    path = "/api/categories/{slug}/label",
    params(
        ("slug" = String, Path, description = "Category slug, or `all`")
    ),
    responses(
        (status = 200, description = "Category label", body = ApiResponse<CategoryLabelDto>),
    ),
    tag = "categories"
)]
pub async fn get_category_label(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryLabelDto>>> {
    let label = service.label(&slug).await;
    Ok(Json(ApiResponse::success(Some(label), None, None)))
}

/// Category dropdown as `<option>` markup
#[utoipa::path(
    get,
    path = "/api/categories/fragments/select",
    params(SelectConfig),
    responses(
        (status = 200, description = "Option elements", body = String, content_type = "text/html"),
    ),
    tag = "categories"
)]
pub async fn select_fragment(
    State(service): State<Arc<CategoryService>>,
    Query(config): Query<SelectConfig>,
) -> Result<Html<String>> {
    let listing = service.cache().list().await;
    let mut select = HtmlSelect::new();
    populate_select_from(&mut select, listing.categories(), &config);
    Ok(Html(select.to_html()?))
}

/// Category filter bar as `<button>` markup
#[utoipa::path(
    get,
    path = "/api/categories/fragments/buttons",
    params(ButtonGroupConfig),
    responses(
        (status = 200, description = "Button elements", body = String, content_type = "text/html"),
    ),
    tag = "categories"
)]
pub async fn buttons_fragment(
    State(service): State<Arc<CategoryService>>,
    Query(config): Query<ButtonGroupConfig>,
) -> Result<Html<String>> {
    let listing = service.cache().list().await;
    let mut group = HtmlButtonGroup::new();
    // Clicks are wired client-side from data-category
    let on_change: CategoryChangeHandler = Arc::new(|_: &str| {});
    render_buttons_from(&mut group, listing.categories(), &config, &on_change);
    Ok(Html(group.to_html()?))
}
