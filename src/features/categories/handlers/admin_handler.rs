use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RequireAdmin};
use crate::features::categories::dtos::{CategoryResponseDto, UpsertCategoryDto};
use crate::features::categories::handlers::category_handler::listing_meta;
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// Read a category straight from the backend, skipping the cache
#[utoipa::path(
    get,
    path = "/api/admin/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Category not found"),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_category_from_source(
    _admin: RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create or update a category by slug
#[utoipa::path(
    put,
    path = "/api/admin/categories",
    request_body = UpsertCategoryDto,
    responses(
        (status = 200, description = "Category stored", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upsert_category(
    _admin: RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<UpsertCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.upsert(dto).await?;
    tracing::info!("Category '{}' stored", category.slug);
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Category stored".to_string()),
        None,
    )))
}

/// Force a backend read and report what it returned
#[utoipa::path(
    post,
    path = "/api/admin/categories/refresh",
    responses(
        (status = 200, description = "Refreshed list", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn refresh_categories(
    _admin: RequireAdmin,
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let (categories, listing) = service.refresh().await;
    let (message, meta) = listing_meta(&listing);
    Ok(Json(ApiResponse::success(Some(categories), message, Some(meta))))
}
