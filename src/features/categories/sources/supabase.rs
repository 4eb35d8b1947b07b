use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::Deserialize;

use crate::core::config::SupabaseConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::sources::CategorySource;

/// PostgREST error code returned when a single-object request matched no row
const PGRST_NO_ROWS: &str = "PGRST116";

/// Media type asking PostgREST for one object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
pub struct PostgrestError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl PostgrestError {
    pub fn is_no_rows(&self) -> bool {
        self.code.as_deref() == Some(PGRST_NO_ROWS)
    }
}

/// Category source backed by a Supabase project's REST API
pub struct SupabaseCategorySource {
    client: reqwest::Client,
    rest_url: String,
    anon_key: String,
    table: String,
}

impl SupabaseCategorySource {
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_url: config.rest_url(),
            anon_key: config.anon_key.clone(),
            table: config.categories_table.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.rest_url, self.table)
    }

    fn list_url(&self) -> String {
        format!(
            "{}?select=*&is_active=eq.true&order=display_order.asc",
            self.table_url()
        )
    }

    fn slug_url(&self, slug: &str) -> String {
        format!(
            "{}?select=*&slug=eq.{}&is_active=eq.true",
            self.table_url(),
            urlencoding::encode(slug)
        )
    }

    fn upsert_url(&self) -> String {
        format!("{}?on_conflict=slug", self.table_url())
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.anon_key))
    }

    async fn send(&self, request: reqwest::RequestBuilder, action: &str) -> Result<reqwest::Response> {
        self.authorized(request).send().await.map_err(|e| {
            tracing::error!("Supabase request failed ({}): {:?}", action, e);
            AppError::ExternalServiceError(format!("Supabase request failed: {}", e))
        })
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        action: &str,
    ) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse Supabase response ({}): {:?}", action, e);
            AppError::ExternalServiceError(format!("Failed to parse Supabase response: {}", e))
        })
    }
}

/// Turns a non-success PostgREST response body into an `AppError`
fn error_from_body(status: StatusCode, body: &str, action: &str) -> AppError {
    let parsed = serde_json::from_str::<PostgrestError>(body).ok();

    if let Some(err) = parsed.as_ref().filter(|e| e.is_no_rows()) {
        return AppError::NotFound(
            err.details
                .clone()
                .unwrap_or_else(|| "No matching category".to_string()),
        );
    }

    let detail = parsed
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.to_string());
    tracing::warn!("Supabase returned status {} ({}): {}", status, action, detail);
    AppError::ExternalServiceError(format!("Supabase {} failed: HTTP {} - {}", action, status, detail))
}

#[async_trait]
impl CategorySource for SupabaseCategorySource {
    async fn list_active(&self) -> Result<Vec<Category>> {
        tracing::debug!("Fetching active categories from {}", self.table_url());

        let response = self
            .send(self.client.get(self.list_url()), "list categories")
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body, "list categories"));
        }

        Self::parse(response, "list categories").await
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let request = self
            .client
            .get(self.slug_url(slug))
            .header(header::ACCEPT, SINGLE_OBJECT);
        let response = self.send(request, "get category").await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return match error_from_body(status, &body, "get category") {
                AppError::NotFound(_) => Ok(None),
                other => Err(other),
            };
        }

        Self::parse(response, "get category").await.map(Some)
    }

    async fn upsert(&self, category: &Category) -> Result<Category> {
        let request = self
            .client
            .post(self.upsert_url())
            .header(header::ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(category);
        let response = self.send(request, "upsert category").await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body, "upsert category"));
        }

        let stored: Category = Self::parse(response, "upsert category").await?;
        tracing::info!("Upserted category '{}'", stored.slug);
        Ok(stored)
    }
}
