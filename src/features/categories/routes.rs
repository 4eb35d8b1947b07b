use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::core::config::AdminConfig;
use crate::core::middleware::capability_middleware;
use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Note: These routes are public (no authentication required)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/options", get(handlers::list_category_options))
        .route(
            "/api/categories/fragments/select",
            get(handlers::select_fragment),
        )
        .route(
            "/api/categories/fragments/buttons",
            get(handlers::buttons_fragment),
        )
        .route("/api/categories/{slug}", get(handlers::get_category))
        .route(
            "/api/categories/{slug}/label",
            get(handlers::get_category_label),
        )
        .with_state(service)
}

/// Create admin routes, meant to be nested under `/api/admin`
///
/// Every handler requires the admin capability resolved by `capability_middleware`.
pub fn admin_routes(service: Arc<CategoryService>, admin: Arc<AdminConfig>) -> Router {
    Router::new()
        .route("/categories", put(handlers::upsert_category))
        .route("/categories/refresh", post(handlers::refresh_categories))
        .route(
            "/categories/{slug}",
            get(handlers::get_category_from_source),
        )
        .with_state(service)
        .route_layer(from_fn_with_state(admin, capability_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::{fallback_categories, Category};
    use crate::shared::test_helpers::{admin_config, category_service, InMemoryCategorySource};
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn test_server(rows: Vec<Category>) -> (TestServer, Arc<InMemoryCategorySource>) {
        let (service, source) = category_service(rows);
        let app = Router::new()
            .merge(routes(Arc::clone(&service)))
            .nest("/api/admin", admin_routes(service, admin_config("secret")));
        (TestServer::new(app).unwrap(), source)
    }

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }

    #[tokio::test]
    async fn test_list_categories() {
        let (server, _source) = test_server(fallback_categories());

        let response = server.get("/api/categories").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["meta"]["total"], 5);
        assert_eq!(body["meta"]["degraded"], false);
        assert!(body["message"].is_null());
        assert_eq!(body["data"][0]["slug"], "agricole");
    }

    #[tokio::test]
    async fn test_list_categories_degraded() {
        let (server, source) = test_server(vec![]);
        source.set_failing(true);

        let response = server.get("/api/categories").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["message"], "degraded");
        assert_eq!(body["meta"]["degraded"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_options_respect_include_all() {
        let (server, _source) = test_server(fallback_categories());

        let body: Value = server.get("/api/categories/options").await.json();
        assert_eq!(body["data"][0]["value"], "all");
        assert_eq!(body["data"][0]["label"], "Toutes catégories");
        assert_eq!(body["data"].as_array().unwrap().len(), 6);

        let body: Value = server
            .get("/api/categories/options")
            .add_query_param("include_all", "false")
            .await
            .json();
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_get_category_and_label() {
        let (server, _source) = test_server(fallback_categories());

        let body: Value = server.get("/api/categories/quete").await.json();
        assert_eq!(body["data"]["name"], "Quêtes");

        server
            .get("/api/categories/inconnue")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let body: Value = server.get("/api/categories/inconnue/label").await.json();
        assert_eq!(
            body["data"],
            json!({ "slug": "inconnue", "name": "inconnue", "icon": "" })
        );

        let body: Value = server.get("/api/categories/all/label").await.json();
        assert_eq!(body["data"]["name"], "Toutes catégories");
    }

    #[tokio::test]
    async fn test_select_fragment() {
        let (server, _source) = test_server(vec![Category::new(
            "agricole",
            "Agricole",
            Some("🌾"),
            1,
        )]);

        let response = server
            .get("/api/categories/fragments/select")
            .add_query_param("selected_value", "agricole")
            .add_query_param("show_icons", "false")
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.text(),
            "<option value=\"all\">Toutes catégories</option>\n\
             <option value=\"agricole\" selected>Agricole</option>\n"
        );
    }

    #[tokio::test]
    async fn test_buttons_fragment() {
        let (server, _source) = test_server(fallback_categories());

        let response = server
            .get("/api/categories/fragments/buttons")
            .add_query_param("active_category", "materiau")
            .add_query_param("include_all", "false")
            .await;
        response.assert_status_ok();

        let html = response.text();
        assert_eq!(html.matches("<button").count(), 5);
        assert!(html.contains("class=\"category-btn active\" data-category=\"materiau\""));
        assert!(!html.contains("data-category=\"all\""));
    }

    #[tokio::test]
    async fn test_admin_routes_require_token() {
        let (server, _source) = test_server(fallback_categories());

        server
            .post("/api/admin/categories/refresh")
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .post("/api/admin/categories/refresh")
            .add_header(header::AUTHORIZATION, bearer("wrong"))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .post("/api/admin/categories/refresh")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_admin_upsert_evicts_public_cache() {
        let (server, source) = test_server(fallback_categories());
        server.get("/api/categories").await.assert_status_ok();

        let response = server
            .put("/api/admin/categories")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .json(&json!({
                "slug": "reliques",
                "name": "Reliques",
                "icon": "🏺",
                "display_order": 6
            }))
            .await;
        response.assert_status_ok();

        let body: Value = server.get("/api/categories").await.json();
        assert_eq!(body["meta"]["total"], 6);
        assert_eq!(body["data"][5]["slug"], "reliques");
        assert_eq!(source.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_admin_upsert_rejects_invalid_input() {
        let (server, _source) = test_server(fallback_categories());

        server
            .put("/api/admin/categories")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .json(&json!({ "slug": "all", "name": "Tout" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put("/api/admin/categories")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .json(&json!({ "slug": "Bad Slug", "name": "Bad" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put("/api/admin/categories")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .json(&json!({ "slug": "vide", "name": "   " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_read_skips_cache_and_surfaces_outage() {
        let (server, source) = test_server(fallback_categories());

        let body: Value = server
            .get("/api/admin/categories/agricole")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .await
            .json();
        assert_eq!(body["data"]["slug"], "agricole");
        assert_eq!(source.list_calls(), 0);

        server
            .get("/api/admin/categories/inconnue")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        source.set_failing(true);
        server
            .get("/api/admin/categories/agricole")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .await
            .assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_admin_refresh_reports_degraded_outcome() {
        let (server, source) = test_server(fallback_categories());
        source.set_failing(true);

        let body: Value = server
            .post("/api/admin/categories/refresh")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .await
            .json();
        assert_eq!(body["message"], "degraded");

        source.set_failing(false);
        source.set_categories(vec![Category::new("agricole", "Agricole", None, 1)]);
        let body: Value = server
            .post("/api/admin/categories/refresh")
            .add_header(header::AUTHORIZATION, bearer("secret"))
            .await
            .json();
        assert!(body["message"].is_null());
        assert_eq!(body["meta"]["total"], 1);
    }
}
