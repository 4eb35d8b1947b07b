use std::sync::Arc;

use astoria_codex::core::config::{CategorySourceKind, Config};
use astoria_codex::core::middleware;
use astoria_codex::core::openapi::ApiDoc;
use astoria_codex::features::categories::{
    routes as categories_routes, CategoryCache, CategoryService, CategorySource,
    PgCategorySource, SupabaseCategorySource,
};
use axum::Router;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    let source: Arc<dyn CategorySource> = match config.categories.source {
        CategorySourceKind::Supabase => {
            let supabase = config
                .supabase
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("Supabase configuration missing"))?;
            tracing::info!("Category source: Supabase ({})", supabase.url);
            Arc::new(SupabaseCategorySource::new(supabase)?)
        }
        CategorySourceKind::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("Database configuration missing"))?;
            let source = PgCategorySource::connect(database).await?;
            tracing::info!("Category source: Postgres connection pool created");
            Arc::new(source)
        }
    };

    let cache = Arc::new(CategoryCache::new(
        Arc::clone(&source),
        config.categories.cache_ttl,
    ));
    let category_service = Arc::new(CategoryService::new(Arc::clone(&cache), source));
    tracing::info!(
        "Category service initialized (cache ttl {}s)",
        config.categories.cache_ttl.as_secs()
    );

    // Warm the cache; an unreachable backend is not fatal
    let listing = cache.list().await;
    if listing.is_degraded() {
        tracing::warn!("Category backend unreachable at startup, serving built-in list");
    } else {
        tracing::info!("Loaded {} categories", listing.categories().len());
    }

    if config.admin.api_token.is_none() {
        tracing::warn!("ADMIN_API_TOKEN not set, admin routes will answer 403");
    }

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(categories_routes::routes(Arc::clone(&category_service)))
        .nest(
            "/api/admin",
            categories_routes::admin_routes(category_service, Arc::new(config.admin.clone())),
        )
        .merge(health_route)
        .layer(middleware::cors_layer(&config.app.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;
    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
