use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};
use database::NewsRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: NewsRepository,
}

/// Builds the application router over the shared state.
///
/// Kept separate from `run_server` so tests can drive the exact routing
/// table in-process.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api", get(handlers::get_endpoints))
        .route("/api/topics", get(handlers::get_topics))
        .route("/api/articles", get(handlers::get_articles))
        .route(
            "/api/articles/:article_id",
            get(handlers::get_article_by_id).patch(handlers::patch_article_votes),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(handlers::get_article_comments).post(handlers::post_article_comment),
        )
        .route("/api/comments/:comment_id", delete(handlers::delete_comment))
        .route("/api/users", get(handlers::get_users))
        .fallback(handlers::path_not_found)
        .with_state(state)
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let db_pool = database::connect().await?;
    database::run_migrations(&db_pool).await?;
    let repo = NewsRepository::new(db_pool);

    let app_state = Arc::new(AppState { repo });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    let app = router(app_state)
        .layer(cors)
        // Logs every incoming request and its outcome.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024));

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
