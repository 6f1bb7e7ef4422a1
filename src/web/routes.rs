//! Route definitions

use super::handlers;
use super::state::AppState;
use crate::config::DeliveryMode;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router: Router<AppState> = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/search_restaurants", get(handlers::search_restaurants))
        .route("/export_list", post(handlers::export_list));

    // Persisted workbooks are served straight from the export directory
    if state.exporter.delivery() == DeliveryMode::Persist {
        router = router.nest_service("/static", ServeDir::new(state.exporter.store().dir()));
    }

    router
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
