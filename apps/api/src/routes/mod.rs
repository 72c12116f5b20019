pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::matches::handlers as matches;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching proxy
        .route("/api/v1/ai-match", post(matching::handle_ai_match))
        // Match records
        .route("/api/v1/matches", get(matches::handle_list_matches))
        .route("/api/v1/matches/:id", get(matches::handle_get_match))
        .route(
            "/api/v1/matches/:id/status",
            patch(matches::handle_update_status),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
