pub mod config;
pub mod directory;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;
pub mod upstream;
pub mod util;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application: health check plus the controller routes under the mount prefix.
pub fn app(state: AppState) -> Router {
    let prefix = state.mount_prefix.trim_end_matches('/').to_string();
    let controller = handlers::router(state.clone());

    let router = Router::new().route("/health", get(handlers::health));
    let router = if prefix.is_empty() {
        router.merge(controller)
    } else {
        router.nest(&prefix, controller)
    };

    router
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
