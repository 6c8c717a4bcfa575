mod audit;
mod networks;

pub use audit::*;
pub use networks::*;

use axum::{
    Json, Router, middleware,
    routing::{any, get},
};
use serde::Serialize;

use crate::middleware::{caller_auth, network_scope, path_guard};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Network-scoped controller resources. Like a prefix mount, each base also
/// matches a trailing slash and anything below it.
const NETWORK_BASES: [&str; 3] = [
    "/magma/networks/{network_id}",
    "/magma/v1/networks/{network_id}",
    "/magma/v1/lte/{network_id}",
];

/// Controller routes, relative to the mount prefix.
pub fn router(state: AppState) -> Router<AppState> {
    let network_routes = NETWORK_BASES
        .iter()
        .fold(Router::<AppState>::new(), |router, base| {
            router
                .route(base, any(forward_network_call))
                .route(&format!("{}/", base), any(forward_network_call))
                .route(&format!("{}/{{*rest}}", base), any(forward_network_call))
        })
        .route_layer(middleware::from_fn(network_scope));

    Router::new()
        .route("/magma/networks", get(list_networks).fallback(not_found))
        .route("/magma/channels/{channel}", get(get_channel).fallback(not_found))
        .merge(network_routes)
        .route_layer(middleware::from_fn_with_state(state, caller_auth))
        .route_layer(middleware::from_fn(path_guard))
        .fallback(not_found)
}
