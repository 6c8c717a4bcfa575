use std::collections::HashMap;

use axum::{
    Extension,
    body::Bytes,
    extract::{OriginalUri, Path, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::handlers::audit::audit_network_call;
use crate::middleware::CallerContext;
use crate::state::AppState;
use crate::upstream::UpstreamResponse;
use crate::util::{path_and_query, upstream_path};

fn passthrough(upstream: UpstreamResponse) -> Response {
    let mut response = (upstream.status, upstream.body).into_response();
    if let Some(content_type) = upstream.content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}

/// GET /magma/networks, narrowed to the caller's networks.
pub async fn list_networks(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerContext>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Response> {
    let path = upstream_path(path_and_query(&uri), &state.mount_prefix);
    let upstream = state
        .upstream
        .forward(Method::GET, &path, &headers, Bytes::new())
        .await?;

    let filtered = state
        .network_list
        .decorate(
            upstream.status,
            &upstream.body,
            &caller.principal,
            caller.organization.as_ref(),
        )
        .map_err(|e| e.with_content_type(upstream.content_type.clone()))?;

    let body = filtered.to_json()?;
    Ok((
        filtered.status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}

/// Any call under a network-scoped path. Access was checked by
/// [`network_scope`](crate::middleware::network_scope).
pub async fn forward_network_call(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerContext>,
    Path(params): Path<HashMap<String, String>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let network_id = params
        .get("network_id")
        .ok_or_else(|| AppError::NotFound("Not Found".into()))?;
    let path = upstream_path(path_and_query(&uri), &state.mount_prefix);

    let upstream = state
        .upstream
        .forward(method.clone(), &path, &headers, body)
        .await?;

    audit_network_call(&caller, network_id, &method, &path, upstream.status, &headers);

    Ok(passthrough(upstream))
}

/// GET /magma/channels/{channel}. Channels aren't network-scoped.
pub async fn get_channel(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Response> {
    let path = upstream_path(path_and_query(&uri), &state.mount_prefix);
    let upstream = state
        .upstream
        .forward(Method::GET, &path, &headers, Bytes::new())
        .await?;
    Ok(passthrough(upstream))
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
