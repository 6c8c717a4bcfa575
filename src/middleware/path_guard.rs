use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::{AppError, Result};
use crate::util::unsafe_path_segment;

/// Refuse paths the controller would normalize into a different resource.
///
/// The upstream URL goes through `..` resolution, so a path scoped to one
/// network could otherwise land on another. Must run before
/// [`network_scope`](crate::middleware::network_scope).
pub async fn path_guard(request: Request, next: Next) -> Result<Response> {
    if let Some(segment) = unsafe_path_segment(request.uri().path()) {
        tracing::warn!(
            path = %request.uri().path(),
            segment = %segment,
            "Rejected path with relative or encoded separator segment"
        );
        return Err(AppError::BadRequest("Invalid path segment".into()));
    }

    Ok(next.run(request).await)
}
