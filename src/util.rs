//! Shared helpers for request handling.

use axum::http::{HeaderMap, Uri};

/// Extract client IP address and user-agent from request headers.
///
/// Tries `x-forwarded-for` first (for proxied requests), then `x-real-ip`.
pub fn extract_request_info(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip = headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    (ip, user_agent)
}

/// Extract a Bearer token from the Authorization header.
///
/// Returns the token string without the "Bearer " prefix, or None if
/// the header is missing, malformed, or empty after the prefix.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Path and query of a request with the gateway's mount prefix removed.
pub fn upstream_path(path_and_query: &str, mount_prefix: &str) -> String {
    let prefix = mount_prefix.trim_end_matches('/');
    match path_and_query.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() => "/".to_string(),
        Some(rest) if rest.starts_with('/') || rest.starts_with('?') => rest.to_string(),
        _ => path_and_query.to_string(),
    }
}

pub fn path_and_query(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}

/// Find a path segment the controller could resolve differently from how we
/// route it: `.` or `..` (raw or percent-encoded), or a segment that decodes
/// to something containing a path separator.
pub fn unsafe_path_segment(path: &str) -> Option<&str> {
    path.split('/').find(|segment| {
        let Ok(decoded) = urlencoding::decode(segment) else {
            return true;
        };
        decoded == "."
            || decoded == ".."
            || decoded.contains('/')
            || decoded.contains('\\')
    })
}
