use axum::http::{HeaderMap, Method, StatusCode};

use crate::middleware::CallerContext;
use crate::util::extract_request_info;

/// Record a successful mutating call against a network.
///
/// Reads are not audited, nor are calls the controller refused.
pub fn audit_network_call(
    caller: &CallerContext,
    network_id: &str,
    method: &Method,
    path: &str,
    status: StatusCode,
    headers: &HeaderMap,
) -> bool {
    if *method == Method::GET || !status.is_success() {
        return false;
    }

    let (ip, user_agent) = extract_request_info(headers);
    tracing::info!(
        target: "audit",
        user = %caller.principal.email,
        organization = caller.organization_name().unwrap_or("-"),
        network_id = %network_id,
        method = %method,
        path = %path,
        status = status.as_u16(),
        ip = ip.as_deref().unwrap_or("-"),
        user_agent = user_agent.as_deref().unwrap_or("-"),
        "Network mutation"
    );
    true
}
