use std::collections::HashMap;

use axum::{
    Extension,
    extract::{Path, Request},
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, Result};
use crate::filters::{RequestScope, network_id_filter};
use crate::middleware::CallerContext;
use crate::models::{Organization, Principal};

/// A request that targets a single network.
pub struct NetworkRequest<'a> {
    pub caller: &'a CallerContext,
    pub network_id: &'a str,
}

impl RequestScope for NetworkRequest<'_> {
    fn principal(&self) -> &Principal {
        &self.caller.principal
    }

    fn organization(&self) -> Option<&Organization> {
        self.caller.organization.as_ref()
    }

    fn target_network(&self) -> &str {
        self.network_id
    }
}

/// Reject requests for networks outside the caller's scope.
///
/// Must run inside [`caller_auth`](crate::middleware::caller_auth).
pub async fn network_scope(
    Extension(caller): Extension<CallerContext>,
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let network_id = params
        .get("network_id")
        .ok_or_else(|| AppError::NotFound("Not Found".into()))?;

    let access = network_id_filter(&NetworkRequest {
        caller: &caller,
        network_id,
    });

    if !access.is_allowed() {
        tracing::warn!(
            user = %caller.principal.email,
            organization = caller.organization_name().unwrap_or("-"),
            network_id = %network_id,
            access = access.as_ref(),
            "Network access denied"
        );
        return Err(AppError::Forbidden(format!(
            "Access to network '{}' denied",
            network_id
        )));
    }

    Ok(next.run(request).await)
}
