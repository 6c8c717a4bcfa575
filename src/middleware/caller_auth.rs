use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, Result};
use crate::models::{Organization, Principal};
use crate::state::AppState;
use crate::util::extract_bearer_token;

/// Who is calling, and which organization bounds what they can see.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub principal: Principal,
    /// `None` on single-tenant deployments
    pub organization: Option<Organization>,
}

impl CallerContext {
    pub fn organization_name(&self) -> Option<&str> {
        self.organization.as_ref().map(|o| o.name.as_str())
    }
}

/// Authenticate the caller from its bearer token and resolve its organization.
///
/// Organization resolution failures are errors; they never fall through to
/// the unscoped path.
pub async fn caller_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let api_key = extract_bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;

    let user = state
        .directory
        .user_by_api_key(api_key)
        .ok_or(AppError::Unauthorized)?;

    let organization = if state.multi_tenant {
        Some(state.directory.organization_for(user)?)
    } else {
        None
    };

    request.extensions_mut().insert(CallerContext {
        principal: user.principal(),
        organization,
    });

    Ok(next.run(request).await)
}
