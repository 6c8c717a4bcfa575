//! Tenant scoping for calls that target the network controller.
//!
//! Two decisions live here, both pure and synchronous:
//!
//! - [`network_id_filter`] gates a request that names a single network in its
//!   path.
//! - [`NetworkListFilter::decorate`] narrows the controller's "list networks"
//!   response down to what the caller may see.
//!
//! Scoping only applies when the deployment is multi-tenant, i.e. when an
//! [`Organization`] could be resolved for the request.

use std::collections::HashSet;

use axum::{body::Bytes, http::StatusCode};
use strum::AsRefStr;

use crate::error::{AppError, Result};
use crate::models::{Organization, Principal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// What the path filter needs to know about a request.
pub trait RequestScope {
    fn principal(&self) -> &Principal;
    /// `None` when the deployment runs without organizations.
    fn organization(&self) -> Option<&Organization>;
    fn target_network(&self) -> &str;
}

/// Decide whether the caller may act on the network named in the request path.
///
/// The organization check runs first and is never skipped, so a super user
/// only gets through for networks their organization owns.
pub fn network_id_filter(scope: &impl RequestScope) -> Access {
    let Some(organization) = scope.organization() else {
        return Access::Allow;
    };
    let network_id = scope.target_network();

    if !contains_network_id(&organization.network_ids, network_id) {
        return Access::Deny;
    }

    let principal = scope.principal();
    if principal.is_super_user || contains_network_id(&principal.network_ids, network_id) {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Membership test used by the path filter.
///
/// Falls back to a case-insensitive comparison: the UI lowercases network IDs
/// when building some controller URLs, so `Net1` must still match `net1`.
pub fn contains_network_id(allowed: &[String], network_id: &str) -> bool {
    if allowed.iter().any(|id| id == network_id) {
        return true;
    }
    let wanted = network_id.to_lowercase();
    allowed.iter().any(|id| id.to_lowercase() == wanted)
}

/// Keep the entries of `list` present in every one of `scopes`, in `list` order.
///
/// Duplicates in `list` collapse to their first occurrence.
pub fn ordered_intersection(list: &[String], scopes: &[&[String]]) -> Vec<String> {
    let scopes: Vec<HashSet<&str>> = scopes
        .iter()
        .map(|scope| scope.iter().map(String::as_str).collect())
        .collect();
    let mut seen = HashSet::new();

    list.iter()
        .filter(|id| scopes.iter().all(|scope| scope.contains(id.as_str())))
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// The networks from `list` that `principal` may see.
pub fn visible_networks(
    list: &[String],
    principal: &Principal,
    organization: Option<&Organization>,
) -> Vec<String> {
    let Some(organization) = organization else {
        return list.to_vec();
    };

    if principal.is_super_user {
        ordered_intersection(list, &[organization.network_ids.as_slice()])
    } else {
        ordered_intersection(
            list,
            &[
                organization.network_ids.as_slice(),
                principal.network_ids.as_slice(),
            ],
        )
    }
}

/// Rewritten response for a "list networks" call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredNetworks {
    /// Status to send to the caller. Differs from upstream only when the
    /// fallback list was used.
    pub status: StatusCode,
    pub networks: Vec<String>,
}

impl FilteredNetworks {
    /// JSON array body for the caller.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.networks).map_err(|e| AppError::Internal(e.to_string()))
    }
}

/// Response filter for the controller's "list networks" endpoint.
#[derive(Debug, Clone, Default)]
pub struct NetworkListFilter {
    fallback: Vec<String>,
}

impl NetworkListFilter {
    pub fn new(fallback: Vec<String>) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> &[String] {
        &self.fallback
    }

    /// Narrow an upstream network list for the caller.
    ///
    /// A 401 or 403 from the controller means the gateway has no root
    /// credential for it. With a fallback list configured that failure is
    /// answered as a 200 carrying the fallback networks; without one it comes
    /// back as [`AppError::UpstreamAuth`]. Any other status is decoded as is,
    /// and a body that is not a JSON array of strings is an error.
    pub fn decorate(
        &self,
        status: StatusCode,
        body: &[u8],
        principal: &Principal,
        organization: Option<&Organization>,
    ) -> Result<FilteredNetworks> {
        let rejected = status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN;

        let (status, upstream) = if rejected && !self.fallback.is_empty() {
            tracing::warn!(
                upstream_status = status.as_u16(),
                "Controller rejected network listing, serving fallback networks"
            );
            (StatusCode::OK, self.fallback.clone())
        } else if rejected {
            return Err(AppError::UpstreamAuth {
                status,
                body: Bytes::copy_from_slice(body),
                content_type: None,
            });
        } else {
            (status, serde_json::from_slice::<Vec<String>>(body)?)
        };

        let networks = visible_networks(&upstream, principal, organization);
        tracing::debug!(
            user = %principal.email,
            upstream = upstream.len(),
            visible = networks.len(),
            "Filtered network list"
        );

        Ok(FilteredNetworks { status, networks })
    }
}
