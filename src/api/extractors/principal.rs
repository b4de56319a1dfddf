/*
 * Responsibility
 * - The resolved per-request identity handlers and the policy gate consume
 * - The authentication middleware builds it and stores it in request
 *   extensions; nothing downstream re-derives identity
 */
use std::collections::HashSet;

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::services::auth::AccessTokenClaims;
use crate::state::AppState;

/// Identity resolved for exactly one request.
///
/// Created fresh per request by the authentication middleware; never shared
/// across requests, never persisted.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: Option<String>,
    pub roles: HashSet<String>,
    pub authenticated: bool,
}

impl Principal {
    /// The identity attached when no (valid) credentials were presented.
    pub fn anonymous() -> Self {
        Self {
            subject: None,
            roles: HashSet::new(),
            authenticated: false,
        }
    }

    /// Identity derived from a verified claim set.
    pub fn from_claims(claims: AccessTokenClaims) -> Self {
        Self {
            subject: Some(claims.sub),
            roles: claims.roles.unwrap_or_default().into_iter().collect(),
            authenticated: true,
        }
    }

    /// Role check. An unauthenticated principal holds no roles by
    /// construction, but the `authenticated` gate is still checked here so
    /// the invariant does not depend on how the value was built.
    pub fn has_role(&self, role: &str) -> bool {
        self.authenticated && self.roles.contains(role)
    }
}

/// Extractor handing the request's Principal to a handler.
///
/// The authentication middleware inserts a Principal into extensions for
/// every request (anonymous included), so absence means the middleware is
/// not mounted: a wiring bug, reported as 500 rather than a denial.
pub struct CurrentPrincipal(pub Principal);

impl FromRequestParts<AppState> for CurrentPrincipal
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
