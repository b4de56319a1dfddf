//! Bearer token → Principal resolution.
//!
//! Runs once per request, before the policy gate. Extracts the bearer token
//! from `Authorization`, verifies it, and attaches the resulting Principal to
//! request extensions. Failure resolves to `Principal::anonymous()` and is
//! logged; this layer never terminates the request — the asymmetry is the
//! safety property: fail open to unauthenticated, never to authenticated.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::Principal;
use crate::state::AppState;

/// Apply the authentication layer to the whole router.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8's from_fn cannot take a State extractor; from_fn_with_state
    // passes it explicitly
    router.layer(middleware::from_fn_with_state(state, authenticate))
}

/// Extract the bearer token from a raw `Authorization` header value.
///
/// The `"Bearer "` prefix is matched case-sensitively with a single space;
/// the remainder is returned unmodified (embedded whitespace preserved).
/// Pure; no side effects.
pub(crate) fn bearer_token(header: Option<&str>) -> Option<&str> {
    header.and_then(|value| value.strip_prefix("Bearer "))
}

// Returns Response, not Result: by construction this layer has no error path.
async fn authenticate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let principal = match bearer_token(header) {
        None => Principal::anonymous(),
        Some(token) => match state.auth.verify(token) {
            Ok(claims) => Principal::from_claims(claims),
            Err(reason) => {
                // Recorded for observability only; the request continues
                // unauthenticated and the policy layer decides its fate.
                tracing::warn!(%reason, "access token rejected");
                Principal::anonymous()
            }
        },
    };

    // middleware → policy gate / extractor hand-off
    req.extensions_mut().insert(principal);

    next.run(req).await
}
