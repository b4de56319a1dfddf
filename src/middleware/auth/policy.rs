//! Centralized authorization: one ordered rule table gating every request.
//!
//! Rules map (method, path) to a requirement and are evaluated first-match-
//! wins before any handler runs, so the whole access policy is auditable in
//! one place. The table is built once at startup and read-only afterwards.
//!
//! Denial is a uniform 403 for both "no credentials" and "wrong role"; that
//! matches the contract consumers of this API already rely on (see
//! `AppError::Forbidden`).

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::Principal;
use crate::error::AppError;
use crate::state::AppState;

pub const ROLE_ADMIN: &str = "ADMIN";

/// What a matched route demands of the request's principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    Role(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    /// `*`: matches exactly one path segment.
    Any,
}

/// A `/`-segmented path pattern. Segment counts must match exactly; there is
/// deliberately no multi-segment wildcard, so every route a rule covers is
/// visible in the table.
#[derive(Debug, Clone)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s == "*" {
                    Segment::Any
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        parts.len() == self.segments.len()
            && self
                .segments
                .iter()
                .zip(parts)
                .all(|(segment, part)| match segment {
                    Segment::Any => true,
                    Segment::Literal(lit) => lit == part,
                })
    }
}

#[derive(Debug, Clone)]
pub struct PolicyRule {
    methods: Vec<Method>,
    pattern: PathPattern,
    requirement: Requirement,
}

impl PolicyRule {
    pub fn new(methods: Vec<Method>, pattern: &str, requirement: Requirement) -> Self {
        Self {
            methods,
            pattern: PathPattern::parse(pattern),
            requirement,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.methods.contains(method) && self.pattern.matches(path)
    }
}

/// The ordered rule table. Declare most-specific rules first: evaluation is
/// strictly first-match-wins.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    rules: Vec<PolicyRule>,
}

impl PolicyTable {
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// The product resource policy: reads are public, mutations need ADMIN.
    pub fn product_policy() -> Self {
        use Requirement::{Public, Role};

        Self::new(vec![
            PolicyRule::new(vec![Method::GET], "/health", Public),
            PolicyRule::new(vec![Method::GET], "/products", Public),
            PolicyRule::new(vec![Method::GET], "/products/*", Public),
            PolicyRule::new(vec![Method::POST], "/products", Role(ROLE_ADMIN)),
            PolicyRule::new(
                vec![Method::PUT, Method::DELETE],
                "/products/*",
                Role(ROLE_ADMIN),
            ),
        ])
    }

    /// Evaluate a request against the table. Pure; no side effects.
    ///
    /// An unmatched (method, path) falls back to `Authenticated`: anonymous
    /// requests are denied by default, authenticated ones proceed (usually
    /// into the router's own 404).
    pub fn evaluate(&self, method: &Method, path: &str, principal: &Principal) -> Decision {
        let requirement = self
            .rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| rule.requirement.clone())
            .unwrap_or(Requirement::Authenticated);

        let allowed = match requirement {
            Requirement::Public => true,
            Requirement::Authenticated => principal.authenticated,
            Requirement::Role(role) => principal.has_role(role),
        };

        if allowed { Decision::Allow } else { Decision::Deny }
    }
}

/// Apply the authorization gate. Must sit inside the authentication layer so
/// the Principal is already attached when it runs.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, authorize))
}

async fn authorize(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // A missing Principal means the authentication layer is not mounted;
    // treat it as anonymous so the failure mode stays default-deny.
    let principal = req
        .extensions()
        .get::<Principal>()
        .cloned()
        .unwrap_or_else(Principal::anonymous);

    match state
        .policy
        .evaluate(req.method(), req.uri().path(), &principal)
    {
        Decision::Allow => Ok(next.run(req).await),
        Decision::Deny => {
            tracing::info!(
                method = %req.method(),
                path = %req.uri().path(),
                authenticated = principal.authenticated,
                "request denied by policy"
            );
            Err(AppError::Forbidden)
        }
    }
}
