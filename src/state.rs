/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Built once at startup; Clone is cheap (Arc / key handles inside)
 */
use std::sync::Arc;

use crate::config::Config;
use crate::middleware::auth::policy::PolicyTable;
use crate::repos::product_repo::{MemoryProductStore, ProductStore};
use crate::services::auth::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub auth: TokenVerifier,
    pub policy: Arc<PolicyTable>,
    pub products: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_secret(&config.jwt_secret)
    }

    /// Build state around a raw secret; the seam used by black-box tests.
    pub fn with_secret(jwt_secret: &str) -> Self {
        Self {
            auth: TokenVerifier::new(jwt_secret.as_bytes()),
            policy: Arc::new(PolicyTable::product_policy()),
            products: Arc::new(MemoryProductStore::new()),
        }
    }
}
