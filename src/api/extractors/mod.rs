/*
 * Responsibility
 * - Extractor surface; controls what handlers can see of the request context
 */
mod principal;

pub use principal::{CurrentPrincipal, Principal};
