/*
 * Responsibility
 * - Token verification surface (re-export)
 */
pub mod access_jwt;

pub use access_jwt::{AccessTokenClaims, TokenVerifier, VerifyError};
