/*
 * Responsibility
 * - Service layer surface (re-export)
 */
pub mod auth;
