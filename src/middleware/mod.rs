/*
 * Responsibility
 * - Middleware surface (re-export)
 */
pub mod auth;
