/*
 * Responsibility
 * - Module tree for the product resource server
 * - Exposed as a library so black-box tests can build the real router
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
