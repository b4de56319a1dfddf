/*
 * Responsibility
 * - Handler surface (re-export)
 */
pub mod health;
pub mod products;
