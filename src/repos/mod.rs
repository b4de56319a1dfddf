/*
 * Responsibility
 * - Storage layer surface (re-export)
 */
pub mod product_repo;
