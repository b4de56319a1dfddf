/*
 * Responsibility
 * - Request/response DTO surface
 */
pub mod products;
