/*
 * Responsibility
 * - URL structure: /health, /products
 * - Access requirements live in the policy table, not here; keep the two in
 *   sync when adding routes (middleware/auth/policy.rs)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    health::health,
    products::{create_product, delete_product, get_product, list_products, update_product},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
