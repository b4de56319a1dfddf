/*
 * Responsibility
 * - Config load → dependency construction → Router assembly
 * - Middleware application (authentication, authorization, tracing)
 * - axum::serve() bootstrap
 */
use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{api, config::Config, middleware, state::AppState};

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let state = AppState::new(&config);

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the full application router, auth pipeline included.
///
/// Layer order matters: layers added later wrap earlier ones, so
/// authentication (added last) runs first and the authorization gate
/// sees the Principal it attached.
pub fn build_app(state: AppState) -> Router {
    let app = api::routes();
    let app = middleware::auth::policy::apply(app, state.clone());
    let app = middleware::auth::access::apply(app, state.clone());
    app.layer(TraceLayer::new_for_http()).with_state(state)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_api=info,tower_http=warn")),
        )
        .init();
}
