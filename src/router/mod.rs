//! Routing module for the mock backend

use crate::mock::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, Router};
use tower_http::cors::{Any, CorsLayer};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        log::debug!("[MOCK] REQ: {} {}", req.method(), req.uri());
        let res = next.run(req).await;
        if !res.status().is_success() {
            log::warn!("[MOCK] RES: {} (Error)", res.status());
        }
        res
    });

    // Middleware: CORS (a browser console may be served from another origin)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(crate::mock::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}
