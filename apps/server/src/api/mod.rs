//! HTTP routers, one module per domain.

pub mod analytics;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod csv;
pub mod transactions;

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .merge(auth::protected_router())
        .merge(categories::router())
        .merge(transactions::router())
        .merge(budgets::router())
        .merge(analytics::router())
        .merge(csv::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = auth::router().merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
