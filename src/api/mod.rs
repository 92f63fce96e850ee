// HTTP surface: routes, handlers and error mapping
pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::balance_service::BalanceService;

#[derive(Clone)]
pub struct AppState {
    pub balances: BalanceService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health_check))
        .route("/health", get(handlers::health_check))
        .route("/api/chains", get(handlers::list_chains))
        .route("/api/balance", get(handlers::get_balance))
        .route("/api/portfolio/:address", get(handlers::get_portfolio))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
