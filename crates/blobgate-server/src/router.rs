use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::endpoint::endpoints;
use crate::handler::{self, AppState};

/// Build the axum router: the record endpoint plus health.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let records = get(handler::fetch_record)
        .post(handler::save_record)
        .fallback(handler::method_not_allowed);

    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(&config.route, records)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
