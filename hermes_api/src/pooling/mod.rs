pub mod notifications;
pub mod pools;
pub mod requests;
pub mod statistics;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

pub fn pooling_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/requests", post(requests::post_request_handler))
        .route(
            "/requests/{request_id}",
            delete(requests::delete_request_handler),
        )
        .route("/pools", get(pools::list_pools_handler))
        .route("/pools/{pool_id}", get(pools::get_pool_handler))
        .route("/statistics", get(statistics::statistics_handler))
        .with_state(state)
}
