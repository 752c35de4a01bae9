use std::sync::Arc;

use axum::{Json, extract::State};
use hermes_pooling::engine::PoolingStatistics;

use crate::state::AppState;

pub async fn statistics_handler(State(state): State<Arc<AppState>>) -> Json<PoolingStatistics> {
    Json(state.engine.lock().statistics())
}
