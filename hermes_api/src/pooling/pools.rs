use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use hermes_pooling::pool::{Pool, PoolId};
use uuid::Uuid;

use crate::{
    error::ApiError,
    pagination::{PaginatedResponse, Pagination},
    state::AppState,
};

/// Active pools in creation order.
pub async fn list_pools_handler(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Json<PaginatedResponse<Pool>> {
    let pools: Vec<Pool> = state
        .engine
        .lock()
        .list_active_pools()
        .into_iter()
        .cloned()
        .collect();

    Json(pagination.paginate(pools))
}

pub async fn get_pool_handler(
    State(state): State<Arc<AppState>>,
    Path(pool_id): Path<Uuid>,
) -> Result<Json<Pool>, ApiError> {
    let engine = state.engine.lock();
    let pool = engine.get_pool(PoolId::from(pool_id))?;

    Ok(Json(pool.clone()))
}
