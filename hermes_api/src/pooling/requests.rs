use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hermes_pooling::{
    pool::PoolId,
    request::{Place, Request, RequestBuilder, RequestId},
};
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

/// Request intake payload. Optional fields fall back to the engine defaults.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiRequest {
    pub id: String,
    pub customer_id: Option<String>,
    pub pickup: Place,
    pub dropoff: Place,
    pub weight_kg: Option<f64>,
    pub max_wait: Option<SignedDuration>,
    pub created_at: Option<Timestamp>,
}

impl ApiRequest {
    pub fn build_request(self) -> Result<Request, ApiError> {
        let mut builder = RequestBuilder::default();
        builder
            .set_id(self.id)
            .set_pickup(self.pickup)
            .set_dropoff(self.dropoff);

        if let Some(customer_id) = self.customer_id {
            builder.set_customer_id(customer_id);
        }
        if let Some(weight_kg) = self.weight_kg {
            if weight_kg < 0.0 {
                return Err(ApiError::BadRequest(String::from(
                    "weight_kg must not be negative",
                )));
            }
            builder.set_weight_kg(weight_kg);
        }
        if let Some(max_wait) = self.max_wait {
            builder.set_max_wait(max_wait);
        }
        if let Some(created_at) = self.created_at {
            builder.set_created_at(created_at);
        }

        Ok(builder.build()?)
    }
}

#[derive(Serialize)]
pub struct PostRequestResponse {
    pool_id: PoolId,
}

impl IntoResponse for PostRequestResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

pub async fn post_request_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ApiRequest>,
) -> Result<PostRequestResponse, ApiError> {
    let request = body.build_request()?;
    let pool_id = state.engine.lock().add_request(request)?;

    Ok(PostRequestResponse { pool_id })
}

#[derive(Serialize)]
pub struct DeleteRequestResponse {
    pool_id: PoolId,
}

pub async fn delete_request_handler(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<String>,
) -> Result<Json<DeleteRequestResponse>, ApiError> {
    let pool_id = state
        .engine
        .lock()
        .cancel_request(&RequestId::new(request_id))?;

    Ok(Json(DeleteRequestResponse { pool_id }))
}
