use axum::Json;
use hermes_pooling::{
    fare::{DeliveryType, FareBreakdown, TimeContext, VehicleType, quote},
    units::Kilometers,
};
use jiff::{Zoned, civil::Time};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteRequest {
    pub distance_km: f64,
    #[serde(default)]
    pub weight_kg: f64,
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub delivery_type: DeliveryType,
    /// Local booking time, defaults to the server clock.
    pub at: Option<Time>,
}

pub async fn post_quote_handler(
    Json(body): Json<QuoteRequest>,
) -> Result<Json<FareBreakdown>, ApiError> {
    if !body.distance_km.is_finite() || body.distance_km < 0.0 {
        return Err(ApiError::BadRequest(String::from(
            "distance_km must be a non-negative number",
        )));
    }

    let at = body.at.unwrap_or_else(|| Zoned::now().time());

    Ok(Json(quote(
        Kilometers::new(body.distance_km),
        body.weight_kg,
        body.vehicle_type,
        body.delivery_type,
        TimeContext::at(at),
    )))
}
