//! Internal pooling cost model.
//!
//! Used only to rank and accept joins. Customer-facing prices come from
//! [`crate::fare::quote`] and the two are intentionally unrelated.

use jiff::SignedDuration;
use serde::Serialize;

use crate::{
    geometry::distance,
    params::PoolingParams,
    pool::Stop,
    request::Request,
    units::{Cost, Kilometers, minutes},
};

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CostAllocation {
    pub total_distance: Kilometers,
    pub estimated_time: SignedDuration,
    pub cost_per_customer: Cost,
    pub savings: Cost,
}

/// Sum of consecutive-stop distances.
pub fn route_distance(route: &[Stop]) -> Kilometers {
    route
        .windows(2)
        .map(|leg| distance(leg[0].point(), leg[1].point()))
        .sum()
}

pub fn trip_cost(total_distance: Kilometers, params: &PoolingParams) -> Cost {
    params.base_fare + total_distance * params.per_km_rate
}

/// What `request` would cost delivered on its own.
pub fn solo_cost(request: &Request, params: &PoolingParams) -> Cost {
    let direct = distance(request.pickup().point(), request.dropoff().point());
    trip_cost(direct, params)
}

pub fn estimated_time(
    total_distance: Kilometers,
    member_count: usize,
    params: &PoolingParams,
) -> SignedDuration {
    let stops = i32::try_from(2 * member_count).unwrap_or(i32::MAX);
    minutes(total_distance * params.minutes_per_km)
        .saturating_add(params.stop_duration.saturating_mul(stops))
}

/// Splits the trip cost of `route` evenly across `members`.
///
/// `members` must not be empty.
pub fn allocate(route: &[Stop], members: &[Request], params: &PoolingParams) -> CostAllocation {
    let member_count = members.len();
    let total_distance = route_distance(route);
    let cost_per_customer = trip_cost(total_distance, params) / member_count as f64;

    let savings = if member_count <= 1 {
        0.0
    } else {
        let solo_total: Cost = members.iter().map(|m| solo_cost(m, params)).sum();
        solo_total - cost_per_customer * member_count as f64
    };

    CostAllocation {
        total_distance,
        estimated_time: estimated_time(total_distance, member_count, params),
        cost_per_customer,
        savings,
    }
}
