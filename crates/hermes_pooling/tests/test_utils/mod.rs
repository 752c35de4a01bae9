#![allow(dead_code)]

use hermes_pooling::request::{Place, Request, RequestBuilder};
use jiff::{SignedDuration, Timestamp};

pub const KM_PER_DEGREE: f64 = 111.195;

pub const MUMBAI_PICKUP: (f64, f64) = (19.0760, 72.8777);
pub const MUMBAI_DROPOFF: (f64, f64) = (19.0896, 72.8656);

pub fn base_timestamp() -> Timestamp {
    "2025-06-10T08:00:00Z".parse().unwrap()
}

pub fn create_request(
    id: &str,
    pickup: (f64, f64),
    dropoff: (f64, f64),
    created_after_mins: i64,
) -> Request {
    let mut builder = RequestBuilder::default();
    builder
        .set_id(id)
        .set_customer_id(format!("customer-{id}"))
        .set_pickup(Place::new(pickup.0, pickup.1, format!("{id} pickup")))
        .set_dropoff(Place::new(dropoff.0, dropoff.1, format!("{id} dropoff")))
        .set_weight_kg(1.0)
        .set_max_wait(SignedDuration::from_mins(30))
        .set_created_at(base_timestamp() + SignedDuration::from_mins(created_after_mins));

    builder.build().unwrap()
}

/// Request with both endpoints shifted north by `lat_offset` degrees from
/// the Mumbai reference trip.
pub fn mumbai_request(id: &str, lat_offset: f64, created_after_mins: i64) -> Request {
    create_request(
        id,
        (MUMBAI_PICKUP.0 + lat_offset, MUMBAI_PICKUP.1),
        (MUMBAI_DROPOFF.0 + lat_offset, MUMBAI_DROPOFF.1),
        created_after_mins,
    )
}

/// Point `km` away from `origin` along `bearing_deg`, using a flat-earth
/// approximation that is accurate enough at city scale.
pub fn destination(origin: (f64, f64), bearing_deg: f64, km: f64) -> (f64, f64) {
    let bearing = bearing_deg.to_radians();
    let dlat = km * bearing.cos() / KM_PER_DEGREE;
    let dlng = km * bearing.sin() / (KM_PER_DEGREE * origin.0.to_radians().cos());
    (origin.0 + dlat, origin.1 + dlng)
}
