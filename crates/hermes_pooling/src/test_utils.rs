use jiff::{SignedDuration, Timestamp};

use crate::request::{Place, Request, RequestBuilder};

pub fn base_timestamp() -> Timestamp {
    "2025-06-10T08:00:00Z".parse().unwrap()
}

/// Request created `created_after_mins` minutes after [`base_timestamp`].
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
        .set_created_at(base_timestamp() + SignedDuration::from_mins(created_after_mins));

    builder.build().unwrap()
}

/// Copy of `reference` with both endpoints shifted north by `lat_offset` degrees.
pub fn offset_request(
    id: &str,
    reference: &Request,
    lat_offset: f64,
    created_after_mins: i64,
) -> Request {
    create_request(
        id,
        (reference.pickup().lat + lat_offset, reference.pickup().lng),
        (reference.dropoff().lat + lat_offset, reference.dropoff().lng),
        created_after_mins,
    )
}
