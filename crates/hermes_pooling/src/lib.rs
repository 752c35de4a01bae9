pub mod cost;
pub mod engine;
pub mod error;
pub mod events;
pub mod fare;
pub mod geometry;
pub mod params;
pub mod pool;
pub mod registry;
pub mod request;
pub mod route;
pub mod schema;
pub mod scoring;
pub mod units;

#[cfg(test)]
pub(crate) mod test_utils;
