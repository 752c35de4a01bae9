use std::path::Path;

use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::units::{Cost, Kilometers};

/// Tuning knobs of the pooling engine. `Default` is the production policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PoolingParams {
    pub max_pool_size: usize,

    /// Minimum compatibility score for a candidate to join a pool.
    pub compatibility_threshold: f64,
    /// Pickup/dropoff proximity drops to zero beyond this distance.
    pub proximity_radius_km: Kilometers,
    /// Direction similarity drops to zero beyond this divergence.
    pub max_direction_divergence_deg: f64,
    pub score_weights: ScoreWeights,

    pub delay_budget: DelayBudget,
    pub stop_duration: SignedDuration,
    pub route_deviation_allowance: SignedDuration,

    /// A join is rejected if it raises the per-customer cost above
    /// `current * cost_increase_tolerance`.
    pub cost_increase_tolerance: f64,
    pub base_fare: Cost,
    pub per_km_rate: Cost,
    pub minutes_per_km: f64,

    pub event_channel_capacity: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreWeights {
    pub pickup: f64,
    pub dropoff: f64,
    pub direction: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            pickup: 0.30,
            dropoff: 0.30,
            direction: 0.40,
        }
    }
}

/// How much extra delay a join may add before the pool is skipped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DelayBudget {
    /// The smallest `max_wait` among the candidate and the pool's members.
    RequestMaxWait,
    /// A fixed budget for every pool.
    Fixed(SignedDuration),
}

impl Default for PoolingParams {
    fn default() -> Self {
        Self {
            max_pool_size: 3,

            compatibility_threshold: 0.70,
            proximity_radius_km: Kilometers::new(5.0),
            max_direction_divergence_deg: 90.0,
            score_weights: ScoreWeights::default(),

            delay_budget: DelayBudget::RequestMaxWait,
            stop_duration: SignedDuration::from_mins(5),
            route_deviation_allowance: SignedDuration::from_mins(10),

            cost_increase_tolerance: 1.10,
            base_fare: 50.0,
            per_km_rate: 10.0,
            minutes_per_km: 2.0,

            event_channel_capacity: 256,
        }
    }
}

impl PoolingParams {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let file = std::fs::File::open(path)?;
        let params = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(params)
    }

    /// Delay a join adds to a pool: one pickup and one dropoff stop plus the
    /// fixed deviation allowance. Independent of the actual geometry.
    pub fn additional_delay(&self) -> SignedDuration {
        self.stop_duration * 2 + self.route_deviation_allowance
    }
}
