use schemars::schema_for;

use crate::{events::LifecycleEvent, params::PoolingParams};

/// JSON schema of a simulation input: an array of lifecycle events.
pub fn generate_events_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(Vec<LifecycleEvent>))
}

pub fn generate_params_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(PoolingParams))
}
