use jiff::{SignedDuration, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    request::{Place, Request, RequestId},
    units::{Cost, Kilometers},
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PoolId(Uuid);

impl PoolId {
    pub fn new_v4() -> Self {
        PoolId(Uuid::new_v4())
    }
}

impl From<Uuid> for PoolId {
    fn from(value: Uuid) -> Self {
        PoolId(value)
    }
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Pickup,
    Dropoff,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Stop {
    pub kind: StopKind,
    pub request_id: RequestId,
    pub place: Place,
}

impl Stop {
    pub fn pickup(request: &Request) -> Self {
        Stop {
            kind: StopKind::Pickup,
            request_id: request.id().clone(),
            place: request.pickup().clone(),
        }
    }

    pub fn dropoff(request: &Request) -> Self {
        Stop {
            kind: StopKind::Dropoff,
            request_id: request.id().clone(),
            place: request.dropoff().clone(),
        }
    }

    pub fn point(&self) -> geo::Point {
        self.place.point()
    }
}

/// Fields computed from a pool's membership by [`crate::engine::recompute`].
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct PoolMetrics {
    pub route: Vec<Stop>,
    pub total_distance: Kilometers,
    pub estimated_time: SignedDuration,
    pub cost_per_customer: Cost,
    pub savings: Cost,
}

/// A group of requests sharing one vehicle trip.
///
/// Membership is never empty and the metrics always describe the current
/// members; both are only changed through the registry. Serialize-only, so
/// no pool can be built outside the engine.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Pool {
    id: PoolId,
    members: Vec<Request>,
    #[serde(flatten)]
    metrics: PoolMetrics,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Pool {
    pub(crate) fn new(id: PoolId, members: Vec<Request>, metrics: PoolMetrics) -> Self {
        let now = Timestamp::now();
        Pool {
            id,
            members,
            metrics,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn members(&self) -> &[Request] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn metrics(&self) -> &PoolMetrics {
        &self.metrics
    }

    pub fn route(&self) -> &[Stop] {
        &self.metrics.route
    }

    pub fn total_distance(&self) -> Kilometers {
        self.metrics.total_distance
    }

    pub fn estimated_time(&self) -> SignedDuration {
        self.metrics.estimated_time
    }

    pub fn cost_per_customer(&self) -> Cost {
        self.metrics.cost_per_customer
    }

    pub fn savings(&self) -> Cost {
        self.metrics.savings
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Replaces membership and metrics together so they cannot drift apart.
    pub(crate) fn set_membership(&mut self, members: Vec<Request>, metrics: PoolMetrics) {
        self.members = members;
        self.metrics = metrics;
        self.updated_at = Timestamp::now();
    }

    pub(crate) fn cloned_members(&self) -> Vec<Request> {
        self.members.clone()
    }
}
