use std::sync::Arc;

use jiff::SignedDuration;
use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{Level, debug, info, instrument};

use crate::{
    cost::allocate,
    error::PoolingError,
    events::{EventBus, LifecycleEvent, PoolEvent},
    params::{DelayBudget, PoolingParams},
    pool::{Pool, PoolId, PoolMetrics},
    registry::{MembershipUpdate, PoolRegistry},
    request::{Request, RequestId},
    route::optimize,
    scoring::score,
};

/// Engine shared between concurrent callers. The mutex serializes every
/// intake and removal, so no caller ever sees a pool mid-update.
pub type SharedPoolingEngine = Arc<Mutex<PoolingEngine>>;

/// Recomputes every derived field of a pool from its members.
///
/// Pure: the same members always produce the same metrics.
pub fn recompute(members: &[Request], params: &PoolingParams) -> PoolMetrics {
    let route = optimize(members);
    let allocation = allocate(&route, members, params);

    PoolMetrics {
        route,
        total_distance: allocation.total_distance,
        estimated_time: allocation.estimated_time,
        cost_per_customer: allocation.cost_per_customer,
        savings: allocation.savings,
    }
}

/// Why a pool was not offered to a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    Full,
    Delay {
        additional: SignedDuration,
        budget: SignedDuration,
    },
    Score(f64),
    Cost {
        current: f64,
        projected: f64,
    },
}

#[derive(Serialize, JsonSchema, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolingStatistics {
    pub requests_received: usize,
    pub joins: usize,
    pub pools_created: usize,
    pub removals: usize,
    pub pools_deleted: usize,
    pub active_pools: usize,
    pub active_requests: usize,
}

/// Pool assignment engine.
///
/// Requests are matched first-fit: pools are tried in registry insertion
/// order and the first one passing every filter is joined, even if a later
/// pool would score higher.
pub struct PoolingEngine {
    params: PoolingParams,
    registry: PoolRegistry,
    events: EventBus,
    statistics: PoolingStatistics,
}

impl Default for PoolingEngine {
    fn default() -> Self {
        Self::new(PoolingParams::default())
    }
}

impl PoolingEngine {
    pub fn new(params: PoolingParams) -> Self {
        PoolingEngine {
            params,
            registry: PoolRegistry::default(),
            events: EventBus::default(),
            statistics: PoolingStatistics::default(),
        }
    }

    pub fn into_shared(self) -> SharedPoolingEngine {
        Arc::new(Mutex::new(self))
    }

    pub fn params(&self) -> &PoolingParams {
        &self.params
    }

    /// Opens a new bounded queue receiving every subsequent [`PoolEvent`].
    pub fn subscribe(&mut self) -> mpsc::Receiver<PoolEvent> {
        self.events.subscribe(self.params.event_channel_capacity)
    }

    pub fn handle(&mut self, event: LifecycleEvent) -> Result<PoolId, PoolingError> {
        match event {
            LifecycleEvent::RequestCreated(request) => self.add_request(request),
            LifecycleEvent::RequestCancelled { request_id } => self.cancel_request(&request_id),
        }
    }

    /// Places `request` in the first compatible pool, or in a new one.
    #[instrument(skip_all, level = Level::DEBUG, fields(request_id = %request.id()))]
    pub fn add_request(&mut self, request: Request) -> Result<PoolId, PoolingError> {
        if self.registry.pool_of(request.id()).is_some() {
            return Err(PoolingError::DuplicateRequest(request.id().clone()));
        }

        self.statistics.requests_received += 1;

        let candidate = self.registry.iter().find_map(|pool| {
            match self.evaluate(pool, &request) {
                Ok(()) => Some(pool.id()),
                Err(rejection) => {
                    debug!(pool_id = %pool.id(), ?rejection, "Pool rejected");
                    None
                }
            }
        });

        let pool = match candidate {
            Some(pool_id) => self.join(pool_id, request)?,
            None => self.create(request),
        };

        let pool_id = pool.id();
        self.events.publish(PoolEvent::PoolUpdated(pool));

        Ok(pool_id)
    }

    /// Removes `request_id` from its pool. Unknown ids are a no-op.
    ///
    /// Returns the pool the request belonged to.
    #[instrument(skip(self), level = Level::DEBUG)]
    pub fn remove_request(&mut self, request_id: &RequestId) -> Option<PoolId> {
        let pool_id = self.registry.pool_of(request_id)?;
        let members: Vec<Request> = self
            .registry
            .get(pool_id)?
            .members()
            .iter()
            .filter(|member| member.id() != request_id)
            .cloned()
            .collect();

        let params = &self.params;
        let event = match self
            .registry
            .set_membership(pool_id, members, |members| recompute(members, params))
        {
            Ok(MembershipUpdate::Updated(pool)) => {
                info!(%pool_id, %request_id, members = pool.member_count(), "Request left pool");
                PoolEvent::PoolUpdated(pool.clone())
            }
            Ok(MembershipUpdate::Deleted(_)) => {
                info!(%pool_id, %request_id, "Last request left, pool deleted");
                self.statistics.pools_deleted += 1;
                PoolEvent::PoolDeleted {
                    pool_id,
                    request_id: request_id.clone(),
                }
            }
            Err(_) => return None,
        };

        self.statistics.removals += 1;
        self.events.publish(event);

        Some(pool_id)
    }

    /// Strict variant of [`Self::remove_request`] for cancellations, which
    /// must report requests that are not pooled.
    pub fn cancel_request(&mut self, request_id: &RequestId) -> Result<PoolId, PoolingError> {
        self.remove_request(request_id)
            .ok_or_else(|| PoolingError::RequestNotFound(request_id.clone()))
    }

    pub fn get_pool(&self, pool_id: PoolId) -> Result<&Pool, PoolingError> {
        self.registry
            .get(pool_id)
            .ok_or(PoolingError::PoolNotFound(pool_id))
    }

    pub fn list_active_pools(&self) -> Vec<&Pool> {
        self.registry.iter().collect()
    }

    pub fn pool_of(&self, request_id: &RequestId) -> Option<PoolId> {
        self.registry.pool_of(request_id)
    }

    pub fn statistics(&self) -> PoolingStatistics {
        PoolingStatistics {
            active_pools: self.registry.len(),
            active_requests: self.registry.request_count(),
            ..self.statistics
        }
    }

    /// Runs the intake filters in order: capacity, delay, score, cost.
    pub fn evaluate(&self, pool: &Pool, candidate: &Request) -> Result<(), Rejection> {
        let params = &self.params;

        if pool.member_count() >= params.max_pool_size {
            return Err(Rejection::Full);
        }

        let additional = params.additional_delay();
        let budget = self.delay_budget(pool, candidate);
        if additional > budget {
            return Err(Rejection::Delay { additional, budget });
        }

        let compatibility = score(pool.members(), candidate, params).unwrap_or(0.0);
        if compatibility < params.compatibility_threshold {
            return Err(Rejection::Score(compatibility));
        }

        let mut members = pool.members().to_vec();
        members.push(candidate.clone());
        let projected = recompute(&members, params).cost_per_customer;
        let current = pool.cost_per_customer();
        if projected > current * params.cost_increase_tolerance {
            return Err(Rejection::Cost { current, projected });
        }

        Ok(())
    }

    fn delay_budget(&self, pool: &Pool, candidate: &Request) -> SignedDuration {
        match self.params.delay_budget {
            DelayBudget::Fixed(budget) => budget,
            DelayBudget::RequestMaxWait => pool
                .members()
                .iter()
                .map(Request::max_wait)
                .fold(candidate.max_wait(), SignedDuration::min),
        }
    }

    fn join(&mut self, pool_id: PoolId, request: Request) -> Result<Pool, PoolingError> {
        let pool = self.get_pool(pool_id)?;
        let mut members = pool.cloned_members();
        let request_id = request.id().clone();
        members.push(request);

        let params = &self.params;
        match self
            .registry
            .set_membership(pool_id, members, |members| recompute(members, params))?
        {
            MembershipUpdate::Updated(pool) => {
                info!(
                    %pool_id,
                    %request_id,
                    members = pool.member_count(),
                    cost_per_customer = pool.cost_per_customer(),
                    savings = pool.savings(),
                    "Request joined pool"
                );
                self.statistics.joins += 1;
                Ok(pool.clone())
            }
            MembershipUpdate::Deleted(_) => Err(PoolingError::PoolNotFound(pool_id)),
        }
    }

    fn create(&mut self, request: Request) -> Pool {
        let metrics = recompute(std::slice::from_ref(&request), &self.params);
        let pool_id = PoolId::new_v4();
        info!(%pool_id, request_id = %request.id(), "Created pool");

        self.statistics.pools_created += 1;
        self.registry
            .insert(Pool::new(pool_id, vec![request], metrics))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_request, offset_request};

    use super::*;

    fn mumbai(id: &str, created_after_mins: i64) -> Request {
        create_request(id, (19.0760, 72.8777), (19.0896, 72.8656), created_after_mins)
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let params = PoolingParams::default();
        let a = mumbai("a", 0);
        let b = offset_request("b", &a, 0.002, 1);
        let members = vec![a, b];

        assert_eq!(recompute(&members, &params), recompute(&members, &params));
    }

    #[test]
    fn test_evaluate_rejects_full_pool() {
        let params = PoolingParams {
            max_pool_size: 1,
            ..PoolingParams::default()
        };
        let mut engine = PoolingEngine::new(params);
        let pool_id = engine.add_request(mumbai("a", 0)).unwrap();

        let pool = engine.get_pool(pool_id).unwrap();
        assert_eq!(engine.evaluate(pool, &mumbai("b", 1)), Err(Rejection::Full));
    }

    #[test]
    fn test_evaluate_rejects_fixed_delay_budget() {
        let params = PoolingParams {
            delay_budget: DelayBudget::Fixed(SignedDuration::from_mins(15)),
            ..PoolingParams::default()
        };
        let mut engine = PoolingEngine::new(params);
        let pool_id = engine.add_request(mumbai("a", 0)).unwrap();

        let pool = engine.get_pool(pool_id).unwrap();
        assert_eq!(
            engine.evaluate(pool, &mumbai("b", 1)),
            Err(Rejection::Delay {
                additional: SignedDuration::from_mins(20),
                budget: SignedDuration::from_mins(15),
            })
        );
    }

    #[test]
    fn test_evaluate_rejects_short_max_wait() {
        let mut engine = PoolingEngine::default();
        let pool_id = engine.add_request(mumbai("a", 0)).unwrap();

        let mut impatient = crate::request::RequestBuilder::default();
        impatient
            .set_id("b")
            .set_pickup(mumbai("a", 0).pickup().clone())
            .set_dropoff(mumbai("a", 0).dropoff().clone())
            .set_max_wait(SignedDuration::from_mins(10));
        let impatient = impatient.build().unwrap();

        let pool = engine.get_pool(pool_id).unwrap();
        assert!(matches!(
            engine.evaluate(pool, &impatient),
            Err(Rejection::Delay { .. })
        ));
    }

    #[test]
    fn test_evaluate_rejects_low_score() {
        let mut engine = PoolingEngine::default();
        let pool_id = engine.add_request(mumbai("a", 0)).unwrap();
        let reversed = create_request("b", (19.0896, 72.8656), (19.0760, 72.8777), 1);

        let pool = engine.get_pool(pool_id).unwrap();
        assert!(matches!(
            engine.evaluate(pool, &reversed),
            Err(Rejection::Score(s)) if s < 0.70
        ));
    }

    #[test]
    fn test_evaluate_rejects_cost_increase() {
        // Same direction and close enough to score, but the detour makes the
        // shared trip pricier per head than the current solo trip.
        let params = PoolingParams {
            compatibility_threshold: 0.0,
            base_fare: 0.0,
            ..PoolingParams::default()
        };
        let mut engine = PoolingEngine::new(params);
        let pool_id = engine
            .add_request(create_request("a", (19.00, 72.80), (19.01, 72.80), 0))
            .unwrap();
        let detour = create_request("b", (19.00, 72.84), (19.01, 72.84), 1);

        let pool = engine.get_pool(pool_id).unwrap();
        assert!(matches!(
            engine.evaluate(pool, &detour),
            Err(Rejection::Cost { current, projected }) if projected > current * 1.10
        ));
    }

    #[test]
    fn test_duplicate_request() {
        let mut engine = PoolingEngine::default();
        engine.add_request(mumbai("a", 0)).unwrap();

        assert_eq!(
            engine.add_request(mumbai("a", 1)),
            Err(PoolingError::DuplicateRequest(RequestId::from("a")))
        );
        assert_eq!(engine.statistics().requests_received, 1);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut engine = PoolingEngine::default();
        engine.add_request(mumbai("a", 0)).unwrap();

        assert_eq!(engine.remove_request(&RequestId::from("missing")), None);
        assert_eq!(engine.list_active_pools().len(), 1);
        assert_eq!(engine.statistics().removals, 0);
    }

    #[test]
    fn test_cancel_unknown_is_not_found() {
        let mut engine = PoolingEngine::default();

        assert_eq!(
            engine.cancel_request(&RequestId::from("missing")),
            Err(PoolingError::RequestNotFound(RequestId::from("missing")))
        );
    }

    #[test]
    fn test_handle_dispatches_lifecycle_events() {
        let mut engine = PoolingEngine::default();
        let pool_id = engine
            .handle(LifecycleEvent::RequestCreated(mumbai("a", 0)))
            .unwrap();

        let cancelled = engine
            .handle(LifecycleEvent::RequestCancelled {
                request_id: RequestId::from("a"),
            })
            .unwrap();

        assert_eq!(cancelled, pool_id);
        assert!(engine.get_pool(pool_id).is_err());
    }

    #[test]
    fn test_shrink_recomputes_metrics() {
        let mut engine = PoolingEngine::default();
        let a = mumbai("a", 0);
        let b = offset_request("b", &a, 0.002, 1);
        let pool_id = engine.add_request(a.clone()).unwrap();
        assert_eq!(engine.add_request(b).unwrap(), pool_id);

        engine.remove_request(&RequestId::from("b"));

        let pool = engine.get_pool(pool_id).unwrap();
        assert_eq!(pool.member_count(), 1);
        assert_eq!(pool.metrics(), &recompute(&[a], engine.params()));
        assert_eq!(pool.savings(), 0.0);
    }

    #[test]
    fn test_statistics() {
        let mut engine = PoolingEngine::default();
        let a = mumbai("a", 0);
        let b = offset_request("b", &a, 0.002, 1);
        let far = create_request("far", (28.6139, 77.2090), (28.7041, 77.1025), 2);

        engine.add_request(a).unwrap();
        engine.add_request(b).unwrap();
        engine.add_request(far).unwrap();
        engine.remove_request(&RequestId::from("far"));

        assert_eq!(
            engine.statistics(),
            PoolingStatistics {
                requests_received: 3,
                joins: 1,
                pools_created: 2,
                removals: 1,
                pools_deleted: 1,
                active_pools: 1,
                active_requests: 2,
            }
        );
    }
}
