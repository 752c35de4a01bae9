use fxhash::FxHashMap;

use crate::{
    error::PoolingError,
    pool::{Pool, PoolId, PoolMetrics},
    request::{Request, RequestId},
};

/// Result of replacing a pool's membership.
#[derive(Debug)]
pub enum MembershipUpdate<'a> {
    Updated(&'a Pool),
    /// The new membership was empty and the pool was dropped.
    Deleted(Pool),
}

/// Authoritative store of active pools.
///
/// Pools are iterated in insertion order, which makes intake first-fit.
#[derive(Default)]
pub struct PoolRegistry {
    pools: FxHashMap<PoolId, Pool>,
    order: Vec<PoolId>,
    request_index: FxHashMap<RequestId, PoolId>,
}

impl PoolRegistry {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn request_count(&self) -> usize {
        self.request_index.len()
    }

    pub fn get(&self, pool_id: PoolId) -> Option<&Pool> {
        self.pools.get(&pool_id)
    }

    pub fn pool_of(&self, request_id: &RequestId) -> Option<PoolId> {
        self.request_index.get(request_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pool> {
        self.order.iter().filter_map(|pool_id| self.pools.get(pool_id))
    }

    pub fn insert(&mut self, pool: Pool) -> &Pool {
        let pool_id = pool.id();
        for member in pool.members() {
            self.request_index.insert(member.id().clone(), pool_id);
        }

        self.order.push(pool_id);
        self.pools.entry(pool_id).or_insert(pool)
    }

    /// Replaces the members of `pool_id`, recomputing its metrics with
    /// `recompute`. An empty membership deletes the pool instead.
    pub fn set_membership<F>(
        &mut self,
        pool_id: PoolId,
        members: Vec<Request>,
        recompute: F,
    ) -> Result<MembershipUpdate<'_>, PoolingError>
    where
        F: FnOnce(&[Request]) -> PoolMetrics,
    {
        if !self.pools.contains_key(&pool_id) {
            return Err(PoolingError::PoolNotFound(pool_id));
        }

        if members.is_empty() {
            return self
                .delete(pool_id)
                .map(MembershipUpdate::Deleted)
                .ok_or(PoolingError::PoolNotFound(pool_id));
        }

        let pool = self
            .pools
            .get_mut(&pool_id)
            .ok_or(PoolingError::PoolNotFound(pool_id))?;

        for previous in pool.members() {
            if !members.iter().any(|member| member.id() == previous.id()) {
                self.request_index.remove(previous.id());
            }
        }
        for member in &members {
            self.request_index.insert(member.id().clone(), pool_id);
        }

        let metrics = recompute(&members);
        pool.set_membership(members, metrics);

        Ok(MembershipUpdate::Updated(pool))
    }

    fn delete(&mut self, pool_id: PoolId) -> Option<Pool> {
        let pool = self.pools.remove(&pool_id)?;
        self.order.retain(|id| *id != pool_id);
        for member in pool.members() {
            self.request_index.remove(member.id());
        }

        Some(pool)
    }
}
