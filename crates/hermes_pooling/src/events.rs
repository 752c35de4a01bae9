//! Typed event interface between the engine and its collaborators.
//!
//! Inbound [`LifecycleEvent`]s come from the delivery-lifecycle service;
//! outbound [`PoolEvent`]s are fanned out to bounded subscriber queues.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;

use crate::{
    pool::{Pool, PoolId},
    request::{Request, RequestId},
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    RequestCreated(Request),
    RequestCancelled { request_id: RequestId },
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PoolEvent {
    /// A pool was created, joined or shrunk. Carries the refreshed pool.
    PoolUpdated(Pool),
    /// The last member left; `request_id` is the request whose removal
    /// emptied the pool.
    PoolDeleted {
        pool_id: PoolId,
        request_id: RequestId,
    },
}

impl PoolEvent {
    pub fn pool_id(&self) -> PoolId {
        match self {
            PoolEvent::PoolUpdated(pool) => pool.id(),
            PoolEvent::PoolDeleted { pool_id, .. } => *pool_id,
        }
    }
}

/// Fan-out of [`PoolEvent`]s to any number of bounded queues.
///
/// Publishing never blocks: an event is dropped for a subscriber whose queue
/// is full, and closed subscribers are pruned.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<mpsc::Sender<PoolEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self, capacity: usize) -> mpsc::Receiver<PoolEvent> {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        self.subscribers.push(sender);
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, event: PoolEvent) {
        self.subscribers
            .retain(|subscriber| match subscriber.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(dropped)) => {
                    warn!(pool_id = %dropped.pool_id(), "Event queue full, dropping pool event");
                    true
                }
                Err(TrySendError::Closed(_)) => false,
            });
    }
}
