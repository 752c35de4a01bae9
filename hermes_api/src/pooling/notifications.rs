use hermes_pooling::events::PoolEvent;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::info;

/// Drains a pool event subscription, handing each event to downstream
/// notification channels. Ends when the engine is dropped.
pub fn spawn_notifier(mut events: mpsc::Receiver<PoolEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match &event {
                PoolEvent::PoolUpdated(pool) => info!(
                    pool_id = %pool.id(),
                    members = pool.member_count(),
                    cost_per_customer = pool.cost_per_customer(),
                    savings = pool.savings(),
                    "pool_updated"
                ),
                PoolEvent::PoolDeleted {
                    pool_id,
                    request_id,
                } => info!(%pool_id, %request_id, "pool_deleted"),
            }
        }

        info!("Pool event stream closed");
    })
}
