//! Best-effort notification fan-out.
//!
//! Callers hand finished notifications to the outbox and move on; delivery
//! (a store write) happens with bounded retry, and a notification that still
//! fails is logged and dropped. Nothing here ever fails the triggering
//! operation: a booking succeeds whether or not its notifications land.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};

use crate::config::NotificationConfig;
use crate::metrics::get_metrics;
use crate::notifications::types::{DeliveryStats, Notification};
use crate::store::Store;

/// Delay between delivery attempts.
const RETRY_DELAY_MS: u64 = 50;

/// Notification outbox with bounded-retry delivery.
pub struct Outbox {
    store: Arc<dyn Store>,
    /// Delivery attempts beyond the first.
    retry_count: usize,
    /// Delivery statistics.
    stats: RwLock<DeliveryStats>,
    /// Queue sender for async processing.
    queue_tx: Option<mpsc::UnboundedSender<Notification>>,
}

impl Outbox {
    /// Create an outbox that delivers inline at enqueue time.
    pub fn new(store: Arc<dyn Store>, config: &NotificationConfig) -> Self {
        Self {
            store,
            retry_count: config.retry_count,
            stats: RwLock::new(DeliveryStats::default()),
            queue_tx: None,
        }
    }

    /// Create an outbox with async processing.
    ///
    /// Enqueued notifications are pushed onto the returned channel; drive the
    /// receiver with [`Outbox::process`] on a spawned task.
    pub fn with_async_processing(
        store: Arc<dyn Store>,
        config: &NotificationConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut outbox = Self::new(store, config);
        outbox.queue_tx = Some(tx);
        (outbox, rx)
    }

    /// Hand a notification to the outbox. Never fails the caller.
    pub async fn enqueue(&self, notification: Notification) {
        {
            let mut stats = self.stats.write().await;
            stats.enqueued += 1;
        }

        if let Some(tx) = &self.queue_tx {
            if tx.send(notification.clone()).is_ok() {
                debug!("Queued {} notification for {}", notification.kind, notification.user_id);
                return;
            }
        }

        self.deliver(notification).await;
    }

    /// Drain the async-processing queue until all senders are dropped.
    pub async fn process(&self, mut rx: mpsc::UnboundedReceiver<Notification>) {
        while let Some(notification) = rx.recv().await {
            self.deliver(notification).await;
        }
    }

    /// Write a notification to the store with bounded retry.
    async fn deliver(&self, notification: Notification) {
        let metrics = get_metrics();

        for attempt in 0..=self.retry_count {
            match self.store.insert_notification(notification.clone()).await {
                Ok(_) => {
                    debug!(
                        "Delivered {} notification to {}",
                        notification.kind, notification.user_id
                    );
                    metrics.notifications_delivered_total.inc();

                    let mut stats = self.stats.write().await;
                    stats.delivered += 1;
                    return;
                }
                Err(e) => {
                    warn!(
                        "Notification write failed (attempt {}/{}): {}",
                        attempt + 1,
                        self.retry_count + 1,
                        e
                    );

                    if attempt < self.retry_count {
                        let mut stats = self.stats.write().await;
                        stats.retries += 1;
                        drop(stats);
                        tokio::time::sleep(std::time::Duration::from_millis(RETRY_DELAY_MS)).await;
                    }
                }
            }
        }

        warn!(
            "Dropping {} notification for {} after {} attempts",
            notification.kind,
            notification.user_id,
            self.retry_count + 1
        );
        metrics.notifications_failed_total.inc();

        let mut stats = self.stats.write().await;
        stats.failed += 1;
    }

    /// Current delivery statistics.
    pub async fn stats(&self) -> DeliveryStats {
        self.stats.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::types::NotificationKind;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_inline_delivery_writes_to_store() {
        let store = Arc::new(MemoryStore::new());
        let outbox = Outbox::new(store.clone(), &NotificationConfig::default());

        outbox
            .enqueue(Notification::new(
                "user-1",
                NotificationKind::SessionScheduled,
                "A session was booked",
            ))
            .await;

        let feed = store.notifications_for_user("user-1", 20).await.unwrap();
        assert_eq!(feed.len(), 1);

        let stats = outbox.stats().await;
        assert_eq!(stats.enqueued, 1);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn test_async_processing_drains_queue() {
        let store = Arc::new(MemoryStore::new());
        let (outbox, rx) = Outbox::with_async_processing(store.clone(), &NotificationConfig::default());
        let outbox = Arc::new(outbox);

        let drain = {
            let outbox = outbox.clone();
            tokio::spawn(async move { outbox.process(rx).await })
        };

        for i in 0..3 {
            outbox
                .enqueue(
                    Notification::new(
                        "user-1",
                        NotificationKind::SessionScheduled,
                        format!("message {i}"),
                    )
                    .with_session("session-1"),
                )
                .await;
        }

        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while outbox.stats().await.delivered < 3 {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("queued notifications should drain");

        drain.abort();
        let feed = store.notifications_for_user("user-1", 20).await.unwrap();
        assert_eq!(feed.len(), 3);
        assert_eq!(outbox.stats().await.failed, 0);
    }
}
