//! Per-user notification feed.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::auth::AuthContext;
use crate::config::NotificationConfig;
use crate::error::Result;
use crate::notifications::types::Notification;
use crate::store::Store;

/// Read-side of notifications: the recent feed, read flags, and the live
/// subscription. All operations are scoped to the calling recipient.
pub struct NotificationFeed {
    store: Arc<dyn Store>,
    feed_limit: usize,
}

impl NotificationFeed {
    /// Create a feed over the given store.
    pub fn new(store: Arc<dyn Store>, config: &NotificationConfig) -> Self {
        Self {
            store,
            feed_limit: config.feed_limit,
        }
    }

    /// The caller's most recent notifications, newest first.
    pub async fn recent(&self, ctx: &AuthContext) -> Result<Vec<Notification>> {
        self.store
            .notifications_for_user(&ctx.user_id, self.feed_limit)
            .await
    }

    /// Unread count within the recent feed.
    pub async fn unread_count(&self, ctx: &AuthContext) -> Result<usize> {
        let recent = self.recent(ctx).await?;
        Ok(recent.iter().filter(|n| !n.is_read).count())
    }

    /// Mark one of the caller's notifications read.
    pub async fn mark_read(&self, ctx: &AuthContext, id: &str) -> Result<bool> {
        self.store.mark_notification_read(&ctx.user_id, id).await
    }

    /// Mark all of the caller's notifications read.
    pub async fn mark_all_read(&self, ctx: &AuthContext) -> Result<usize> {
        self.store.mark_all_read(&ctx.user_id).await
    }

    /// Subscribe to notifications written for the caller.
    pub async fn subscribe(&self, ctx: &AuthContext) -> broadcast::Receiver<Notification> {
        self.store.subscribe_notifications(&ctx.user_id).await
    }
}
