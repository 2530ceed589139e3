//! Notification fan-out and per-user feeds.
//!
//! Scheduling and feedback events write a notification row per affected
//! user. Delivery is best effort: the write goes through an outbox with
//! bounded retry, failures are logged and never surfaced to the user whose
//! action triggered them, and the triggering operation's success is
//! independent of notification success.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ SessionManager / FeedbackManager                          │
//! │        │ enqueue (fire and forget)                        │
//! │        ▼                                                  │
//! │ ┌───────────────┐   retry on failure   ┌───────────────┐ │
//! │ │    Outbox     │ ───────────────────▶ │     Store     │ │
//! │ └───────────────┘                      └───────┬───────┘ │
//! │                                                │ publish  │
//! │ ┌───────────────┐    recent / mark read        ▼          │
//! │ │NotificationFeed│ ◀──────────────────  per-user channel  │
//! │ └───────────────┘                                         │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod feed;
mod outbox;
mod types;

pub use feed::NotificationFeed;
pub use outbox::Outbox;
pub use types::{DeliveryStats, Notification, NotificationKind};
