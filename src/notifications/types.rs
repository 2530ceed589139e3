//! Notification types and delivery bookkeeping.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Notification Types
// ============================================================================

/// Kind tag carried by every notification.
///
/// `SessionReminder` and `SessionCancelled` are part of the stored contract
/// but nothing currently produces them; booking and feedback are the only
/// fan-out sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Upcoming-session reminder.
    SessionReminder,
    /// A session was booked.
    SessionScheduled,
    /// A session was called off.
    SessionCancelled,
    /// Feedback was left on a session.
    FeedbackReceived,
}

impl NotificationKind {
    /// Parse a kind from its stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "session_reminder" => Some(Self::SessionReminder),
            "session_scheduled" => Some(Self::SessionScheduled),
            "session_cancelled" => Some(Self::SessionCancelled),
            "feedback_received" => Some(Self::FeedbackReceived),
            _ => None,
        }
    }

    /// Get the kind as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionReminder => "session_reminder",
            Self::SessionScheduled => "session_scheduled",
            Self::SessionCancelled => "session_cancelled",
            Self::FeedbackReceived => "feedback_received",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notification addressed to one user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Notification {
    /// Unique identifier for the notification.
    pub id: String,
    /// Recipient user.
    pub user_id: String,
    /// The session this refers to, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Kind tag.
    pub kind: NotificationKind,
    /// Natural-language message shown to the recipient.
    pub message: String,
    /// Whether the recipient has read it.
    #[serde(default)]
    pub is_read: bool,
    /// When the notification was written.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification.
    pub fn new(
        user_id: impl Into<String>,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            session_id: None,
            kind,
            message: message.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Attach the session this notification refers to.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

// ============================================================================
// Delivery Bookkeeping
// ============================================================================

/// Outbox delivery statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryStats {
    /// Notifications handed to the outbox.
    pub enqueued: u64,
    /// Successful store writes.
    pub delivered: u64,
    /// Notifications dropped after exhausting retries.
    pub failed: u64,
    /// Retry attempts beyond each first try.
    pub retries: u64,
}
