//! Storage abstraction for Tandem entities.
//!
//! The external backing store is a generic tabular service; this module puts
//! its five verbs (filtered select, insert, filtered update, filtered delete,
//! per-recipient change subscription) behind typed repository operations so
//! the service layer never depends on the store's transport or schema
//! mechanics, and tests run against [`MemoryStore`] without a live backend.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::auth::Credential;
use crate::directory::{Profile, ProfileUpdate, Role};
use crate::error::Result;
use crate::feedback::Feedback;
use crate::notifications::Notification;
use crate::scheduling::{AvailabilityWindow, Session};

/// Trait for Tandem storage backends.
#[async_trait]
pub trait Store: Send + Sync {
    // ========================================================================
    // Profile Operations
    // ========================================================================

    /// Insert a new profile.
    async fn insert_profile(&self, profile: Profile) -> Result<Profile>;

    /// Get a profile by id.
    async fn get_profile(&self, id: &str) -> Result<Option<Profile>>;

    /// Apply an update to a profile.
    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<Profile>;

    /// List profiles, optionally filtered by role.
    async fn list_profiles(&self, role: Option<Role>) -> Result<Vec<Profile>>;

    // ========================================================================
    // Credential Operations
    // ========================================================================

    /// Insert a sign-in credential.
    async fn insert_credential(&self, credential: Credential) -> Result<()>;

    /// Find a credential by email (case-insensitive).
    async fn find_credential(&self, email: &str) -> Result<Option<Credential>>;

    // ========================================================================
    // Availability Operations
    // ========================================================================

    /// Insert an availability window.
    async fn insert_window(&self, window: AvailabilityWindow) -> Result<AvailabilityWindow>;

    /// Delete a mentor's window by id. Returns whether a row was removed.
    async fn delete_window(&self, mentor_id: &str, id: &str) -> Result<bool>;

    /// List a mentor's windows ordered by (day of week, start time).
    async fn windows_for_mentor(&self, mentor_id: &str) -> Result<Vec<AvailabilityWindow>>;

    // ========================================================================
    // Session Operations
    // ========================================================================

    /// Insert a new session.
    async fn insert_session(&self, session: Session) -> Result<Session>;

    /// Get a session by id.
    async fn get_session(&self, id: &str) -> Result<Option<Session>>;

    /// Replace a session row.
    async fn update_session(&self, session: Session) -> Result<Session>;

    /// List sessions where the user is mentor or mentee, newest first.
    async fn sessions_for_participant(&self, user_id: &str) -> Result<Vec<Session>>;

    /// List a mentor's sessions.
    async fn sessions_for_mentor(&self, mentor_id: &str) -> Result<Vec<Session>>;

    /// List every session.
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    // ========================================================================
    // Feedback Operations
    // ========================================================================

    /// Insert a feedback row.
    async fn insert_feedback(&self, feedback: Feedback) -> Result<Feedback>;

    /// List feedback whose session id is in the given set (membership filter).
    async fn feedback_for_sessions(&self, session_ids: &[String]) -> Result<Vec<Feedback>>;

    /// List every feedback row.
    async fn list_feedback(&self) -> Result<Vec<Feedback>>;

    // ========================================================================
    // Notification Operations
    // ========================================================================

    /// Insert a notification and publish it to the recipient's channel.
    async fn insert_notification(&self, notification: Notification) -> Result<Notification>;

    /// List a user's notifications, newest first, up to `limit`.
    async fn notifications_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<Notification>>;

    /// Mark one of the user's notifications read. Returns whether a row changed.
    async fn mark_notification_read(&self, user_id: &str, id: &str) -> Result<bool>;

    /// Mark all of the user's unread notifications read. Returns the count.
    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;

    /// Subscribe to notifications written for a user.
    async fn subscribe_notifications(&self, user_id: &str) -> broadcast::Receiver<Notification>;
}
