//! In-memory store implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use crate::auth::Credential;
use crate::directory::{Profile, ProfileUpdate, Role};
use crate::error::{Result, StoreError};
use crate::feedback::Feedback;
use crate::notifications::Notification;
use crate::scheduling::{AvailabilityWindow, Session};
use crate::store::Store;

/// Buffered notifications per subscriber before lagging receivers drop events.
const SUBSCRIBER_CAPACITY: usize = 64;

// ============================================================================
// Internal Data Structure
// ============================================================================

/// Internal data storage structure.
#[derive(Debug, Default)]
struct TandemData {
    /// Profiles indexed by id.
    profiles: HashMap<String, Profile>,
    /// Credentials indexed by lowercase email.
    credentials: HashMap<String, Credential>,
    /// Availability windows indexed by id.
    windows: HashMap<String, AvailabilityWindow>,
    /// Sessions indexed by id.
    sessions: HashMap<String, Session>,
    /// Feedback rows indexed by id.
    feedback: HashMap<String, Feedback>,
    /// Notifications indexed by id.
    notifications: HashMap<String, Notification>,
    /// Index: mentor id -> window ids.
    windows_by_mentor: HashMap<String, Vec<String>>,
    /// Index: mentor id -> session ids.
    sessions_by_mentor: HashMap<String, Vec<String>>,
}

impl TandemData {
    fn index_window(&mut self, window: &AvailabilityWindow) {
        self.windows_by_mentor
            .entry(window.mentor_id.clone())
            .or_default()
            .push(window.id.clone());
    }

    fn unindex_window(&mut self, mentor_id: &str, id: &str) {
        if let Some(ids) = self.windows_by_mentor.get_mut(mentor_id) {
            ids.retain(|w| w != id);
        }
    }

    fn index_session(&mut self, session: &Session) {
        self.sessions_by_mentor
            .entry(session.mentor_id.clone())
            .or_default()
            .push(session.id.clone());
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory store backed by HashMaps behind a single `RwLock`.
///
/// The per-user notification channel plays the role of the backing service's
/// realtime change subscription: every inserted notification is published to
/// the recipient's channel if anyone is listening.
pub struct MemoryStore {
    /// All data protected by a single RwLock for consistent access.
    data: RwLock<TandemData>,
    /// Notification subscribers indexed by recipient id.
    subscribers: RwLock<HashMap<String, broadcast::Sender<Notification>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(TandemData::default()),
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    /// Publish a notification to the recipient's channel, if one exists.
    async fn publish(&self, notification: &Notification) {
        let subscribers = self.subscribers.read().await;
        if let Some(sender) = subscribers.get(&notification.user_id) {
            // Send fails only when every receiver is gone; nothing to do then.
            let _ = sender.send(notification.clone());
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    // ========================================================================
    // Profile Operations
    // ========================================================================

    async fn insert_profile(&self, profile: Profile) -> Result<Profile> {
        let mut data = self.data.write().await;

        if data.profiles.contains_key(&profile.id) {
            return Err(StoreError::Conflict(format!("profile {} already exists", profile.id)).into());
        }

        data.profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn get_profile(&self, id: &str) -> Result<Option<Profile>> {
        let data = self.data.read().await;
        Ok(data.profiles.get(id).cloned())
    }

    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<Profile> {
        let mut data = self.data.write().await;

        let profile = data
            .profiles
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("profile {id}")))?;

        update.apply_to(profile);
        Ok(profile.clone())
    }

    async fn list_profiles(&self, role: Option<Role>) -> Result<Vec<Profile>> {
        let data = self.data.read().await;
        Ok(data
            .profiles
            .values()
            .filter(|p| role.map_or(true, |r| p.role == r))
            .cloned()
            .collect())
    }

    // ========================================================================
    // Credential Operations
    // ========================================================================

    async fn insert_credential(&self, credential: Credential) -> Result<()> {
        let mut data = self.data.write().await;
        let key = credential.email.to_lowercase();

        if data.credentials.contains_key(&key) {
            return Err(StoreError::Conflict(format!("credential for {key} already exists")).into());
        }

        data.credentials.insert(key, credential);
        Ok(())
    }

    async fn find_credential(&self, email: &str) -> Result<Option<Credential>> {
        let data = self.data.read().await;
        Ok(data.credentials.get(&email.to_lowercase()).cloned())
    }

    // ========================================================================
    // Availability Operations
    // ========================================================================

    async fn insert_window(&self, window: AvailabilityWindow) -> Result<AvailabilityWindow> {
        let mut data = self.data.write().await;
        data.index_window(&window);
        data.windows.insert(window.id.clone(), window.clone());
        Ok(window)
    }

    async fn delete_window(&self, mentor_id: &str, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;

        let owned = data
            .windows
            .get(id)
            .is_some_and(|w| w.mentor_id == mentor_id);
        if !owned {
            return Ok(false);
        }

        data.windows.remove(id);
        data.unindex_window(mentor_id, id);
        Ok(true)
    }

    async fn windows_for_mentor(&self, mentor_id: &str) -> Result<Vec<AvailabilityWindow>> {
        let data = self.data.read().await;

        let mut windows: Vec<AvailabilityWindow> = data
            .windows_by_mentor
            .get(mentor_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| data.windows.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        windows.sort_by(|a, b| (a.day_of_week, a.start).cmp(&(b.day_of_week, b.start)));
        Ok(windows)
    }

    // ========================================================================
    // Session Operations
    // ========================================================================

    async fn insert_session(&self, session: Session) -> Result<Session> {
        let mut data = self.data.write().await;
        data.index_session(&session);
        data.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>> {
        let data = self.data.read().await;
        Ok(data.sessions.get(id).cloned())
    }

    async fn update_session(&self, session: Session) -> Result<Session> {
        let mut data = self.data.write().await;

        if !data.sessions.contains_key(&session.id) {
            return Err(StoreError::NotFound(format!("session {}", session.id)).into());
        }

        data.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn sessions_for_participant(&self, user_id: &str) -> Result<Vec<Session>> {
        let data = self.data.read().await;

        let mut sessions: Vec<Session> = data
            .sessions
            .values()
            .filter(|s| s.involves(user_id))
            .cloned()
            .collect();

        sessions.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        Ok(sessions)
    }

    async fn sessions_for_mentor(&self, mentor_id: &str) -> Result<Vec<Session>> {
        let data = self.data.read().await;
        Ok(data
            .sessions_by_mentor
            .get(mentor_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| data.sessions.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        let data = self.data.read().await;
        Ok(data.sessions.values().cloned().collect())
    }

    // ========================================================================
    // Feedback Operations
    // ========================================================================

    async fn insert_feedback(&self, feedback: Feedback) -> Result<Feedback> {
        let mut data = self.data.write().await;
        data.feedback.insert(feedback.id.clone(), feedback.clone());
        Ok(feedback)
    }

    async fn feedback_for_sessions(&self, session_ids: &[String]) -> Result<Vec<Feedback>> {
        let data = self.data.read().await;
        Ok(data
            .feedback
            .values()
            .filter(|f| session_ids.contains(&f.session_id))
            .cloned()
            .collect())
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>> {
        let data = self.data.read().await;
        Ok(data.feedback.values().cloned().collect())
    }

    // ========================================================================
    // Notification Operations
    // ========================================================================

    async fn insert_notification(&self, notification: Notification) -> Result<Notification> {
        {
            let mut data = self.data.write().await;
            data.notifications
                .insert(notification.id.clone(), notification.clone());
        }

        self.publish(&notification).await;
        Ok(notification)
    }

    async fn notifications_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<Notification>> {
        let data = self.data.read().await;

        let mut notifications: Vec<Notification> = data
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();

        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications.truncate(limit);
        Ok(notifications)
    }

    async fn mark_notification_read(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;

        match data.notifications.get_mut(id) {
            Some(n) if n.user_id == user_id => {
                n.is_read = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        let mut data = self.data.write().await;

        let mut changed = 0;
        for notification in data.notifications.values_mut() {
            if notification.user_id == user_id && !notification.is_read {
                notification.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn subscribe_notifications(&self, user_id: &str) -> broadcast::Receiver<Notification> {
        let mut subscribers = self.subscribers.write().await;
        subscribers
            .entry(user_id.to_string())
            .or_insert_with(|| broadcast::channel(SUBSCRIBER_CAPACITY).0)
            .subscribe()
    }
}
