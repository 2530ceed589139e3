//! Shared fixtures for the integration tests.

use std::sync::Arc;

use tandem::{
    AnalyticsAggregator, AuthContext, Authenticator, AvailabilityManager, Config, FeedbackManager,
    MemoryStore, NewProfile, NotificationFeed, Outbox, ProfileCache, ProfileManager, Role,
    SessionManager,
};

/// A fully wired service over one in-memory store.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub auth: Authenticator,
    pub profiles: Arc<ProfileManager>,
    pub availability: AvailabilityManager,
    pub sessions: SessionManager,
    pub feedback: FeedbackManager,
    pub notifications: NotificationFeed,
    pub analytics: AnalyticsAggregator,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let cache = ProfileCache::new(&config.cache);
        let profiles = Arc::new(ProfileManager::new(store.clone(), cache));
        let outbox = Arc::new(Outbox::new(store.clone(), &config.notifications));

        Self {
            auth: Authenticator::new(store.clone(), config.auth.clone()),
            availability: AvailabilityManager::new(store.clone()),
            sessions: SessionManager::new(
                store.clone(),
                profiles.clone(),
                outbox.clone(),
                config.scheduling.clone(),
            ),
            feedback: FeedbackManager::new(store.clone(), outbox),
            notifications: NotificationFeed::new(store.clone(), &config.notifications),
            analytics: AnalyticsAggregator::new(store.clone(), config.analytics.clone()),
            profiles,
            store,
        }
    }

    /// Register a mentor and return their auth context.
    pub async fn register_mentor(&self, name: &str, expertise: &str) -> AuthContext {
        let session = self
            .auth
            .sign_up(
                &format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                "correct horse battery",
                NewProfile {
                    full_name: name.to_string(),
                    role: Role::Mentor,
                    expertise_areas: expertise.to_string(),
                    ..Default::default()
                },
            )
            .await
            .expect("mentor sign-up should succeed");

        self.auth.verify(&session.token).expect("token should verify")
    }

    /// Register a mentee and return their auth context.
    pub async fn register_mentee(&self, name: &str) -> AuthContext {
        let session = self
            .auth
            .sign_up(
                &format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                "correct horse battery",
                NewProfile {
                    full_name: name.to_string(),
                    role: Role::Mentee,
                    ..Default::default()
                },
            )
            .await
            .expect("mentee sign-up should succeed");

        self.auth.verify(&session.token).expect("token should verify")
    }
}
