//! Profile directory operations: lookup, owner-only editing, and mentor
//! discovery with per-mentor stats.

use std::sync::Arc;

use futures::future::join_all;

use crate::auth::AuthContext;
use crate::cache::ProfileCache;
use crate::directory::types::{MentorSummary, Profile, ProfileUpdate, Role};
use crate::error::Result;
use crate::feedback::mean_rating;
use crate::scheduling::SessionStatus;
use crate::store::Store;

/// Manages profiles over the store, with a read-through cache on lookups.
pub struct ProfileManager {
    store: Arc<dyn Store>,
    cache: ProfileCache,
}

impl ProfileManager {
    /// Create a new profile manager.
    pub fn new(store: Arc<dyn Store>, cache: ProfileCache) -> Self {
        Self { store, cache }
    }

    /// Get a profile by id, through the cache.
    pub async fn get(&self, id: &str) -> Result<Option<Profile>> {
        if let Some(profile) = self.cache.get(id).await {
            return Ok(Some(profile));
        }

        let profile = self.store.get_profile(id).await?;
        if let Some(ref profile) = profile {
            self.cache.put(profile.clone()).await;
        }
        Ok(profile)
    }

    /// Update the caller's own profile.
    ///
    /// Profiles are mutated only by their owner, so the target id is taken
    /// from the caller's context rather than a parameter.
    pub async fn update(&self, ctx: &AuthContext, update: ProfileUpdate) -> Result<Profile> {
        let profile = self.store.update_profile(&ctx.user_id, update).await?;
        self.cache.invalidate(&ctx.user_id).await;

        tracing::info!("Updated profile {}", ctx.user_id);
        Ok(profile)
    }

    /// List every mentor profile.
    pub async fn list_mentors(&self) -> Result<Vec<Profile>> {
        self.store.list_profiles(Some(Role::Mentor)).await
    }

    /// Find mentors matching a search term, annotated with completed-session
    /// count and mean rating.
    ///
    /// Stats are computed for every mentor and then filtered, matching the
    /// product's discovery listing; the term matches name, department, or any
    /// expertise area, case-insensitively, and a blank term matches all.
    pub async fn search_mentors(&self, term: &str) -> Result<Vec<MentorSummary>> {
        let mentors = self.list_mentors().await?;

        let summaries = join_all(mentors.into_iter().map(|m| self.mentor_summary(m))).await;
        let summaries: Vec<MentorSummary> = summaries.into_iter().collect::<Result<_>>()?;

        Ok(summaries
            .into_iter()
            .filter(|s| s.matches(term))
            .collect())
    }

    /// Annotate one mentor with completed-session stats.
    async fn mentor_summary(&self, profile: Profile) -> Result<MentorSummary> {
        let sessions = self.store.sessions_for_mentor(&profile.id).await?;
        let completed_ids: Vec<String> = sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .map(|s| s.id.clone())
            .collect();

        let feedback = self.store.feedback_for_sessions(&completed_ids).await?;
        let average_rating = mean_rating(feedback.iter().map(|f| f.rating));

        Ok(MentorSummary {
            profile,
            session_count: completed_ids.len(),
            average_rating,
        })
    }
}
