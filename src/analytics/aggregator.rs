//! Dashboard aggregation over the full session, feedback, and availability
//! collections.

use std::sync::Arc;

use futures::future::join_all;

use crate::analytics::types::{utilization_percent, DashboardStats, MentorRollup, UtilizationEntry};
use crate::config::AnalyticsConfig;
use crate::directory::{Profile, Role};
use crate::error::Result;
use crate::feedback::mean_rating;
use crate::metrics::get_metrics;
use crate::scheduling::SessionStatus;
use crate::store::Store;

/// Recomputes dashboard stats from scratch on every call.
///
/// No caching and no incremental update; per-mentor reads fan out
/// concurrently and the result does not depend on their completion order.
/// The overall work is O(mentors x sessions x feedback), acceptable at the
/// modest volumes the backing store is assumed to hold.
pub struct AnalyticsAggregator {
    store: Arc<dyn Store>,
    config: AnalyticsConfig,
}

impl AnalyticsAggregator {
    /// Create a new aggregator.
    pub fn new(store: Arc<dyn Store>, config: AnalyticsConfig) -> Self {
        Self { store, config }
    }

    /// Compute the full dashboard snapshot.
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let metrics = get_metrics();
        let timer = metrics.aggregation_duration_seconds.start_timer();

        let mentors = self.store.list_profiles(Some(Role::Mentor)).await?;
        let mentees = self.store.list_profiles(Some(Role::Mentee)).await?;
        let sessions = self.store.list_sessions().await?;
        let feedback = self.store.list_feedback().await?;

        let completed_sessions = sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .count();
        let average_rating = mean_rating(feedback.iter().map(|f| f.rating));

        let rollups = join_all(mentors.iter().map(|m| self.mentor_rollup(m))).await;
        let rollups: Vec<MentorRollup> = rollups.into_iter().collect::<Result<_>>()?;

        let top_mentors = self.top_mentors(&rollups);
        let utilization = self.utilization_leaderboard(&rollups);

        metrics.profiles_count.set((mentors.len() + mentees.len()) as i64);
        metrics.sessions_count.set(sessions.len() as i64);
        metrics.dashboard_refreshes_total.inc();
        timer.observe_duration();

        Ok(DashboardStats {
            total_mentors: mentors.len(),
            total_mentees: mentees.len(),
            total_sessions: sessions.len(),
            completed_sessions,
            average_rating,
            top_mentors,
            utilization,
        })
    }

    /// Roll up one mentor's sessions, ratings, and utilization.
    async fn mentor_rollup(&self, mentor: &Profile) -> Result<MentorRollup> {
        let sessions = self.store.sessions_for_mentor(&mentor.id).await?;
        let completed_count = sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .count();

        let session_ids: Vec<String> = sessions.iter().map(|s| s.id.clone()).collect();
        let feedback = self.store.feedback_for_sessions(&session_ids).await?;
        let average_rating = mean_rating(feedback.iter().map(|f| f.rating));

        let windows = self.store.windows_for_mentor(&mentor.id).await?;

        Ok(MentorRollup {
            mentor_id: mentor.id.clone(),
            name: mentor.full_name.clone(),
            department: mentor.department.clone(),
            session_count: sessions.len(),
            completed_count,
            average_rating,
            utilization_percent: utilization_percent(
                completed_count,
                windows.len(),
                self.config.weeks_per_month,
            ),
        })
    }

    /// Best-rated mentors: zero-session mentors excluded, rating ties broken
    /// by session count.
    fn top_mentors(&self, rollups: &[MentorRollup]) -> Vec<MentorRollup> {
        let mut ranked: Vec<MentorRollup> = rollups
            .iter()
            .filter(|r| r.session_count > 0)
            .cloned()
            .collect();

        ranked.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.session_count.cmp(&a.session_count))
        });
        ranked.truncate(self.config.top_mentors);
        ranked
    }

    /// Utilization leaderboard, independent of the top-mentors filter: a
    /// mentor with zero sessions can appear here.
    fn utilization_leaderboard(&self, rollups: &[MentorRollup]) -> Vec<UtilizationEntry> {
        let mut ranked: Vec<&MentorRollup> = rollups.iter().collect();
        ranked.sort_by(|a, b| {
            b.utilization_percent
                .partial_cmp(&a.utilization_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranked
            .into_iter()
            .take(self.config.leaderboard_size)
            .map(UtilizationEntry::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Profile;
    use crate::feedback::Feedback;
    use crate::scheduling::{AvailabilityWindow, Session};
    use crate::store::MemoryStore;
    use chrono::{NaiveTime, Utc};

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    async fn add_mentor(store: &MemoryStore, name: &str) -> Profile {
        store
            .insert_profile(Profile::new(
                format!("{}@example.com", name.to_lowercase()),
                name,
                Role::Mentor,
            ))
            .await
            .unwrap()
    }

    async fn add_session(store: &MemoryStore, mentor: &Profile, completed: bool, rating: Option<u8>) {
        let mut session = Session::new(&mentor.id, "mentee-1", Utc::now(), 60);
        if completed {
            session.status = SessionStatus::Completed;
        }
        let session = store.insert_session(session).await.unwrap();

        if let Some(rating) = rating {
            store
                .insert_feedback(Feedback::new(&session.id, "mentee-1", rating))
                .await
                .unwrap();
        }
    }

    fn aggregator(store: Arc<MemoryStore>) -> AnalyticsAggregator {
        AnalyticsAggregator::new(store, AnalyticsConfig::default())
    }

    #[tokio::test]
    async fn test_totals_and_global_average() {
        let store = Arc::new(MemoryStore::new());
        let mentor = add_mentor(&store, "Ada").await;
        store
            .insert_profile(Profile::new("mary@example.com", "Mary", Role::Mentee))
            .await
            .unwrap();

        add_session(&store, &mentor, true, Some(5)).await;
        add_session(&store, &mentor, true, Some(3)).await;
        add_session(&store, &mentor, false, Some(4)).await;

        let stats = aggregator(store).dashboard().await.unwrap();
        assert_eq!(stats.total_mentors, 1);
        assert_eq!(stats.total_mentees, 1);
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.completed_sessions, 2);
        assert_eq!(stats.average_rating, 4.0);
    }

    #[tokio::test]
    async fn test_utilization_rollup() {
        let store = Arc::new(MemoryStore::new());
        let mentor = add_mentor(&store, "Ada").await;

        store
            .insert_window(AvailabilityWindow::new(&mentor.id, 1, time(9), time(10)))
            .await
            .unwrap();
        add_session(&store, &mentor, true, None).await;
        add_session(&store, &mentor, true, None).await;

        let stats = aggregator(store).dashboard().await.unwrap();
        assert_eq!(stats.utilization.len(), 1);
        assert_eq!(stats.utilization[0].utilization_percent, 50.0);
        assert_eq!(stats.utilization[0].completed_count, 2);
    }

    #[tokio::test]
    async fn test_top_mentors_excludes_zero_sessions_and_breaks_ties() {
        let store = Arc::new(MemoryStore::new());

        // Idle has no sessions at all and must never rank.
        add_mentor(&store, "Idle").await;

        // Ada and Grace tie on rating; Grace has more sessions.
        let ada = add_mentor(&store, "Ada").await;
        add_session(&store, &ada, true, Some(5)).await;

        let grace = add_mentor(&store, "Grace").await;
        add_session(&store, &grace, true, Some(5)).await;
        add_session(&store, &grace, false, Some(5)).await;

        let stats = aggregator(store).dashboard().await.unwrap();
        assert_eq!(stats.top_mentors.len(), 2);
        assert_eq!(stats.top_mentors[0].name, "Grace");
        assert_eq!(stats.top_mentors[1].name, "Ada");
        assert!(stats.top_mentors.iter().all(|m| m.name != "Idle"));
    }

    #[tokio::test]
    async fn test_leaderboard_is_independent_of_top_filter() {
        let store = Arc::new(MemoryStore::new());

        // A mentor with windows but no sessions: excluded from top mentors,
        // still present on the utilization leaderboard.
        let idle = add_mentor(&store, "Idle").await;
        store
            .insert_window(AvailabilityWindow::new(&idle.id, 2, time(9), time(10)))
            .await
            .unwrap();

        let ada = add_mentor(&store, "Ada").await;
        store
            .insert_window(AvailabilityWindow::new(&ada.id, 1, time(9), time(10)))
            .await
            .unwrap();
        add_session(&store, &ada, true, Some(4)).await;

        let stats = aggregator(store).dashboard().await.unwrap();
        assert_eq!(stats.top_mentors.len(), 1);
        assert_eq!(stats.utilization.len(), 2);
        assert!(stats.utilization.iter().any(|u| u.name == "Idle"));
        assert_eq!(stats.utilization[0].name, "Ada");
    }
}
