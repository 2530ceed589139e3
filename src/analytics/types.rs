//! Dashboard aggregation types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Full dashboard snapshot, recomputed from scratch on every request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DashboardStats {
    /// Number of mentor profiles.
    pub total_mentors: usize,
    /// Number of mentee profiles.
    pub total_mentees: usize,
    /// Number of sessions in any status.
    pub total_sessions: usize,
    /// Number of completed sessions.
    pub completed_sessions: usize,
    /// Mean rating over every feedback row in the system.
    pub average_rating: f32,
    /// Best-rated mentors with at least one session.
    pub top_mentors: Vec<MentorRollup>,
    /// Most-utilized mentors, zero-session mentors included.
    pub utilization: Vec<UtilizationEntry>,
}

/// Per-mentor rollup across sessions, feedback, and availability.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MentorRollup {
    /// The mentor's profile id.
    pub mentor_id: String,
    /// The mentor's display name.
    pub name: String,
    /// The mentor's department, if shared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Sessions in any status.
    pub session_count: usize,
    /// Completed sessions.
    pub completed_count: usize,
    /// Mean rating over feedback on the mentor's sessions.
    pub average_rating: f32,
    /// Utilization percentage, clamped to [0, 100].
    pub utilization_percent: f32,
}

/// One row of the utilization leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UtilizationEntry {
    /// The mentor's profile id.
    pub mentor_id: String,
    /// The mentor's display name.
    pub name: String,
    /// Utilization percentage, clamped to [0, 100].
    pub utilization_percent: f32,
    /// Completed sessions backing the percentage.
    pub completed_count: usize,
}

impl From<&MentorRollup> for UtilizationEntry {
    fn from(rollup: &MentorRollup) -> Self {
        Self {
            mentor_id: rollup.mentor_id.clone(),
            name: rollup.name.clone(),
            utilization_percent: rollup.utilization_percent,
            completed_count: rollup.completed_count,
        }
    }
}

/// Utilization percentage for a mentor.
///
/// `completed / (window_count * weeks_per_month) * 100`, clamped to
/// [0, 100]; a mentor with no published windows scores zero. The
/// weeks-per-month multiplier is the configured policy constant, not a
/// derived value.
pub fn utilization_percent(completed: usize, window_count: usize, weeks_per_month: u32) -> f32 {
    if window_count == 0 {
        return 0.0;
    }

    let capacity = (window_count as u32 * weeks_per_month) as f32;
    let percent = completed as f32 / capacity * 100.0;
    percent.clamp(0.0, 100.0)
}
