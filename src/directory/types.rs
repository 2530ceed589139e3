//! Profile types for the mentor/mentee directory.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Profile Types
// ============================================================================

/// A user profile. Owned by the user it identifies; mutated only by that user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Profile {
    /// Unique identifier for the profile.
    pub id: String,
    /// Sign-in email address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Directory role.
    pub role: Role,
    /// Department, if shared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Job title, if shared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Free-text bio.
    #[serde(default)]
    pub bio: String,
    /// Areas a mentor can help with. Mentor semantics; empty for mentees.
    #[serde(default)]
    pub expertise_areas: Vec<String>,
    /// What a mentee wants to learn. Mentee semantics; empty for mentors.
    #[serde(default)]
    pub learning_goals: Vec<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new profile with the given identity and role.
    pub fn new(email: impl Into<String>, full_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            full_name: full_name.into(),
            role,
            department: None,
            job_title: None,
            bio: String::new(),
            expertise_areas: Vec::new(),
            learning_goals: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Set the job title.
    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    /// Set the bio.
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Set the expertise areas.
    pub fn with_expertise(
        mut self,
        areas: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.expertise_areas = areas.into_iter().map(|a| a.into()).collect();
        self
    }

    /// Set the learning goals.
    pub fn with_goals(mut self, goals: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.learning_goals = goals.into_iter().map(|g| g.into()).collect();
        self
    }

    /// Check if this profile is a mentor.
    pub fn is_mentor(&self) -> bool {
        self.role == Role::Mentor
    }
}

/// Directory role of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Offers sessions and publishes availability.
    Mentor,
    /// Books sessions against mentor availability.
    #[default]
    Mentee,
}

impl Role {
    /// Get the role as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mentor => "mentor",
            Role::Mentee => "mentee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Sign-up and Update Payloads
// ============================================================================

/// Profile payload attached to a sign-up.
///
/// Expertise areas and learning goals arrive as raw comma-separated form
/// input and are parsed with [`parse_list`] at registration time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NewProfile {
    /// Display name. Required.
    pub full_name: String,
    /// Directory role.
    pub role: Role,
    /// Department; blank input becomes `None`.
    #[serde(default)]
    pub department: String,
    /// Job title; blank input becomes `None`.
    #[serde(default)]
    pub job_title: String,
    /// Free-text bio.
    #[serde(default)]
    pub bio: String,
    /// Comma-separated expertise areas.
    #[serde(default)]
    pub expertise_areas: String,
    /// Comma-separated learning goals.
    #[serde(default)]
    pub learning_goals: String,
}

/// Update operations for a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New department; blank input clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New job title; blank input clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// New bio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New comma-separated expertise areas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise_areas: Option<String>,
    /// New comma-separated learning goals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_goals: Option<String>,
}

impl ProfileUpdate {
    /// Apply this update to a profile.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(ref full_name) = self.full_name {
            profile.full_name = full_name.clone();
        }
        if let Some(ref department) = self.department {
            profile.department = blank_to_none(department);
        }
        if let Some(ref job_title) = self.job_title {
            profile.job_title = blank_to_none(job_title);
        }
        if let Some(ref bio) = self.bio {
            profile.bio = bio.clone();
        }
        if let Some(ref areas) = self.expertise_areas {
            profile.expertise_areas = parse_list(areas);
        }
        if let Some(ref goals) = self.learning_goals {
            profile.learning_goals = parse_list(goals);
        }
    }
}

/// Parse comma-separated form input into a trimmed list.
///
/// Blank input yields an empty list, never `[""]`; blank segments are dropped.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Normalize blank optional form input to `None`.
pub(crate) fn blank_to_none(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// Discovery Types
// ============================================================================

/// A mentor annotated with completed-session stats for discovery listings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MentorSummary {
    /// The mentor's profile.
    pub profile: Profile,
    /// Number of completed sessions.
    pub session_count: usize,
    /// Mean rating over feedback on those sessions; 0.0 with no feedback.
    pub average_rating: f32,
}

impl MentorSummary {
    /// Check whether this mentor matches a search term.
    ///
    /// Case-insensitive substring match on full name, department, or any
    /// expertise area. A blank term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.profile.full_name.to_lowercase().contains(&needle)
            || self
                .profile
                .department
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || self
                .profile
                .expertise_areas
                .iter()
                .any(|area| area.to_lowercase().contains(&needle))
    }
}
