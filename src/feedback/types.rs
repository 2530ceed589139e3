//! Feedback types for completed sessions.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Feedback left on a session by one of its participants.
///
/// Nothing prevents the same author rating the same session twice; the
/// aggregates simply average every row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Feedback {
    /// Unique identifier for the feedback.
    pub id: String,
    /// The session being rated.
    pub session_id: String,
    /// The participant who wrote it.
    pub from_user_id: String,
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Optional free-text comment.
    #[serde(default)]
    pub comment: String,
    /// When the feedback was written.
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Create feedback with the given rating.
    pub fn new(session_id: impl Into<String>, from_user_id: impl Into<String>, rating: u8) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            from_user_id: from_user_id.into(),
            rating,
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Presentational label for a rating. Not persisted.
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        1 => "Poor",
        2 => "Fair",
        3 => "Good",
        4 => "Very Good",
        5 => "Excellent",
        _ => "Unrated",
    }
}

/// Arithmetic mean over a set of ratings; 0.0 for an empty set.
pub fn mean_rating<I>(ratings: I) -> f32
where
    I: IntoIterator<Item = u8>,
{
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for rating in ratings {
        sum += f32::from(rating);
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}
