//! Scheduling types: recurring availability windows and booked sessions.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Day names indexed by the Sunday-based weekday number used throughout.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Sunday-based weekday index of a calendar date (0 = Sunday .. 6 = Saturday).
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

// ============================================================================
// Availability Types
// ============================================================================

/// A recurring weekly availability window published by a mentor.
///
/// Windows on the same day are allowed to overlap; nothing deduplicates or
/// merges them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AvailabilityWindow {
    /// Unique identifier for the window.
    pub id: String,
    /// The mentor who published this window.
    pub mentor_id: String,
    /// Sunday-based weekday (0 = Sunday .. 6 = Saturday).
    pub day_of_week: u8,
    /// Window start time.
    pub start: NaiveTime,
    /// Window end time.
    pub end: NaiveTime,
    /// Whether the window repeats weekly.
    pub recurring: bool,
    /// When the window was published.
    pub created_at: DateTime<Utc>,
}

impl AvailabilityWindow {
    /// Create a new weekly-recurring window.
    pub fn new(mentor_id: impl Into<String>, day_of_week: u8, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mentor_id: mentor_id.into(),
            day_of_week,
            start,
            end,
            recurring: true,
            created_at: Utc::now(),
        }
    }

    /// Human-readable day name for this window.
    pub fn day_name(&self) -> &'static str {
        DAY_NAMES
            .get(self.day_of_week as usize)
            .copied()
            .unwrap_or("Unknown")
    }

    /// Check whether this window applies on a calendar date.
    ///
    /// Purely a weekday comparison; no timezone normalization is performed,
    /// so cross-timezone mentor/mentee pairs see the publishing calendar.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.day_of_week == weekday_index(date)
    }
}

// ============================================================================
// Session Types
// ============================================================================

/// A booked mentoring session between one mentor and one mentee.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    /// Unique identifier for the session.
    pub id: String,
    /// The mentor participant.
    pub mentor_id: String,
    /// The mentee participant.
    pub mentee_id: String,
    /// When the session takes place.
    pub scheduled_at: DateTime<Utc>,
    /// Session length in minutes.
    pub duration_minutes: u32,
    /// Current lifecycle status.
    pub status: SessionStatus,
    /// Free-text meeting notes.
    #[serde(default)]
    pub meeting_notes: String,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new booking with status [`SessionStatus::Scheduled`].
    pub fn new(
        mentor_id: impl Into<String>,
        mentee_id: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mentor_id: mentor_id.into(),
            mentee_id: mentee_id.into(),
            scheduled_at,
            duration_minutes,
            status: SessionStatus::Scheduled,
            meeting_notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the meeting notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.meeting_notes = notes.into();
        self
    }

    /// Check whether a user is one of the two participants.
    pub fn involves(&self, user_id: &str) -> bool {
        self.mentor_id == user_id || self.mentee_id == user_id
    }

    /// The other participant relative to `user_id`, if `user_id` is one.
    pub fn counterpart_of(&self, user_id: &str) -> Option<&str> {
        if self.mentor_id == user_id {
            Some(&self.mentee_id)
        } else if self.mentee_id == user_id {
            Some(&self.mentor_id)
        } else {
            None
        }
    }

    /// Check whether the scheduled time is in the past.
    pub fn is_past(&self) -> bool {
        self.scheduled_at < Utc::now()
    }
}

/// Lifecycle status of a session.
///
/// The only transitions are `Scheduled -> Completed` and
/// `Scheduled -> Cancelled`. `Rescheduled` is part of the stored contract but
/// no operation produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Booked and upcoming.
    #[default]
    Scheduled,
    /// Held and marked done by the mentor.
    Completed,
    /// Called off by either participant.
    Cancelled,
    /// Declared but never produced.
    Rescheduled,
}

impl SessionStatus {
    /// Get the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Rescheduled => "rescheduled",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Booking Types
// ============================================================================

/// A booking request as it arrives from the scheduling form.
///
/// Date and time stay raw strings so presence and parseability can be
/// validated before anything is written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookingRequest {
    /// The mentor to book.
    pub mentor_id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Slot start time, `HH:MM`.
    pub time: String,
    /// Session length in minutes.
    pub duration_minutes: u32,
    /// Optional meeting notes.
    #[serde(default)]
    pub meeting_notes: String,
}

impl BookingRequest {
    /// Create a request for the default 60-minute session.
    pub fn new(mentor_id: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            mentor_id: mentor_id.into(),
            date: date.into(),
            time: time.into(),
            duration_minutes: 60,
            meeting_notes: String::new(),
        }
    }

    /// Set the session length.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Set the meeting notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.meeting_notes = notes.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_weekday_index_is_sunday_based() {
        // 2025-03-09 is a Sunday, 2025-03-10 a Monday.
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()), 0);
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()), 1);
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()), 6);
    }

    #[test]
    fn test_window_applies_on_matching_weekday() {
        let window = AvailabilityWindow::new("mentor-1", 1, time(9, 0), time(10, 0));
        assert!(window.applies_on(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));
        assert!(!window.applies_on(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()));
        assert_eq!(window.day_name(), "Monday");
    }

    #[test]
    fn test_session_participants() {
        let session = Session::new("mentor-1", "mentee-1", Utc::now(), 60);
        assert_eq!(session.status, SessionStatus::Scheduled);
        assert!(session.involves("mentor-1"));
        assert!(session.involves("mentee-1"));
        assert!(!session.involves("other"));
        assert_eq!(session.counterpart_of("mentor-1"), Some("mentee-1"));
        assert_eq!(session.counterpart_of("other"), None);
    }

    #[test]
    fn test_booking_request_defaults() {
        let request = BookingRequest::new("mentor-1", "2025-03-10", "09:00");
        assert_eq!(request.duration_minutes, 60);
        assert!(request.meeting_notes.is_empty());
    }
}
