//! Availability management and slot resolution.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::auth::AuthContext;
use crate::error::{AuthError, Result, ValidationError};
use crate::scheduling::types::AvailabilityWindow;
use crate::store::Store;

/// Resolve a mentor's windows against a calendar date.
///
/// Returns exactly the subset whose day of week equals the date's weekday
/// (Sunday-based). The date is interpreted with plain calendar semantics, no
/// timezone normalization; windows are returned as published, so overlapping
/// windows both appear and nothing checks that a chosen duration fits inside
/// a window.
pub fn resolve_slots(windows: &[AvailabilityWindow], date: NaiveDate) -> Vec<AvailabilityWindow> {
    windows
        .iter()
        .filter(|w| w.applies_on(date))
        .cloned()
        .collect()
}

/// Compose the session timestamp from a chosen date and slot start time.
pub fn scheduled_at(date: NaiveDate, start: NaiveTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(start))
}

/// Manages a mentor's recurring availability windows.
pub struct AvailabilityManager {
    store: Arc<dyn Store>,
}

impl AvailabilityManager {
    /// Create a new availability manager.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Publish a weekly window for the calling mentor.
    ///
    /// Overlap with the mentor's existing windows is not checked.
    pub async fn add_window(
        &self,
        ctx: &AuthContext,
        day_of_week: u8,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<AvailabilityWindow> {
        if !ctx.is_mentor() {
            return Err(AuthError::RoleRequired("mentor").into());
        }
        if day_of_week > 6 {
            return Err(ValidationError::Invalid {
                field: "day_of_week",
                reason: format!("{day_of_week} is not in 0..=6"),
            }
            .into());
        }
        if start >= end {
            return Err(ValidationError::Invalid {
                field: "start_time",
                reason: "window start must be before its end".to_string(),
            }
            .into());
        }

        let window = AvailabilityWindow::new(&ctx.user_id, day_of_week, start, end);
        let window = self.store.insert_window(window).await?;

        tracing::info!(
            "Mentor {} published {} {}-{}",
            ctx.user_id,
            window.day_name(),
            window.start,
            window.end
        );
        Ok(window)
    }

    /// Remove one of the caller's windows. Returns whether a row was removed.
    pub async fn remove_window(&self, ctx: &AuthContext, id: &str) -> Result<bool> {
        if !ctx.is_mentor() {
            return Err(AuthError::RoleRequired("mentor").into());
        }
        self.store.delete_window(&ctx.user_id, id).await
    }

    /// A mentor's windows, ordered by (day of week, start time).
    pub async fn windows_for(&self, mentor_id: &str) -> Result<Vec<AvailabilityWindow>> {
        self.store.windows_for_mentor(mentor_id).await
    }

    /// The windows a mentee can pick from on a given date.
    pub async fn slots_on(&self, mentor_id: &str, date: NaiveDate) -> Result<Vec<AvailabilityWindow>> {
        let windows = self.windows_for(mentor_id).await?;
        Ok(resolve_slots(&windows, date))
    }
}
