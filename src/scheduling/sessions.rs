//! Session lifecycle: booking, cancellation, completion, and listings.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use futures::future::join_all;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::auth::AuthContext;
use crate::config::SchedulingConfig;
use crate::directory::{Profile, ProfileManager};
use crate::error::{AuthError, Result, SchedulingError, StoreError, ValidationError};
use crate::metrics::get_metrics;
use crate::notifications::{Notification, NotificationKind, Outbox};
use crate::scheduling::slots::scheduled_at;
use crate::scheduling::types::{BookingRequest, Session, SessionStatus};
use crate::store::Store;

/// A session joined with both participant profiles.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionWithParticipants {
    /// The session record.
    pub session: Session,
    /// The mentor participant.
    pub mentor: Profile,
    /// The mentee participant.
    pub mentee: Profile,
}

impl SessionWithParticipants {
    /// The other participant relative to `user_id`.
    pub fn counterpart(&self, user_id: &str) -> &Profile {
        if self.session.mentor_id == user_id {
            &self.mentee
        } else {
            &self.mentor
        }
    }
}

/// Manages session bookings and lifecycle transitions.
pub struct SessionManager {
    store: Arc<dyn Store>,
    profiles: Arc<ProfileManager>,
    outbox: Arc<Outbox>,
    config: SchedulingConfig,
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(
        store: Arc<dyn Store>,
        profiles: Arc<ProfileManager>,
        outbox: Arc<Outbox>,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            store,
            profiles,
            outbox,
            config,
        }
    }

    /// Book a session against a mentor as the calling mentee.
    ///
    /// Validation happens before any write: caller role, date/time presence
    /// and parseability, and the allowed duration set. The chosen time is not
    /// checked against the mentor's window bounds and nothing prevents two
    /// bookings landing on the same slot; windows are advisory here, as they
    /// are in the product.
    ///
    /// The booking write and the two scheduled-notifications are independent:
    /// the notifications go through the outbox and their failure never fails
    /// or rolls back the booking.
    pub async fn book(&self, ctx: &AuthContext, request: BookingRequest) -> Result<Session> {
        if !ctx.is_mentee() {
            return Err(AuthError::RoleRequired("mentee").into());
        }
        if request.date.trim().is_empty() {
            return Err(ValidationError::MissingField("date").into());
        }
        if request.time.trim().is_empty() {
            return Err(ValidationError::MissingField("time").into());
        }

        let date = NaiveDate::parse_from_str(request.date.trim(), "%Y-%m-%d").map_err(|e| {
            ValidationError::Invalid {
                field: "date",
                reason: e.to_string(),
            }
        })?;
        let time = NaiveTime::parse_from_str(request.time.trim(), "%H:%M").map_err(|e| {
            ValidationError::Invalid {
                field: "time",
                reason: e.to_string(),
            }
        })?;

        if !self.config.allowed_durations.contains(&request.duration_minutes) {
            return Err(ValidationError::Invalid {
                field: "duration_minutes",
                reason: format!(
                    "{} is not one of {:?}",
                    request.duration_minutes, self.config.allowed_durations
                ),
            }
            .into());
        }

        let mentee = self
            .profiles
            .get(&ctx.user_id)
            .await?
            .ok_or_else(|| AuthError::InvalidToken("profile no longer exists".to_string()))?;

        let mentor = self
            .profiles
            .get(&request.mentor_id)
            .await?
            .filter(Profile::is_mentor)
            .ok_or_else(|| SchedulingError::UnknownMentor(request.mentor_id.clone()))?;

        let at = scheduled_at(date, time);
        let session = Session::new(&mentor.id, &mentee.id, at, request.duration_minutes)
            .with_notes(request.meeting_notes);
        let session = self.store.insert_session(session).await?;

        tracing::info!(
            "Booked session {} with {} for {} at {}",
            session.id,
            mentor.full_name,
            mentee.full_name,
            at
        );
        get_metrics().sessions_booked_total.inc();

        let on_date = at.format("%B %-d, %Y");
        let at_time = at.format("%H:%M");
        self.outbox
            .enqueue(Notification::new(
                &mentor.id,
                NotificationKind::SessionScheduled,
                format!(
                    "{} has scheduled a session with you on {} at {}",
                    mentee.full_name, on_date, at_time
                ),
            ))
            .await;
        self.outbox
            .enqueue(Notification::new(
                &mentee.id,
                NotificationKind::SessionScheduled,
                format!(
                    "You have scheduled a session with {} on {} at {}",
                    mentor.full_name, on_date, at_time
                ),
            ))
            .await;

        Ok(session)
    }

    /// Cancel a scheduled session as either participant.
    pub async fn cancel(&self, ctx: &AuthContext, session_id: &str) -> Result<Session> {
        let mut session = self.fetch(session_id).await?;

        if !session.involves(&ctx.user_id) {
            return Err(AuthError::NotParticipant.into());
        }
        if session.status != SessionStatus::Scheduled {
            return Err(SchedulingError::InvalidTransition {
                current: session.status.as_str(),
                attempted: "cancelled",
            }
            .into());
        }

        session.status = SessionStatus::Cancelled;
        let session = self.store.update_session(session).await?;

        tracing::info!("Cancelled session {}", session.id);
        get_metrics().sessions_cancelled_total.inc();
        Ok(session)
    }

    /// Mark a scheduled session completed, as its mentor.
    ///
    /// The product only offers this action once the scheduled time has
    /// passed; that gating lives in the caller, not here.
    pub async fn complete(&self, ctx: &AuthContext, session_id: &str) -> Result<Session> {
        let mut session = self.fetch(session_id).await?;

        if session.mentor_id != ctx.user_id {
            return Err(AuthError::RoleRequired("mentor").into());
        }
        if session.status != SessionStatus::Scheduled {
            return Err(SchedulingError::InvalidTransition {
                current: session.status.as_str(),
                attempted: "completed",
            }
            .into());
        }

        session.status = SessionStatus::Completed;
        session.updated_at = Utc::now();
        let session = self.store.update_session(session).await?;

        tracing::info!("Completed session {}", session.id);
        get_metrics().sessions_completed_total.inc();
        Ok(session)
    }

    /// The caller's sessions in both roles, newest first, with participant
    /// profiles joined through the profile cache.
    pub async fn sessions_for(&self, ctx: &AuthContext) -> Result<Vec<SessionWithParticipants>> {
        let sessions = self.store.sessions_for_participant(&ctx.user_id).await?;

        let joined = join_all(sessions.into_iter().map(|s| self.join_participants(s))).await;
        joined.into_iter().collect()
    }

    async fn join_participants(&self, session: Session) -> Result<SessionWithParticipants> {
        let mentor = self
            .profiles
            .get(&session.mentor_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", session.mentor_id)))?;
        let mentee = self
            .profiles
            .get(&session.mentee_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", session.mentee_id)))?;

        Ok(SessionWithParticipants {
            session,
            mentor,
            mentee,
        })
    }

    async fn fetch(&self, session_id: &str) -> Result<Session> {
        self.store
            .get_session(session_id)
            .await?
            .ok_or_else(|| SchedulingError::UnknownSession(session_id.to_string()).into())
    }
}
