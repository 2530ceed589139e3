//! Feedback submission.

use std::sync::Arc;

use crate::auth::AuthContext;
use crate::error::{Result, ValidationError};
use crate::feedback::types::Feedback;
use crate::metrics::get_metrics;
use crate::notifications::{Notification, NotificationKind, Outbox};
use crate::store::Store;

/// Collects session feedback and notifies the counterpart.
pub struct FeedbackManager {
    store: Arc<dyn Store>,
    outbox: Arc<Outbox>,
}

impl FeedbackManager {
    /// Create a new feedback manager.
    pub fn new(store: Arc<dyn Store>, outbox: Arc<Outbox>) -> Self {
        Self { store, outbox }
    }

    /// Submit feedback on a session as the calling participant.
    ///
    /// The rating is required and must be 1..=5; the comment is optional.
    /// After the write, the session's other participant gets a
    /// `feedback_received` notification through the outbox; if the session
    /// cannot be found the feedback still stands and no one is notified.
    /// Nothing prevents the same author rating the same session again.
    pub async fn submit(
        &self,
        ctx: &AuthContext,
        session_id: &str,
        rating: u8,
        comment: Option<String>,
    ) -> Result<Feedback> {
        if rating == 0 {
            return Err(ValidationError::MissingField("rating").into());
        }
        if rating > 5 {
            return Err(ValidationError::Invalid {
                field: "rating",
                reason: format!("{rating} is not in 1..=5"),
            }
            .into());
        }

        let mut feedback = Feedback::new(session_id, &ctx.user_id, rating);
        if let Some(comment) = comment {
            feedback = feedback.with_comment(comment);
        }
        let feedback = self.store.insert_feedback(feedback).await?;

        tracing::info!("Feedback {} on session {}", feedback.rating, session_id);
        get_metrics().feedback_submitted_total.inc();

        if let Some(session) = self.store.get_session(session_id).await? {
            if let Some(recipient) = session.counterpart_of(&ctx.user_id) {
                let author_name = match self.store.get_profile(&ctx.user_id).await? {
                    Some(profile) => profile.full_name,
                    None => "A participant".to_string(),
                };

                self.outbox
                    .enqueue(
                        Notification::new(
                            recipient,
                            NotificationKind::FeedbackReceived,
                            format!("{author_name} has left feedback for your session"),
                        )
                        .with_session(session_id),
                    )
                    .await;
            }
        }

        Ok(feedback)
    }
}
