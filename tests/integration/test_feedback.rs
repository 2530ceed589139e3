//! Feedback flow: submission rules and counterpart notification.

use tandem::{BookingRequest, NotificationKind, Store};

use crate::support::TestApp;

#[tokio::test]
async fn feedback_reaches_only_the_other_participant() {
    let app = TestApp::new();
    let mentor = app.register_mentor("Ada Lovelace", "Rust").await;
    let mentee = app.register_mentee("Mary Shelley").await;

    let session = app
        .sessions
        .book(&mentee, BookingRequest::new(&mentor.user_id, "2025-03-10", "09:00"))
        .await
        .unwrap();
    app.sessions.complete(&mentor, &session.id).await.unwrap();

    // Clear the scheduling noise before counting feedback notifications.
    app.notifications.mark_all_read(&mentor).await.unwrap();
    app.notifications.mark_all_read(&mentee).await.unwrap();

    app.feedback
        .submit(&mentee, &session.id, 5, Some("Wonderful mentor".to_string()))
        .await
        .unwrap();

    let mentor_feed = app.notifications.recent(&mentor).await.unwrap();
    let newest = &mentor_feed[0];
    assert_eq!(newest.kind, NotificationKind::FeedbackReceived);
    assert_eq!(newest.session_id.as_deref(), Some(session.id.as_str()));
    assert!(newest.message.contains("Mary Shelley"));
    assert_eq!(app.notifications.unread_count(&mentor).await.unwrap(), 1);
    assert_eq!(app.notifications.unread_count(&mentee).await.unwrap(), 0);
}

#[tokio::test]
async fn rating_is_required_and_nothing_stops_a_second_submission() {
    let app = TestApp::new();
    let mentor = app.register_mentor("Ada Lovelace", "Rust").await;
    let mentee = app.register_mentee("Mary Shelley").await;

    let session = app
        .sessions
        .book(&mentee, BookingRequest::new(&mentor.user_id, "2025-03-10", "09:00"))
        .await
        .unwrap();

    assert!(app.feedback.submit(&mentee, &session.id, 0, None).await.is_err());
    assert!(app.store.list_feedback().await.unwrap().is_empty());

    app.feedback.submit(&mentee, &session.id, 4, None).await.unwrap();
    app.feedback.submit(&mentee, &session.id, 2, None).await.unwrap();
    assert_eq!(app.store.list_feedback().await.unwrap().len(), 2);
}

#[tokio::test]
async fn discovery_reflects_completed_sessions_and_ratings() {
    let app = TestApp::new();
    let mentor = app.register_mentor("Ada Lovelace", "Rust, Compilers").await;
    let mentee = app.register_mentee("Mary Shelley").await;

    let session = app
        .sessions
        .book(&mentee, BookingRequest::new(&mentor.user_id, "2025-03-10", "09:00"))
        .await
        .unwrap();
    app.sessions.complete(&mentor, &session.id).await.unwrap();
    app.feedback.submit(&mentee, &session.id, 5, None).await.unwrap();

    let results = app.profiles.search_mentors("compilers").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].session_count, 1);
    assert_eq!(results[0].average_rating, 5.0);

    assert!(app.profiles.search_mentors("quantum").await.unwrap().is_empty());
}
