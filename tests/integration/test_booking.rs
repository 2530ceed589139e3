//! End-to-end booking flow: sign-up, availability, slot resolution,
//! booking, and lifecycle transitions.

use chrono::{NaiveDate, NaiveTime};

use tandem::{BookingRequest, SessionStatus, Store};

use crate::support::TestApp;

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

#[tokio::test]
async fn booking_against_a_published_window_schedules_and_notifies_both_parties() {
    let app = TestApp::new();
    let mentor = app.register_mentor("Ada Lovelace", "Rust, Compilers").await;
    let mentee = app.register_mentee("Mary Shelley").await;

    app.availability
        .add_window(&mentor, 1, time(9, 0), time(10, 0))
        .await
        .unwrap();

    // The mentee sees exactly the Monday window on a Monday, nothing on Tuesday.
    let slots = app
        .availability
        .slots_on(&mentor.user_id, monday())
        .await
        .unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, time(9, 0));
    assert!(app
        .availability
        .slots_on(&mentor.user_id, monday().succ_opt().unwrap())
        .await
        .unwrap()
        .is_empty());

    let session = app
        .sessions
        .book(
            &mentee,
            BookingRequest::new(&mentor.user_id, "2025-03-10", "09:00").with_duration(60),
        )
        .await
        .unwrap();
    assert_eq!(session.status, SessionStatus::Scheduled);

    // One notification per participant.
    assert_eq!(app.notifications.unread_count(&mentor).await.unwrap(), 1);
    assert_eq!(app.notifications.unread_count(&mentee).await.unwrap(), 1);

    let mentor_feed = app.notifications.recent(&mentor).await.unwrap();
    assert!(mentor_feed[0].message.contains("Mary Shelley"));
}

#[tokio::test]
async fn blank_date_or_time_is_rejected_before_any_write() {
    let app = TestApp::new();
    let mentor = app.register_mentor("Ada Lovelace", "Rust").await;
    let mentee = app.register_mentee("Mary Shelley").await;

    let blank_date = BookingRequest::new(&mentor.user_id, "", "09:00");
    assert!(app.sessions.book(&mentee, blank_date).await.is_err());

    let blank_time = BookingRequest::new(&mentor.user_id, "2025-03-10", "");
    assert!(app.sessions.book(&mentee, blank_time).await.is_err());

    assert!(app.store.list_sessions().await.unwrap().is_empty());
    assert_eq!(app.notifications.unread_count(&mentee).await.unwrap(), 0);
}

#[tokio::test]
async fn lifecycle_transitions_are_guarded() {
    let app = TestApp::new();
    let mentor = app.register_mentor("Ada Lovelace", "Rust").await;
    let mentee = app.register_mentee("Mary Shelley").await;

    let session = app
        .sessions
        .book(&mentee, BookingRequest::new(&mentor.user_id, "2025-03-10", "09:00"))
        .await
        .unwrap();

    // Completion is the mentor's action only.
    assert!(app.sessions.complete(&mentee, &session.id).await.is_err());
    let completed = app.sessions.complete(&mentor, &session.id).await.unwrap();
    assert_eq!(completed.status, SessionStatus::Completed);

    // No transition out of completed, in either direction.
    assert!(app.sessions.complete(&mentor, &session.id).await.is_err());
    assert!(app.sessions.cancel(&mentee, &session.id).await.is_err());

    // Cancellation is open to either party while scheduled.
    let second = app
        .sessions
        .book(&mentee, BookingRequest::new(&mentor.user_id, "2025-03-17", "09:00"))
        .await
        .unwrap();
    app.sessions.cancel(&mentor, &second.id).await.unwrap();
    assert!(app.sessions.complete(&mentor, &second.id).await.is_err());
}

#[tokio::test]
async fn session_listings_join_profiles_for_both_roles() {
    let app = TestApp::new();
    let mentor = app.register_mentor("Ada Lovelace", "Rust").await;
    let mentee = app.register_mentee("Mary Shelley").await;

    app.sessions
        .book(&mentee, BookingRequest::new(&mentor.user_id, "2025-03-10", "09:00"))
        .await
        .unwrap();
    app.sessions
        .book(&mentee, BookingRequest::new(&mentor.user_id, "2025-03-17", "10:00"))
        .await
        .unwrap();

    let mentee_view = app.sessions.sessions_for(&mentee).await.unwrap();
    assert_eq!(mentee_view.len(), 2);
    // Newest first.
    assert!(mentee_view[0].session.scheduled_at > mentee_view[1].session.scheduled_at);
    assert_eq!(mentee_view[0].mentor.full_name, "Ada Lovelace");
    assert_eq!(
        mentee_view[0].counterpart(&mentee.user_id).full_name,
        "Ada Lovelace"
    );

    let mentor_view = app.sessions.sessions_for(&mentor).await.unwrap();
    assert_eq!(mentor_view.len(), 2);
}

#[tokio::test]
async fn live_subscription_sees_booking_notifications() {
    let app = TestApp::new();
    let mentor = app.register_mentor("Ada Lovelace", "Rust").await;
    let mentee = app.register_mentee("Mary Shelley").await;

    let mut updates = app.notifications.subscribe(&mentor).await;

    app.sessions
        .book(&mentee, BookingRequest::new(&mentor.user_id, "2025-03-10", "09:00"))
        .await
        .unwrap();

    let received = updates.recv().await.unwrap();
    assert_eq!(received.user_id, mentor.user_id);
    assert!(received.message.contains("scheduled a session"));
}
