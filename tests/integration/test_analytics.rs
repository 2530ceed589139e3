//! Dashboard aggregation over a populated store.

use chrono::NaiveTime;

use tandem::BookingRequest;

use crate::support::TestApp;

fn time(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

#[tokio::test]
async fn dashboard_rolls_up_totals_ratings_and_utilization() {
    let app = TestApp::new();
    let mentor = app.register_mentor("Ada Lovelace", "Rust").await;
    let mentee = app.register_mentee("Mary Shelley").await;

    app.availability
        .add_window(&mentor, 1, time(9), time(10))
        .await
        .unwrap();

    // Two completed sessions with ratings 5 and 3, one still scheduled with a 4.
    let mut rated = Vec::new();
    for (date, rating) in [("2025-03-10", 5), ("2025-03-17", 3)] {
        let session = app
            .sessions
            .book(&mentee, BookingRequest::new(&mentor.user_id, date, "09:00"))
            .await
            .unwrap();
        app.sessions.complete(&mentor, &session.id).await.unwrap();
        rated.push((session, rating));
    }
    let open = app
        .sessions
        .book(&mentee, BookingRequest::new(&mentor.user_id, "2025-03-24", "09:00"))
        .await
        .unwrap();
    rated.push((open, 4));

    for (session, rating) in &rated {
        app.feedback
            .submit(&mentee, &session.id, *rating, None)
            .await
            .unwrap();
    }

    let stats = app.analytics.dashboard().await.unwrap();
    assert_eq!(stats.total_mentors, 1);
    assert_eq!(stats.total_mentees, 1);
    assert_eq!(stats.total_sessions, 3);
    assert_eq!(stats.completed_sessions, 2);
    // Mean over [5, 3, 4] is exactly 4.0.
    assert_eq!(stats.average_rating, 4.0);

    // Two completed sessions over one window at the default multiplier.
    assert_eq!(stats.utilization.len(), 1);
    assert_eq!(stats.utilization[0].utilization_percent, 50.0);

    let top = &stats.top_mentors[0];
    assert_eq!(top.name, "Ada Lovelace");
    assert_eq!(top.session_count, 3);
    assert_eq!(top.completed_count, 2);
    assert_eq!(top.average_rating, 4.0);
}

#[tokio::test]
async fn top_mentors_and_leaderboard_filter_independently() {
    let app = TestApp::new();
    let mentee = app.register_mentee("Mary Shelley").await;

    // Booked mentor: sessions but no windows.
    let busy = app.register_mentor("Busy Mentor", "Rust").await;
    let session = app
        .sessions
        .book(&mentee, BookingRequest::new(&busy.user_id, "2025-03-10", "09:00"))
        .await
        .unwrap();
    app.sessions.complete(&busy, &session.id).await.unwrap();
    app.feedback.submit(&mentee, &session.id, 4, None).await.unwrap();

    // Idle mentor: a window but no sessions.
    let idle = app.register_mentor("Idle Mentor", "Go").await;
    app.availability
        .add_window(&idle, 2, time(9), time(10))
        .await
        .unwrap();

    let stats = app.analytics.dashboard().await.unwrap();

    // Only the mentor with sessions ranks in the top list.
    assert_eq!(stats.top_mentors.len(), 1);
    assert_eq!(stats.top_mentors[0].name, "Busy Mentor");

    // The leaderboard carries both, zero-session mentor included.
    assert_eq!(stats.utilization.len(), 2);
    assert!(stats.utilization.iter().any(|u| u.name == "Idle Mentor"));
    // No windows means zero utilization regardless of completed sessions.
    let busy_row = stats
        .utilization
        .iter()
        .find(|u| u.name == "Busy Mentor")
        .unwrap();
    assert_eq!(busy_row.utilization_percent, 0.0);
}

#[tokio::test]
async fn dashboard_on_an_empty_store_is_all_zeroes() {
    let app = TestApp::new();

    let stats = app.analytics.dashboard().await.unwrap();
    assert_eq!(stats.total_mentors, 0);
    assert_eq!(stats.total_sessions, 0);
    assert_eq!(stats.average_rating, 0.0);
    assert!(stats.top_mentors.is_empty());
    assert!(stats.utilization.is_empty());
}
