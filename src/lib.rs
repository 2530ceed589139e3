//! Tandem: Mentor/Mentee Matchmaking Service Core
//!
//! The service layer of a mentor/mentee matchmaking product: a profile
//! directory with mentor discovery, recurring availability with slot
//! resolution, session booking and lifecycle, feedback collection,
//! best-effort notification fan-out, and a dashboard aggregation — all over
//! a swappable storage abstraction.

pub mod analytics;
pub mod auth;
pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod feedback;
pub mod metrics;
pub mod notifications;
pub mod scheduling;
pub mod store;

pub use analytics::{
    utilization_percent, AnalyticsAggregator, DashboardStats, MentorRollup, UtilizationEntry,
};
pub use auth::{AuthContext, AuthSession, Authenticator, Credential, JwtClaims};
pub use cache::ProfileCache;
pub use config::Config;
pub use directory::{
    parse_list, MentorSummary, NewProfile, Profile, ProfileManager, ProfileUpdate, Role,
};
pub use error::{
    AuthError, ConfigError, Result, SchedulingError, StoreError, TandemError, ValidationError,
};
pub use feedback::{mean_rating, rating_label, Feedback, FeedbackManager};
pub use metrics::{get_metrics, Metrics, MetricsSnapshot};
pub use notifications::{DeliveryStats, Notification, NotificationFeed, NotificationKind, Outbox};
pub use scheduling::{
    resolve_slots, scheduled_at, weekday_index, AvailabilityManager, AvailabilityWindow,
    BookingRequest, Session, SessionManager, SessionStatus, SessionWithParticipants, DAY_NAMES,
};
pub use store::{MemoryStore, Store};
