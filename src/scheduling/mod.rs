//! Scheduling: recurring availability, slot resolution, and the session
//! lifecycle.
//!
//! Mentors publish weekly windows; the slot resolver projects those windows
//! onto a chosen calendar date; a mentee picks a slot and duration to book a
//! session, which then moves through `scheduled -> completed` or
//! `scheduled -> cancelled` and nothing else.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   Scheduling Layer                          │
//! │  ┌─────────────────────┐      ┌─────────────────────────┐  │
//! │  │ AvailabilityManager │      │     SessionManager      │  │
//! │  │  - window CRUD      │      │  - book (validated)     │  │
//! │  │  - slot resolution  │─────▶│  - cancel / complete    │  │
//! │  └─────────────────────┘      │  - participant listings │  │
//! │                               └───────────┬─────────────┘  │
//! │                                           │ fan-out         │
//! │                                           ▼                 │
//! │                               ┌─────────────────────────┐  │
//! │                               │         Outbox          │  │
//! │                               └─────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod sessions;
mod slots;
mod types;

pub use sessions::{SessionManager, SessionWithParticipants};
pub use slots::{resolve_slots, scheduled_at, AvailabilityManager};
pub use types::{
    weekday_index, AvailabilityWindow, BookingRequest, Session, SessionStatus, DAY_NAMES,
};
