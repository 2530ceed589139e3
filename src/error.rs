//! Error types for the Tandem service core.

use thiserror::Error;

/// Main error type for Tandem operations.
#[derive(Error, Debug)]
pub enum TandemError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Scheduling error: {0}")]
    Scheduling(#[from] SchedulingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Store-related errors.
///
/// Every variant carries a human-readable message; callers surface these
/// verbatim (validation happens before writes, store failures are shown as-is).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Write error: {0}")]
    Write(String),
}

/// Validation errors, checked before any write reaches the store.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Authentication and authorization errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Operation requires the {0} role")]
    RoleRequired(&'static str),

    #[error("Not a participant of this session")]
    NotParticipant,
}

/// Session lifecycle errors.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Session is {current}; only scheduled sessions can be {attempted}")]
    InvalidTransition {
        current: &'static str,
        attempted: &'static str,
    },

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Unknown mentor: {0}")]
    UnknownMentor(String),
}

/// Result type alias for Tandem operations.
pub type Result<T> = std::result::Result<T, TandemError>;
