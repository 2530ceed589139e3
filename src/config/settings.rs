//! Configuration settings for the Tandem service core.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth: AuthConfig,
    pub scheduling: SchedulingConfig,
    pub notifications: NotificationConfig,
    pub analytics: AnalyticsConfig,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            scheduling: SchedulingConfig::default(),
            notifications: NotificationConfig::default(),
            analytics: AnalyticsConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("tandem.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("tandem/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.auth.jwt_issuer.is_empty() {
            return Err(ConfigError::MissingField("auth.jwt_issuer".to_string()).into());
        }

        if self.scheduling.allowed_durations.is_empty() {
            return Err(
                ConfigError::Invalid("scheduling.allowed_durations must not be empty".to_string())
                    .into(),
            );
        }

        if self.analytics.weeks_per_month == 0 {
            return Err(
                ConfigError::Invalid("analytics.weeks_per_month must be > 0".to_string()).into(),
            );
        }

        if self.notifications.feed_limit == 0 {
            return Err(
                ConfigError::Invalid("notifications.feed_limit must be > 0".to_string()).into(),
            );
        }

        Ok(())
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT signing secret (loaded from TANDEM_JWT_SECRET if empty)
    pub jwt_secret: String,
    /// JWT issuer claim
    pub jwt_issuer: String,
    /// JWT audience claim
    pub jwt_audience: String,
    /// Session token lifetime in seconds (0 = no expiry check)
    pub token_expiry_secs: u64,
    /// Minimum accepted password length
    pub min_password_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: "tandem".to_string(),
            jwt_audience: "tandem-users".to_string(),
            token_expiry_secs: 3600,
            min_password_len: 8,
        }
    }
}

/// Scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Session lengths offered at booking, in minutes
    pub allowed_durations: Vec<u32>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            allowed_durations: vec![30, 60, 90],
        }
    }
}

/// Notification delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Delivery attempts per notification beyond the first
    pub retry_count: usize,
    /// Maximum notifications returned by the feed
    pub feed_limit: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            retry_count: 3,
            feed_limit: 20,
        }
    }
}

/// Analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Bookable occurrences assumed per availability window per month.
    /// Policy knob inherited from the product, not a derived value.
    pub weeks_per_month: u32,
    /// Entries in the top-mentors list
    pub top_mentors: usize,
    /// Entries in the utilization leaderboard
    pub leaderboard_size: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            weeks_per_month: 4,
            top_mentors: 5,
            leaderboard_size: 5,
        }
    }
}

/// Profile cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the read-through profile cache
    pub enabled: bool,
    /// Maximum number of cached entries
    pub max_entries: u64,
    /// TTL for cached entries in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 10000,
            ttl_secs: 300,
        }
    }
}
