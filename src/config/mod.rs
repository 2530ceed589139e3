//! Configuration for the Tandem service core.

mod settings;

pub use settings::{
    AnalyticsConfig, AuthConfig, CacheConfig, Config, NotificationConfig, SchedulingConfig,
};
