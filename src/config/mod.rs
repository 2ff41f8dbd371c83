//! Configuration module for the HobbyHive core.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

use crate::models::Location;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file backing the key-value store
    pub db_path: PathBuf,
    /// Prefix for every persisted key
    pub key_namespace: String,
    /// Location used when the onboarding stash is missing
    pub default_location: Location,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("HOBBYHIVE_DB_PATH")
            .unwrap_or_else(|_| "./data/hobbyhive.sqlite".to_string())
            .into();

        let key_namespace =
            env::var("HOBBYHIVE_KEY_NAMESPACE").unwrap_or_else(|_| "hobbyhive".to_string());

        let default_location = Location {
            state: env::var("HOBBYHIVE_DEFAULT_STATE").unwrap_or_else(|_| "CA".to_string()),
            city: env::var("HOBBYHIVE_DEFAULT_CITY")
                .unwrap_or_else(|_| "San Francisco".to_string()),
        };

        let log_level = env::var("HOBBYHIVE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            key_namespace,
            default_location,
            log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/hobbyhive.sqlite"),
            key_namespace: "hobbyhive".to_string(),
            default_location: Location::fallback(),
            log_level: "info".to_string(),
        }
    }
}
