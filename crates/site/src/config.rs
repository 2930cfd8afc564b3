//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MDI_CART_STORE_PATH` - File backing the durable store (default: `.mdi/storage.json`)
//! - `MDI_CART_KEY` - Key the cart is stored under (default: `mdi_cart`)
//! - `MDI_CART_URL` - Target of the "View Cart" link (default: `pages/cart.html`)
//! - `MDI_NOTIFICATION_MS` - How long the cart banner stays up (default: 3000)
//! - `MDI_CAROUSEL_INTERVAL_MS` - Hero carousel auto-advance period (default: 5000)
//! - `MDI_COUNTER_DURATION_MS` - Stat counter animation length (default: 2000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cart::DEFAULT_CART_URL;
use crate::storage::DEFAULT_CART_KEY;

const DEFAULT_STORE_PATH: &str = ".mdi/storage.json";
const DEFAULT_NOTIFICATION_MS: u64 = 3000;
const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 5000;
const DEFAULT_COUNTER_DURATION_MS: u64 = 2000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// File backing the durable key-value store
    pub store_path: PathBuf,
    /// Key the cart is stored under
    pub cart_key: String,
    /// Target of the "View Cart" link
    pub cart_url: String,
    /// How long the cart banner stays up
    pub notification_display: Duration,
    /// Hero carousel auto-advance period
    pub carousel_interval: Duration,
    /// Stat counter animation length
    pub counter_duration: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            cart_key: DEFAULT_CART_KEY.to_string(),
            cart_url: DEFAULT_CART_URL.to_string(),
            notification_display: Duration::from_millis(DEFAULT_NOTIFICATION_MS),
            carousel_interval: Duration::from_millis(DEFAULT_CAROUSEL_INTERVAL_MS),
            counter_duration: Duration::from_millis(DEFAULT_COUNTER_DURATION_MS),
            sentry_dsn: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_path = PathBuf::from(get_or_default(&lookup, "MDI_CART_STORE_PATH", DEFAULT_STORE_PATH));
        let cart_key = get_non_empty(&lookup, "MDI_CART_KEY", DEFAULT_CART_KEY)?;
        let cart_url = get_non_empty(&lookup, "MDI_CART_URL", DEFAULT_CART_URL)?;
        let notification_display =
            get_millis(&lookup, "MDI_NOTIFICATION_MS", DEFAULT_NOTIFICATION_MS)?;
        let carousel_interval =
            get_millis(&lookup, "MDI_CAROUSEL_INTERVAL_MS", DEFAULT_CAROUSEL_INTERVAL_MS)?;
        let counter_duration =
            get_millis(&lookup, "MDI_COUNTER_DURATION_MS", DEFAULT_COUNTER_DURATION_MS)?;
        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());

        if carousel_interval.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "MDI_CAROUSEL_INTERVAL_MS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            store_path,
            cart_key,
            cart_url,
            notification_display,
            carousel_interval,
            counter_duration,
            sentry_dsn,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get a variable that must not be blank when set.
fn get_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    let value = get_or_default(lookup, key, default);
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "cannot be empty".to_string(),
        ));
    }
    Ok(value)
}

/// Get a millisecond duration.
fn get_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<Duration, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(Duration::from_millis(default)),
    }
}
