//! Unified error handling with Sentry integration.
//!
//! Provides a unified `SiteError` type for callers that drive the whole site
//! (the CLI, a browser binding). [`SiteError::report`] captures server-side
//! style failures to Sentry before they are shown to the user.

use thiserror::Error;

use crate::cart::CartError;
use crate::config::ConfigError;
use crate::forms::FieldError;
use crate::storage::{LoadError, StoreError};

/// Top-level error type for the site.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A cart mutation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The stored cart could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// A storage backend failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// A submitted form did not validate.
    #[error("Invalid form: {}", summarize(.0))]
    InvalidForm(Vec<FieldError>),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SiteError {
    /// Whether the error reflects a fault in the system rather than bad input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Load(_)
                | Self::Store(_)
                | Self::Cart(CartError::Persist(_))
        )
    }

    /// Log the error, capturing internal faults to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Site error"
            );
        } else {
            tracing::warn!(error = %self, "Rejected input");
        }
    }

    /// Message safe to show to a site visitor.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(e) => format!("The site is misconfigured: {e}"),
            Self::Load(_) => "Your saved cart could not be read.".to_string(),
            Self::Store(_) | Self::Cart(CartError::Persist(_)) => {
                "Your cart could not be saved. Please try again.".to_string()
            }
            Self::Cart(CartError::InvalidItem(e)) => e.to_string(),
            Self::InvalidForm(errors) => summarize(errors),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `SiteError`.
pub type Result<T> = std::result::Result<T, SiteError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust
/// mdi_site::error::add_breadcrumb("cart", "Added course to cart", Some(&[("course_id", "C1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
