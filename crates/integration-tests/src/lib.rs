//! Integration tests for the Mountaineer Dynamics Institute site.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mdi-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart state surviving reloads through the file store
//! - `site_flow` - A page visit driven end to end through [`mdi_site::state::Site`]
//!
//! Each test gets its own [`BrowserProfile`]: a temporary directory holding
//! the store file, standing in for one browser's local storage.

use std::path::PathBuf;

use mdi_site::config::SiteConfig;
use mdi_site::storage::{CartRepository, FileStore};
use tempfile::TempDir;

/// Isolated durable storage for one simulated browser.
pub struct BrowserProfile {
    dir: TempDir,
}

impl BrowserProfile {
    /// Create an empty profile.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp profile"),
        }
    }

    /// Path of the store file inside the profile.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// A fresh handle on the profile's store, as a new page load would open.
    #[must_use]
    pub fn store(&self) -> FileStore {
        FileStore::new(self.store_path())
    }

    /// Repository under the default cart key.
    #[must_use]
    pub fn repository(&self) -> CartRepository<FileStore> {
        CartRepository::new(self.store())
    }

    /// Default configuration pointed at this profile.
    #[must_use]
    pub fn config(&self) -> SiteConfig {
        SiteConfig {
            store_path: self.store_path(),
            ..SiteConfig::default()
        }
    }
}

impl Default for BrowserProfile {
    fn default() -> Self {
        Self::new()
    }
}
