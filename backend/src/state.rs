//! Application state management
//!
//! Shared, read-only state passed to all request handlers via Axum's
//! state extraction.

use crate::config::AppConfig;
use nutrition_tracker_shared::ReferenceValues;
use std::sync::Arc;

/// Shared application state
///
/// Immutable after start-up; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Reference table used to interpret results
    pub reference: Arc<ReferenceValues>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            reference: Arc::new(*ReferenceValues::standard()),
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the reference value table
    #[inline]
    pub fn reference(&self) -> &ReferenceValues {
        &self.reference
    }
}
