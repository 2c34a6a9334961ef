//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The state holds configuration only. The registry file is re-read on every
//! request that needs it; nothing from the dataset is cached between
//! requests.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use pnr_core::Dataset;

use crate::error::AppError;

/// Process configuration, built by the binary from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind.
    pub port: u16,
    /// Location of the registry file.
    pub dataset_path: PathBuf,
    /// Pinned "today" for age derivation. `None` uses the local date.
    pub reference_date: Option<NaiveDate>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            dataset_path: PathBuf::from("pnr.txt"),
            reference_date: None,
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State with an explicit configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Reference date for age derivation.
    pub fn today(&self) -> NaiveDate {
        self.config
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Read the registry file from disk.
    ///
    /// Runs the core's synchronous loader on the blocking pool.
    pub async fn load_dataset(&self) -> Result<Dataset, AppError> {
        let path = self.config.dataset_path.clone();
        let dataset = tokio::task::spawn_blocking(move || Dataset::load(path))
            .await
            .map_err(|err| AppError::Internal(format!("dataset loader task failed: {err}")))??;
        Ok(dataset)
    }

    /// Whether the registry file currently exists and is a regular file.
    pub async fn dataset_available(&self) -> bool {
        tokio::fs::metadata(&self.config.dataset_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
