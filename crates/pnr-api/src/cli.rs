//! # Command-Line Configuration
//!
//! Flags for the `pnr-api` binary. Every flag can also be set through its
//! environment variable; an explicit flag wins over the environment.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::state::AppConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// PNR registry API server.
#[derive(Parser, Debug)]
#[command(name = "pnr-api", version, about, long_about = None)]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Registry file. The first line is a header.
    #[arg(long, env = "PNR_DATASET", default_value = "pnr.txt")]
    pub dataset: PathBuf,

    /// Pin "today" (YYYY-MM-DD) for age derivation instead of the local date.
    #[arg(long, env = "PNR_REFERENCE_DATE")]
    pub reference_date: Option<NaiveDate>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Application configuration carried by these flags.
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            port: self.port,
            dataset_path: self.dataset.clone(),
            reference_date: self.reference_date,
        }
    }
}
