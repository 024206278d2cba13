//! Logging configuration
//!
//! The library itself only emits through the standard `log` macros;
//! binaries pick the backend (the CLI uses env_logger) and feed it the
//! level configured here.

use anyhow::{bail, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of: off, error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("CREST_LOG_LEVEL") {
            self.level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.parse_level().is_none() {
            bail!("unknown log level \"{}\"", self.level);
        }
        Ok(())
    }

    /// The configured level as a `log` filter, defaulting to info for
    /// unknown values.
    pub fn level_filter(&self) -> LevelFilter {
        self.parse_level().unwrap_or(LevelFilter::Info)
    }

    fn parse_level(&self) -> Option<LevelFilter> {
        match self.level.to_ascii_lowercase().as_str() {
            "off" => Some(LevelFilter::Off),
            "error" => Some(LevelFilter::Error),
            "warn" => Some(LevelFilter::Warn),
            "info" => Some(LevelFilter::Info),
            "debug" => Some(LevelFilter::Debug),
            "trace" => Some(LevelFilter::Trace),
            _ => None,
        }
    }
}
