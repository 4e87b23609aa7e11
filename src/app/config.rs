//! Process-wide settings derived from the command line.

use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Number of `-v` flags.
    pub verbose: u8,
    /// Site directory commands operate on.
    pub working_dir: PathBuf,
    /// Filter from `docsite.toml` or `DOCSITE_LOG_LEVEL`, used at `verbose == 0`.
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Result<Self> {
        let working_dir = std::env::current_dir()
            .map_err(|e| anyhow::anyhow!("Failed to get current directory: {}", e))?;

        Ok(Self {
            verbose,
            working_dir,
            log_filter: None,
        })
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn with_log_filter(mut self, filter: Option<String>) -> Self {
        self.log_filter = filter;
        self
    }

    /// `EnvFilter` directive for the current verbosity.
    ///
    /// An explicit `-v` always wins over a configured filter.
    pub fn log_level(&self) -> &str {
        match (self.verbose, &self.log_filter) {
            (0, Some(filter)) => filter.as_str(),
            (0, None) => "warn",
            (1, _) => "info",
            (2, _) => "debug",
            _ => "trace",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            working_dir: PathBuf::from("."),
            log_filter: None,
        }
    }
}
