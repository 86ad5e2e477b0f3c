//! Resolver settings
//!
//! Priority: ENV (`IPSTACK_*`) > TOML file (`--config`) > defaults.

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use ipstack_core::application::worker::constants::{DEFAULT_QUEUE_SIZE, DEFAULT_WORKERS};
use ipstack_infra_http::DEFAULT_CLIENT_TIMEOUT_SECS;
use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "IPSTACK";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub access_key: String,
    pub https: bool,
    pub timeout_secs: u64,
    pub queue_size: usize,
    pub workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            https: false,
            timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECS,
            queue_size: DEFAULT_QUEUE_SIZE,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl Settings {
    /// Load from an optional TOML file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to build settings")?;

        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self> {
        let settings: Settings = config
            .try_deserialize()
            .context("Failed to deserialize settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, workers: Option<usize>, queue_size: Option<usize>) -> Result<Self> {
        if let Some(workers) = workers {
            self.workers = workers;
        }
        if let Some(queue_size) = queue_size {
            self.queue_size = queue_size;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.access_key.trim().is_empty() {
            bail!("access_key is required (set IPSTACK_ACCESS_KEY or access_key in the config file)");
        }
        if self.workers == 0 {
            bail!("workers must be at least 1");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        Ok(())
    }
}
