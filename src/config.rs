//! Runtime configuration.
//!
//! Each setting is resolved from, in order: command-line flag, environment
//! variable, built-in default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::history::HISTORY_FILENAME;
use crate::store::RESPONSES_FILENAME;
use crate::utils::{default_data_dir, env_override};

pub const ENV_DATA_DIR: &str = "QUICKREPLY_DATA_DIR";
pub const ENV_HOST: &str = "QUICKREPLY_HOST";
pub const ENV_PORT: &str = "QUICKREPLY_PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    /// Resolve against the process environment
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        Self::resolve_with(overrides, env_override)
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve_with(overrides: Overrides, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match overrides.data_dir.or_else(|| env(ENV_DATA_DIR).map(PathBuf::from)) {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        let host = overrides.host.or_else(|| env(ENV_HOST)).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match overrides.port {
            Some(port) => port,
            None => match env(ENV_PORT) {
                Some(raw) => raw
                    .parse::<u16>()
                    .with_context(|| format!("Invalid {} value: {:?}", ENV_PORT, raw))?,
                None => DEFAULT_PORT,
            },
        };

        Ok(Self { data_dir, host, port })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn responses_path(&self) -> PathBuf {
        self.data_dir.join(RESPONSES_FILENAME)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILENAME)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
