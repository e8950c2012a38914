use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "quickreply";

/// Get the default data directory
///
/// - Linux: `~/.local/share/quickreply`
/// - macOS: `~/Library/Application Support/quickreply`
/// - Windows: `%APPDATA%\quickreply`
///
/// Falls back to `$HOME/.quickreply` when the platform directory is unknown.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join(APP_DIR_NAME));
    }

    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(format!(".{}", APP_DIR_NAME)))
}

/// Read an environment variable, treating empty values as unset
pub fn env_override(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
