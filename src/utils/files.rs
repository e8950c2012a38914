use std::borrow::Cow;
use std::env;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Maximum size of any data file we read back: 10MB
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Validates that an open file's size is within [`MAX_FILE_SIZE_BYTES`]
///
/// Takes an open file handle so the size checked is the size of the file
/// that is subsequently read.
///
/// # Errors
///
/// Returns an error if the metadata cannot be read or the file is too large.
pub fn validate_file_size(file: &File, path: &Path) -> Result<u64> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(file_size)
}

/// Replace `path` with `contents` via a temp sibling and rename
///
/// Parent directories are created when missing. Readers see either the old
/// file or the new one, never a partial write. Returns a plain `io::Result`
/// so callers can attach their own typed error.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or(Cow::Borrowed("data"));
    let temp = path.with_file_name(format!("{}.tmp", file_name));
    fs::write(&temp, contents)?;
    fs::rename(&temp, path)
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use quickreply::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/.local/share/quickreply");
/// // Returns "~/.local/share/quickreply" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
