//! Response document persistence: load with defaults, save with atomic writes

use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::{debug, info};

use super::StoreError;
use super::defaults::default_responses;
use crate::models::ResponseMap;
use crate::utils::atomic_write;
use crate::utils::files::MAX_FILE_SIZE_BYTES;

/// File name of the response document inside the data directory
pub const RESPONSES_FILENAME: &str = "respostas_rapidas.json";

/// Load the response document at `path`
///
/// A missing file yields the built-in defaults. Any other I/O failure, an
/// oversized file, or malformed JSON is returned as an error rather than
/// silently replaced with defaults.
pub fn load_responses(path: &Path) -> Result<ResponseMap, StoreError> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No response document at {}, using built-in defaults", path.display());
            return Ok(default_responses());
        }
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
    };

    let size = file
        .metadata()
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?
        .len();
    if size > MAX_FILE_SIZE_BYTES {
        return Err(StoreError::TooLarge { path: path.to_path_buf(), size });
    }

    let mut contents = String::with_capacity(size as usize);
    file.read_to_string(&mut contents)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;

    let responses: ResponseMap = serde_json::from_str(&contents)
        .map_err(|source| StoreError::Parse { path: path.to_path_buf(), source })?;
    debug!("Loaded {} responses from {}", responses.len(), path.display());

    Ok(responses)
}

/// Serialize the full mapping to `path`, replacing the previous document
///
/// Output is UTF-8 with 2-space indentation and non-ASCII text written
/// literally. A document [`load_responses`] would refuse is never written.
pub fn save_responses(path: &Path, responses: &ResponseMap) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(responses).map_err(StoreError::Serialize)?;
    let size = json.len() as u64;
    if size > MAX_FILE_SIZE_BYTES {
        return Err(StoreError::TooLarge { path: path.to_path_buf(), size });
    }
    atomic_write(path, json.as_bytes())
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    debug!("Saved {} responses to {}", responses.len(), path.display());
    Ok(())
}
