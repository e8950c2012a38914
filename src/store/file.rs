use std::path::{Path, PathBuf};

use tracing::info;

use super::persistence::{load_responses, save_responses};
use super::{ResponseStore, StoreError, StoreMode};
use crate::models::{QuickResponse, ResponseMap};

/// Durable store backed by a single JSON document
///
/// Every successful add rewrites the whole document, so the in-memory map and
/// the file agree after each call.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    responses: ResponseMap,
}

impl FileStore {
    /// Open the document at `path`, starting from the defaults when it is missing
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let responses = load_responses(&path)?;
        info!("Response store opened: {} ({} responses)", path.display(), responses.len());
        Ok(Self { path, responses })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current contents to disk
    pub fn save(&self) -> Result<(), StoreError> {
        save_responses(&self.path, &self.responses)
    }
}

impl ResponseStore for FileStore {
    fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    fn insert_validated(&mut self, code: String, response: QuickResponse) -> Result<(), StoreError> {
        self.responses.insert(code.clone(), response);
        if let Err(e) = self.save() {
            self.responses.remove(&code);
            return Err(e);
        }
        info!("Added response '{}' to {}", code, self.path.display());
        Ok(())
    }

    fn mode(&self) -> StoreMode {
        StoreMode::File
    }
}
