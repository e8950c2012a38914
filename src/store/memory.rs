use super::defaults::default_responses;
use super::{ResponseStore, StoreError, StoreMode};
use crate::models::{QuickResponse, ResponseMap};

/// Non-durable store used when the response document cannot be opened
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    responses: ResponseMap,
}

impl MemoryStore {
    /// Store seeded with the built-in defaults
    pub fn with_defaults() -> Self {
        Self { responses: default_responses() }
    }

    pub fn from_responses(responses: ResponseMap) -> Self {
        Self { responses }
    }
}

impl ResponseStore for MemoryStore {
    fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    fn insert_validated(&mut self, code: String, response: QuickResponse) -> Result<(), StoreError> {
        self.responses.insert(code, response);
        Ok(())
    }

    fn mode(&self) -> StoreMode {
        StoreMode::Memory
    }
}
