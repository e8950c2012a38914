//! Quick-response storage.
//!
//! [`ResponseStore`] is the one contract every presentation layer uses. Two
//! implementations exist and one is chosen at startup:
//!
//! - [`FileStore`] - durable, backed by `respostas_rapidas.json` and rewritten in full on every add
//! - [`MemoryStore`] - seeded with the built-in defaults, never touches disk
//!
//! # Policies
//!
//! - Lookups are exact and case-sensitive.
//! - Search is a case-insensitive substring match on the code and the message;
//!   the category does not participate. An empty keyword returns everything.
//! - Adding an existing code is rejected with [`StoreError::Duplicate`] rather
//!   than overwriting, so the stored message for a code never changes.

pub mod defaults;
pub mod file;
pub mod memory;
pub mod persistence;

use std::fmt;
use std::path::PathBuf;

pub use defaults::default_responses;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use persistence::{RESPONSES_FILENAME, load_responses, save_responses};
use serde::Serialize;
use thiserror::Error;

use crate::models::{DEFAULT_CATEGORY, QuickResponse, ResponseMap};

/// Errors raised by response stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Código não pode estar vazio.")]
    EmptyCode,

    #[error("Mensagem não pode estar vazia.")]
    EmptyMessage,

    #[error("Já existe uma resposta com a chave \"{0}\"")]
    Duplicate(String),

    #[error("Failed to access response document {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed response document {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response document too large: {} ({size} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64 },

    #[error("Failed to serialize responses: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    /// Validation failures are the caller's fault and leave the store untouched
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyCode | Self::EmptyMessage | Self::Duplicate(_))
    }
}

/// Which implementation backs the running process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    File,
    Memory,
}

impl StoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::File)
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage contract shared by the durable and in-memory stores
pub trait ResponseStore: Send {
    /// All responses in code order
    fn responses(&self) -> &ResponseMap;

    /// Insert an already validated, not yet present entry and commit it.
    /// Implementations must leave the store unchanged when this fails.
    fn insert_validated(&mut self, code: String, response: QuickResponse) -> Result<(), StoreError>;

    fn mode(&self) -> StoreMode;

    /// Exact-key lookup
    fn get(&self, code: &str) -> Option<&QuickResponse> {
        self.responses().get(code)
    }

    fn contains(&self, code: &str) -> bool {
        self.responses().contains_key(code)
    }

    /// Validate and add a new response
    ///
    /// The code is trimmed and must be non-empty and unused. The message is
    /// stored verbatim but must contain non-whitespace text. A blank category
    /// becomes [`DEFAULT_CATEGORY`].
    fn add(&mut self, code: &str, message: &str, category: &str) -> Result<QuickResponse, StoreError> {
        let (code, response) = validate_new_response(self.responses(), code, message, category)?;
        self.insert_validated(code, response.clone())?;
        Ok(response)
    }

    /// Case-insensitive substring search over codes and messages
    fn search(&self, keyword: &str) -> ResponseMap {
        search_responses(self.responses(), keyword)
    }

    /// Distinct categories, sorted ascending
    fn categories(&self) -> Vec<String> {
        collect_categories(self.responses())
    }

    fn len(&self) -> usize {
        self.responses().len()
    }

    fn is_empty(&self) -> bool {
        self.responses().is_empty()
    }
}

/// Check a new entry against the current contents
pub fn validate_new_response(
    existing: &ResponseMap,
    code: &str,
    message: &str,
    category: &str,
) -> Result<(String, QuickResponse), StoreError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(StoreError::EmptyCode);
    }
    if message.trim().is_empty() {
        return Err(StoreError::EmptyMessage);
    }
    if existing.contains_key(code) {
        return Err(StoreError::Duplicate(code.to_string()));
    }

    let category = if category.trim().is_empty() { DEFAULT_CATEGORY } else { category };
    Ok((code.to_string(), QuickResponse::new(message, category)))
}

/// Filter `responses` down to entries whose code or message contains `keyword`
pub fn search_responses(responses: &ResponseMap, keyword: &str) -> ResponseMap {
    if keyword.is_empty() {
        return responses.clone();
    }

    let needle = keyword.to_lowercase();
    responses
        .iter()
        .filter(|(code, response)| response.matches(code, &needle))
        .map(|(code, response)| (code.clone(), response.clone()))
        .collect()
}

pub fn collect_categories(responses: &ResponseMap) -> Vec<String> {
    let mut categories: Vec<String> = responses.values().map(|r| r.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}
