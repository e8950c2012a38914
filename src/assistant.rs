//! The service object every presentation layer talks to.
//!
//! An [`Assistant`] owns one response store, one history log and the template
//! engine. It is created once at startup and passed explicitly to the menu, the
//! scripting commands and the HTTP handlers.

use std::path::Path;

use tracing::{info, warn};

use crate::history::{HISTORY_FILENAME, HistoryLog};
use crate::models::{HistoryEntry, QuickResponse, ResponseMap};
use crate::store::{
    FileStore, MemoryStore, RESPONSES_FILENAME, ResponseStore, StoreError, StoreMode,
};
use crate::templates::{Bindings, TemplateEngine, TemplateError};

/// Responses of one category, in code order
pub type CategoryGroup<'a> = (String, Vec<(&'a str, &'a QuickResponse)>);

pub struct Assistant {
    store: Box<dyn ResponseStore>,
    history: HistoryLog,
    templates: TemplateEngine,
}

impl Assistant {
    pub fn new(store: Box<dyn ResponseStore>, history: HistoryLog, templates: TemplateEngine) -> Self {
        Self { store, history, templates }
    }

    /// Durable assistant rooted at `data_dir`
    ///
    /// # Errors
    ///
    /// Fails when the response document exists but cannot be read or parsed.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let store = FileStore::open(data_dir.join(RESPONSES_FILENAME))?;
        Ok(Self::new(
            Box::new(store),
            HistoryLog::with_file(data_dir.join(HISTORY_FILENAME)),
            TemplateEngine::builtin(),
        ))
    }

    /// Non-durable assistant with the default responses and no history file
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::with_defaults()), HistoryLog::in_memory(), TemplateEngine::builtin())
    }

    /// Durable when possible, otherwise in memory
    ///
    /// Used by the HTTP server, which keeps serving the defaults rather than
    /// exiting when the response document is unusable.
    pub fn open_or_degrade(data_dir: &Path) -> Self {
        match Self::open(data_dir) {
            Ok(assistant) => assistant,
            Err(e) => {
                warn!("{}; falling back to in-memory responses", e);
                Self::in_memory()
            }
        }
    }

    /// Look up a response by exact code and record the use
    pub fn get_response(&mut self, code: &str) -> Option<QuickResponse> {
        let response = self.store.get(code)?.clone();
        if let Err(e) = self.history.record(&format!("Resposta: {}", code), &response.message) {
            warn!("Failed to write history: {:#}", e);
        }
        Some(response)
    }

    /// Peek at a response without recording history
    pub fn peek(&self, code: &str) -> Option<&QuickResponse> {
        self.store.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.store.contains(code)
    }

    pub fn add_response(
        &mut self,
        code: &str,
        message: &str,
        category: &str,
    ) -> Result<QuickResponse, StoreError> {
        let response = self.store.add(code, message, category)?;
        info!("Response '{}' added ({} mode)", code.trim(), self.store.mode());
        Ok(response)
    }

    pub fn search(&self, keyword: &str) -> ResponseMap {
        self.store.search(keyword)
    }

    pub fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    pub fn responses(&self) -> &ResponseMap {
        self.store.responses()
    }

    /// Responses grouped by category, categories ascending
    pub fn grouped_by_category(&self) -> Vec<CategoryGroup<'_>> {
        self.categories()
            .into_iter()
            .map(|category| {
                let members = self
                    .store
                    .responses()
                    .iter()
                    .filter(|(_, r)| r.category == category)
                    .map(|(code, r)| (code.as_str(), r))
                    .collect();
                (category, members)
            })
            .collect()
    }

    pub fn store_mode(&self) -> StoreMode {
        self.store.mode()
    }

    pub fn templates(&self) -> &TemplateEngine {
        &self.templates
    }

    pub fn fill_template(&self, name: &str, bindings: &Bindings) -> Result<String, TemplateError> {
        self.templates.fill(name, bindings)
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn recent_history(&self, n: usize) -> Vec<&HistoryEntry> {
        self.history.recent(n)
    }
}
