//! quickreply - Quick responses and message templates for chat support agents
//!
//! Keeps a keyed collection of canned messages grouped by category, fills
//! parameterized message templates and records every response handed out.
//! It supports:
//!
//! - A JSON-backed response store with an in-memory fallback
//! - Keyword search over codes and message text
//! - Named templates with `{placeholder}` fields and missing-field reporting
//! - An append-only usage history
//! - An interactive terminal menu, scripting subcommands and an HTTP API
//!
//! # Example
//!
//! ```no_run
//! use quickreply::Assistant;
//! use std::path::Path;
//!
//! let mut assistant = Assistant::open(Path::new("/tmp/quickreply"))?;
//! if let Some(response) = assistant.get_response("saudacao") {
//!     println!("{}", response.message);
//! }
//! # Ok::<(), quickreply::store::StoreError>(())
//! ```

pub mod assistant;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod history;
pub mod logging;
pub mod models;
pub mod server;
pub mod store;
pub mod templates;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use assistant::Assistant;
pub use config::Config;
pub use models::{HistoryEntry, QuickResponse, ResponseMap};
pub use store::{FileStore, MemoryStore, ResponseStore, StoreError, StoreMode};
pub use templates::{Bindings, TemplateEngine, TemplateError};
