//! Data models for quick responses and usage history.
//!
//! - [`QuickResponse`] - A predefined message and its category, keyed by code in a [`ResponseMap`]
//! - [`HistoryEntry`] - A timestamped record of a response being used
//!
//! Both serialize with serde to the on-disk formats: the response document is a
//! single JSON object, the history log is one JSON object per line.

pub mod history;
pub mod response;

pub use history::{HistoryEntry, TIMESTAMP_FORMAT};
pub use response::{DEFAULT_CATEGORY, QuickResponse, ResponseMap};
