//! Usage history.
//!
//! The log file is newline-delimited JSON, one `{timestamp, context, response}`
//! object per line, opened in append mode for every record. Timestamps use the
//! local clock formatted as `dd/mm/yyyy HH:MM:SS`.

pub mod log;
pub mod reader;

pub use log::{HISTORY_FILENAME, HistoryLog};
pub use reader::read_history_file;
