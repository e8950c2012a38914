use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Display format of history timestamps (day/month/year, local time)
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One use of a response, stored by value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub context: String,
    pub response: String,
}

impl HistoryEntry {
    pub fn new(timestamp: DateTime<Local>, context: &str, response: &str) -> Self {
        Self {
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            context: context.to_string(),
            response: response.to_string(),
        }
    }
}
