use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response document: code -> quick response, iterated in code order
pub type ResponseMap = BTreeMap<String, QuickResponse>;

/// Category assigned when a response is added without one
pub const DEFAULT_CATEGORY: &str = "geral";

/// A predefined chat message. The code that identifies it is the key of the
/// owning [`ResponseMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickResponse {
    pub message: String,
    pub category: String,
}

impl QuickResponse {
    pub fn new(message: impl Into<String>, category: impl Into<String>) -> Self {
        Self { message: message.into(), category: category.into() }
    }

    /// Case-insensitive substring match against the code and the message.
    /// `needle` must already be lowercased.
    pub fn matches(&self, code: &str, needle: &str) -> bool {
        code.to_lowercase().contains(needle) || self.message.to_lowercase().contains(needle)
    }
}
