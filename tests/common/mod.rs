//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value, json};
use tempfile::TempDir;

pub const RESPONSES_FILE: &str = "respostas_rapidas.json";
pub const HISTORY_FILE: &str = "chat_history.json";

/// Builder for temporary data directories
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    /// Create a new builder with an empty data directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write the response document verbatim
    pub fn with_responses_json(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join(RESPONSES_FILE), content)
            .expect("Failed to write response document");
        self
    }

    /// Write a response document from `(code, message, category)` triples
    pub fn with_responses(self, responses: &[(&str, &str, &str)]) -> Self {
        let map: Map<String, Value> = responses
            .iter()
            .map(|(code, message, category)| {
                (code.to_string(), json!({ "message": message, "category": category }))
            })
            .collect();
        let content = serde_json::to_string_pretty(&map).expect("Failed to serialize responses");
        self.with_responses_json(&content)
    }

    /// Write the history log verbatim
    pub fn with_history(self, content: &str) -> Self {
        let history_path = self.temp_dir.path().join(HISTORY_FILE);
        let mut file = fs::File::create(history_path).expect("Failed to create history log");
        file.write_all(content.as_bytes()).expect("Failed to write history log");
        self
    }

    /// Add history entries programmatically
    pub fn with_history_entries(self, entries: &[HistoryEntryBuilder]) -> Self {
        let content = entries.iter().map(|e| e.to_json()).collect::<Vec<_>>().join("\n");
        self.with_history(&format!("{}\n", content))
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for history log lines
pub struct HistoryEntryBuilder {
    timestamp: String,
    context: String,
    response: String,
}

impl HistoryEntryBuilder {
    pub fn new() -> Self {
        Self {
            timestamp: "01/02/2024 10:00:00".to_string(),
            context: "Resposta: saudacao".to_string(),
            response: "Olá! Em que posso ajudar?".to_string(),
        }
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub fn context(mut self, context: &str) -> Self {
        self.context = context.to_string();
        self
    }

    pub fn response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    pub fn to_json(&self) -> String {
        json!({
            "timestamp": self.timestamp,
            "context": self.context,
            "response": self.response,
        })
        .to_string()
    }
}

impl Default for HistoryEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the response document as a generic JSON object
pub fn read_document(dir: &Path) -> Map<String, Value> {
    let content = fs::read_to_string(dir.join(RESPONSES_FILE)).expect("Failed to read document");
    match serde_json::from_str(&content).expect("Document is not JSON") {
        Value::Object(map) => map,
        other => panic!("Document is not an object: {}", other),
    }
}

/// Non-empty lines of the history log
pub fn read_history_lines(dir: &Path) -> Vec<String> {
    match fs::read_to_string(dir.join(HISTORY_FILE)) {
        Ok(content) => content.lines().filter(|l| !l.trim().is_empty()).map(String::from).collect(),
        Err(_) => Vec::new(),
    }
}
