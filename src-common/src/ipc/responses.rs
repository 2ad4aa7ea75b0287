//! IPC response types.

use serde::{Deserialize, Serialize};

use crate::types::{DatasetConfig, DictionaryEntry, ServiceStatus, SignLookup};

/// IPC response from service to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    // === Success Responses ===
    /// Vocabulary word list
    Words { words: Vec<String> },
    /// Full word -> clip dictionary
    Dictionary { entries: Vec<DictionaryEntry> },

    /// Normalized token string
    Normalized { text: String },
    /// Lookup result (playlist + missing words)
    Lookup(SignLookup),

    /// Contents of a published viewer page
    Page { html: String },
    /// Generated media deleted, per-directory counts
    MediaDeleted { generated: u64, published: u64 },

    /// Current directory configuration
    Config(DatasetConfig),
    /// Service status snapshot
    Status(ServiceStatus),

    /// Generic success
    Ok,
    /// Pong response to ping
    Pong,

    // === Error Response ===
    /// Error occurred (message is sanitized - no internal details)
    Error { message: String },
}

impl Response {
    /// Create an error response with a sanitized message.
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    /// Check if this response indicates an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}
