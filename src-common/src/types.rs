//! Shared types for dictionary and lookup operations.

use serde::{Deserialize, Serialize};

/// One entry of the sign dictionary: a vocabulary word and the clip
/// recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Canonical vocabulary word (the name of its dataset directory)
    pub word: String,
    /// Path to the clip for this word, rooted at the dataset directory
    pub video_path: String,
}

/// Result of resolving a text against the sign dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignLookup {
    /// The cleaned, space-joined token string the lookup ran on
    pub normalized: String,
    /// Entries for matched tokens, in token order (repeats preserved).
    /// This is the clip sequence a renderer would play.
    pub matched: Vec<DictionaryEntry>,
    /// Tokens with no dictionary entry, first occurrence only
    pub missing: Vec<String>,
}

/// Service status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Configured dataset root
    pub dataset_dir: String,
    /// Number of vocabulary directories currently on disk
    pub word_count: u64,
    /// When the service started (RFC 3339)
    pub started_at: String,
}

/// Directory configuration as exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Root of the word -> clip dataset tree
    pub dataset_dir: String,
    /// Where generated clip-sequence videos are written
    pub generated_dir: String,
    /// Where published viewer pages live
    pub published_dir: String,
}
