//! Resolving normalized text against the dictionary.

use std::collections::HashMap;
use std::path::Path;

use signbridge_common::{DictionaryEntry, SignLookup};

use super::indexer::{build_dictionary, DatasetError};
use crate::text::clean_tokens;

/// Normalize a text and resolve every token against a fresh dictionary
/// scan.
///
/// `matched` mirrors the token sequence (a token signed twice appears
/// twice); `missing` reports each unknown token once, in first-occurrence
/// order.
pub async fn lookup_signs(root: &Path, text: &str) -> Result<SignLookup, DatasetError> {
    let tokens = clean_tokens(text);
    let entries = build_dictionary(root).await?;

    let by_word: HashMap<&str, &DictionaryEntry> =
        entries.iter().map(|e| (e.word.as_str(), e)).collect();

    let mut matched = Vec::new();
    let mut missing: Vec<String> = Vec::new();

    for token in &tokens {
        match by_word.get(token.as_str()) {
            Some(entry) => matched.push((*entry).clone()),
            None => {
                if !missing.iter().any(|m| m == token) {
                    missing.push(token.clone());
                }
            }
        }
    }

    Ok(SignLookup {
        normalized: tokens.join(" "),
        matched,
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dataset(words: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        for word in words {
            let dir = root.path().join(word);
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join(format!("{}.mp4", word)), b"").unwrap();
        }
        root
    }

    #[tokio::test]
    async fn test_matched_follows_token_order() {
        let root = dataset(&["train", "late"]);

        let result = lookup_signs(root.path(), "The train is late!").await.unwrap();

        assert_eq!(result.normalized, "train late");
        let words: Vec<&str> = result.matched.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["train", "late"]);
        assert!(result.missing.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_tokens_repeat_in_playlist() {
        let root = dataset(&["go"]);

        let result = lookup_signs(root.path(), "go go go").await.unwrap();

        assert_eq!(result.matched.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_reported_once() {
        let root = dataset(&["hello"]);

        let result = lookup_signs(root.path(), "hello pluto pluto venus").await.unwrap();

        assert_eq!(result.missing, vec!["pluto", "venus"]);
        assert_eq!(result.matched.len(), 1);
    }

    #[tokio::test]
    async fn test_digits_resolve_individually() {
        let root = dataset(&["4", "platform"]);

        let result = lookup_signs(root.path(), "Platform 42").await.unwrap();

        assert_eq!(result.normalized, "platform 4 2");
        let words: Vec<&str> = result.matched.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["platform", "4"]);
        assert_eq!(result.missing, vec!["2"]);
    }

    #[tokio::test]
    async fn test_unreadable_root_propagates() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope");

        assert!(lookup_signs(&missing, "hello").await.is_err());
    }
}
