//! The English stop-word set.
//!
//! Stop words are filtered out before vocabulary lookup because they have
//! no sign clip of their own. The list includes the apostrophe-stripped
//! contraction stems ("don", "aren", "couldn", ...) since punctuation
//! stripping runs before stop-word filtering and leaves those stems
//! behind.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "were", "will", "with", "i", "me", "my", "mine",
    "you", "your", "yours", "she", "her", "hers", "him", "his", "they", "them", "their", "theirs",
    "we", "us", "our", "ours", "myself", "yourself", "himself", "herself", "itself", "ourselves",
    "yourselves", "themselves", "what", "which", "who", "whom", "this", "these", "those", "am",
    "being", "been", "have", "had", "having", "do", "does", "did", "doing", "but", "if", "or",
    "because", "so", "than", "too", "very", "s", "t", "can", "cannot", "could", "should", "would",
    "may", "might", "must", "not", "no", "nor", "only", "own", "same", "just", "don", "should've",
    "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn", "doesn", "hadn",
    "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn", "weren",
    "won", "wouldn", "about", "above", "after", "again", "against", "all", "any", "below",
    "between", "both", "down", "during", "each", "few", "further", "into", "more", "most", "once",
    "other", "out", "over", "some", "such", "then", "there", "through", "under", "until", "up",
    "while",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Check whether a word is an English stop word. Case-insensitive.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("is"));
        assert!(is_stop_word("with"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_stop_word("The"));
        assert!(is_stop_word("WHILE"));
    }

    #[test]
    fn test_contraction_stems() {
        // Stems left behind by apostrophe stripping are listed explicitly
        assert!(is_stop_word("don"));
        assert!(is_stop_word("couldn"));
        // ...but the fused forms are not
        assert!(!is_stop_word("dont"));
        assert!(!is_stop_word("couldnt"));
    }

    #[test]
    fn test_content_words_kept() {
        assert!(!is_stop_word("train"));
        assert!(!is_stop_word("platform"));
        assert!(!is_stop_word("4"));
    }
}
