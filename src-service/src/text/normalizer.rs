//! Normalization of transcribed/translated text into vocabulary tokens.
//!
//! The pipeline is fixed: lower-case, split on whitespace, strip
//! punctuation per word, expand numerals into single digits, then drop
//! empty tokens and stop words. Digit expansion runs before stop-word
//! filtering, so a numeral can never be swallowed as a stop word.

use super::stop_words::is_stop_word;

/// Characters removed from every candidate word. Removal, not
/// replacement: "it's" becomes "its", not "it s".
const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '`', '(', ')', '[', ']', '{', '}',
];

/// Clean a text into the ordered token sequence used for clip lookup.
///
/// Total function: any input yields a (possibly empty) token list.
pub fn clean_tokens(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();

    for candidate in lowered.split_whitespace() {
        let stripped: String = candidate.chars().filter(|c| !PUNCTUATION.contains(c)).collect();

        if stripped.is_empty() {
            continue;
        }

        if stripped.chars().all(|c| c.is_ascii_digit()) {
            // A multi-digit numeral is signed digit by digit
            tokens.extend(stripped.chars().map(String::from));
        } else if !is_stop_word(&stripped) {
            tokens.push(stripped);
        }
    }

    tokens
}

/// Clean a text and join the surviving tokens with single spaces.
pub fn normalize(text: &str) -> String {
    clean_tokens(text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("\t\n"), "");
    }

    #[test]
    fn test_stop_words_and_punctuation() {
        assert_eq!(normalize("The cat sat."), "cat sat");
        assert_eq!(normalize("Where is the ticket counter?"), "where ticket counter");
    }

    #[test]
    fn test_digit_expansion() {
        assert_eq!(normalize("Room 42!"), "room 4 2");
        assert_eq!(normalize("platform 9"), "platform 9");
        assert_eq!(normalize("1234"), "1 2 3 4");
    }

    #[test]
    fn test_digits_survive_stop_word_filter() {
        // Expansion happens before filtering; digits are never stop words
        assert_eq!(normalize("at 10"), "1 0");
    }

    #[test]
    fn test_mixed_alphanumeric_not_expanded() {
        // Only pure numerals are expanded
        assert_eq!(normalize("train 12a"), "train 12a");
    }

    #[test]
    fn test_punctuation_only_words_dropped() {
        assert_eq!(normalize("hello ... world"), "hello world");
        assert_eq!(normalize("?! ()"), "");
    }

    #[test]
    fn test_stripped_contractions() {
        // "don't" strips to "dont", which is not in the stop-word set;
        // the bare stem "don" is.
        assert_eq!(normalize("don't go"), "dont go");
        assert_eq!(normalize("don go"), "go");
    }

    #[test]
    fn test_no_punctuation_in_output() {
        let out = normalize("Hey! (Listen): \"it's\" [a] {test}, `ok`?");
        assert!(out.chars().all(|c| !PUNCTUATION.contains(&c)));
    }

    #[test]
    fn test_no_stop_words_in_output() {
        let out = normalize("The quick brown fox jumps over the lazy dog");
        assert!(out.split(' ').all(|t| !is_stop_word(t)));
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        for input in ["cat sat", "room 4 2", "hello world"] {
            assert_eq!(normalize(&normalize(input)), normalize(input));
        }
    }

    #[test]
    fn test_token_order_and_repeats() {
        assert_eq!(clean_tokens("go train go"), vec!["go", "train", "go"]);
    }
}
