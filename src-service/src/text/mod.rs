//! Text normalization for sign vocabulary lookup.

mod normalizer;
mod stop_words;

pub use normalizer::{clean_tokens, normalize};
pub use stop_words::is_stop_word;
