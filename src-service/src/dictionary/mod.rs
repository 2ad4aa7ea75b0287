//! The word -> clip dictionary: dataset indexing and sign lookup.

mod indexer;
mod lookup;

pub use indexer::{build_dictionary, list_words, DatasetError};
pub use lookup::lookup_signs;
