//! Dataset indexing.
//!
//! The dataset is a two-level tree: one directory per vocabulary word,
//! each holding the clip recorded for that word. The index is rebuilt on
//! every call so it always reflects the tree as it is on disk; there is
//! no cache to invalidate when clips are added or re-recorded.

use std::path::Path;

use signbridge_common::DictionaryEntry;

/// Recognized clip file extension.
const VIDEO_EXTENSION: &str = ".mp4";

/// Error reading the dataset root.
///
/// Failures below the root (an unreadable word directory, a stat error)
/// are not errors: the affected word is omitted and the scan continues.
#[derive(Debug)]
pub enum DatasetError {
    /// The dataset root itself could not be read
    RootUnreadable {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::RootUnreadable { path, source } => {
                write!(f, "Cannot read dataset root {:?}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::RootUnreadable { source, .. } => Some(source),
        }
    }
}

fn root_unreadable(root: &Path) -> impl FnOnce(std::io::Error) -> DatasetError + '_ {
    move |source| DatasetError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    }
}

/// Build the dictionary for a dataset root.
///
/// Every immediate child directory whose contents include a `.mp4` file
/// yields one entry; when a directory holds several, the
/// lexicographically smallest filename wins, so the result does not
/// depend on filesystem enumeration order. Entries are sorted by word.
pub async fn build_dictionary(root: &Path) -> Result<Vec<DictionaryEntry>, DatasetError> {
    let mut dir = tokio::fs::read_dir(root).await.map_err(root_unreadable(root))?;
    let mut entries = Vec::new();

    while let Some(child) = dir.next_entry().await.map_err(root_unreadable(root))? {
        let is_dir = match child.file_type().await {
            Ok(t) => t.is_dir(),
            Err(_) => continue,
        };
        if !is_dir {
            continue;
        }

        let word = match child.file_name().into_string() {
            Ok(w) => w,
            Err(_) => continue, // non-UTF-8 directory name, not a vocabulary word
        };

        if let Some(filename) = first_video(&child.path()).await {
            let video_path = root.join(&word).join(&filename);
            entries.push(DictionaryEntry {
                word,
                video_path: video_path.to_string_lossy().into_owned(),
            });
        }
    }

    entries.sort_by(|a, b| a.word.cmp(&b.word));
    Ok(entries)
}

/// List vocabulary words: every immediate child directory of the root,
/// sorted, with no requirement that a clip exists yet.
///
/// `build_dictionary`'s words are always a subset of this list.
pub async fn list_words(root: &Path) -> Result<Vec<String>, DatasetError> {
    let mut dir = tokio::fs::read_dir(root).await.map_err(root_unreadable(root))?;
    let mut words = Vec::new();

    while let Some(child) = dir.next_entry().await.map_err(root_unreadable(root))? {
        let is_dir = match child.file_type().await {
            Ok(t) => t.is_dir(),
            Err(_) => continue,
        };
        if !is_dir {
            continue;
        }
        if let Ok(word) = child.file_name().into_string() {
            words.push(word);
        }
    }

    words.sort();
    Ok(words)
}

/// Find the clip inside one word directory: the lexicographically
/// smallest `.mp4` filename, or None if the directory is unreadable or
/// holds no clip.
async fn first_video(dir: &Path) -> Option<String> {
    let mut rd = tokio::fs::read_dir(dir).await.ok()?;
    let mut best: Option<String> = None;

    while let Ok(Some(entry)) = rd.next_entry().await {
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => continue,
        };
        if !name.ends_with(VIDEO_EXTENSION) {
            continue;
        }
        match &best {
            Some(current) if *current <= name => {}
            _ => best = Some(name),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dataset(words: &[(&str, &[&str])]) -> TempDir {
        let root = TempDir::new().unwrap();
        for (word, files) in words {
            let dir = root.path().join(word);
            fs::create_dir(&dir).unwrap();
            for file in *files {
                fs::write(dir.join(file), b"").unwrap();
            }
        }
        root
    }

    #[tokio::test]
    async fn test_builds_sorted_dictionary() {
        let root = dataset(&[
            ("world", &["world.mp4", "notes.txt"]),
            ("hello", &["hello.mp4"]),
            ("empty", &[]),
        ]);

        let entries = build_dictionary(root.path()).await.unwrap();
        let words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();

        // "empty" has no clip and is omitted; order is alphabetical
        assert_eq!(words, vec!["hello", "world"]);
        assert!(entries[0].video_path.ends_with("hello/hello.mp4"));
        assert!(entries[1].video_path.ends_with("world/world.mp4"));
    }

    #[tokio::test]
    async fn test_list_words_includes_clipless_directories() {
        let root = dataset(&[
            ("world", &["world.mp4"]),
            ("hello", &["hello.mp4"]),
            ("empty", &[]),
        ]);

        let words = list_words(root.path()).await.unwrap();
        assert_eq!(words, vec!["empty", "hello", "world"]);
    }

    #[tokio::test]
    async fn test_dictionary_words_subset_of_listing() {
        let root = dataset(&[
            ("a", &["a.mp4"]),
            ("b", &[]),
            ("c", &["c.mp4", "c2.mp4"]),
        ]);

        let words = list_words(root.path()).await.unwrap();
        let entries = build_dictionary(root.path()).await.unwrap();

        for entry in &entries {
            assert!(words.contains(&entry.word));
        }
    }

    #[tokio::test]
    async fn test_no_duplicate_words() {
        let root = dataset(&[("go", &["go.mp4"]), ("stop", &["stop.mp4"])]);

        let entries = build_dictionary(root.path()).await.unwrap();
        let mut words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();
        words.dedup();
        assert_eq!(words.len(), entries.len());
    }

    #[tokio::test]
    async fn test_multiple_clips_pick_lexicographically_first() {
        let root = dataset(&[("hello", &["z.mp4", "a.mp4", "m.mp4"])]);

        let entries = build_dictionary(root.path()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].video_path.ends_with("hello/a.mp4"));
    }

    #[tokio::test]
    async fn test_top_level_files_ignored() {
        let root = dataset(&[("hello", &["hello.mp4"])]);
        fs::write(root.path().join("stray.mp4"), b"").unwrap();

        let entries = build_dictionary(root.path()).await.unwrap();
        assert_eq!(entries.len(), 1);

        let words = list_words(root.path()).await.unwrap();
        assert_eq!(words, vec!["hello"]);
    }

    #[tokio::test]
    async fn test_missing_root_is_an_error() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope");

        assert!(matches!(
            build_dictionary(&missing).await,
            Err(DatasetError::RootUnreadable { .. })
        ));
        assert!(matches!(
            list_words(&missing).await,
            Err(DatasetError::RootUnreadable { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_root_is_empty_dictionary() {
        let root = TempDir::new().unwrap();

        assert!(build_dictionary(root.path()).await.unwrap().is_empty());
        assert!(list_words(root.path()).await.unwrap().is_empty());
    }
}
