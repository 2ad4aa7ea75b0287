//! Path validation for the dataset and media directories.

use std::path::{Path, PathBuf};

/// Path validation error types.
#[derive(Debug, Clone)]
pub enum PathError {
    /// Path contains directory traversal sequences (..)
    ContainsTraversal,
    /// Path contains null bytes
    ContainsNullByte,
    /// Path is not absolute
    NotAbsolute,
    /// Path is too long
    TooLong(usize),
    /// Path does not exist or cannot be canonicalized
    CannotCanonicalize(String),
    /// Path exists but is not a directory
    NotADirectory(PathBuf),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ContainsTraversal => write!(f, "Path contains directory traversal"),
            PathError::ContainsNullByte => write!(f, "Path contains null byte"),
            PathError::NotAbsolute => write!(f, "Path must be absolute"),
            PathError::TooLong(len) => write!(f, "Path too long: {} chars", len),
            PathError::CannotCanonicalize(e) => write!(f, "Cannot canonicalize path: {}", e),
            PathError::NotADirectory(p) => write!(f, "Not a directory: {:?}", p),
        }
    }
}

impl std::error::Error for PathError {}

/// Maximum path length in characters.
pub const MAX_PATH_LENGTH: usize = 4096;

/// Validate and canonicalize a dataset directory path.
///
/// This function performs several checks before the path is accepted as
/// the new dataset root:
/// 1. Rejects paths containing null bytes
/// 2. Rejects paths that are too long
/// 3. Rejects paths containing ".." traversal sequences
/// 4. Requires absolute paths
/// 5. Canonicalizes the path to resolve symlinks
/// 6. Requires the result to be an existing directory
pub fn validate_dataset_directory(path: &Path) -> Result<PathBuf, PathError> {
    let path_str = path.to_string_lossy();

    // Check for null bytes
    if path_str.contains('\0') {
        return Err(PathError::ContainsNullByte);
    }

    // Check length
    if path_str.len() > MAX_PATH_LENGTH {
        return Err(PathError::TooLong(path_str.len()));
    }

    // Reject traversal sequences before canonicalization
    for component in path.components() {
        if component.as_os_str() == ".." {
            return Err(PathError::ContainsTraversal);
        }
    }

    // Must be absolute
    if !path.is_absolute() {
        return Err(PathError::NotAbsolute);
    }

    // Canonicalize to resolve symlinks
    let canonical = std::fs::canonicalize(path)
        .map_err(|e| PathError::CannotCanonicalize(e.to_string()))?;

    // A dataset root is always a directory of word directories
    if !canonical.is_dir() {
        return Err(PathError::NotADirectory(canonical));
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_traversal() {
        let path = PathBuf::from("/srv/isl/../etc/passwd");
        assert!(matches!(
            validate_dataset_directory(&path),
            Err(PathError::ContainsTraversal)
        ));
    }

    #[test]
    fn test_rejects_relative_path() {
        let path = PathBuf::from("relative/isl_dataset");
        assert!(matches!(
            validate_dataset_directory(&path),
            Err(PathError::NotAbsolute)
        ));
    }

    #[test]
    fn test_rejects_null_byte() {
        let path = PathBuf::from("/srv/isl\0dataset");
        assert!(matches!(
            validate_dataset_directory(&path),
            Err(PathError::ContainsNullByte)
        ));
    }

    #[test]
    fn test_rejects_missing_directory() {
        let path = PathBuf::from("/definitely/not/a/real/dataset/root");
        assert!(matches!(
            validate_dataset_directory(&path),
            Err(PathError::CannotCanonicalize(_))
        ));
    }

    #[test]
    fn test_rejects_plain_file() {
        let file = std::env::temp_dir().join("signbridge_path_validation_file");
        std::fs::write(&file, b"x").unwrap();

        let result = validate_dataset_directory(&file);
        std::fs::remove_file(&file).ok();

        assert!(matches!(result, Err(PathError::NotADirectory(_))));
    }

    #[test]
    fn test_accepts_existing_directory() {
        let dir = std::env::temp_dir();
        assert!(validate_dataset_directory(&dir).is_ok());
    }
}
