//! Input validation for IPC request parameters.

use once_cell::sync::Lazy;
use regex::Regex;

/// Published viewer pages carry a lowercase-hex suffix from the
/// publishing step, e.g. "isl_video_3f2a9c-1.html". The pattern doubles
/// as the traversal guard: no separators, no dots outside the extension.
static PAGE_FILENAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^isl_video_[a-f0-9-]+\.html$").unwrap());

/// Maximum length of a text submitted for normalization or lookup.
pub const MAX_TEXT_LENGTH: usize = 8192;

/// Maximum length of a dataset path in characters.
pub const MAX_PATH_LENGTH: usize = 4096;

/// Validation error types.
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Published-page filename doesn't match the expected pattern
    InvalidPageFilename(String),
    /// Submitted text exceeds the maximum length
    TextTooLong { len: usize, max: usize },
    /// Submitted text contains a null byte
    TextContainsNullByte,
    /// Dataset path exceeds the maximum length
    PathTooLong { len: usize, max: usize },
    /// Dataset path contains a null byte
    PathContainsNullByte,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidPageFilename(name) => {
                write!(f, "Invalid page filename: {}", name)
            }
            ValidationError::TextTooLong { len, max } => {
                write!(f, "Text too long: {} chars (max {})", len, max)
            }
            ValidationError::TextContainsNullByte => write!(f, "Text contains null byte"),
            ValidationError::PathTooLong { len, max } => {
                write!(f, "Path too long: {} chars (max {})", len, max)
            }
            ValidationError::PathContainsNullByte => write!(f, "Path contains null byte"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a published-page filename.
///
/// Filenames must match `isl_video_<hex>.html` exactly; anything else
/// (path separators, traversal, other extensions) is rejected before any
/// filesystem access.
pub fn validate_page_filename(filename: &str) -> Result<(), ValidationError> {
    if !PAGE_FILENAME_PATTERN.is_match(filename) {
        return Err(ValidationError::InvalidPageFilename(filename.to_string()));
    }
    Ok(())
}

/// Validate a text submitted for normalization or sign lookup.
///
/// The normalizer itself is total, so this only bounds transport abuse:
/// length and embedded null bytes.
pub fn validate_lookup_text(text: &str) -> Result<(), ValidationError> {
    if text.len() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TextTooLong {
            len: text.len(),
            max: MAX_TEXT_LENGTH,
        });
    }
    if text.contains('\0') {
        return Err(ValidationError::TextContainsNullByte);
    }
    Ok(())
}

/// Validate the raw string form of a dataset path.
///
/// Structural checks (traversal, absoluteness, canonicalization) happen
/// in [`crate::security::path_validation`] on the service side; this
/// guards the wire value itself.
pub fn validate_dataset_path_string(path: &str) -> Result<(), ValidationError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong {
            len: path.len(),
            max: MAX_PATH_LENGTH,
        });
    }
    if path.contains('\0') {
        return Err(ValidationError::PathContainsNullByte);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_page_filenames() {
        assert!(validate_page_filename("isl_video_3f2a9c.html").is_ok());
        assert!(validate_page_filename("isl_video_0-9af.html").is_ok());
        assert!(
            validate_page_filename("isl_video_550e8400-e29b-41d4-a716-446655440000.html").is_ok()
        );
    }

    #[test]
    fn test_invalid_page_filenames() {
        // Empty and bare prefix
        assert!(validate_page_filename("").is_err());
        assert!(validate_page_filename("isl_video.html").is_err());
        // Wrong extension
        assert!(validate_page_filename("isl_video_3f2a9c.htm").is_err());
        assert!(validate_page_filename("isl_video_3f2a9c.html.bak").is_err());
        // Uppercase hex is not accepted
        assert!(validate_page_filename("isl_video_3F2A9C.html").is_err());
        // Traversal attempts
        assert!(validate_page_filename("../isl_video_3f2a9c.html").is_err());
        assert!(validate_page_filename("isl_video_/etc/passwd.html").is_err());
    }

    #[test]
    fn test_lookup_text_limits() {
        assert!(validate_lookup_text("").is_ok());
        assert!(validate_lookup_text("Where is platform 2?").is_ok());
        assert!(validate_lookup_text(&"a".repeat(MAX_TEXT_LENGTH)).is_ok());

        assert!(validate_lookup_text(&"a".repeat(MAX_TEXT_LENGTH + 1)).is_err());
        assert!(validate_lookup_text("null\0byte").is_err());
    }

    #[test]
    fn test_dataset_path_string() {
        assert!(validate_dataset_path_string("/srv/isl_dataset").is_ok());
        assert!(validate_dataset_path_string(&"p".repeat(MAX_PATH_LENGTH + 1)).is_err());
        assert!(validate_dataset_path_string("/srv/\0isl").is_err());
    }
}
