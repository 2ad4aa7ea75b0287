//! Published viewer pages and generated-media housekeeping.
//!
//! Publishing itself happens outside the service; this module only reads
//! pages back (behind filename validation) and clears the output
//! directories on request.

use std::path::Path;

use signbridge_common::security::validation::{validate_page_filename, ValidationError};

/// Error serving a published page.
#[derive(Debug)]
pub enum PageError {
    /// The filename failed validation
    InvalidFilename(ValidationError),
    /// No page with that filename exists
    NotFound(String),
    /// The page exists but could not be read
    Io(std::io::Error),
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::InvalidFilename(e) => write!(f, "{}", e),
            PageError::NotFound(name) => write!(f, "Page not found: {}", name),
            PageError::Io(e) => write!(f, "Failed to read page: {}", e),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::InvalidFilename(e) => Some(e),
            PageError::Io(e) => Some(e),
            PageError::NotFound(_) => None,
        }
    }
}

/// Read a published viewer page by filename.
///
/// The filename is validated again here even though requests are
/// validated at the IPC boundary: this is the last gate before a
/// filesystem path is formed from client input.
pub async fn read_published_page(published_dir: &Path, filename: &str) -> Result<String, PageError> {
    validate_page_filename(filename).map_err(PageError::InvalidFilename)?;

    let path = published_dir.join(filename);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(html),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(PageError::NotFound(filename.to_string()))
        }
        Err(e) => Err(PageError::Io(e)),
    }
}

/// Deletion counts for one cleanup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    /// Files removed from the generated-videos directory
    pub generated: u64,
    /// Files removed from the published-pages directory
    pub published: u64,
}

/// Delete every plain file in the generated and published directories.
///
/// A missing or unreadable directory is not an error; that side simply
/// reports zero deletions.
pub async fn delete_generated_media(generated_dir: &Path, published_dir: &Path) -> CleanupReport {
    CleanupReport {
        generated: clear_dir(generated_dir).await,
        published: clear_dir(published_dir).await,
    }
}

async fn clear_dir(dir: &Path) -> u64 {
    let mut rd = match tokio::fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(_) => return 0,
    };

    let mut deleted = 0;
    while let Ok(Some(entry)) = rd.next_entry().await {
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if is_file && tokio::fs::remove_file(entry.path()).await.is_ok() {
            deleted += 1;
        }
    }
    deleted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_valid_page() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("isl_video_3f2a9c.html"), "<html></html>").unwrap();

        let html = read_published_page(dir.path(), "isl_video_3f2a9c.html")
            .await
            .unwrap();
        assert_eq!(html, "<html></html>");
    }

    #[tokio::test]
    async fn test_rejects_invalid_filename_before_fs_access() {
        // Directory doesn't even exist; validation must fail first
        let missing = std::path::PathBuf::from("/definitely/not/here");

        let result = read_published_page(&missing, "../../etc/passwd").await;
        assert!(matches!(result, Err(PageError::InvalidFilename(_))));
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let dir = TempDir::new().unwrap();

        let result = read_published_page(dir.path(), "isl_video_beef.html").await;
        assert!(matches!(result, Err(PageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_cleanup_counts_per_directory() {
        let generated = TempDir::new().unwrap();
        let published = TempDir::new().unwrap();
        fs::write(generated.path().join("a.mp4"), b"").unwrap();
        fs::write(generated.path().join("b.mp4"), b"").unwrap();
        fs::write(published.path().join("isl_video_aa.html"), b"").unwrap();

        let report = delete_generated_media(generated.path(), published.path()).await;

        assert_eq!(report, CleanupReport { generated: 2, published: 1 });
        assert_eq!(fs::read_dir(generated.path()).unwrap().count(), 0);
        assert_eq!(fs::read_dir(published.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_cleanup_skips_subdirectories() {
        let generated = TempDir::new().unwrap();
        let published = TempDir::new().unwrap();
        fs::create_dir(generated.path().join("keep")).unwrap();
        fs::write(generated.path().join("drop.mp4"), b"").unwrap();

        let report = delete_generated_media(generated.path(), published.path()).await;

        assert_eq!(report.generated, 1);
        assert!(generated.path().join("keep").exists());
    }

    #[tokio::test]
    async fn test_cleanup_tolerates_missing_directories() {
        let generated = TempDir::new().unwrap();
        let missing = generated.path().join("nope");

        let report = delete_generated_media(&missing, &missing).await;
        assert_eq!(report, CleanupReport { generated: 0, published: 0 });
    }
}
