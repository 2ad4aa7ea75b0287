//! IPC request types.

use serde::{Deserialize, Serialize};

use crate::security::validation::{
    validate_dataset_path_string, validate_lookup_text, validate_page_filename, ValidationError,
};

/// IPC request from client to service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    // === Dictionary ===
    /// List vocabulary words (dataset directories, video or not)
    ListWords,
    /// Build the full word -> clip dictionary
    GetDictionary,

    // === Text ===
    /// Normalize a text into its cleaned token string
    NormalizeText { text: String },
    /// Normalize a text and resolve every token against the dictionary
    LookupSigns { text: String },

    // === Published pages ===
    /// Fetch a published viewer page by filename
    GetPublishedPage { filename: String },
    /// Delete all generated videos and published pages
    DeleteGeneratedMedia,

    // === Configuration ===
    /// Get the current directory configuration
    GetConfig,
    /// Point the service at a different dataset root
    SetDatasetDir { path: String },

    // === Service Control ===
    /// Get a status snapshot
    GetStatus,
    /// Request service shutdown
    Shutdown,
    /// Ping for health check
    Ping,
}

impl Request {
    /// Validate all parameters in this request.
    ///
    /// Returns Ok(()) if all parameters are valid, or an error describing
    /// the first invalid parameter found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Request::NormalizeText { text } | Request::LookupSigns { text } => {
                validate_lookup_text(text)?;
            }
            Request::GetPublishedPage { filename } => {
                validate_page_filename(filename)?;
            }
            Request::SetDatasetDir { path } => {
                validate_dataset_path_string(path)?;
            }
            // Other requests have no parameters to validate
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_text_validated() {
        let ok = Request::LookupSigns {
            text: "the train to pune leaves at 9".to_string(),
        };
        assert!(ok.validate().is_ok());

        let too_long = Request::LookupSigns {
            text: "a".repeat(100_000),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_page_filename_validated() {
        let ok = Request::GetPublishedPage {
            filename: "isl_video_3f2a9c.html".to_string(),
        };
        assert!(ok.validate().is_ok());

        let traversal = Request::GetPublishedPage {
            filename: "../../etc/passwd".to_string(),
        };
        assert!(traversal.validate().is_err());
    }

    #[test]
    fn test_parameterless_requests_pass() {
        assert!(Request::Ping.validate().is_ok());
        assert!(Request::GetDictionary.validate().is_ok());
        assert!(Request::DeleteGeneratedMedia.validate().is_ok());
    }
}
