//! IPC request handlers.
//!
//! Every handler maps internal errors to sanitized response messages;
//! the details stay in the service log.

use signbridge_common::ipc::{Request, Response};
use signbridge_common::security::path_validation::validate_dataset_directory;
use signbridge_common::ServiceStatus;
use tracing::{debug, error, info, warn};

use crate::dictionary;
use crate::pages::{self, PageError};
use crate::state::get_state;
use crate::text;

/// Handle an IPC request and return a response.
pub async fn handle_request(request: Request) -> Response {
    debug!("Handling request: {:?}", request);

    match request {
        // === Dictionary ===
        Request::ListWords => {
            let config = get_state().config().await;
            match dictionary::list_words(&config.dataset_dir).await {
                Ok(words) => {
                    info!("Listed {} vocabulary words", words.len());
                    Response::Words { words }
                }
                Err(e) => {
                    error!("Failed to list vocabulary: {}", e);
                    Response::error("Failed to read sign dataset")
                }
            }
        }
        Request::GetDictionary => {
            let config = get_state().config().await;
            match dictionary::build_dictionary(&config.dataset_dir).await {
                Ok(entries) => {
                    info!("Built dictionary with {} entries", entries.len());
                    Response::Dictionary { entries }
                }
                Err(e) => {
                    error!("Failed to build dictionary: {}", e);
                    Response::error("Failed to read sign dataset")
                }
            }
        }

        // === Text ===
        Request::NormalizeText { text } => Response::Normalized {
            text: text::normalize(&text),
        },
        Request::LookupSigns { text } => {
            let config = get_state().config().await;
            match dictionary::lookup_signs(&config.dataset_dir, &text).await {
                Ok(lookup) => {
                    info!(
                        "Lookup: {} matched, {} missing",
                        lookup.matched.len(),
                        lookup.missing.len()
                    );
                    Response::Lookup(lookup)
                }
                Err(e) => {
                    error!("Sign lookup failed: {}", e);
                    Response::error("Failed to read sign dataset")
                }
            }
        }

        // === Published pages ===
        Request::GetPublishedPage { filename } => {
            let config = get_state().config().await;
            match pages::read_published_page(&config.published_dir, &filename).await {
                Ok(html) => Response::Page { html },
                Err(PageError::NotFound(name)) => {
                    warn!("Published page not found: {}", name);
                    Response::error("Page not found")
                }
                Err(PageError::InvalidFilename(e)) => {
                    warn!("Rejected page filename: {}", e);
                    Response::error("Invalid page filename")
                }
                Err(e) => {
                    error!("Failed to serve published page: {}", e);
                    Response::error("Failed to read published page")
                }
            }
        }
        Request::DeleteGeneratedMedia => {
            let config = get_state().config().await;
            let report =
                pages::delete_generated_media(&config.generated_dir, &config.published_dir).await;
            info!(
                "Deleted {} generated videos, {} published pages",
                report.generated, report.published
            );
            Response::MediaDeleted {
                generated: report.generated,
                published: report.published,
            }
        }

        // === Configuration ===
        Request::GetConfig => {
            let config = get_state().config().await;
            Response::Config(config.client_view())
        }
        Request::SetDatasetDir { path } => {
            let canonical = match validate_dataset_directory(std::path::Path::new(&path)) {
                Ok(p) => p,
                Err(e) => {
                    warn!("Rejected dataset path {:?}: {}", path, e);
                    return Response::error(format!("Invalid dataset path: {}", e));
                }
            };
            match get_state().set_dataset_dir(canonical).await {
                Ok(()) => Response::Ok,
                Err(e) => {
                    error!("Failed to persist config: {}", e);
                    Response::error("Failed to save configuration")
                }
            }
        }

        // === Service Control ===
        Request::GetStatus => {
            let state = get_state();
            let config = state.config().await;
            let word_count = dictionary::list_words(&config.dataset_dir)
                .await
                .map(|words| words.len() as u64)
                .unwrap_or(0);
            Response::Status(ServiceStatus {
                dataset_dir: config.dataset_dir.display().to_string(),
                word_count,
                started_at: state.started_at().to_rfc3339(),
            })
        }
        Request::Shutdown => {
            crate::request_shutdown();
            Response::Ok
        }
        Request::Ping => Response::Pong,
    }
}
