//! Service state.
//!
//! The service keeps almost nothing in memory: the loaded configuration
//! (behind an RwLock so the dataset root can be repointed at runtime)
//! and the start timestamp. The dictionary itself is never cached - each
//! request rescans the dataset tree.

use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{load_config, save_config, ServiceConfig};

/// Global service state.
pub struct AppState {
    config: RwLock<ServiceConfig>,
    started_at: DateTime<Utc>,
}

impl AppState {
    fn new() -> Self {
        Self {
            config: RwLock::new(load_config()),
            started_at: Utc::now(),
        }
    }

    /// Snapshot of the current configuration.
    pub async fn config(&self) -> ServiceConfig {
        self.config.read().await.clone()
    }

    /// Repoint the dataset root and persist the change.
    ///
    /// The path must already be validated and canonicalized by the
    /// caller.
    pub async fn set_dataset_dir(&self, dir: PathBuf) -> Result<(), String> {
        let mut config = self.config.write().await;
        config.dataset_dir = dir;
        save_config(&config)?;
        info!("Dataset root set to {:?}", config.dataset_dir);
        Ok(())
    }

    /// When the service started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

static STATE: OnceLock<AppState> = OnceLock::new();

/// Get the global service state, initializing it on first use.
pub fn get_state() -> &'static AppState {
    STATE.get_or_init(AppState::new)
}
