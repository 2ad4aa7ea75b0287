//! SignBridge Background Service
//!
//! Resolves English text against the on-disk sign-clip dataset and
//! maintains the generated/published output directories. Clients talk to
//! it over IPC; transcription and translation happen upstream.

mod config;
mod dictionary;
mod ipc;
mod pages;
mod state;
mod text;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Global shutdown flag
static SHUTDOWN_FLAG: std::sync::OnceLock<Arc<AtomicBool>> = std::sync::OnceLock::new();

/// Get the global shutdown flag.
pub fn get_shutdown_flag() -> Arc<AtomicBool> {
    SHUTDOWN_FLAG
        .get_or_init(|| Arc::new(AtomicBool::new(false)))
        .clone()
}

/// Request service shutdown.
pub fn request_shutdown() {
    info!("Shutdown requested");
    get_shutdown_flag().store(true, Ordering::SeqCst);
}

/// Check if shutdown has been requested.
pub fn is_shutdown_requested() -> bool {
    get_shutdown_flag().load(Ordering::SeqCst)
}

/// Initialize logging: stderr with RUST_LOG env var support, plus a log
/// file under the platform log directory when it is writable.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match signbridge_common::logging::ensure_log_dir() {
        Ok(()) => {
            let path = signbridge_common::logging::log_dir().join("signbridge-service.log");
            match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => Some(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                ),
                Err(_) => None,
            }
        }
        Err(_) => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
}

fn main() {
    init_logging();

    info!("SignBridge Service starting (pid: {})...", std::process::id());

    // Run async runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    runtime.block_on(async {
        setup_signal_handlers();

        // Make sure the output directories exist before the first
        // publish/cleanup request arrives
        let config = state::get_state().config().await;
        for dir in [&config.generated_dir, &config.published_dir] {
            if let Err(e) = tokio::fs::create_dir_all(dir).await {
                warn!("Failed to create {:?}: {}", dir, e);
            }
        }
        info!("Dataset root: {:?}", config.dataset_dir);

        // Start the IPC server (runs until shutdown)
        if let Err(e) = ipc::run_server().await {
            if !is_shutdown_requested() {
                error!("IPC server error: {}", e);
                std::process::exit(1);
            }
        }
    });

    // Cleanup
    cleanup_on_shutdown();
    info!("SignBridge Service stopped");
}

/// Set up signal handlers for graceful shutdown.
fn setup_signal_handlers() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        tokio::spawn(async {
            let mut sigterm = signal(SignalKind::terminate()).expect("SIGTERM handler");
            let mut sigint = signal(SignalKind::interrupt()).expect("SIGINT handler");
            let mut sighup = signal(SignalKind::hangup()).expect("SIGHUP handler");

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM");
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT");
                }
                _ = sighup.recv() => {
                    info!("Received SIGHUP");
                }
            }

            request_shutdown();
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C");
                request_shutdown();
            }
        });
    }
}

/// Cleanup resources on shutdown.
fn cleanup_on_shutdown() {
    #[cfg(unix)]
    {
        let socket_path = signbridge_common::ipc::get_socket_path();
        if socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&socket_path) {
                warn!("Failed to remove socket file: {}", e);
            } else {
                info!("Removed socket file: {:?}", socket_path);
            }
        }
    }
}
