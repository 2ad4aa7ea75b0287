//! IPC client for communicating with signbridge-service.
//!
//! Uses blocking sockets behind an async-aware mutex: the exchange is a
//! single short request/response, and the CLI issues one at a time.

use signbridge_common::ipc::{get_socket_path, Request, Response, MAX_MESSAGE_SIZE};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::exit_codes::ExitCode;

/// Error type for service client operations.
#[derive(Debug, Clone)]
pub enum ServiceError {
    /// Service is not running or not connected
    NotConnected,
    /// Connection to service failed
    ConnectionFailed(String),
    /// Failed to send request
    SendFailed(String),
    /// Failed to receive response
    ReceiveFailed(String),
    /// Service returned an error
    RemoteError(String),
    /// Request timed out
    Timeout,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotConnected => write!(f, "Not connected to service"),
            ServiceError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            ServiceError::SendFailed(msg) => write!(f, "Send failed: {}", msg),
            ServiceError::ReceiveFailed(msg) => write!(f, "Receive failed: {}", msg),
            ServiceError::RemoteError(msg) => write!(f, "Service error: {}", msg),
            ServiceError::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Convert to an appropriate exit code.
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            ServiceError::NotConnected
            | ServiceError::ConnectionFailed(_)
            | ServiceError::Timeout => ExitCode::ServiceConnectionFailed,
            ServiceError::SendFailed(_) | ServiceError::ReceiveFailed(_) => {
                ExitCode::ServiceConnectionFailed
            }
            ServiceError::RemoteError(msg) => {
                if msg.contains("dataset") {
                    ExitCode::DatasetUnreadable
                } else if msg.contains("Page not found") {
                    ExitCode::PageNotFound
                } else if msg.contains("Invalid") {
                    ExitCode::InvalidArguments
                } else {
                    ExitCode::GeneralError
                }
            }
        }
    }
}

/// Connection state for the service client.
enum ConnectionState {
    Disconnected,
    #[cfg(unix)]
    Connected(std::os::unix::net::UnixStream),
    #[cfg(windows)]
    Connected(std::fs::File),
}

/// Client for communicating with the SignBridge service.
pub struct ServiceClient {
    connection: Mutex<ConnectionState>,
    socket_path: PathBuf,
}

impl ServiceClient {
    /// Create a new service client.
    pub fn new() -> Self {
        Self {
            connection: Mutex::new(ConnectionState::Disconnected),
            socket_path: get_socket_path(),
        }
    }

    /// Check if the client is connected to the service.
    pub async fn is_connected(&self) -> bool {
        let conn = self.connection.lock().await;
        !matches!(*conn, ConnectionState::Disconnected)
    }

    /// Connect to the service.
    pub async fn connect(&self) -> Result<(), ServiceError> {
        let mut conn = self.connection.lock().await;

        // Already connected?
        if !matches!(*conn, ConnectionState::Disconnected) {
            return Ok(());
        }

        #[cfg(unix)]
        {
            use std::os::unix::net::UnixStream;

            let stream = UnixStream::connect(&self.socket_path).map_err(|e| {
                ServiceError::ConnectionFailed(format!(
                    "Failed to connect to {}: {}",
                    self.socket_path.display(),
                    e
                ))
            })?;

            // Set read/write timeouts
            stream.set_read_timeout(Some(Duration::from_secs(30))).ok();
            stream.set_write_timeout(Some(Duration::from_secs(10))).ok();

            *conn = ConnectionState::Connected(stream);
            Ok(())
        }

        #[cfg(windows)]
        {
            use std::fs::OpenOptions;

            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(&self.socket_path)
                .map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        ServiceError::ConnectionFailed(
                            "Service not running (named pipe not found)".to_string(),
                        )
                    } else {
                        ServiceError::ConnectionFailed(format!(
                            "Failed to connect to {}: {}",
                            self.socket_path.display(),
                            e
                        ))
                    }
                })?;

            *conn = ConnectionState::Connected(file);
            Ok(())
        }
    }

    /// Send a request to the service and wait for a response.
    pub async fn request(&self, request: Request) -> Result<Response, ServiceError> {
        // Ensure connected
        if !self.is_connected().await {
            self.connect().await?;
        }

        let mut conn = self.connection.lock().await;
        let stream = match &mut *conn {
            ConnectionState::Connected(s) => s,
            ConnectionState::Disconnected => {
                return Err(ServiceError::NotConnected);
            }
        };

        let response = exchange(stream, &request)?;

        // Check for service error
        if let Response::Error { message } = &response {
            return Err(ServiceError::RemoteError(message.clone()));
        }

        Ok(response)
    }

    /// Wait for the service to become available.
    pub async fn wait_for_service(&self, timeout: Duration) -> Result<(), ServiceError> {
        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(100);

        while start.elapsed() < timeout {
            if self.socket_path.exists() {
                match self.connect().await {
                    Ok(()) => return Ok(()),
                    Err(_) => {
                        tokio::time::sleep(poll_interval).await;
                    }
                }
            } else {
                tokio::time::sleep(poll_interval).await;
            }
        }

        Err(ServiceError::Timeout)
    }

    /// Connect to the service, spawning it if necessary.
    pub async fn connect_or_spawn(&self) -> Result<(), ServiceError> {
        // First try to just connect
        if self.connect().await.is_ok() {
            return Ok(());
        }

        // Connection failed, try to spawn the service
        let service_path = Self::find_service_binary().map_err(|e| {
            ServiceError::ConnectionFailed(format!("Cannot find service binary: {}", e))
        })?;

        std::process::Command::new(&service_path)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| {
                ServiceError::ConnectionFailed(format!("Failed to spawn service: {}", e))
            })?;

        // Wait for service to be ready
        self.wait_for_service(Duration::from_secs(10)).await
    }

    /// Find the service binary path.
    fn find_service_binary() -> Result<PathBuf, String> {
        #[cfg(windows)]
        const SERVICE_BINARY: &str = "signbridge-service.exe";
        #[cfg(not(windows))]
        const SERVICE_BINARY: &str = "signbridge-service";

        // 1. Sibling binary (development or bundled)
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(dir) = exe_path.parent() {
                let path = dir.join(SERVICE_BINARY);
                if path.exists() {
                    return Ok(path);
                }
            }
        }

        // 2. In PATH
        if let Ok(path) = which::which(SERVICE_BINARY) {
            return Ok(path);
        }

        // 3. Common installation paths
        #[cfg(windows)]
        let common_paths = [
            r"C:\Program Files\SignBridge\signbridge-service.exe",
            r"C:\Program Files (x86)\SignBridge\signbridge-service.exe",
        ];
        #[cfg(not(windows))]
        let common_paths = [
            "/usr/bin/signbridge-service",
            "/usr/local/bin/signbridge-service",
        ];

        for path in &common_paths {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        Err(format!("{} binary not found", SERVICE_BINARY))
    }
}

impl Default for ServiceClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Perform one length-prefixed request/response exchange on a blocking
/// stream.
fn exchange<S: Read + Write>(stream: &mut S, request: &Request) -> Result<Response, ServiceError> {
    // Serialize and send the request
    let request_json = serde_json::to_vec(request)
        .map_err(|e| ServiceError::SendFailed(format!("Failed to serialize request: {}", e)))?;

    let len = request_json.len() as u32;
    stream
        .write_all(&len.to_le_bytes())
        .map_err(|e| ServiceError::SendFailed(format!("Failed to write length: {}", e)))?;
    stream
        .write_all(&request_json)
        .map_err(|e| ServiceError::SendFailed(format!("Failed to write request: {}", e)))?;
    stream
        .flush()
        .map_err(|e| ServiceError::SendFailed(format!("Failed to flush: {}", e)))?;

    // Read response length
    let mut len_buf = [0u8; 4];
    stream
        .read_exact(&mut len_buf)
        .map_err(|e| ServiceError::ReceiveFailed(format!("Failed to read response length: {}", e)))?;
    let response_len = u32::from_le_bytes(len_buf) as usize;

    if response_len > MAX_MESSAGE_SIZE {
        return Err(ServiceError::ReceiveFailed(format!(
            "Response too large: {} bytes",
            response_len
        )));
    }

    // Read and deserialize the response body
    let mut response_buf = vec![0u8; response_len];
    stream
        .read_exact(&mut response_buf)
        .map_err(|e| ServiceError::ReceiveFailed(format!("Failed to read response: {}", e)))?;

    serde_json::from_slice(&response_buf)
        .map_err(|e| ServiceError::ReceiveFailed(format!("Failed to deserialize response: {}", e)))
}
