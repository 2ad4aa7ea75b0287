//! IPC message framing and transport protocol.
//!
//! Messages are JSON payloads behind a 4-byte little-endian length prefix.
//! The length is validated against [`MAX_MESSAGE_SIZE`] before any
//! allocation happens.

use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum IPC message size (64 KB). Large enough for a full dictionary
/// listing of a realistic vocabulary, small enough to bound a hostile
/// length prefix.
pub const MAX_MESSAGE_SIZE: usize = 65536;

/// Error type for IPC operations.
#[derive(Debug)]
pub enum IpcError {
    /// I/O error during read/write
    Io(std::io::Error),
    /// Message exceeds maximum size
    MessageTooLarge { size: usize, max: usize },
    /// JSON encoding or decoding failed
    Codec(String),
    /// Connection closed
    ConnectionClosed,
}

impl std::fmt::Display for IpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpcError::Io(e) => write!(f, "I/O error: {}", e),
            IpcError::MessageTooLarge { size, max } => {
                write!(f, "Message too large: {} bytes (max {})", size, max)
            }
            IpcError::Codec(e) => write!(f, "Codec error: {}", e),
            IpcError::ConnectionClosed => write!(f, "Connection closed"),
        }
    }
}

impl std::error::Error for IpcError {}

impl From<std::io::Error> for IpcError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            IpcError::ConnectionClosed
        } else {
            IpcError::Io(e)
        }
    }
}

/// Get the platform-specific socket path for the IPC connection.
pub fn get_socket_path() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
            .unwrap_or_else(|_| format!("/run/user/{}", unsafe { libc::getuid() }));
        PathBuf::from(runtime_dir)
            .join("signbridge")
            .join("service.sock")
    }

    #[cfg(target_os = "macos")]
    {
        let tmpdir = std::env::var("TMPDIR").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(tmpdir).join("signbridge").join("service.sock")
    }

    #[cfg(target_os = "windows")]
    {
        PathBuf::from(r"\\.\pipe\signbridge-service")
    }
}

/// Read one length-prefixed JSON frame and decode it.
pub async fn read_frame<R, T>(reader: &mut R) -> Result<T, IpcError>
where
    R: AsyncRead + Unpin,
    T: serde::de::DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_le_bytes(len_buf) as usize;

    if len > MAX_MESSAGE_SIZE {
        return Err(IpcError::MessageTooLarge {
            size: len,
            max: MAX_MESSAGE_SIZE,
        });
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;

    serde_json::from_slice(&payload).map_err(|e| IpcError::Codec(e.to_string()))
}

/// Encode a value as JSON and write it as one length-prefixed frame.
pub async fn write_frame<W, T>(writer: &mut W, value: &T) -> Result<(), IpcError>
where
    W: AsyncWrite + Unpin,
    T: serde::Serialize,
{
    let payload = serde_json::to_vec(value).map_err(|e| IpcError::Codec(e.to_string()))?;

    if payload.len() > MAX_MESSAGE_SIZE {
        return Err(IpcError::MessageTooLarge {
            size: payload.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }

    writer.write_all(&(payload.len() as u32).to_le_bytes()).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_frame_roundtrip() {
        let original = vec!["hello".to_string(), "world".to_string()];
        let mut buf = Vec::new();

        write_frame(&mut buf, &original).await.unwrap();

        let mut cursor = Cursor::new(buf);
        let read: Vec<String> = read_frame(&mut cursor).await.unwrap();

        assert_eq!(read, original);
    }

    #[tokio::test]
    async fn test_oversized_frame_rejected() {
        let oversized = "x".repeat(MAX_MESSAGE_SIZE + 1);
        let mut buf = Vec::new();

        let result = write_frame(&mut buf, &oversized).await;
        assert!(matches!(result, Err(IpcError::MessageTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_hostile_length_prefix_rejected() {
        // A length prefix far past the cap must be rejected before any
        // allocation of that size.
        let mut buf = Vec::new();
        buf.extend_from_slice(&(u32::MAX).to_le_bytes());

        let mut cursor = Cursor::new(buf);
        let result: Result<Vec<String>, _> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(IpcError::MessageTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_truncated_frame_is_connection_closed() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&8u32.to_le_bytes());
        buf.extend_from_slice(b"abc"); // promised 8 bytes, delivered 3

        let mut cursor = Cursor::new(buf);
        let result: Result<Vec<String>, _> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(IpcError::ConnectionClosed)));
    }
}
