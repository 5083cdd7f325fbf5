//! Error types for Partlens.
//!
//! Errors are organized by stage (preprocess, upload, config) so a failure
//! can be reported to the user with the stage that produced it.

use thiserror::Error;

/// Top-level error type for Partlens operations.
#[derive(Error, Debug)]
pub enum PartlensError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image preprocessing errors
    #[error("Preprocessing error: {0}")]
    Preprocess(#[from] PreprocessError),

    /// Upload and response errors
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while turning an input file into an uploadable JPEG.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// Declared media type is not an image
    #[error("File is not an image (media type: {media_type})")]
    InvalidInput { media_type: String },

    /// Resize box has a zero side
    #[error("Invalid resize bounds: {max_width}x{max_height}")]
    InvalidBounds { max_width: u32, max_height: u32 },

    /// Bytes could not be decoded as an image
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// JPEG encoding produced no output
    #[error("Encode error: {message}")]
    Encode { message: String },

    /// File exceeds the upload size limit
    #[error("File too large: {size_mb}MB > {max_mb}MB")]
    FileTooLarge { size_mb: u64, max_mb: u64 },

    /// Decode and encode did not finish in time
    #[error("Preprocessing timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Errors from the detection backend round trip.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Backend answered with a non-success status
    #[error("Server error: {status}{}", server_detail(.message))]
    Server { status: u16, message: Option<String> },

    /// Response body is not JSON or lacks required fields
    #[error("Invalid server response: {0}")]
    Protocol(String),

    /// Request never produced a response (connection refused, DNS, timeout)
    #[error("Request failed: {0}")]
    Transport(String),
}

fn server_detail(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(" ({m})"),
        None => String::new(),
    }
}

/// Convenience type alias for Partlens results.
pub type Result<T> = std::result::Result<T, PartlensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display_with_message() {
        let err = UploadError::Server {
            status: 400,
            message: Some("No photo sent".to_string()),
        };
        assert_eq!(err.to_string(), "Server error: 400 (No photo sent)");
    }

    #[test]
    fn test_server_error_display_without_message() {
        let err = UploadError::Server {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "Server error: 502");
    }

    #[test]
    fn test_stage_prefix_in_top_level_error() {
        let err: PartlensError = PreprocessError::InvalidInput {
            media_type: "text/plain".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Preprocessing error:"));
        assert!(msg.contains("text/plain"));
    }
}
