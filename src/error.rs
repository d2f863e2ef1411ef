use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnhancerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Missing or invalid field: {0}")]
    Schema(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EnhancerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_mentions_timeout() {
        let err = EnhancerError::Timeout(Duration::from_secs(300));
        assert_eq!(err.to_string(), "Request timed out after 300s");
    }

    #[test]
    fn test_schema_error_names_field() {
        let err = EnhancerError::Schema("enhancedImage".to_string());
        assert!(err.to_string().contains("enhancedImage"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: EnhancerError = io.into();
        assert!(matches!(err, EnhancerError::Io(_)));
    }
}
