//! Error types for linkwatch.

use thiserror::Error;

/// Common error type for linkwatch.
#[derive(Error, Debug)]
pub enum LinkwatchError {
    /// Network or HTTP failure while fetching a URL.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Malformed feed or HTML document.
    #[error("parse error: {0}")]
    Parse(String),

    /// Persisted state could not be read or decoded.
    #[error("storage read error: {0}")]
    StorageRead(String),

    /// Persisted state could not be encoded or written.
    ///
    /// The mutation that triggered the write is lost and must be
    /// reported to the user.
    #[error("storage write error: {0}")]
    StorageWrite(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for linkwatch operations.
pub type Result<T> = std::result::Result<T, LinkwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = LinkwatchError::Fetch("HTTP error: 404 Not Found".to_string());
        assert_eq!(err.to_string(), "fetch error: HTTP error: 404 Not Found");
    }

    #[test]
    fn test_parse_error_display() {
        let err = LinkwatchError::Parse("no feed root".to_string());
        assert_eq!(err.to_string(), "parse error: no feed root");
    }

    #[test]
    fn test_storage_error_display() {
        let read = LinkwatchError::StorageRead("bad json".to_string());
        assert_eq!(read.to_string(), "storage read error: bad json");

        let write = LinkwatchError::StorageWrite("disk full".to_string());
        assert_eq!(write.to_string(), "storage write error: disk full");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LinkwatchError = io_err.into();
        assert!(matches!(err, LinkwatchError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(LinkwatchError::Config("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
