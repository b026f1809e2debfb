//! Unified error types for sourcetap.
//!
//! Error messages are deliberately plain: the query_docs tool renders them
//! verbatim inside its textual fallback, so no code prefixes are attached.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the sourcetap server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty URL).
    #[error("{0}")]
    InvalidInput(String),

    /// Transport-level HTTP failure (connect, timeout, body read).
    #[error("{0}")]
    Http(String),

    /// Direct download returned a non-success status.
    #[error("download failed with status {0}")]
    HttpStatus(u16),

    /// The cached bytes are not a readable ZIP archive.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Building or querying the full-text index failed.
    #[error("search index error: {0}")]
    Index(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("migration failed: {0}")]
    MigrationFailed(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::Http(msg) => (-32000, msg.clone()),
            Error::HttpStatus(_) => (-32000, err.to_string()),
            Error::InvalidArchive(_) => (-32001, err.to_string()),
            Error::Index(_) => (-32001, err.to_string()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_plain_message() {
        let err = Error::Http("Download failed".to_string());
        assert_eq!(err.to_string(), "Download failed");
    }

    #[test]
    fn test_status_display() {
        let err = Error::HttpStatus(404);
        assert_eq!(err.to_string(), "download failed with status 404");
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::InvalidInput("url cannot be empty".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
    }
}
