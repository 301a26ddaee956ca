//! Error types for IntelliSQL operations.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` implementations.

use thiserror::Error;

/// Convenient result alias used across the crate.
pub type Result<T> = std::result::Result<T, IntelliSqlError>;

/// Coarse error category, used by the UI to pick a status and a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input (blank question)
    Input,
    /// External model service (auth, quota, network, malformed response)
    Service,
    /// SQL execution or statement policy
    Database,
    /// Missing or invalid configuration
    Config,
    /// Should not happen
    Internal,
}

/// Error type for translation and execution.
#[derive(Error, Debug)]
pub enum IntelliSqlError {
    /// Question was empty or whitespace only
    #[error("Question is empty")]
    EmptyQuestion,

    /// Model provider returned an error or an unusable response
    #[error("LLM request failed: {0}")]
    LlmError(String),

    /// HTTP client error (provider APIs)
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// SQLite rejected or failed the statement
    #[error("Query execution failed: {0}")]
    QueryError(#[from] rusqlite::Error),

    /// SQL text held no statement (only separators or comments)
    #[error("No SQL statement to execute")]
    EmptyStatement,

    /// Generated statement refused by the statement policy
    #[error("Statement not allowed: {0}")]
    PolicyViolation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntelliSqlError {
    /// Create an LLM error with context.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::LlmError(msg.into())
    }

    /// Create a configuration error with context.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyQuestion => ErrorKind::Input,
            Self::LlmError(_) | Self::HttpError(_) => ErrorKind::Service,
            Self::QueryError(_) | Self::EmptyStatement | Self::PolicyViolation(_) => {
                ErrorKind::Database
            }
            Self::ConfigError(_) => ErrorKind::Config,
            Self::JsonError(_) | Self::IoError(_) | Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// Check if error is recoverable.
    ///
    /// # Returns
    ///
    /// `true` if the same request could succeed when sent again unchanged
    /// (network failures and timeouts). Nothing in this crate retries on its own.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Check if SQLite reported a syntax error.
    pub fn is_syntax_error(&self) -> bool {
        match self {
            Self::QueryError(e) => e.to_string().contains("syntax error"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(IntelliSqlError::EmptyQuestion.kind(), ErrorKind::Input);
        assert_eq!(IntelliSqlError::llm("quota").kind(), ErrorKind::Service);
        assert_eq!(
            IntelliSqlError::PolicyViolation("DROP".into()).kind(),
            ErrorKind::Database
        );
        assert_eq!(IntelliSqlError::config("x").kind(), ErrorKind::Config);
    }

    #[test]
    fn test_error_messages() {
        let err = IntelliSqlError::config("GOOGLE_API_KEY environment variable not set");
        assert_eq!(
            err.to_string(),
            "Configuration error: GOOGLE_API_KEY environment variable not set"
        );
        assert!(!err.is_recoverable());
        assert!(!err.is_syntax_error());
    }

    #[test]
    fn test_from_rusqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err: IntelliSqlError = conn.execute("SELEKT 1", []).unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Database);
        assert!(err.is_syntax_error());
    }
}
