//! # Error Handling
//!
//! Crate-wide error type for the confstore configuration server, built on
//! `thiserror`. Client-input problems use [`Error::Validation`]; backend
//! failures keep their `sqlx` source plus a human context string so nothing
//! sensitive has to be surfaced to HTTP clients.

/// Custom result type for confstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the confstore server
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors (bad environment, missing store, invalid address)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client input that failed validation (bad name, bad body, unknown type)
    #[error("{0}")]
    Validation(String),

    /// A named or identified record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database and storage errors
    #[error("Database error: {context}")]
    Database {
        #[source]
        source: sqlx::Error,
        context: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// Network transport errors (bind/accept failures)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors (generator failures, poisoned locks)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a new database error with context
    pub fn database<S: Into<String>>(source: sqlx::Error, context: S) -> Self {
        Self::Database { source, context: context.into() }
    }

    /// Create a new serialization error with context
    pub fn serialization<S: Into<String>>(source: serde_json::Error, context: S) -> Self {
        Self::Serialization { source, context: context.into() }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl From<sqlx::Error> for Error {
    fn from(error: sqlx::Error) -> Self {
        Self::Database { source: error, context: "Database operation failed".to_string() }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization { source: error, context: "JSON serialization failed".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::config("store must be set");
        assert_eq!(error.to_string(), "Configuration error: store must be set");

        let error = Error::validation("Request can't be empty");
        assert_eq!(error.to_string(), "Request can't be empty");

        let error = Error::not_found("configuration 'bla'");
        assert_eq!(error.to_string(), "Not found: configuration 'bla'");
    }

    #[test]
    fn test_error_conversions() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Serialization { .. }));

        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
