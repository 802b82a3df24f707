//! Error types for quarry.

use thiserror::Error;

/// The main error type for quarry operations.
#[derive(Debug, Error)]
pub enum QuarryError {
    /// An expression inside a clause could not be rendered.
    #[error("Render error: {0}")]
    Render(String),

    /// The caller-supplied sink refused a write.
    #[error("Sink error: {0}")]
    Sink(#[from] std::io::Error),

    /// The catalog describes a state the inference engine cannot represent.
    #[error("Catalog defect in table '{table}': {message}")]
    CatalogDefect { table: String, message: String },

    /// The catalog input is malformed or unreadable.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// No relationship with this name is recorded for the table.
    #[error("Unknown relationship '{name}' on table '{table}'")]
    UnknownRelationship { table: String, name: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuarryError {
    /// Create a render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Create a structural defect error for a table.
    pub fn defect(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CatalogDefect {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a catalog input error.
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }
}

/// Result type alias for quarry operations.
pub type QuarryResult<T> = Result<T, QuarryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuarryError::defect("user_roles", "join table has 1 relationships, expected 2");
        assert_eq!(
            err.to_string(),
            "Catalog defect in table 'user_roles': join table has 1 relationships, expected 2"
        );
    }

    #[test]
    fn test_sink_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: QuarryError = io.into();
        assert!(matches!(err, QuarryError::Sink(_)));
        assert_eq!(err.to_string(), "Sink error: closed");
    }
}
