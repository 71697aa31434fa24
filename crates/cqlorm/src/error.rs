//! Error types for cqlorm

use thiserror::Error;

/// Result type alias for cqlorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Opaque error reported by the underlying session/driver.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for mapping, decoding and query execution
#[derive(Debug, Error)]
pub enum OrmError {
    /// Record is not introspectable, a value could not be extracted, or a write has nothing to write
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Decoder was asked for a column the target record does not map
    #[error("Unknown field '{column}' on {record}")]
    UnknownField { record: String, column: String },

    /// Raw driver value cannot convert to the field's type
    #[error("Conversion error on column '{column}': {message}")]
    Conversion { column: String, message: String },

    /// A single-row fetch matched zero rows
    #[error("Not found: {0}")]
    NotFound(String),

    /// Whatever the session reported, with call-site context
    #[error("Transport error ({context}): {source}")]
    Transport {
        context: String,
        #[source]
        source: BoxError,
    },

    /// Builder state refused before execution
    #[error("Validation error: {0}")]
    Validation(String),
}

impl OrmError {
    /// Create a mapping error
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping(message.into())
    }

    /// Create an unknown field error
    pub fn unknown_field(record: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownField {
            record: record.into(),
            column: column.into(),
        }
    }

    /// Create a conversion error for a specific column
    pub fn conversion(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Wrap a session error with call-site context
    pub fn transport(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// The single conversion step from a raw value to a field type failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {found} to {expected}")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

impl TypeMismatch {
    pub fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }

    /// Attach the column being decoded.
    pub fn at_column(self, column: &str) -> OrmError {
        OrmError::conversion(column, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_keeps_source() {
        let err = OrmError::transport("select users", "connection reset");
        assert!(err.is_transport());
        assert_eq!(
            err.to_string(),
            "Transport error (select users): connection reset"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn type_mismatch_names_column() {
        let err = TypeMismatch::new("bigint", "text").at_column("id");
        assert!(err.is_conversion());
        assert_eq!(
            err.to_string(),
            "Conversion error on column 'id': cannot convert text to bigint"
        );
    }
}
