use thiserror::Error;

/// Top-level error type for the Paddock listing services.
///
/// Storage-facing variants carry the store's message as a string so that
/// `paddock-core` stays independent of the SQLite driver. The storage crate
/// maps driver errors into the matching variant at the boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PaddockError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection, lock, migration or seeding failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The store rejected or failed to run a query, e.g. an unknown
    /// order-by column.
    #[error("Query error: {0}")]
    Query(String),

    /// A result row could not be scanned or its timestamp converted.
    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("Task error: {0}")]
    Task(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for PaddockError {
    fn from(err: toml::de::Error) -> Self {
        PaddockError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PaddockError {
    fn from(err: toml::ser::Error) -> Self {
        PaddockError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for PaddockError {
    fn from(err: serde_json::Error) -> Self {
        PaddockError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Paddock operations.
pub type Result<T> = std::result::Result<T, PaddockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(PaddockError, &str)> = vec![
            (
                PaddockError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                PaddockError::Storage("database is locked".to_string()),
                "Storage error: database is locked",
            ),
            (
                PaddockError::Query("no such column: nope".to_string()),
                "Query error: no such column: nope",
            ),
            (
                PaddockError::Mapping("invalid timestamp".to_string()),
                "Mapping error: invalid timestamp",
            ),
            (
                PaddockError::Task("cancelled".to_string()),
                "Task error: cancelled",
            ),
            (
                PaddockError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: PaddockError = io_err.into();
        assert!(matches!(err, PaddockError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let paddock_err: PaddockError = err.unwrap_err().into();
        assert!(matches!(paddock_err, PaddockError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let paddock_err: PaddockError = err.unwrap_err().into();
        assert!(matches!(paddock_err, PaddockError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(format!("value={}", value))
        }

        assert_eq!(inner().unwrap(), "value=42");
    }
}
