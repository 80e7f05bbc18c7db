//! Error types for clientdb operations.
//!
//! This module provides the error hierarchy using `thiserror` for schema
//! management, record constraints, lookups and CLI commands.

use rusqlite::ffi;
use thiserror::Error;

/// Result type alias for clientdb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for clientdb operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

impl Error {
    /// Short machine-readable name of the error kind.
    ///
    /// Used by the JSON error output so callers can branch on the kind
    /// without parsing the message.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Storage(err) => err.kind(),
            Self::Command(_) => "command",
            Self::Config { .. } => "config",
        }
    }
}

/// Which table constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A `UNIQUE` column already holds the value (e.g. client email).
    Unique,
    /// The primary key already exists (e.g. phone number).
    PrimaryKey,
    /// The referenced row does not exist (phone owner).
    ForeignKey,
    /// A `CHECK` constraint failed (field length limits).
    Check,
    /// A required column was null.
    NotNull,
    /// Any other constraint violation reported by the engine.
    Other,
}

impl ConstraintKind {
    /// Maps an `SQLite` extended result code to a constraint kind.
    #[must_use]
    pub const fn from_extended_code(code: i32) -> Self {
        match code {
            ffi::SQLITE_CONSTRAINT_UNIQUE => Self::Unique,
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Self::PrimaryKey,
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Self::ForeignKey,
            ffi::SQLITE_CONSTRAINT_CHECK => Self::Check,
            ffi::SQLITE_CONSTRAINT_NOTNULL => Self::NotNull,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unique => "unique",
            Self::PrimaryKey => "primary key",
            Self::ForeignKey => "foreign key",
            Self::Check => "check",
            Self::NotNull => "not null",
            Self::Other => "constraint",
        };
        f.write_str(name)
    }
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Schema creation or teardown was rejected by the engine.
    #[error("schema error: {0}")]
    Schema(String),

    /// A write violated a table constraint.
    #[error("{kind} constraint violated: {message}")]
    Constraint {
        /// Which kind of constraint failed.
        kind: ConstraintKind,
        /// Engine message naming the table and column.
        message: String,
    },

    /// No client with the given ID exists.
    #[error("client not found: {id}")]
    ClientNotFound {
        /// Client ID that was not found.
        id: i64,
    },

    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// Transaction commit or rollback error.
    #[error("transaction error: {0}")]
    Transaction(String),
}

impl StorageError {
    /// Short machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Schema(_) => "schema",
            Self::Constraint { .. } => "constraint",
            Self::ClientNotFound { .. } => "not_found",
            Self::Database(_) => "database",
            Self::Transaction(_) => "transaction",
        }
    }

    /// Wraps an engine error raised while creating or dropping tables.
    #[must_use]
    pub fn schema(err: &rusqlite::Error) -> Self {
        Self::Schema(err.to_string())
    }

    /// Returns true for constraint violations of the given kind.
    #[must_use]
    pub fn is_constraint(&self, expected: ConstraintKind) -> bool {
        matches!(self, Self::Constraint { kind, .. } if *kind == expected)
    }
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

// Implement From traits for engine and standard library errors

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint {
                    kind: ConstraintKind::from_extended_code(code.extended_code),
                    message: message.unwrap_or_else(|| code.to_string()),
                }
            }
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::from(err))
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint_failure(extended_code: i32, message: &str) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            ffi::Error::new(extended_code),
            Some(message.to_string()),
        )
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::ClientNotFound { id: 7 };
        assert_eq!(err.to_string(), "client not found: 7");

        let err = StorageError::Schema("table clients already exists".to_string());
        assert_eq!(err.to_string(), "schema error: table clients already exists");

        let err = StorageError::Constraint {
            kind: ConstraintKind::Unique,
            message: "UNIQUE constraint failed: clients.email".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unique constraint violated: UNIQUE constraint failed: clients.email"
        );
    }

    #[test]
    fn test_unique_violation_is_classified() {
        let err: StorageError = constraint_failure(
            ffi::SQLITE_CONSTRAINT_UNIQUE,
            "UNIQUE constraint failed: clients.email",
        )
        .into();
        assert!(err.is_constraint(ConstraintKind::Unique));
        assert_eq!(err.kind(), "constraint");
    }

    #[test]
    fn test_foreign_key_violation_is_classified() {
        let err: StorageError =
            constraint_failure(ffi::SQLITE_CONSTRAINT_FOREIGNKEY, "FOREIGN KEY constraint failed")
                .into();
        assert!(err.is_constraint(ConstraintKind::ForeignKey));
        assert!(!err.is_constraint(ConstraintKind::Unique));
    }

    #[test]
    fn test_non_constraint_failure_is_database_error() {
        let err: StorageError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, StorageError::Database(_)));
        assert_eq!(err.kind(), "database");
    }

    #[test]
    fn test_from_rusqlite_error_to_error() {
        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, Error::Storage(StorageError::Database(_))));
    }

    #[test]
    fn test_error_kinds() {
        let err: Error = StorageError::ClientNotFound { id: 1 }.into();
        assert_eq!(err.kind(), "not_found");

        let err: Error = StorageError::Schema("no such table".to_string()).into();
        assert_eq!(err.kind(), "schema");

        let err: Error = CommandError::InvalidArgument("--format".to_string()).into();
        assert_eq!(err.kind(), "command");

        let err = Error::Config {
            message: "bad path".to_string(),
        };
        assert_eq!(err.kind(), "config");
        assert_eq!(err.to_string(), "configuration error: bad path");
    }

    #[test]
    fn test_constraint_kind_from_code() {
        assert_eq!(
            ConstraintKind::from_extended_code(ffi::SQLITE_CONSTRAINT_PRIMARYKEY),
            ConstraintKind::PrimaryKey
        );
        assert_eq!(
            ConstraintKind::from_extended_code(ffi::SQLITE_CONSTRAINT_CHECK),
            ConstraintKind::Check
        );
        assert_eq!(
            ConstraintKind::from_extended_code(ffi::SQLITE_CONSTRAINT_NOTNULL),
            ConstraintKind::NotNull
        );
        assert_eq!(
            ConstraintKind::from_extended_code(ffi::SQLITE_CONSTRAINT),
            ConstraintKind::Other
        );
    }

    #[test]
    fn test_command_error_variants() {
        let err = CommandError::InvalidArgument("--bad".to_string());
        assert!(err.to_string().contains("invalid argument"));

        let err = CommandError::ExecutionFailed("refused".to_string());
        assert!(err.to_string().contains("execution failed"));

        let err = CommandError::OutputFormat("json error".to_string());
        assert!(err.to_string().contains("output format"));
    }
}
