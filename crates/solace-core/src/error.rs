//! Error types and exit codes for solace
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (IO, serialization, service transport)
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, missing record, reserved tag,
//!   invalid analysis response)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, missing record, reserved tag (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for SolaceError {
    fn from(err: rusqlite::Error) -> Self {
        SolaceError::Other(err.to_string())
    }
}

/// Errors that can occur during solace operations
#[derive(Error, Debug)]
pub enum SolaceError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("invalid store: {reason}")]
    InvalidStore { reason: String },

    #[error("record not found: {id}")]
    RecordNotFound { id: String },

    #[error("tag not found: {name}")]
    TagNotFound { name: String },

    #[error("tag is reserved: {name}")]
    ReservedTag { name: String },

    #[error("invalid analysis response: {reason}")]
    InvalidResponse { reason: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("service request failed: {0}")]
    Api(String),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl SolaceError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        SolaceError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed transaction operation
    pub fn transaction(operation: &str, error: impl std::fmt::Display) -> Self {
        SolaceError::FailedOperation {
            operation: format!("{} transaction", operation),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed field extraction from a database row
    pub fn field_extraction(field: &str, error: impl std::fmt::Display) -> Self {
        SolaceError::FailedOperation {
            operation: format!("get {}", field),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed operation on a specific record
    pub fn record_operation(
        record_id: &str,
        operation: &str,
        error: impl std::fmt::Display,
    ) -> Self {
        SolaceError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: format!("record {}", record_id),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        SolaceError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        SolaceError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        SolaceError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // Usage errors
            SolaceError::UsageError(_) | SolaceError::InvalidValue { .. } => ExitCode::Usage,

            // Data/store errors
            SolaceError::StoreNotFound { .. }
            | SolaceError::InvalidStore { .. }
            | SolaceError::RecordNotFound { .. }
            | SolaceError::TagNotFound { .. }
            | SolaceError::ReservedTag { .. }
            | SolaceError::InvalidResponse { .. }
            | SolaceError::AlreadyExists { .. } => ExitCode::Data,

            // Generic failures
            SolaceError::Io(_)
            | SolaceError::Json(_)
            | SolaceError::Toml(_)
            | SolaceError::Api(_)
            | SolaceError::FailedOperation { .. }
            | SolaceError::FailedOperationWithTarget { .. }
            | SolaceError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            SolaceError::UsageError(_) => "usage_error",
            SolaceError::InvalidValue { .. } => "invalid_value",
            SolaceError::StoreNotFound { .. } => "store_not_found",
            SolaceError::InvalidStore { .. } => "invalid_store",
            SolaceError::RecordNotFound { .. } => "record_not_found",
            SolaceError::TagNotFound { .. } => "tag_not_found",
            SolaceError::ReservedTag { .. } => "reserved_tag",
            SolaceError::InvalidResponse { .. } => "invalid_response",
            SolaceError::AlreadyExists { .. } => "already_exists",
            SolaceError::Io(_) => "io_error",
            SolaceError::Json(_) => "json_error",
            SolaceError::Toml(_) => "toml_error",
            SolaceError::Api(_) => "api_error",
            SolaceError::FailedOperation { .. } => "failed_operation",
            SolaceError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            SolaceError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for solace operations
pub type Result<T> = std::result::Result<T, SolaceError>;
