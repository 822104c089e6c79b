//! Error types and exit codes for tagreport
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, parse)
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (input document does not describe what it should)
//!
//! The report transformations themselves never fail; errors only come from
//! loading inputs, configuration and command-line handling.

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tagreport binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - malformed input documents (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while loading inputs or running commands
#[derive(Error, Debug)]
pub enum TagReportError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("unknown report structure variant: {0} (expected: columnFirst or rowFirst)")]
    UnknownVariant(String),

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("invalid document {path:?}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl TagReportError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        TagReportError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        TagReportError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        TagReportError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an unsupported value
    pub fn unsupported(
        context: &str,
        value: impl std::fmt::Display,
        supported: impl std::fmt::Display,
    ) -> Self {
        TagReportError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Create an error for a document that parsed but has the wrong shape
    pub fn invalid_document(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        TagReportError::InvalidDocument {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TagReportError::UnknownFormat(_)
            | TagReportError::UnknownVariant(_)
            | TagReportError::UsageError(_)
            | TagReportError::InvalidValue { .. }
            | TagReportError::Unsupported { .. } => ExitCode::Usage,

            TagReportError::InvalidDocument { .. } | TagReportError::NotFound { .. } => {
                ExitCode::Data
            }

            TagReportError::Io(_)
            | TagReportError::Json(_)
            | TagReportError::Toml(_)
            | TagReportError::FailedOperationWithTarget { .. }
            | TagReportError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            TagReportError::UnknownFormat(_) => "unknown_format",
            TagReportError::UnknownVariant(_) => "unknown_variant",
            TagReportError::UsageError(_) => "usage_error",
            TagReportError::InvalidDocument { .. } => "invalid_document",
            TagReportError::NotFound { .. } => "not_found",
            TagReportError::Io(_) => "io_error",
            TagReportError::Json(_) => "json_error",
            TagReportError::Toml(_) => "toml_error",
            TagReportError::InvalidValue { .. } => "invalid_value",
            TagReportError::Unsupported { .. } => "unsupported",
            TagReportError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            TagReportError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
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

/// Result type alias for tagreport operations
pub type Result<T> = std::result::Result<T, TagReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(
            TagReportError::UnknownVariant("diagonal".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            TagReportError::invalid_document("f.json", "not an object").exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            TagReportError::Other("boom".into()).exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let err = TagReportError::not_found("widget", "abc");
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "not_found");
        assert_eq!(json["error"]["message"], "widget not found: abc");
    }
}
