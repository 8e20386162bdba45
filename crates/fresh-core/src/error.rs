/// Core error types for the Fresh converters.
use std::path::PathBuf;

/// A specialized Result type for Fresh operations.
pub type FreshResult<T> = Result<T, FreshError>;

/// Top-level error type encompassing all converter stages.
#[derive(Debug, thiserror::Error)]
pub enum FreshError {
    #[error("parse error: {message} at {file}:{line}:{column}")]
    Parse {
        message: String,
        file: String,
        line: usize,
        column: usize,
    },

    #[error("keyframe has conflicting descriptors: {}", descriptors.join(", "))]
    ConflictingDescriptors { descriptors: Vec<String> },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("indentation underflow: {count} closing bracket(s) without a matching opener")]
    IndentUnderflow { count: usize },

    #[error("config error: {message} ({path:?})")]
    Config { message: String, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FreshError {
    /// Create a parse error with source location.
    pub fn parse(
        message: impl Into<String>,
        file: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        FreshError::Parse {
            message: message.into(),
            file: file.into(),
            line,
            column,
        }
    }

    /// Create a missing-attribute error.
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        FreshError::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        FreshError::Config {
            message: message.into(),
            path: path.into(),
        }
    }
}
