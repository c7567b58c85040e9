//! Error types for schema generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for schema generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Repository parse error.
    #[error("repository parse error: {0}")]
    Parse(#[from] orchestra_avro_repository::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema rendering error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field references a FIX datatype the repository does not define.
    #[error("Orchestra datatype not found for received type: {type_name} of Field: {field}")]
    MissingDatatype {
        /// Field name.
        field: String,
        /// FIX datatype name.
        type_name: String,
    },

    /// Input document does not exist or is not a file.
    #[error("{} must exist and be a file", path.display())]
    InputNotFound {
        /// Input path.
        path: PathBuf,
    },

    /// Output path exists but is not a directory.
    #[error("{} must be a directory", path.display())]
    NotADirectory {
        /// Output path.
        path: PathBuf,
    },
}

impl CodegenError {
    /// Creates a missing datatype error.
    pub fn missing_datatype(field: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::MissingDatatype {
            field: field.into(),
            type_name: type_name.into(),
        }
    }
}
