use thiserror::Error;

use crate::types::DataType;

/// Convenience result type for projection operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Error type returned across the projection pipeline.
///
/// Selection- and schema-time errors are fatal to the invocation; the
/// per-record variants ([`ProjectError::MissingValue`] and
/// [`ProjectError::TypeCoercion`]) are reported and skipped without stopping
/// the run. See [`ProjectError::is_recoverable`].
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The schema definition itself is malformed (duplicate names, unknown
    /// type names, empty field list).
    #[error("schema load error: {message}")]
    SchemaLoad { message: String },

    /// The caller requested a field that does not exist in the schema.
    #[error("unknown field '{field}'. valid fields are: {valid}")]
    UnknownField { field: String, valid: String },

    /// The `--fields` list itself is malformed (empty, or blank entries).
    #[error("invalid field selection: {message}")]
    InvalidSelection { message: String },

    /// The input data has a shape problem independent of any schema field
    /// (unknown format, non-object JSON rows, ...).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A record lacks a value for a required field.
    #[error("row {row} is missing a value for required field '{field}'")]
    MissingValue { row: usize, field: String },

    /// A record's value could not be coerced to the field's declared type.
    #[error("row {row} field '{field}': cannot coerce '{raw}' to {expected}")]
    TypeCoercion {
        row: usize,
        field: String,
        raw: String,
        expected: DataType,
    },

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON read/write error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectError {
    /// Per-record errors are reported and skipped; everything else ends the
    /// run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ProjectError::MissingValue { .. } | ProjectError::TypeCoercion { .. }
        )
    }
}
