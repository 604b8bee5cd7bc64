//! Dataset loading.
//!
//! The loader reads one input source into a sequence of raw [`crate::types::Record`]s.
//! It is deliberately schema-blind: it keys values by the input's own column
//! names and leaves type coercion to [`crate::project`], so a bad cell fails
//! that record during projection instead of failing the whole load.
//!
//! Most callers should use [`load_from_path`], which auto-detects the format
//! by file extension (or takes an explicit [`InputFormat`] override).
//! Format-specific functions live in [`csv`] and [`json`].

pub mod csv;
pub mod json;

use std::path::Path;

use crate::error::{ProjectError, ProjectResult};
use crate::types::Record;

pub use csv::{load_csv_from_path, load_csv_from_reader};
pub use json::{load_json_from_path, load_json_from_str};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Headered comma-separated values.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
}

impl InputFormat {
    /// Parse an input format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Load a dataset from a file, inferring the format from the extension when
/// `format` is `None`.
pub fn load_from_path(
    path: impl AsRef<Path>,
    format: Option<InputFormat>,
) -> ProjectResult<Vec<Record>> {
    let path = path.as_ref();
    let format = match format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    match format {
        InputFormat::Csv => csv::load_csv_from_path(path),
        InputFormat::Json => json::load_json_from_path(path),
    }
}

fn infer_format_from_path(path: &Path) -> ProjectResult<InputFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ProjectError::InvalidInput {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    InputFormat::from_extension(ext).ok_or_else(|| ProjectError::InvalidInput {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}
