//! Schema registry.
//!
//! The dataset schema is fixed for the lifetime of an invocation: either the
//! built-in campaign schema ([`campaign_schema`]) or a replacement loaded from
//! a JSON definition file ([`schema_from_path`]). Every load path runs
//! [`validate`], so a malformed definition fails before any record is read.
//!
//! A definition file is a JSON array of field objects:
//!
//! ```json
//! [
//!     {"name": "date", "type": "date"},
//!     {"name": "campaign", "type": "string"},
//!     {"name": "clicks", "type": "integer"},
//!     {"name": "cost", "type": "float", "required": false}
//! ]
//! ```
//!
//! `required` defaults to `true`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ProjectError, ProjectResult};
use crate::types::{DataType, Field, Schema};

/// The built-in schema for campaign datasets.
///
/// All three fields are required; replace via `--schema` when the real
/// dataset differs.
pub fn campaign_schema() -> Schema {
    Schema::new(vec![
        Field::new("date", DataType::Date),
        Field::new("campaign", DataType::Utf8),
        Field::new("clicks", DataType::Int64),
    ])
}

#[derive(Debug, Deserialize)]
struct FieldDef {
    name: String,
    #[serde(rename = "type")]
    data_type: String,
    #[serde(default = "default_required")]
    required: bool,
}

fn default_required() -> bool {
    true
}

/// Load and validate a schema definition from a JSON file.
pub fn schema_from_path(path: impl AsRef<Path>) -> ProjectResult<Schema> {
    let text = fs::read_to_string(path)?;
    schema_from_json_str(&text)
}

/// Parse and validate a schema definition from JSON text.
pub fn schema_from_json_str(input: &str) -> ProjectResult<Schema> {
    let defs: Vec<FieldDef> =
        serde_json::from_str(input).map_err(|e| ProjectError::SchemaLoad {
            message: format!("invalid schema definition: {e}"),
        })?;

    let mut fields = Vec::with_capacity(defs.len());
    for def in defs {
        let data_type =
            data_type_from_name(&def.data_type).ok_or_else(|| ProjectError::SchemaLoad {
                message: format!(
                    "field '{}' has unknown type '{}' (expected string, integer, float, or date)",
                    def.name, def.data_type
                ),
            })?;
        fields.push(Field {
            name: def.name,
            data_type,
            required: def.required,
        });
    }

    let schema = Schema::new(fields);
    validate(&schema)?;
    Ok(schema)
}

/// Check a schema for structural problems: empty definition, blank names,
/// duplicate names.
pub fn validate(schema: &Schema) -> ProjectResult<()> {
    if schema.fields.is_empty() {
        return Err(ProjectError::SchemaLoad {
            message: "schema defines no fields".to_string(),
        });
    }

    for (i, field) in schema.fields.iter().enumerate() {
        if field.name.trim().is_empty() {
            return Err(ProjectError::SchemaLoad {
                message: format!("field at position {i} has an empty name"),
            });
        }
        if schema.fields[..i].iter().any(|f| f.name == field.name) {
            return Err(ProjectError::SchemaLoad {
                message: format!("duplicate field name '{}'", field.name),
            });
        }
    }

    Ok(())
}

fn data_type_from_name(name: &str) -> Option<DataType> {
    match name.to_ascii_lowercase().as_str() {
        "string" | "utf8" => Some(DataType::Utf8),
        "integer" | "int" | "int64" => Some(DataType::Int64),
        "float" | "float64" => Some(DataType::Float64),
        "date" => Some(DataType::Date),
        _ => None,
    }
}
