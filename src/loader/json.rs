//! JSON loading.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"date": "2024-01-01"}, ...]`
//! - Newline-delimited JSON (NDJSON): `{"date": "2024-01-01"}\n...`
//!
//! Scalar values are carried as their raw text so the projection step applies
//! the same coercion rules regardless of input format. JSON `null` is treated
//! as an absent column.

use std::fs;
use std::path::Path;

use crate::error::{ProjectError, ProjectResult};
use crate::types::Record;

/// Load a JSON dataset file into raw records.
pub fn load_json_from_path(path: impl AsRef<Path>) -> ProjectResult<Vec<Record>> {
    let text = fs::read_to_string(path)?;
    load_json_from_str(&text)
}

/// Load JSON from an in-memory string into raw records.
pub fn load_json_from_str(input: &str) -> ProjectResult<Vec<Record>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ProjectError::InvalidInput {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => records_from_values(&items),
            serde_json::Value::Object(_) => records_from_values(std::slice::from_ref(&v)),
            _ => Err(ProjectError::InvalidInput {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                ProjectError::InvalidInput {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            values.push(v);
        }
        records_from_values(&values)
    }
}

fn records_from_values(values: &[serde_json::Value]) -> ProjectResult<Vec<Record>> {
    let mut records = Vec::with_capacity(values.len());

    for (idx0, v) in values.iter().enumerate() {
        let row = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| ProjectError::InvalidInput {
            message: format!("row {row} is not a json object"),
        })?;

        let mut record = Record::new(row);
        for (name, value) in obj {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => record.insert(name, s.as_str()),
                // Numbers, bools, and nested structures keep their JSON text;
                // coercion decides later whether that text fits the field type.
                other => record.insert(name, other.to_string()),
            }
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::load_json_from_str;
    use crate::error::ProjectError;

    #[test]
    fn array_and_ndjson_load_to_identical_records() {
        let array = r#"[{"date": "2024-01-01", "clicks": 120}, {"date": "2024-01-02", "clicks": 95}]"#;
        let ndjson = "{\"date\": \"2024-01-01\", \"clicks\": 120}\n{\"date\": \"2024-01-02\", \"clicks\": 95}\n";

        let a = load_json_from_str(array).unwrap();
        let b = load_json_from_str(ndjson).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].get("clicks"), Some("120"));
        assert_eq!(a[1].row(), 2);
    }

    #[test]
    fn single_object_loads_as_one_record() {
        let records = load_json_from_str(r#"{"campaign": "spring_sale"}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("campaign"), Some("spring_sale"));
    }

    #[test]
    fn null_values_are_absent_columns() {
        let records = load_json_from_str(r#"[{"date": "2024-01-01", "clicks": null}]"#).unwrap();
        assert_eq!(records[0].get("clicks"), None);
    }

    #[test]
    fn rejects_scalar_roots_and_scalar_rows() {
        let err = load_json_from_str("42").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidInput { .. }));
        let err = load_json_from_str("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("not a json object"));
    }

    #[test]
    fn rejects_empty_input_and_bad_ndjson_lines() {
        let err = load_json_from_str("   ").unwrap_err();
        assert!(err.to_string().contains("empty"));
        let err = load_json_from_str("{\"a\": 1}\nnot json\n").unwrap_err();
        assert!(err.to_string().contains("invalid ndjson at line 2"));
    }
}
