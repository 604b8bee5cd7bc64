//! Core data model for field projection.
//!
//! Input rows are raw, name-keyed [`Record`]s; a [`Schema`] (a list of typed
//! [`Field`]s) describes what each value should coerce to; projection produces
//! ordered [`ProjectedRecord`]s.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// UTF-8 string.
    Utf8,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Calendar date (ISO 8601, `YYYY-MM-DD`).
    Date,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Utf8 => "string",
            DataType::Int64 => "integer",
            DataType::Float64 => "float",
            DataType::Date => "date",
        };
        f.write_str(name)
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
    /// Whether a record must carry a non-empty value for this field.
    pub required: bool,
}

impl Field {
    /// Create a new required field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            required: true,
        }
    }

    /// Create a new optional field (missing values project as [`Value::Null`]).
    pub fn optional(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            required: false,
        }
    }
}

/// The complete, ordered definition of the fields a record may contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Look up a field by name (case-sensitive exact match).
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`ProjectedRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value (permitted only for optional fields).
    Null,
    /// UTF-8 string.
    Utf8(String),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Calendar date.
    Date(NaiveDate),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Utf8(s) => serializer.serialize_str(s),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// One raw input row: field name -> raw string value, plus a 1-based row
/// number for diagnostics.
///
/// Values stay untyped here; coercion happens during projection so that a bad
/// cell fails that record alone, not the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    row: usize,
    values: HashMap<String, String>,
}

impl Record {
    /// Create an empty record for the given 1-based row number.
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: HashMap::new(),
        }
    }

    /// Create a record from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(row: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            row,
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set the raw value for a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw value for a field, if the input row carried that column.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// 1-based row number in the input (used in error messages).
    pub fn row(&self) -> usize {
        self.row
    }
}

/// One output row: `(field name, value)` pairs in selection order.
///
/// Unlike [`Record`], this is ordered; serializing it as JSON emits keys in
/// exactly this order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRecord {
    columns: Vec<(String, Value)>,
}

impl ProjectedRecord {
    /// Create a projected record from ordered columns.
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    /// Ordered `(name, value)` columns.
    pub fn columns(&self) -> &[(String, Value)] {
        &self.columns
    }

    /// Number of projected columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when no columns were projected.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Value by field name, if the field was selected.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

impl Serialize for ProjectedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
