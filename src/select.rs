//! Field selection.
//!
//! A [`SelectionPlan`] is the validated, ordered, deduplicated list of fields
//! one invocation must output. It is built once (before any record I/O) and
//! read-only afterwards; every selection failure is fatal to the invocation.

use crate::error::{ProjectError, ProjectResult};
use crate::types::{Field, Schema};

/// Validated, ordered, deduplicated field selection.
///
/// Guarantees:
///
/// - order matches the first occurrence of each name in the caller's input
/// - every entry is a field of the schema the plan was built against
/// - the plan is never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPlan {
    fields: Vec<Field>,
}

impl SelectionPlan {
    /// Build a plan from a comma-separated field list (the `--fields` value).
    pub fn parse(list: &str, schema: &Schema) -> ProjectResult<Self> {
        if list.trim().is_empty() {
            return Err(ProjectError::InvalidSelection {
                message: "at least one field must be requested".to_string(),
            });
        }
        Self::from_names(list.split(','), schema)
    }

    /// Build a plan from individual field names.
    ///
    /// Names are matched case-sensitively against the schema. Duplicates are
    /// silently dropped (first occurrence wins); an unknown name fails the
    /// whole selection, never returning a partial plan.
    pub fn from_names<I, S>(requested: I, schema: &Schema) -> ProjectResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields: Vec<Field> = Vec::new();

        for name in requested {
            let name = name.as_ref();
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(ProjectError::InvalidSelection {
                    message: format!(
                        "field names must be bare names without whitespace (got '{name}')"
                    ),
                });
            }

            match schema.field(name) {
                Some(field) => {
                    if !fields.iter().any(|f| f.name == field.name) {
                        fields.push(field.clone());
                    }
                }
                None => {
                    return Err(ProjectError::UnknownField {
                        field: name.to_string(),
                        valid: schema.field_names().collect::<Vec<_>>().join(", "),
                    });
                }
            }
        }

        if fields.is_empty() {
            return Err(ProjectError::InvalidSelection {
                message: "at least one field must be requested".to_string(),
            });
        }

        Ok(Self { fields })
    }

    /// Selected fields in output order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Selected field names in output order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Number of selected fields (always >= 1).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionPlan;
    use crate::error::ProjectError;
    use crate::schema::campaign_schema;

    #[test]
    fn preserves_first_occurrence_order() {
        let schema = campaign_schema();
        let plan = SelectionPlan::parse("clicks,date", &schema).unwrap();
        let names: Vec<&str> = plan.field_names().collect();
        assert_eq!(names, vec!["clicks", "date"]);
    }

    #[test]
    fn duplicate_selection_is_idempotent() {
        let schema = campaign_schema();
        let once = SelectionPlan::parse("date,campaign", &schema).unwrap();
        let twice = SelectionPlan::parse("date,date,campaign", &schema).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_field_lists_valid_names() {
        let schema = campaign_schema();
        let err = SelectionPlan::parse("clicks,unknown_field", &schema).unwrap_err();
        match err {
            ProjectError::UnknownField { field, valid } => {
                assert_eq!(field, "unknown_field");
                assert_eq!(valid, "date, campaign, clicks");
            }
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let schema = campaign_schema();
        let err = SelectionPlan::parse("Date", &schema).unwrap_err();
        assert!(matches!(err, ProjectError::UnknownField { .. }));
    }

    #[test]
    fn rejects_empty_list() {
        let schema = campaign_schema();
        let err = SelectionPlan::parse("", &schema).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidSelection { .. }));
        let err = SelectionPlan::parse("   ", &schema).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidSelection { .. }));
    }

    #[test]
    fn rejects_blank_and_padded_entries() {
        let schema = campaign_schema();
        let err = SelectionPlan::parse("date,,clicks", &schema).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidSelection { .. }));
        let err = SelectionPlan::parse("date, clicks", &schema).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidSelection { .. }));
    }
}
