//! Record extraction.
//!
//! [`project`] takes one raw [`Record`] and a [`SelectionPlan`] and produces a
//! [`ProjectedRecord`]: the selected fields in plan order, each value coerced
//! to its declared type. It is a pure function; failures are per-record and
//! never affect other records in the same run.

use chrono::NaiveDate;

use crate::error::{ProjectError, ProjectResult};
use crate::select::SelectionPlan;
use crate::types::{DataType, Field, ProjectedRecord, Record, Value};

/// Project the plan's fields out of one record, coercing each value.
///
/// Rules:
///
/// - absent column or empty-after-trim value: [`ProjectError::MissingValue`]
///   for a required field, [`Value::Null`] for an optional one
/// - present but uncoercible: [`ProjectError::TypeCoercion`] with the raw
///   value and expected type
/// - on success the result has exactly `plan.len()` columns in plan order
pub fn project(record: &Record, plan: &SelectionPlan) -> ProjectResult<ProjectedRecord> {
    let mut columns = Vec::with_capacity(plan.len());

    for field in plan.fields() {
        let raw = record.get(&field.name).map(str::trim).unwrap_or("");
        if raw.is_empty() {
            if field.required {
                return Err(ProjectError::MissingValue {
                    row: record.row(),
                    field: field.name.clone(),
                });
            }
            columns.push((field.name.clone(), Value::Null));
            continue;
        }
        columns.push((field.name.clone(), coerce(record.row(), field, raw)?));
    }

    Ok(ProjectedRecord::new(columns))
}

fn coerce(row: usize, field: &Field, raw: &str) -> ProjectResult<Value> {
    match field.data_type {
        DataType::Utf8 => Ok(Value::Utf8(raw.to_owned())),
        DataType::Int64 => raw
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|_| coercion_error(row, field, raw)),
        DataType::Float64 => raw
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|_| coercion_error(row, field, raw)),
        DataType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| coercion_error(row, field, raw)),
    }
}

fn coercion_error(row: usize, field: &Field, raw: &str) -> ProjectError {
    ProjectError::TypeCoercion {
        row,
        field: field.name.clone(),
        raw: raw.to_owned(),
        expected: field.data_type,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::project;
    use crate::error::ProjectError;
    use crate::schema::campaign_schema;
    use crate::select::SelectionPlan;
    use crate::types::{DataType, Field, Record, Schema, Value};

    fn spring_sale_record() -> Record {
        Record::from_pairs(
            2,
            [
                ("date", "2024-01-01"),
                ("campaign", "spring_sale"),
                ("clicks", "120"),
            ],
        )
    }

    #[test]
    fn projects_all_fields_in_plan_order() {
        let schema = campaign_schema();
        let plan = SelectionPlan::parse("date,campaign,clicks", &schema).unwrap();
        let projected = project(&spring_sale_record(), &plan).unwrap();

        assert_eq!(projected.len(), 3);
        assert_eq!(
            projected.columns()[0],
            (
                "date".to_string(),
                Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            )
        );
        assert_eq!(
            projected.columns()[1],
            ("campaign".to_string(), Value::Utf8("spring_sale".to_string()))
        );
        assert_eq!(projected.columns()[2], ("clicks".to_string(), Value::Int64(120)));
    }

    #[test]
    fn reorders_fields_to_match_plan() {
        let schema = campaign_schema();
        let plan = SelectionPlan::parse("clicks,date", &schema).unwrap();
        let projected = project(&spring_sale_record(), &plan).unwrap();

        let names: Vec<&str> = projected.columns().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["clicks", "date"]);
    }

    #[test]
    fn missing_required_field_fails_with_row_and_name() {
        let schema = campaign_schema();
        let plan = SelectionPlan::parse("date,clicks", &schema).unwrap();
        let record = Record::from_pairs(5, [("date", "2024-01-01")]);

        let err = project(&record, &plan).unwrap_err();
        match err {
            ProjectError::MissingValue { row, field } => {
                assert_eq!(row, 5);
                assert_eq!(field, "clicks");
            }
            other => panic!("expected MissingValue, got {other:?}"),
        }
    }

    #[test]
    fn empty_value_counts_as_missing_for_required_field() {
        let schema = campaign_schema();
        let plan = SelectionPlan::parse("clicks", &schema).unwrap();
        let record = Record::from_pairs(3, [("clicks", "   ")]);

        let err = project(&record, &plan).unwrap_err();
        assert!(matches!(err, ProjectError::MissingValue { .. }));
    }

    #[test]
    fn optional_field_projects_null_when_absent() {
        let schema = Schema::new(vec![
            Field::new("campaign", DataType::Utf8),
            Field::optional("cost", DataType::Float64),
        ]);
        let plan = SelectionPlan::parse("campaign,cost", &schema).unwrap();
        let record = Record::from_pairs(2, [("campaign", "spring_sale")]);

        let projected = project(&record, &plan).unwrap();
        assert_eq!(projected.get("cost"), Some(&Value::Null));
    }

    #[test]
    fn uncoercible_integer_reports_raw_value_and_type() {
        let schema = campaign_schema();
        let plan = SelectionPlan::parse("clicks", &schema).unwrap();
        let record = Record::from_pairs(7, [("clicks", "not_a_number")]);

        let err = project(&record, &plan).unwrap_err();
        match err {
            ProjectError::TypeCoercion {
                row,
                field,
                raw,
                expected,
            } => {
                assert_eq!(row, 7);
                assert_eq!(field, "clicks");
                assert_eq!(raw, "not_a_number");
                assert_eq!(expected, DataType::Int64);
            }
            other => panic!("expected TypeCoercion, got {other:?}"),
        }
    }

    #[test]
    fn uncoercible_date_fails() {
        let schema = campaign_schema();
        let plan = SelectionPlan::parse("date", &schema).unwrap();
        let record = Record::from_pairs(2, [("date", "01/02/2024")]);

        let err = project(&record, &plan).unwrap_err();
        assert!(matches!(err, ProjectError::TypeCoercion { .. }));
    }

    #[test]
    fn floats_parse_and_surrounding_whitespace_is_trimmed() {
        let schema = Schema::new(vec![Field::new("cost", DataType::Float64)]);
        let plan = SelectionPlan::parse("cost", &schema).unwrap();
        let record = Record::from_pairs(2, [("cost", " 12.5 ")]);

        let projected = project(&record, &plan).unwrap();
        assert_eq!(projected.get("cost"), Some(&Value::Float64(12.5)));
    }
}
