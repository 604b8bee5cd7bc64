//! Pipeline orchestration.
//!
//! One invocation is a single synchronous pass: for each loaded record,
//! project it against the plan; successes go to the writer, recoverable
//! failures are collected into the [`RunSummary`] and reported through an
//! optional [`RunObserver`]. A skipped record never stops the run; writer and
//! I/O errors do.

use crate::error::{ProjectError, ProjectResult};
use crate::output::RecordWriter;
use crate::project::project;
use crate::report::RunObserver;
use crate::select::SelectionPlan;
use crate::types::{ProjectedRecord, Record};

/// One record that failed projection and was skipped.
#[derive(Debug)]
pub struct SkippedRecord {
    /// 1-based row number in the input.
    pub row: usize,
    /// Why the record was skipped.
    pub error: ProjectError,
}

/// Outcome of a pipeline run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Number of records written to the output.
    pub written: usize,
    /// Records skipped with recoverable errors, in input order.
    pub skipped: Vec<SkippedRecord>,
}

impl RunSummary {
    /// True when every input record was written.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Lazily project records against a plan.
///
/// Yields `(row, result)` pairs in input order; nothing is evaluated until
/// the iterator is driven. Single-pass: re-running requires reloading the
/// dataset.
pub fn project_records<'p, I>(
    records: I,
    plan: &'p SelectionPlan,
) -> impl Iterator<Item = (usize, ProjectResult<ProjectedRecord>)> + 'p
where
    I: IntoIterator<Item = Record>,
    I::IntoIter: 'p,
{
    records.into_iter().map(move |record| {
        let row = record.row();
        (row, project(&record, plan))
    })
}

/// Drive a full run: project every record, write successes, collect skips.
///
/// Returns `Err` only for fatal failures (writer/IO errors); recoverable
/// per-record errors end up in the summary instead.
pub fn run(
    records: Vec<Record>,
    plan: &SelectionPlan,
    writer: &mut dyn RecordWriter,
    observer: Option<&dyn RunObserver>,
) -> ProjectResult<RunSummary> {
    let mut summary = RunSummary::default();

    for (row, result) in project_records(records, plan) {
        match result {
            Ok(projected) => {
                writer.write(&projected)?;
                summary.written += 1;
            }
            Err(error) if error.is_recoverable() => {
                if let Some(obs) = observer {
                    obs.on_skip(row, &error);
                }
                summary.skipped.push(SkippedRecord { row, error });
            }
            Err(error) => return Err(error),
        }
    }

    writer.finish()?;
    if let Some(obs) = observer {
        obs.on_complete(&summary);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{project_records, run};
    use crate::error::ProjectError;
    use crate::output::{JsonWriter, RecordWriter};
    use crate::schema::campaign_schema;
    use crate::select::SelectionPlan;
    use crate::types::{ProjectedRecord, Record};

    fn records() -> Vec<Record> {
        vec![
            Record::from_pairs(
                2,
                [
                    ("date", "2024-01-01"),
                    ("campaign", "spring_sale"),
                    ("clicks", "120"),
                ],
            ),
            // Missing clicks: skipped.
            Record::from_pairs(3, [("date", "2024-01-02"), ("campaign", "retargeting")]),
            // Uncoercible clicks: skipped.
            Record::from_pairs(
                4,
                [
                    ("date", "2024-01-03"),
                    ("campaign", "retargeting"),
                    ("clicks", "not_a_number"),
                ],
            ),
            Record::from_pairs(
                5,
                [
                    ("date", "2024-01-04"),
                    ("campaign", "brand"),
                    ("clicks", "42"),
                ],
            ),
        ]
    }

    #[test]
    fn bad_records_are_skipped_and_good_ones_written() {
        let schema = campaign_schema();
        let plan = SelectionPlan::parse("date,campaign,clicks", &schema).unwrap();

        let mut buf = Vec::new();
        let mut writer = JsonWriter::new(&mut buf);
        let summary = run(records(), &plan, &mut writer, None).unwrap();

        assert_eq!(summary.written, 2);
        assert_eq!(summary.skipped.len(), 2);
        assert!(!summary.is_clean());
        assert_eq!(summary.skipped[0].row, 3);
        assert!(matches!(
            summary.skipped[0].error,
            ProjectError::MissingValue { .. }
        ));
        assert_eq!(summary.skipped[1].row, 4);
        assert!(matches!(
            summary.skipped[1].error,
            ProjectError::TypeCoercion { .. }
        ));

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let data = parsed["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["campaign"], "spring_sale");
        assert_eq!(data[1]["clicks"], 42);
    }

    #[test]
    fn projection_is_lazy_and_in_input_order() {
        let schema = campaign_schema();
        let plan = SelectionPlan::parse("clicks", &schema).unwrap();

        let mut iter = project_records(records(), &plan);
        let (row, first) = iter.next().unwrap();
        assert_eq!(row, 2);
        assert!(first.is_ok());
        let (row, second) = iter.next().unwrap();
        assert_eq!(row, 3);
        assert!(second.is_err());
    }

    #[test]
    fn writer_failure_is_fatal() {
        struct FailingWriter;
        impl RecordWriter for FailingWriter {
            fn write(&mut self, _record: &ProjectedRecord) -> crate::error::ProjectResult<()> {
                Err(std::io::Error::other("sink closed").into())
            }
            fn finish(&mut self) -> crate::error::ProjectResult<()> {
                Ok(())
            }
        }

        let schema = campaign_schema();
        let plan = SelectionPlan::parse("date", &schema).unwrap();
        let err = run(records(), &plan, &mut FailingWriter, None).unwrap_err();
        assert!(matches!(err, ProjectError::Io(_)));
    }
}
