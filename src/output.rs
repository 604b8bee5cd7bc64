//! Output serialization.
//!
//! Writers sit behind the [`RecordWriter`] trait so the pipeline does not
//! care which format it is feeding. Two formats are provided:
//!
//! - [`JsonWriter`]: a `{"data": [...]}` envelope, pretty-printed with
//!   4-space indentation; object keys follow selection order.
//! - [`CsvWriter`]: a header row in selection order, nulls as empty cells.

use std::io::Write;

use serde::Serialize;

use crate::error::ProjectResult;
use crate::types::{ProjectedRecord, Value};

/// Sink for projected records.
///
/// [`RecordWriter::finish`] must be called exactly once after the last record;
/// some formats (JSON) only emit on finish.
pub trait RecordWriter {
    /// Accept one projected record.
    fn write(&mut self, record: &ProjectedRecord) -> ProjectResult<()>;

    /// Flush any buffered output and close the document.
    fn finish(&mut self) -> ProjectResult<()>;
}

#[derive(Serialize)]
struct Envelope<'a> {
    data: &'a [ProjectedRecord],
}

/// Writes projected records as one JSON document: `{"data": [...]}`.
///
/// Records are buffered and serialized on [`RecordWriter::finish`].
#[derive(Debug)]
pub struct JsonWriter<W: Write> {
    out: W,
    records: Vec<ProjectedRecord>,
}

impl<W: Write> JsonWriter<W> {
    /// Create a JSON writer over any byte sink.
    pub fn new(out: W) -> Self {
        Self {
            out,
            records: Vec::new(),
        }
    }
}

impl<W: Write> RecordWriter for JsonWriter<W> {
    fn write(&mut self, record: &ProjectedRecord) -> ProjectResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> ProjectResult<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut self.out, formatter);
        Envelope {
            data: &self.records,
        }
        .serialize(&mut ser)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes projected records as CSV with a header row.
///
/// The header comes from the first record's column names, which by
/// construction equal the selection plan order.
#[derive(Debug)]
pub struct CsvWriter<W: Write> {
    wtr: csv::Writer<W>,
    wrote_header: bool,
}

impl<W: Write> CsvWriter<W> {
    /// Create a CSV writer over any byte sink.
    pub fn new(out: W) -> Self {
        Self {
            wtr: csv::Writer::from_writer(out),
            wrote_header: false,
        }
    }
}

impl<W: Write> RecordWriter for CsvWriter<W> {
    fn write(&mut self, record: &ProjectedRecord) -> ProjectResult<()> {
        if !self.wrote_header {
            self.wtr
                .write_record(record.columns().iter().map(|(name, _)| name.as_str()))?;
            self.wrote_header = true;
        }
        self.wtr
            .write_record(record.columns().iter().map(|(_, value)| render_cell(value)))?;
        Ok(())
    }

    fn finish(&mut self) -> ProjectResult<()> {
        self.wtr.flush()?;
        Ok(())
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Utf8(s) => s.clone(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
    }
}
