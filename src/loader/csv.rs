//! CSV loading.

use std::path::Path;

use crate::error::ProjectResult;
use crate::types::Record;

/// Load a headered CSV file into raw records.
///
/// Each record is keyed by the file's own header names; validation against a
/// schema happens later, at selection and projection time.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> ProjectResult<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader (file, stdin, in-memory buffer).
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> ProjectResult<Vec<Record>> {
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let raw = result?;

        let mut record = Record::new(user_row);
        for (header, value) in headers.iter().zip(raw.iter()) {
            record.insert(header, value);
        }
        records.push(record);
    }

    Ok(records)
}
