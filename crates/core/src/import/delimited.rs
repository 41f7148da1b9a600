//! CSV importer: header row followed by `name,age` data rows.

use crate::models::NewStudent;

use super::encoding::decode;
use super::ImportError;

/// Parse a CSV upload. The byte encoding is auto-detected, the header row is
/// skipped, and each data row contributes (name, age) from its first two
/// fields.
pub(crate) fn parse(bytes: &[u8]) -> Result<Vec<NewStudent>, ImportError> {
    let text = decode(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut students = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| ImportError::MalformedRow {
            row,
            reason: e.to_string(),
        })?;

        let name = record.get(0).ok_or_else(|| ImportError::MalformedRow {
            row,
            reason: "missing name field".into(),
        })?;
        let age_field = record.get(1).ok_or_else(|| ImportError::MalformedRow {
            row,
            reason: "missing age field".into(),
        })?;

        let age = age_field
            .trim()
            .parse::<i64>()
            .map_err(|_| ImportError::MalformedRow {
                row,
                reason: format!("age {age_field:?} is not an integer"),
            })?;

        students.push(NewStudent::new(name, age));
    }

    Ok(students)
}
