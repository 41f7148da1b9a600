//! XLSX importer: header row followed by one record per data row.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::models::NewStudent;

use super::ImportError;

/// Parse an XLSX upload from the first worksheet.
///
/// Row 1 is a header and is skipped. When the header names `Name` and `Age`
/// columns (case-insensitive) those columns are used, so Rollbook's own
/// export re-imports cleanly with its leading ID column ignored; otherwise
/// columns 0 and 1 are taken as (name, age). Rows with an empty name cell
/// are skipped.
pub(crate) fn parse(bytes: &[u8]) -> Result<Vec<NewStudent>, ImportError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ImportError::InvalidDocument(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| ImportError::InvalidDocument(e.to_string()))?,
        None => return Ok(Vec::new()),
    };

    let mut rows = range.rows();
    let (name_col, age_col) = match rows.next() {
        Some(header) => resolve_columns(header),
        None => return Ok(Vec::new()),
    };

    let mut students = Vec::new();
    for (idx, cells) in rows.enumerate() {
        let row = idx + 1;

        let name = match cells.get(name_col) {
            None | Some(Data::Empty) => continue,
            Some(Data::String(s)) if s.is_empty() => continue,
            Some(cell) => cell.to_string(),
        };

        let age = match cells.get(age_col) {
            Some(cell) => cell_to_age(cell).ok_or_else(|| ImportError::MalformedRow {
                row,
                reason: format!("age cell {cell:?} is not an integer"),
            })?,
            None => {
                return Err(ImportError::MalformedRow {
                    row,
                    reason: "missing age cell".into(),
                })
            }
        };

        students.push(NewStudent::new(name, age));
    }

    Ok(students)
}

/// Locate the (name, age) column pair from the header row, defaulting to the
/// first two columns when the header does not name them.
fn resolve_columns(header: &[Data]) -> (usize, usize) {
    let position = |wanted: &str| {
        header.iter().position(|cell| match cell {
            Data::String(s) => s.trim().eq_ignore_ascii_case(wanted),
            _ => false,
        })
    };

    match (position("name"), position("age")) {
        (Some(name), Some(age)) => (name, age),
        _ => (0, 1),
    }
}

fn cell_to_age(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        Data::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
