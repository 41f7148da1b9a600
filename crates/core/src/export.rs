//! Spreadsheet export: the full record set as an XLSX workbook.

use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::{Result, RollbookError};
use crate::models::Student;

const SHEET_NAME: &str = "Students";

/// Build an XLSX workbook in memory: a `Students` sheet with a fixed
/// `ID | Name | Age` header row followed by one row per record, in the
/// given retrieval order.
pub fn export_students(students: &[Student]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(students).map_err(xlsx_err)?;
    workbook.save_to_buffer().map_err(xlsx_err)
}

/// Write the spreadsheet export to a file path. Used by the CLI; the web
/// console serves the in-memory variant as an attachment.
pub fn export_students_to_file(students: &[Student], path: &Path) -> Result<()> {
    let mut workbook = build_workbook(students).map_err(xlsx_err)?;
    workbook.save(path).map_err(xlsx_err)
}

fn build_workbook(students: &[Student]) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    sheet.write_string(0, 0, "ID")?;
    sheet.write_string(0, 1, "Name")?;
    sheet.write_string(0, 2, "Age")?;

    for (idx, student) in students.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_number(row, 0, student.id as f64)?;
        sheet.write_string(row, 1, &student.name)?;
        sheet.write_number(row, 2, student.age as f64)?;
    }

    Ok(workbook)
}

fn xlsx_err(e: XlsxError) -> RollbookError {
    RollbookError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ImportFormat;

    fn sample_students() -> Vec<Student> {
        vec![
            Student {
                id: 1,
                name: "Bob".to_string(),
                age: 21,
            },
            Student {
                id: 2,
                name: "Carol".to_string(),
                age: 22,
            },
        ]
    }

    #[test]
    fn export_produces_workbook_bytes() {
        let bytes = export_students(&sample_students()).unwrap();
        // XLSX files are zip archives.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn export_empty_store() {
        let bytes = export_students(&[]).unwrap();
        let reimported = ImportFormat::Spreadsheet.parse(&bytes).unwrap();
        assert!(reimported.is_empty());
    }

    #[test]
    fn export_then_reimport_preserves_name_age_pairs() {
        // The ID column is intentionally ignored on reimport.
        let students = sample_students();
        let bytes = export_students(&students).unwrap();

        let reimported = ImportFormat::Spreadsheet.parse(&bytes).unwrap();
        assert_eq!(reimported.len(), students.len());
        for (original, back) in students.iter().zip(&reimported) {
            assert_eq!(back.name, original.name);
            assert_eq!(back.age, original.age);
        }
    }

    #[test]
    fn export_to_file_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.xlsx");
        export_students_to_file(&sample_students(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let reimported = ImportFormat::Spreadsheet.parse(&bytes).unwrap();
        assert_eq!(reimported.len(), 2);
    }
}
