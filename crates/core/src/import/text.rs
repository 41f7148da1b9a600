//! Plain-text importer: one `name,age` pair per line.

use crate::models::NewStudent;

use super::encoding::decode;
use super::ImportError;

/// Parse a plain-text upload. Blank lines are skipped and do not advance the
/// row count; every other line must split on a comma into exactly two fields.
/// A line with zero or multiple commas fails the whole import.
pub(crate) fn parse(bytes: &[u8]) -> Result<Vec<NewStudent>, ImportError> {
    let text = decode(bytes);
    let mut students = Vec::new();
    let mut row = 0usize;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        row += 1;
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 2 {
            return Err(ImportError::MalformedRow {
                row,
                reason: format!(
                    "expected exactly one comma separating name and age, found {}",
                    fields.len() - 1
                ),
            });
        }

        let age = fields[1]
            .trim()
            .parse::<i64>()
            .map_err(|_| ImportError::MalformedRow {
                row,
                reason: format!("age {:?} is not an integer", fields[1]),
            })?;

        students.push(NewStudent::new(fields[0], age));
    }

    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_lines() {
        let students = parse(b"Bob,21\nCarol,22\n").unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0], NewStudent::new("Bob", 21));
        assert_eq!(students[1], NewStudent::new("Carol", 22));
    }

    #[test]
    fn skips_blank_lines() {
        let students = parse(b"Bob,21\n\n   \nCarol,22\n").unwrap();
        assert_eq!(students.len(), 2);
    }

    #[test]
    fn line_without_comma_fails() {
        let err = parse(b"Bob,21\nCarolTwentyTwo\n").unwrap_err();
        match err {
            ImportError::MalformedRow { row, .. } => assert_eq!(row, 2),
            other => panic!("expected MalformedRow, got {other}"),
        }
    }

    #[test]
    fn line_with_two_commas_fails() {
        let err = parse(b"Bob,21,extra\n").unwrap_err();
        assert!(matches!(err, ImportError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn non_integer_age_fails() {
        let err = parse(b"Bob,twenty\n").unwrap_err();
        assert!(matches!(err, ImportError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn blank_lines_do_not_advance_row_numbers() {
        let err = parse(b"Bob,21\n\n\nCarolTwentyTwo\n").unwrap_err();
        assert!(matches!(err, ImportError::MalformedRow { row: 2, .. }));
    }

    #[test]
    fn age_with_surrounding_space_is_accepted() {
        let students = parse(b"Bob, 21\n").unwrap();
        assert_eq!(students[0].age, 21);
    }

    #[test]
    fn decodes_non_utf8_bytes() {
        let students = parse(b"Zo\xeb,19\n").unwrap();
        assert_eq!(students[0].name, "Zoë");
    }

    #[test]
    fn empty_file_yields_no_records() {
        assert!(parse(b"").unwrap().is_empty());
    }
}
