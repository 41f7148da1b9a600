//! XML importer: a root element containing repeated `<student>` elements.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::models::NewStudent;

use super::encoding::decode;
use super::ImportError;

#[derive(Clone, Copy)]
enum Field {
    Name,
    Age,
}

/// Parse an XML upload. Each `<student>` element must carry `<name>` and
/// `<age>` children with text content; a `<student>` missing either fails
/// the whole import. Elements outside `<student>` are ignored, and the root
/// element name is not inspected.
pub(crate) fn parse(bytes: &[u8]) -> Result<Vec<NewStudent>, ImportError> {
    let text = decode(bytes);
    let mut reader = Reader::from_str(&text);
    reader.config_mut().trim_text(true);

    let mut students = Vec::new();
    let mut index = 0usize;
    let mut in_student = false;
    let mut current_field: Option<Field> = None;
    let mut name: Option<String> = None;
    let mut age_text: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"student" => {
                    in_student = true;
                    index += 1;
                    name = None;
                    age_text = None;
                }
                b"name" if in_student => current_field = Some(Field::Name),
                b"age" if in_student => current_field = Some(Field::Age),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"student" {
                    return Err(ImportError::MalformedRow {
                        row: index + 1,
                        reason: "student element has no name or age".into(),
                    });
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(field) = current_field {
                    let value = t
                        .unescape()
                        .map_err(|e| ImportError::InvalidDocument(e.to_string()))?
                        .into_owned();
                    match field {
                        Field::Name => name = Some(value),
                        Field::Age => age_text = Some(value),
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"student" => {
                    in_student = false;
                    let student = finish_student(index, name.take(), age_text.take())?;
                    students.push(student);
                }
                b"name" | b"age" => current_field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ImportError::InvalidDocument(e.to_string())),
        }
    }

    Ok(students)
}

fn finish_student(
    index: usize,
    name: Option<String>,
    age_text: Option<String>,
) -> Result<NewStudent, ImportError> {
    let name = name.ok_or_else(|| ImportError::MalformedRow {
        row: index,
        reason: "student element is missing name text".into(),
    })?;
    let age_text = age_text.ok_or_else(|| ImportError::MalformedRow {
        row: index,
        reason: "student element is missing age text".into(),
    })?;
    let age = age_text
        .trim()
        .parse::<i64>()
        .map_err(|_| ImportError::MalformedRow {
            row: index,
            reason: format!("age {age_text:?} is not an integer"),
        })?;

    Ok(NewStudent::new(name, age))
}
