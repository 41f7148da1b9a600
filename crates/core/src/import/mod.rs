//! Multi-format student import.
//!
//! Uploads are dispatched on filename extension to one of four formats,
//! parsed into a batch of [`NewStudent`] records, and persisted in a single
//! transaction: a failure at any row aborts the whole import with nothing
//! committed.

mod delimited;
mod encoding;
mod spreadsheet;
mod text;
mod xml;

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::db::repository::StudentStore;
use crate::error::Result;
use crate::models::NewStudent;

/// Errors produced while parsing an uploaded file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The filename extension is not one of xlsx, xml, csv, txt.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A data row or line could not be turned into a record. `row` is the
    /// 1-based index of the offending data row, counted after any header
    /// row and excluding blank lines.
    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// The file as a whole could not be read in its declared format.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// The supported import formats, resolved from the uploaded filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Spreadsheet,
    Xml,
    DelimitedText,
    PlainText,
}

impl ImportFormat {
    /// Resolve a format from a filename extension, case-insensitive. Only the
    /// extension is inspected; content type and magic bytes are not.
    pub fn from_filename(filename: &str) -> std::result::Result<Self, ImportError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| ImportError::UnsupportedFormat(filename.to_string()))?;

        match extension.as_str() {
            "xlsx" => Ok(ImportFormat::Spreadsheet),
            "xml" => Ok(ImportFormat::Xml),
            "csv" => Ok(ImportFormat::DelimitedText),
            "txt" => Ok(ImportFormat::PlainText),
            _ => Err(ImportError::UnsupportedFormat(filename.to_string())),
        }
    }

    /// Parse file bytes into a batch of records without touching the store.
    pub fn parse(&self, bytes: &[u8]) -> std::result::Result<Vec<NewStudent>, ImportError> {
        match self {
            ImportFormat::Spreadsheet => spreadsheet::parse(bytes),
            ImportFormat::Xml => xml::parse(bytes),
            ImportFormat::DelimitedText => delimited::parse(bytes),
            ImportFormat::PlainText => text::parse(bytes),
        }
    }
}

/// Import the contents of an uploaded file into the store.
///
/// The whole batch is written in one transaction; on success the returned
/// count is exact. On any parse or storage failure no rows are committed.
pub async fn import_bytes(
    store: &dyn StudentStore,
    filename: &str,
    bytes: &[u8],
) -> Result<usize> {
    let format = ImportFormat::from_filename(filename)?;
    let students = format.parse(bytes)?;
    let inserted = store.insert_many(&students).await?;
    info!(filename, inserted, "import committed");
    Ok(inserted)
}

/// Import a file from disk. Used by the CLI; the web console imports the
/// upload body directly.
pub async fn import_file(store: &dyn StudentStore, path: &Path) -> Result<usize> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_default();
    let bytes = std::fs::read(path)?;
    import_bytes(store, &filename, &bytes).await
}
