//! Error types for the Rollbook core crate.

use thiserror::Error;

use crate::import::ImportError;

/// Top-level error type for all Rollbook core operations.
#[derive(Debug, Error)]
pub enum RollbookError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("import error: {0}")]
    Import(#[from] ImportError),

    #[error("export error: {0}")]
    Export(String),
}

/// A convenience Result alias that defaults to [`RollbookError`].
pub type Result<T> = std::result::Result<T, RollbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = RollbookError::Config("missing field".into());
        assert_eq!(err.to_string(), "configuration error: missing field");
    }

    #[test]
    fn io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RollbookError::from(io_err);
        assert!(matches!(err, RollbookError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn import_error_from() {
        let err = RollbookError::from(ImportError::UnsupportedFormat("pdf".into()));
        assert!(matches!(err, RollbookError::Import(_)));
        assert!(err.to_string().contains("pdf"));
    }

    #[test]
    fn export_error_display() {
        let err = RollbookError::Export("workbook write failed".into());
        assert_eq!(err.to_string(), "export error: workbook write failed");
    }

    #[test]
    fn result_alias_works() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(RollbookError::Config("bad".into()));
        assert!(err.is_err());
    }
}
