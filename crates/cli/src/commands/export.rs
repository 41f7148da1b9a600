use std::path::Path;

use rollbook_core::config::RollbookConfig;
use rollbook_core::db::repository::StudentStore;
use rollbook_core::db::sqlite::SqliteStudentStore;
use rollbook_core::db::DatabasePool;
use rollbook_core::export::export_students_to_file;
use tracing::{error, info};

/// Run the `export` command: write all students to an XLSX workbook.
pub async fn run(config_path: &str, output: &str) -> anyhow::Result<()> {
    let config = RollbookConfig::load(Path::new(config_path))?;
    config.validate()?;

    info!("Loaded configuration from {}", config_path);

    let path = config
        .rollbook
        .database
        .path
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("SQLite path not configured"))?;
    let connect_str = format!("sqlite:{}?mode=rwc", path);
    let pool = DatabasePool::new_sqlite(&connect_str).await?;

    info!("Connected to database");

    let store = match pool {
        DatabasePool::Sqlite(p) => SqliteStudentStore::new(p),
    };

    let students = store.list(None).await?;
    println!("Exporting {} students", students.len());

    let output_path = Path::new(output);
    match export_students_to_file(&students, output_path) {
        Ok(()) => {
            println!("Workbook written to: {}", output_path.display());
        }
        Err(e) => {
            error!("Export failed: {e}");
            println!("Export failed: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}
