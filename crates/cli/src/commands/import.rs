use std::path::Path;
use std::time::Instant;

use rollbook_core::config::RollbookConfig;
use rollbook_core::db::repository::StudentStore;
use rollbook_core::db::sqlite::SqliteStudentStore;
use rollbook_core::db::DatabasePool;
use rollbook_core::import::ImportFormat;
use tracing::{error, info};

/// Run the `import` command: parse a student file and persist it to the database.
pub async fn run(config_path: &str, file: &str, dry_run: bool) -> anyhow::Result<()> {
    let config = RollbookConfig::load(Path::new(config_path))?;
    config.validate()?;

    info!("Loaded configuration from {}", config_path);

    let file_path = Path::new(file);
    println!("Reading students from: {}", file_path.display());

    let format = ImportFormat::from_filename(file)?;
    let bytes = std::fs::read(file_path)?;

    let start = Instant::now();
    let students = format.parse(&bytes)?;
    println!(
        "Parsed {} students in {:.1}s",
        students.len(),
        start.elapsed().as_secs_f64()
    );

    if dry_run {
        for student in &students {
            println!("  {} ({})", student.name, student.age);
        }
        println!("\nDry run mode - no data was written to the database.");
        return Ok(());
    }

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

    match store.insert_many(&students).await {
        Ok(inserted) => {
            println!("\nImport completed: {} students added", inserted);
            println!("Total students:   {}", store.count().await?);
        }
        Err(e) => {
            error!("Import failed: {e}");
            println!("Import failed: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}
