use std::path::Path;

use rollbook_core::config::RollbookConfig;
use rollbook_core::db::repository::StudentStore;
use rollbook_core::db::sqlite::SqliteStudentStore;
use rollbook_core::db::DatabasePool;
use tracing::info;

/// Run the `status` command: show record counts and database info.
pub async fn run(config_path: &str) -> anyhow::Result<()> {
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

    let db_size = std::fs::metadata(path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());

    let store = match pool {
        DatabasePool::Sqlite(p) => SqliteStudentStore::new(p),
    };

    println!("Rollbook Status");
    println!("===============");
    println!("Instance: {}", config.rollbook.instance_name);
    println!("Database: SQLite ({})", db_size);
    println!("Path:     {}", path);
    println!("Uploads:  {}", config.upload_dir().display());
    println!();
    println!("Students: {}", store.count().await?);

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_displays_correctly() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[tokio::test]
    async fn status_fails_without_config() {
        let result = run("/nonexistent/rollbook.toml").await;
        assert!(result.is_err());
    }
}
