use std::path::Path;

use rollbook_core::config::{
    DatabaseConfig, RollbookConfig, RollbookSection, ServerConfig, UploadConfig,
};
use rollbook_core::db::DatabasePool;
use tracing::info;

/// Run the `init` command: create data directory, write default config, and set up the database.
pub async fn run(data_dir: &str) -> anyhow::Result<()> {
    let data_path = Path::new(data_dir);

    // Create data directory if it doesn't exist
    if !data_path.exists() {
        std::fs::create_dir_all(data_path)?;
        info!("Created data directory: {}", data_dir);
    }

    let db_path = data_path.join("rollbook.db");
    let db_path_str = db_path.to_string_lossy().to_string();
    let upload_dir = data_path.join("uploads");
    std::fs::create_dir_all(&upload_dir)?;

    let config = RollbookConfig {
        rollbook: RollbookSection {
            instance_name: "My School".into(),
            data_dir: data_dir.to_string(),
            database: DatabaseConfig {
                path: Some(db_path_str.clone()),
            },
            uploads: UploadConfig {
                dir: Some(upload_dir.to_string_lossy().to_string()),
            },
        },
        server: ServerConfig::default(),
    };

    // Write config file
    let config_path = data_path.join("rollbook.toml");
    let toml_str = toml::to_string_pretty(&config)?;
    std::fs::write(&config_path, &toml_str)?;
    info!("Wrote configuration to {}", config_path.display());

    // Create database and run migrations
    let connect_str = format!("sqlite:{}?mode=rwc", db_path_str);
    DatabasePool::new_sqlite(&connect_str).await?;
    info!("Database initialized at {}", db_path_str);

    println!("Rollbook initialized successfully!");
    println!("  Data directory: {}", data_dir);
    println!("  Configuration: {}", config_path.display());
    println!("  Database:      {}", db_path_str);
    println!("  Uploads:       {}", upload_dir.display());
    println!();
    println!("Next steps:");
    println!("  1. Run `rollbook import --dry-run <file>` to preview a bulk import");
    println!("  2. Run `rollbook serve` to start the web console");

    Ok(())
}
