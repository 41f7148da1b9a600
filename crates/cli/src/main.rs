use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rollbook", about = "Student records manager", version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "rollbook.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Initialize Rollbook data directory and configuration
    Init {
        /// Data directory path
        #[arg(long, default_value = "/var/lib/rollbook")]
        data_dir: String,
    },
    /// Import students from a file (.xlsx, .xml, .csv, or .txt)
    Import {
        /// Path to the file to import
        file: String,
        /// Parse and report without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Export all students to an XLSX workbook
    Export {
        /// Output file path
        #[arg(long, default_value = "students.xlsx")]
        output: String,
    },
    /// Show record counts and database info
    Status,
    /// Start the web console server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir } => {
            commands::init::run(&data_dir).await?;
        }
        Commands::Import { file, dry_run } => {
            commands::import::run(&cli.config, &file, dry_run).await?;
        }
        Commands::Export { output } => {
            commands::export::run(&cli.config, &output).await?;
        }
        Commands::Status => {
            commands::status::run(&cli.config).await?;
        }
        Commands::Serve { port } => {
            commands::serve::run(&cli.config, port).await?;
        }
    }

    Ok(())
}
