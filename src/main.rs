use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sitedesk::config::DashboardConfig;
use sitedesk::import::{ImportMapping, ImportReport, ImportRow, import_rows};
use sitedesk::server::ServerBuilder;
use sitedesk::storage::InMemorySiteService;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "sitedesk")]
#[command(about = "Admin dashboard API for hosted client websites")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Spreadsheet rows (JSON array of objects) to load before serving
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Validate and import spreadsheet rows, then print the report
    Import {
        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON array of row objects keyed by column title
        rows: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::from_yaml_file(path),
        None => Ok(DashboardConfig::default()),
    }
}

fn read_rows(path: &Path) -> Result<Vec<ImportRow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rows from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of row objects", path.display()))
}

async fn run_import(
    service: &InMemorySiteService,
    config: &DashboardConfig,
    rows: &Path,
) -> Result<ImportReport> {
    let mapping = ImportMapping::with_overrides(&config.import.headers)?;
    let rows = read_rows(rows)?;
    import_rows(service, &mapping, &rows, None).await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sitedesk=info,tower_http=info")),
        )
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, seed } => {
            let config = load_config(config.as_deref())?;
            let service = InMemorySiteService::new();

            if let Some(seed) = seed {
                let report = run_import(&service, &config, &seed).await?;
                tracing::info!(saved = report.saved(), "Seeded sites");
            }

            ServerBuilder::new()
                .with_site_service(service)
                .with_config(config)
                .serve()
                .await
        }
        Commands::Import { config, rows } => {
            let config = load_config(config.as_deref())?;
            let service = InMemorySiteService::new();

            let report = run_import(&service, &config, &rows).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
