//! Drops and recreates the warehouse tables.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use sparkify_etl::config::{AppConfig, CliConfig, FileConfig};
use sparkify_etl::{Statements, Warehouse};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "create-tables")]
#[command(about = "Drop and recreate the sparkify warehouse tables")]
struct Args {
    /// Path to TOML configuration file, only `db_path` is used.
    #[clap(long, value_parser = parse_path)]
    config: Option<PathBuf>,

    /// Path to the SQLite warehouse database file.
    #[clap(long, value_parser = parse_path)]
    db_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")?;

    let args = Args::parse();
    let file_config = args.config.as_deref().map(FileConfig::load).transpose()?;
    let cli = CliConfig {
        db_path: args.db_path,
        ..Default::default()
    };
    let config = AppConfig::resolve(&cli, file_config)?;

    info!("Resetting warehouse at {:?}", config.db_path);
    let warehouse = Warehouse::open_fresh(&config.db_path, Statements::new())?;
    let counts = warehouse.counts()?;
    info!(
        "Warehouse ready: {} songplays, {} users, {} songs, {} artists, {} time entries",
        counts.songplays, counts.users, counts.songs, counts.artists, counts.time
    );
    warehouse.close()
}
