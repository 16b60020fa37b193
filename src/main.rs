use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sparkify_etl::config::{self, AppConfig, FileConfig};
use sparkify_etl::{process_data, process_log_file, process_song_file, Statements, Warehouse};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
#[command(name = "sparkify-etl")]
#[command(about = "Load song and log JSON files into the sparkify star schema")]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite warehouse database file, created if missing.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Root directory of the song-metadata files.
    #[clap(long, value_parser = parse_path)]
    pub song_data: Option<PathBuf>,

    /// Root directory of the activity log files.
    #[clap(long, value_parser = parse_path)]
    pub log_data: Option<PathBuf>,

    /// Extension of the data files to load.
    #[clap(long)]
    pub extension: Option<String>,
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            db_path: args.db_path.clone(),
            song_data: args.song_data.clone(),
            log_data: args.log_data.clone(),
            extension: args.extension.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let app_config = AppConfig::resolve(&(&cli_args).into(), file_config)?;

    info!("Opening warehouse database at {:?}...", app_config.db_path);
    let mut warehouse = Warehouse::open(&app_config.db_path, Statements::new())?;

    info!("Loading song data from {:?}...", app_config.song_data_dir);
    let songs = process_data(
        &mut warehouse,
        &app_config.song_data_dir,
        &app_config.extension,
        process_song_file,
    )
    .context("Song data load failed")?;

    info!("Loading log data from {:?}...", app_config.log_data_dir);
    let logs = process_data(
        &mut warehouse,
        &app_config.log_data_dir,
        &app_config.extension,
        process_log_file,
    )
    .context("Log data load failed")?;

    let counts = warehouse.counts()?;
    info!("");
    info!("Load Summary");
    info!("============");
    info!(
        "Song files: {} processed, {} rows inserted, {} ignored",
        songs.files_processed, songs.rows_inserted, songs.rows_ignored
    );
    info!(
        "Log files: {} processed ({} records), {} rows inserted, {} ignored",
        logs.files_processed, logs.records, logs.rows_inserted, logs.rows_ignored
    );
    if logs.unmatched_songs > 0 {
        warn!(
            "{} songplays could not be matched to a loaded song",
            logs.unmatched_songs
        );
    }
    info!("");
    info!("Database contains:");
    info!("  {} songplays", counts.songplays);
    info!("  {} users", counts.users);
    info!("  {} songs", counts.songs);
    info!("  {} artists", counts.artists);
    info!("  {} time entries", counts.time);

    warehouse.close()
}
