mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_SONG_DATA_DIR: &str = "data/song_data";
pub const DEFAULT_LOG_DATA_DIR: &str = "data/log_data";
pub const DEFAULT_EXTENSION: &str = "json";

/// CLI arguments that can be used for config resolution.
/// Every field can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub song_data: Option<PathBuf>,
    pub log_data: Option<PathBuf>,
    pub extension: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data_dir: PathBuf,
    pub log_data_dir: PathBuf,
    /// Data file extension, without the leading dot.
    pub extension: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_path must be specified via --db-path or in config file")
            })?;

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }
        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }

        let song_data_dir = file
            .song_data
            .map(PathBuf::from)
            .or_else(|| cli.song_data.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SONG_DATA_DIR));

        let log_data_dir = file
            .log_data
            .map(PathBuf::from)
            .or_else(|| cli.log_data.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DATA_DIR));

        let extension = file
            .extension
            .or_else(|| cli.extension.clone())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        let extension = extension.trim().trim_start_matches('.').to_string();
        if extension.is_empty() {
            bail!("extension must not be empty");
        }

        Ok(Self {
            db_path,
            song_data_dir,
            log_data_dir,
            extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_cli_only() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().join("sparkify.db")),
            song_data: Some(PathBuf::from("/data/songs")),
            log_data: Some(PathBuf::from("/data/logs")),
            extension: Some("jsonl".to_string()),
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.db_path, temp_dir.path().join("sparkify.db"));
        assert_eq!(config.song_data_dir, PathBuf::from("/data/songs"));
        assert_eq!(config.log_data_dir, PathBuf::from("/data/logs"));
        assert_eq!(config.extension, "jsonl");
    }

    #[test]
    fn test_resolve_defaults() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("sparkify.db")),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.song_data_dir, PathBuf::from(DEFAULT_SONG_DATA_DIR));
        assert_eq!(config.log_data_dir, PathBuf::from(DEFAULT_LOG_DATA_DIR));
        assert_eq!(config.extension, "json");
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/should/be/overridden.db")),
            song_data: Some(PathBuf::from("/cli/songs")),
            log_data: Some(PathBuf::from("/cli/logs")),
            extension: None,
        };
        let file_config = FileConfig {
            db_path: Some(temp_dir.path().join("toml.db").to_string_lossy().to_string()),
            song_data: Some("/toml/songs".to_string()),
            extension: Some(".ndjson".to_string()),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        assert_eq!(config.db_path, temp_dir.path().join("toml.db"));
        assert_eq!(config.song_data_dir, PathBuf::from("/toml/songs"));
        // CLI value used when TOML doesn't specify
        assert_eq!(config.log_data_dir, PathBuf::from("/cli/logs"));
        assert_eq!(config.extension, "ndjson");
    }

    #[test]
    fn test_resolve_missing_db_path_error() {
        let result = AppConfig::resolve(&CliConfig::default(), None);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("db_path must be specified"));
    }

    #[test]
    fn test_resolve_missing_db_directory_error() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/nonexistent/path/that/should/not/exist/x.db")),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_db_path_is_directory_error() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("is a directory"));
    }

    #[test]
    fn test_resolve_empty_extension_error() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("sparkify.db")),
            extension: Some(".".to_string()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("extension"));
    }
}
