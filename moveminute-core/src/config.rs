use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::activities::BASE_ACTIVITIES;

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the CSV log file.
    pub log_file: PathBuf,
    /// How dates are shown on the dashboard. Storage always uses `%Y-%m-%d`.
    pub date_format: String,
    /// The activity suggestion list. Should end with the "Other" sentinel
    /// so learned labels can be slotted in before it.
    pub activities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    log_file: Option<PathBuf>,
    date_format: Option<String>,
    activities: Option<Vec<String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native)
    /// and apply defaults for anything the file leaves out.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|_| FileConfig {
            log_file: None,
            date_format: None,
            activities: None,
        });

        let log_file = file_config.log_file.unwrap_or_else(Self::default_log_file);
        let date_format = file_config
            .date_format
            .unwrap_or_else(|| "%Y-%m-%d".to_string());
        let activities = file_config
            .activities
            .unwrap_or_else(|| BASE_ACTIVITIES.iter().map(|s| s.to_string()).collect());

        Ok(Self {
            log_file,
            date_format,
            activities,
        })
    }

    /// Default log file: `{data_dir}/moveminute/exercise_log.csv`
    /// - macOS:   `~/Library/Application Support/moveminute/...`
    /// - Linux:   `$XDG_DATA_HOME/moveminute/...` or `~/.local/share/moveminute/...`
    /// - Windows: `%APPDATA%\moveminute\...`
    fn default_log_file() -> PathBuf {
        let mut p = if let Some(base) = BaseDirs::new() {
            base.data_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        };
        p.push("moveminute");
        p.push("exercise_log.csv");
        p
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("moveminute")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("moveminute").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig {
            log_file: None,
            date_format: None,
            activities: None,
        })
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
