/*
 * Application settings: which item file to read, where to write the backup,
 * and how the histogram is drawn. Settings come from an optional JSON file in
 * the working directory; any field it leaves out keeps its default, and a
 * missing file means all defaults.
 *
 * Loading sits behind `ConfigManagerOperations` so callers and tests can
 * substitute their own source. `CoreConfigManager` reads the file with
 * serde_json.
 */
use super::histogram::{DEFAULT_MARKER, DEFAULT_NAME_WIDTH, HistogramStyle, MAX_NAME_WIDTH};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "grocer_tracker.json";
pub const DEFAULT_INPUT_FILENAME: &str = "CS210_Project_Three_Input_File.txt";
pub const DEFAULT_BACKUP_FILENAME: &str = "frequency.dat";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serde(serde_json::Error),
    InvalidSetting(String),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "Configuration parse error: {e}"),
            ConfigError::InvalidSetting(msg) => write!(f, "Invalid configuration setting: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input_file: PathBuf,
    pub backup_file: PathBuf,
    pub histogram_name_width: usize,
    pub histogram_marker: char,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            input_file: PathBuf::from(DEFAULT_INPUT_FILENAME),
            backup_file: PathBuf::from(DEFAULT_BACKUP_FILENAME),
            histogram_name_width: DEFAULT_NAME_WIDTH,
            histogram_marker: DEFAULT_MARKER,
        }
    }
}

impl AppConfig {
    pub fn histogram_style(&self) -> HistogramStyle {
        HistogramStyle {
            name_width: self.histogram_name_width,
            marker: self.histogram_marker,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidSetting(
                "input_file must not be empty".to_string(),
            ));
        }
        if self.backup_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidSetting(
                "backup_file must not be empty".to_string(),
            ));
        }
        if self.histogram_marker.is_whitespace() {
            return Err(ConfigError::InvalidSetting(
                "histogram_marker must be a visible character".to_string(),
            ));
        }
        if self.histogram_name_width > MAX_NAME_WIDTH {
            return Err(ConfigError::InvalidSetting(format!(
                "histogram_name_width must be at most {MAX_NAME_WIDTH}, got {}",
                self.histogram_name_width
            )));
        }
        Ok(())
    }
}

pub trait ConfigManagerOperations {
    /*
     * Loads settings from `CONFIG_FILENAME` inside `dir`. A missing file is not
     * an error and yields `AppConfig::default()`.
     */
    fn load_config(&self, dir: &Path) -> Result<AppConfig>;
}

pub struct CoreConfigManager {}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {}
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    fn load_config(&self, dir: &Path) -> Result<AppConfig> {
        let file_path = dir.join(CONFIG_FILENAME);
        log::trace!("CoreConfigManager: Loading settings from {file_path:?}");

        if !file_path.exists() {
            log::debug!("CoreConfigManager: Settings file {file_path:?} does not exist. Using defaults.");
            return Ok(AppConfig::default());
        }

        let file = File::open(&file_path)?;
        let config: AppConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        log::debug!("CoreConfigManager: Loaded settings {config:?} from {file_path:?}.");
        Ok(config)
    }
}
