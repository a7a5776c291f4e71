//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! the API base URL, theme and log level, plus the location of the session
//! file that sits next to the configuration file.

mod error;

pub use error::ConfigError;

use crate::api::DEFAULT_BASE_URL;
use crate::error::AppResult;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const SESSION_FILE_NAME: &str = "session.json";
const DEFAULT_DIRECTORY_PATH: &str = ".config/schemes-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub theme_name: String,
    pub log_level: String,
    dir_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_theme_name() -> String {
    "tricolour".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding default values.
    ///
    pub fn new() -> Config {
        Config {
            api_base_url: default_api_base_url(),
            theme_name: default_theme_name(),
            log_level: default_log_level(),
            dir_path: None,
        }
    }

    /// Load the configuration from the default directory or the custom one if
    /// provided. A missing file is created with default values.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> AppResult<()> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }
        self.dir_path = Some(dir_path);

        let file_path = self.file_path()?;
        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.api_base_url = data.api_base_url;
            self.theme_name = data.theme_name;
            self.log_level = data.log_level;
        } else {
            self.save()?;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> AppResult<()> {
        let file_path = self.file_path()?;
        let data = FileSpec {
            api_base_url: self.api_base_url.clone(),
            theme_name: self.theme_name.clone(),
            log_level: self.log_level.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        let mut file = fs::File::create(&file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Returns the configured log level, rejecting unknown names.
    ///
    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Returns the path of the configuration file.
    ///
    pub fn file_path(&self) -> Result<PathBuf, ConfigError> {
        self.dir_path
            .as_ref()
            .map(|dir| dir.join(FILE_NAME))
            .ok_or(ConfigError::FilePathNotSet)
    }

    /// Returns the path of the durable session store.
    ///
    pub fn session_path(&self) -> Result<PathBuf, ConfigError> {
        self.dir_path
            .as_ref()
            .map(|dir| dir.join(SESSION_FILE_NAME))
            .ok_or(ConfigError::FilePathNotSet)
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> AppResult<PathBuf> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
