// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

mod params;
#[cfg(test)]
mod tests;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use params::*;

/// Name of the config.json file where we store per-instance settings.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the directory below the home directory holding the default data directory.
const DEFAULT_DATA_DIR: &str = ".qameti";

/// Version of the config file layout written by this build.
const CONFIG_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading/writing configuration failed")]
    IoError(#[from] io::Error),
    #[error("JSON (de)serialization failed")]
    SerializationError(#[from] serde_json::Error),
    #[error("fee of {0} basis points exceeds {}", BPS_DENOMINATOR)]
    FeeTooHigh(u32),
    #[error("max_participants of {0} is below the minimum of {1}")]
    MaxParticipantsTooLow(usize, usize),
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
    #[error("the {0} address must not be zero")]
    ZeroAddress(&'static str),
    #[error("could not expand path {0:?}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Local holds the per-instance settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Local {
    /// Tracks the current version of the defaults so we can migrate old -> new.
    pub version: u32,

    /// Protocol settings used when a new registry is initialized.
    pub params: Params,

    /// One of "trace", "debug", "info", "warn" or "error".
    pub log_level: String,

    /// Directory receiving a daily rolling log file; empty disables file logging.
    pub log_dir: String,
}

impl Default for Local {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            params: Params::default(),
            log_level: "info".to_owned(),
            log_dir: String::new(),
        }
    }
}

impl Local {
    /// Returns a Local config structure based on merging the defaults
    /// with settings loaded from the config file in the given dir.
    pub fn load_from_disk(custom: &impl AsRef<OsStr>) -> Result<Self> {
        Self::load_from_file(&Path::new(custom).join(CONFIG_FILENAME))
    }

    /// Like `load_from_disk`, but falls back to the defaults if the dir has no config file.
    pub fn load_or_default(custom: &impl AsRef<OsStr>) -> Result<Self> {
        let path = Path::new(custom).join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    pub fn load_from_file(file: &impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(file)?;
        let c = Self::load(&content)?;
        c.params.validate()?;
        c.log_level()?;
        Ok(c)
    }

    /// Parses a config, taking every missing field from the defaults.
    fn load(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Writes the Local settings into a root/CONFIG_FILENAME file.
    pub fn save_to_disk(&self, root: &impl AsRef<OsStr>) -> Result<()> {
        self.save_to_file(&Path::new(root).join(CONFIG_FILENAME))
    }

    /// Saves the config to a specific filename, allowing overriding the default name.
    pub fn save_to_file(&self, filename: &impl AsRef<Path>) -> Result<()> {
        let f = fs::File::create(filename)?;
        serde_json::to_writer_pretty(f, self)?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        tracing::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// The log directory with `~` and environment variables expanded, if file logging is on.
    pub fn log_dir(&self) -> Result<Option<PathBuf>> {
        if self.log_dir.is_empty() {
            return Ok(None);
        }
        expand_path(&self.log_dir).map(Some)
    }
}

/// Expands `~` and environment variables in a user-supplied path.
pub fn expand_path(path: &str) -> Result<PathBuf> {
    shellexpand::full(path)
        .map(|p| PathBuf::from(p.into_owned()))
        .map_err(|_| ConfigError::InvalidPath(path.to_owned()))
}

/// Retrieves the default data directory, `~/.qameti`.
pub fn get_default_data_dir() -> io::Result<PathBuf> {
    match dirs::home_dir() {
        Some(home_dir) => Ok(home_dir.join(DEFAULT_DATA_DIR)),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "current user has no home directory",
        )),
    }
}
