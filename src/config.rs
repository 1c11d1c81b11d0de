use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::publish::token::DEFAULT_SECRET_SALT;

pub const DEFAULT_COOLDOWN_DAYS: u32 = 7;
pub const DEFAULT_DATA_DIR: &str = "./public/data";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Date must be in YYYY-MM-DD format, got {0:?}")]
    InvalidDate(String),
    #[error("Cooldown must be at least one day")]
    InvalidCooldown,
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ConfigError::InvalidDate(raw.to_string()))
}

/// Current date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Knobs for one daily run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub cooldown_days: u32,
    pub target_date: NaiveDate,
    pub secret_salt: String,
}

impl RunConfig {
    pub fn new(
        cooldown_days: u32,
        target_date: NaiveDate,
        secret_salt: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        // A zero window would prune today's own entry on the same run.
        if cooldown_days == 0 {
            return Err(ConfigError::InvalidCooldown);
        }
        Ok(Self {
            cooldown_days,
            target_date,
            secret_salt: secret_salt.into(),
        })
    }

    /// Defaults for `target_date`.
    pub fn for_date(target_date: NaiveDate) -> Self {
        Self {
            cooldown_days: DEFAULT_COOLDOWN_DAYS,
            target_date,
            secret_salt: DEFAULT_SECRET_SALT.to_string(),
        }
    }

    /// History is kept for twice the cooldown.
    pub fn retention_days(&self) -> u32 {
        self.cooldown_days.saturating_mul(2)
    }
}

/// Where the job reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    /// `None` disables subregion filtering for every region.
    pub subregions: Option<PathBuf>,
}

impl DataPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            subregions: None,
        }
    }

    pub fn with_subregions(mut self, path: impl Into<PathBuf>) -> Self {
        self.subregions = Some(path.into());
        self
    }

    pub fn regions(&self) -> PathBuf {
        self.data_dir.join("regions.json")
    }

    pub fn birds(&self) -> PathBuf {
        self.data_dir.join("birds.json")
    }

    pub fn history(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }

    pub fn daily(&self) -> PathBuf {
        self.data_dir.join("daily.json")
    }

    pub fn subregions(&self) -> Option<&Path> {
        self.subregions.as_deref()
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
