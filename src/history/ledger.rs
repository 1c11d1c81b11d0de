use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Bird;
use crate::types::identifiers::{BirdId, RegionId};
use crate::types::records::HistoryEntry;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Failed to read history {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Also raised for an entry with an unparseable date: skipping it would
    /// silently shrink the exclusion window.
    #[error("Invalid history file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-region append log of past answers.
///
/// Entries are only appended (`record`) and filtered (`prune`). Dates need
/// not be unique within a region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLedger {
    regions: BTreeMap<RegionId, Vec<HistoryEntry>>,
}

/// First date that is NOT inside a window of `days` ending at `target`.
/// Entries must be strictly after this date to count.
fn window_cutoff(target: NaiveDate, days: u32) -> NaiveDate {
    target
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the ledger. A missing file is an empty ledger, not an error.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "History file not found, starting empty");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(LedgerError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| LedgerError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Ids answered for `region` strictly after `target - cooldown_days`.
    pub fn recent_answers(
        &self,
        region: &str,
        target: NaiveDate,
        cooldown_days: u32,
    ) -> BTreeSet<BirdId> {
        let cutoff = window_cutoff(target, cooldown_days);
        self.entries(region)
            .iter()
            .filter(|entry| entry.date > cutoff)
            .map(|entry| entry.bird_id.clone())
            .collect()
    }

    pub fn record(
        &mut self,
        region: &RegionId,
        target: NaiveDate,
        bird: &Bird,
        subregion: Option<&str>,
    ) {
        self.regions
            .entry(region.clone())
            .or_default()
            .push(HistoryEntry {
                date: target,
                bird_id: bird.id.clone(),
                name: bird.name.clone(),
                subregion: subregion.map(str::to_string),
            });
    }

    /// Drop entries not strictly after `target - retention_days`.
    /// Returns how many entries were removed.
    pub fn prune(&mut self, region: &str, target: NaiveDate, retention_days: u32) -> usize {
        let cutoff = window_cutoff(target, retention_days);
        match self.regions.get_mut(region) {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|entry| entry.date > cutoff);
                before - entries.len()
            }
            None => 0,
        }
    }

    pub fn entries(&self, region: &str) -> &[HistoryEntry] {
        self.regions.get(region).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
