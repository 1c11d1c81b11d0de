pub mod run;
pub mod token;
pub mod writer;

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::history::LedgerError;

pub use run::{run_daily, DailyPublisher, RegionOutcome, RunInputs, RunReport};
pub use token::{
    answer_token, find_bird_by_token, fold_hash, SaltedFoldToken, TokenScheme,
    DEFAULT_SECRET_SALT,
};

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
