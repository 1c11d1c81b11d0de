pub mod ledger;

pub use ledger::{HistoryLedger, LedgerError};
