//! Daily answer generation for a bird-call guessing game.
//!
//! `birdle-daily` picks one bird per configured region (optionally narrowed
//! to a date-chosen subregion), avoids repeating any bird inside a cooldown
//! window, and publishes only a salted 8-character token in place of the
//! answer. The plaintext answer goes to a private, pruned history ledger.
//!
//! Subregion choice is deterministic per date and region; the bird draw is
//! not. The two use separate generators.

pub mod catalog;
pub mod config;
pub mod history;
pub mod publish;
pub mod selection;
pub mod types;
