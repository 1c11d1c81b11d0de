use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::identifiers::{AnswerToken, BirdId, RegionId};

/// One past answer, kept in plaintext in the private ledger.
/// Entries are appended and filtered, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    #[serde(rename = "id", alias = "birdId")]
    pub bird_id: BirdId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
}

/// The published record for one region and day. Never carries the bird id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAnswer {
    pub date: NaiveDate,
    pub region: RegionId,
    pub answer_hash: AnswerToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
}
