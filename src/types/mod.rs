pub mod identifiers;
pub mod records;

pub use identifiers::{AnswerToken, AnswerTokenError, BirdId, RegionId};
pub use records::{DailyAnswer, HistoryEntry};
