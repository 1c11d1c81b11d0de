use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Species code of a bird, unique within one region's catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirdId(String);

impl BirdId {
    pub fn new(id: impl Into<String>) -> Self {
        BirdId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BirdId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BirdId {
    fn from(s: &str) -> Self {
        BirdId(s.to_string())
    }
}

impl fmt::Display for BirdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Configured region key, e.g. `"us"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        RegionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        RegionId(s.to_string())
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerTokenError {
    #[error("Token must be exactly {expected} hex characters, got {0:?}", expected = AnswerToken::LEN)]
    InvalidFormat(String),
}

/// Published stand-in for the day's answer: 8 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerToken(String);

impl AnswerToken {
    pub const LEN: usize = 8;

    /// Render a folded 32-bit hash as a token.
    ///
    /// The hex rendering is already `LEN` characters long; the explicit
    /// truncation keeps the published width fixed if the fold ever widens.
    pub fn from_hash(hash: u32) -> Self {
        let hex = hex::encode(hash.to_be_bytes());
        AnswerToken(hex[..Self::LEN].to_string())
    }

    /// Parse a token typed by a user or read from a published file.
    /// Matching is case-insensitive, so the value is lowercased.
    pub fn parse(raw: &str) -> Result<Self, AnswerTokenError> {
        let trimmed = raw.trim();
        if trimmed.len() != Self::LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AnswerTokenError::InvalidFormat(raw.to_string()));
        }
        Ok(AnswerToken(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnswerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
