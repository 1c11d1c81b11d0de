use serde::{Deserialize, Serialize};

use crate::types::identifiers::{BirdId, RegionId};

/// A candidate answer. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bird {
    pub id: BirdId,
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub audio_url: Vec<String>,
}

impl Bird {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Bird {
            id: BirdId::new(id),
            name: name.into(),
            scientific_name: String::new(),
            audio_url: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Region {
            id: RegionId::new(id),
            name: name.into(),
        }
    }
}

/// Membership reference inside a subregion list. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdRef {
    pub id: BirdId,
}
