// Read-only inputs.
// Loaded once at startup, never written back.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::bird::{Bird, BirdRef, Region};
use crate::types::identifiers::{BirdId, RegionId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Duplicate bird ID {bird} in region {region}")]
    DuplicateBirdId { region: RegionId, bird: BirdId },
}

/// Read and deserialize one JSON input file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let bytes = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_regions(path: &Path) -> Result<Vec<Region>, CatalogError> {
    read_json(path)
}

/// Per-region bird lists.
/// Built through `new`/`load` so duplicate ids are always rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    regions: BTreeMap<RegionId, Vec<Bird>>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids within a region.
    pub fn new(regions: BTreeMap<RegionId, Vec<Bird>>) -> Result<Self, CatalogError> {
        for (region, birds) in &regions {
            let mut seen = BTreeSet::new();
            for bird in birds {
                if !seen.insert(&bird.id) {
                    return Err(CatalogError::DuplicateBirdId {
                        region: region.clone(),
                        bird: bird.id.clone(),
                    });
                }
            }
        }
        Ok(Catalog { regions })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let regions: BTreeMap<RegionId, Vec<Bird>> = read_json(path)?;
        Self::new(regions)
    }

    /// Birds for a region; empty when the region has no catalog entry.
    pub fn birds(&self, region: &str) -> &[Bird] {
        self.regions.get(region).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }
}

/// `region -> subregion name -> member birds`.
///
/// Subregion names are kept in a `BTreeMap` so that iteration order is
/// the sorted order the sampler draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubregionMap {
    regions: BTreeMap<RegionId, BTreeMap<String, Vec<BirdRef>>>,
}

impl SubregionMap {
    pub fn new(regions: BTreeMap<RegionId, BTreeMap<String, Vec<BirdRef>>>) -> Self {
        SubregionMap { regions }
    }

    /// Load the map, treating a missing file as "no subregion filtering".
    pub fn load_optional(path: &Path) -> Result<Option<Self>, CatalogError> {
        match fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "Subregions file not found, proceeding without subregion filtering"
                );
                Ok(None)
            }
            _ => {
                let map: SubregionMap = read_json(path)?;
                tracing::info!(path = %path.display(), "Loaded subregions data");
                Ok(Some(map))
            }
        }
    }

    pub fn subregions(&self, region: &str) -> Option<&BTreeMap<String, Vec<BirdRef>>> {
        self.regions.get(region)
    }
}
