use std::collections::BTreeSet;

use chrono::NaiveDate;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use crate::catalog::SubregionMap;
use crate::types::identifiers::BirdId;

/// The subregion drawn for a region-day and its member bird ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubregionPick {
    pub name: String,
    pub bird_ids: BTreeSet<BirdId>,
}

/// Seed for the subregion draw: SHA-256 of `YYYY-MM-DD` + region id,
/// first 8 bytes big-endian.
pub fn subregion_seed(region: &str, date: NaiveDate) -> u64 {
    let seed_str = format!("{}{}", date.format("%Y-%m-%d"), region);
    let digest = Sha256::digest(seed_str.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// Pick a subregion for `region` on `date`.
///
/// Same inputs always give the same subregion. A fresh generator is built
/// per call, so nothing else in the run shares its state. Returns `None`
/// when the region has no subregions.
pub fn choose_subregion(
    map: &SubregionMap,
    region: &str,
    date: NaiveDate,
) -> Option<SubregionPick> {
    let subregions = map.subregions(region)?;

    let mut rng = ChaCha8Rng::seed_from_u64(subregion_seed(region, date));
    // BTreeMap keys iterate sorted
    let (name, members) = subregions.iter().choose(&mut rng)?;

    Some(SubregionPick {
        name: name.clone(),
        bird_ids: members.iter().map(|r| r.id.clone()).collect(),
    })
}
