use std::collections::{BTreeMap, BTreeSet};

use birdle_daily::catalog::{BirdRef, SubregionMap};
use birdle_daily::selection::{choose_subregion, subregion_seed};
use birdle_daily::types::{BirdId, RegionId};
use chrono::{Days, NaiveDate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn refs(ids: &[&str]) -> Vec<BirdRef> {
    ids.iter().map(|id| BirdRef { id: BirdId::from(*id) }).collect()
}

fn states() -> BTreeMap<String, Vec<BirdRef>> {
    (0..12)
        .map(|i| (format!("US-{i:02}"), refs(&[format!("bird{i}").as_str(), "amro1"])))
        .collect()
}

fn map_for(regions: &[&str]) -> SubregionMap {
    SubregionMap::new(
        regions
            .iter()
            .map(|r| (RegionId::from(*r), states()))
            .collect(),
    )
}

#[test]
fn same_date_and_region_is_stable() {
    let map = map_for(&["us"]);
    let d = date(2025, 6, 1);

    let first = choose_subregion(&map, "us", d).unwrap();
    for _ in 0..10 {
        assert_eq!(choose_subregion(&map, "us", d).unwrap(), first);
    }
    assert!(first.bird_ids.contains("amro1"));
}

#[test]
fn changing_the_date_can_change_the_pick() {
    let map = map_for(&["us"]);
    let start = date(2025, 6, 1);
    let picks: BTreeSet<String> = (0..30)
        .map(|i| choose_subregion(&map, "us", start + Days::new(i)).unwrap().name)
        .collect();
    assert!(picks.len() > 1);
}

#[test]
fn changing_the_region_can_change_the_pick() {
    let regions = ["us", "ca", "mx", "uk", "au", "nz", "de", "fr"];
    let map = map_for(&regions);
    let d = date(2025, 6, 1);
    let picks: BTreeSet<String> = regions
        .iter()
        .map(|r| choose_subregion(&map, r, d).unwrap().name)
        .collect();
    assert!(picks.len() > 1);
}

#[test]
fn insertion_order_does_not_matter() {
    let forward: BTreeMap<String, Vec<BirdRef>> = states();
    let mut reversed = BTreeMap::new();
    for (k, v) in states().into_iter().rev() {
        reversed.insert(k, v);
    }
    let a = SubregionMap::new(BTreeMap::from([(RegionId::from("us"), forward)]));
    let b = SubregionMap::new(BTreeMap::from([(RegionId::from("us"), reversed)]));

    let d = date(2025, 6, 1);
    assert_eq!(choose_subregion(&a, "us", d), choose_subregion(&b, "us", d));
}

#[test]
fn missing_or_empty_region_returns_none() {
    let mut regions = BTreeMap::new();
    regions.insert(RegionId::from("us"), BTreeMap::new());
    let map = SubregionMap::new(regions);

    let d = date(2025, 6, 1);
    assert!(choose_subregion(&map, "us", d).is_none());
    assert!(choose_subregion(&map, "uk", d).is_none());
}

#[test]
fn seed_depends_on_date_and_region() {
    let d = date(2025, 6, 1);
    assert_eq!(subregion_seed("us", d), subregion_seed("us", d));
    assert_ne!(subregion_seed("us", d), subregion_seed("uk", d));
    assert_ne!(subregion_seed("us", d), subregion_seed("us", d + Days::new(1)));
}
