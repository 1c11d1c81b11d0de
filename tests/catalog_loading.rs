use std::fs;

use birdle_daily::catalog::{load_regions, Catalog, CatalogError, SubregionMap};
use tempfile::tempdir;

#[test]
fn catalog_reads_camel_case_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("birds.json");
    fs::write(
        &path,
        r#"{ "us": [ { "id": "amro1", "name": "American Robin", "scientificName": "Turdus migratorius", "audioUrl": ["a.mp3", "b.mp3"] } ] }"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let birds = catalog.birds("us");
    assert_eq!(birds.len(), 1);
    assert_eq!(birds[0].scientific_name, "Turdus migratorius");
    assert_eq!(birds[0].audio_url, vec!["a.mp3", "b.mp3"]);
    assert!(catalog.birds("uk").is_empty());
    assert!(!catalog.contains_region("uk"));
}

#[test]
fn duplicate_ids_within_region_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("birds.json");
    fs::write(
        &path,
        r#"{ "us": [ { "id": "amro1", "name": "A" }, { "id": "amro1", "name": "B" } ],
             "uk": [ { "id": "eurrob1", "name": "European Robin" } ] }"#,
    )
    .unwrap();

    let err = Catalog::load(&path).unwrap_err();
    match err {
        CatalogError::DuplicateBirdId { region, bird } => {
            assert_eq!(region.as_str(), "us");
            assert_eq!(bird.as_str(), "amro1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn same_id_in_two_regions_is_fine() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("birds.json");
    fs::write(
        &path,
        r#"{ "us": [ { "id": "barswa", "name": "Barn Swallow" } ], "uk": [ { "id": "barswa", "name": "Barn Swallow" } ] }"#,
    )
    .unwrap();
    assert!(Catalog::load(&path).is_ok());
}

#[test]
fn missing_regions_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_regions(&dir.path().join("regions.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn subregion_refs_ignore_extra_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("subregions.json");
    fs::write(
        &path,
        r#"{ "us": { "US-NY": [ { "id": "amro1", "comName": "American Robin" } ] } }"#,
    )
    .unwrap();

    let map = SubregionMap::load_optional(&path).unwrap().unwrap();
    let states = map.subregions("us").unwrap();
    assert_eq!(states["US-NY"][0].id.as_str(), "amro1");
}

#[test]
fn invalid_subregions_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("subregions.json");
    fs::write(&path, "[1, 2").unwrap();
    assert!(matches!(
        SubregionMap::load_optional(&path),
        Err(CatalogError::Parse { .. })
    ));
}
