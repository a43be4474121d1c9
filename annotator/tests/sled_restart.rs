//! Annotations written through `SledStorage` survive reopening the database.
#![cfg(all(feature = "sled", not(target_arch = "wasm32")))]

use std::path::{Path, PathBuf};

use annotator::storage::SledStorage;
use annotator::types::{AnnotationKind, Line, LngLat, Point};
use annotator::{Annotator, ControlAction, FixedClock, HeadlessMap, MapEvent, MapInitConfig};
use chrono::NaiveDate;

fn database_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("annotator-sled-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn start(dir: &Path) -> Annotator<SledStorage, HeadlessMap, FixedClock> {
    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
    let storage = SledStorage::open(dir).unwrap();
    let mut annotator =
        Annotator::with_clock(MapInitConfig::default(), storage, HeadlessMap::new(), clock)
            .unwrap();
    assert!(annotator.mount());
    annotator
}

fn click(annotator: &mut Annotator<SledStorage, HeadlessMap, FixedClock>, lng: f64, lat: f64) {
    annotator
        .handle_map_event(&MapEvent::Click {
            lnglat: LngLat::new(lng, lat),
            hit: None,
        })
        .unwrap();
}

#[test]
fn annotations_survive_reopening_database() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = database_dir();

    let mut annotator = start(&dir);
    annotator
        .press(ControlAction::Add(AnnotationKind::Points))
        .unwrap();
    click(&mut annotator, 37.0, 55.0);
    annotator
        .press(ControlAction::Add(AnnotationKind::Lines))
        .unwrap();
    click(&mut annotator, 1.0, 2.0);
    click(&mut annotator, 3.0, 4.0);
    drop(annotator);

    let mut restarted = start(&dir);
    assert_eq!(
        restarted.store().points(),
        [Point::new("15.10.2026", (37.0, 55.0))].as_slice()
    );
    assert_eq!(
        restarted.store().lines(),
        [Line::new("15.10.2026", (1.0, 2.0), (3.0, 4.0))].as_slice()
    );
    assert_eq!(
        restarted
            .engine()
            .source("lines")
            .map(|data| data.features.len()),
        Some(3)
    );

    restarted
        .press(ControlAction::DeleteAll(AnnotationKind::Lines))
        .unwrap();
    drop(restarted);

    let reopened = start(&dir);
    assert_eq!(reopened.store().points().len(), 1);
    assert!(reopened.store().lines().is_empty());
    drop(reopened);

    let _ = std::fs::remove_dir_all(&dir);
}
