//! End-to-end annotation scenarios over in-memory storage and a headless map.

use annotator::types::{AnnotationKind, Line, LngLat, Point};
use annotator::{
    Annotator, ControlAction, DrawState, FixedClock, HeadlessMap, KeyValueStorage, MapEvent,
    MapInitConfig, MemoryStorage,
};
use chrono::NaiveDate;

type TestAnnotator = Annotator<MemoryStorage, HeadlessMap, FixedClock>;

fn start(storage: &MemoryStorage) -> TestAnnotator {
    let _ = env_logger::builder().is_test(true).try_init();

    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
    let mut annotator = Annotator::with_clock(
        MapInitConfig::default(),
        storage.clone(),
        HeadlessMap::new(),
        clock,
    )
    .unwrap();
    assert!(annotator.mount());
    annotator
}

fn click(annotator: &mut TestAnnotator, lng: f64, lat: f64) {
    annotator
        .handle_map_event(&MapEvent::Click {
            lnglat: LngLat::new(lng, lat),
            hit: None,
        })
        .unwrap();
}

fn stored<T: serde::de::DeserializeOwned>(storage: &MemoryStorage, key: &str) -> Option<Vec<T>> {
    storage
        .get(key)
        .unwrap()
        .map(|blob| serde_json::from_str(&blob).unwrap())
}

#[test]
fn empty_storage_starts_empty() {
    let storage = MemoryStorage::new();
    let annotator = start(&storage);

    assert!(annotator.store().points().is_empty());
    assert!(annotator.store().lines().is_empty());
    assert!(annotator.session().is_idle());
    assert!(!annotator.tooltip().is_visible());
}

#[test]
fn adding_a_point() {
    let storage = MemoryStorage::new();
    let mut annotator = start(&storage);

    annotator
        .press(ControlAction::Add(AnnotationKind::Points))
        .unwrap();
    assert_eq!(annotator.session().state(), DrawState::AddingPoint);
    click(&mut annotator, 37.0, 55.0);

    let expected = vec![Point::new("15.10.2026", (37.0, 55.0))];
    assert_eq!(annotator.store().points(), expected.as_slice());
    assert!(annotator.session().is_idle());
    assert_eq!(stored::<Point>(&storage, "points"), Some(expected));
    assert_eq!(
        annotator
            .engine()
            .source("points")
            .map(|data| data.features.len()),
        Some(1)
    );
}

#[test]
fn adding_a_line() {
    let storage = MemoryStorage::new();
    let mut annotator = start(&storage);

    annotator
        .press(ControlAction::Add(AnnotationKind::Lines))
        .unwrap();
    click(&mut annotator, 37.0, 55.0);
    assert_eq!(annotator.engine().markers().len(), 1);
    assert!(annotator.store().lines().is_empty());

    click(&mut annotator, 38.0, 56.0);

    let expected = vec![Line::new("15.10.2026", (37.0, 55.0), (38.0, 56.0))];
    assert_eq!(annotator.store().lines(), expected.as_slice());
    assert!(annotator.engine().markers().is_empty());
    assert!(annotator.session().is_idle());
    assert_eq!(stored::<Line>(&storage, "lines"), Some(expected));
    assert_eq!(
        annotator
            .engine()
            .source("lines")
            .map(|data| data.features.len()),
        Some(3)
    );
}

#[test]
fn deleting_points_removes_the_key() {
    let storage = MemoryStorage::new();
    let mut annotator = start(&storage);

    annotator
        .press(ControlAction::Add(AnnotationKind::Points))
        .unwrap();
    click(&mut annotator, 37.0, 55.0);
    annotator
        .press(ControlAction::Add(AnnotationKind::Lines))
        .unwrap();
    click(&mut annotator, 37.0, 55.0);
    click(&mut annotator, 38.0, 56.0);
    let lines = annotator.store().lines().to_vec();

    annotator
        .press(ControlAction::DeleteAll(AnnotationKind::Points))
        .unwrap();

    assert!(annotator.store().points().is_empty());
    assert_eq!(storage.get("points").unwrap(), None);
    assert_eq!(annotator.store().lines(), lines.as_slice());
    assert_eq!(stored::<Line>(&storage, "lines"), Some(lines));
    assert_eq!(
        annotator
            .engine()
            .source("points")
            .map(|data| data.features.len()),
        Some(0)
    );
}

#[test]
fn toggling_lines_discards_pending_vertex() {
    let storage = MemoryStorage::new();
    let mut annotator = start(&storage);

    annotator
        .press(ControlAction::Add(AnnotationKind::Lines))
        .unwrap();
    click(&mut annotator, 37.0, 55.0);
    assert_eq!(annotator.session().pending_vertices(), 1);

    annotator
        .press(ControlAction::ToggleVisibility(AnnotationKind::Lines))
        .unwrap();

    assert!(annotator.session().is_idle());
    assert_eq!(annotator.session().pending_vertices(), 0);
    assert!(annotator.engine().markers().is_empty());
    assert!(annotator.store().lines().is_empty());
    assert_eq!(storage.get("lines").unwrap(), None);

    // A click after the reset must not start or finish a line.
    click(&mut annotator, 38.0, 56.0);
    assert!(annotator.store().lines().is_empty());
    assert!(annotator.engine().markers().is_empty());
}

#[test]
fn annotations_survive_restart() {
    let storage = MemoryStorage::new();
    let mut annotator = start(&storage);

    annotator
        .press(ControlAction::Add(AnnotationKind::Points))
        .unwrap();
    click(&mut annotator, 37.0, 55.0);
    annotator
        .press(ControlAction::Add(AnnotationKind::Points))
        .unwrap();
    click(&mut annotator, 30.0, 60.0);
    annotator
        .press(ControlAction::Add(AnnotationKind::Lines))
        .unwrap();
    click(&mut annotator, 1.0, 2.0);
    click(&mut annotator, 3.0, 4.0);

    let points = annotator.store().points().to_vec();
    let lines = annotator.store().lines().to_vec();
    drop(annotator);

    let restarted = start(&storage);
    assert_eq!(restarted.store().points(), points.as_slice());
    assert_eq!(restarted.store().lines(), lines.as_slice());
    assert_eq!(
        restarted
            .engine()
            .source("lines")
            .map(|data| data.features.len()),
        Some(3)
    );
}

#[test]
fn cleared_kind_is_empty_after_restart() {
    let storage = MemoryStorage::new();
    let mut annotator = start(&storage);

    annotator
        .press(ControlAction::Add(AnnotationKind::Points))
        .unwrap();
    click(&mut annotator, 37.0, 55.0);
    annotator
        .press(ControlAction::DeleteAll(AnnotationKind::Points))
        .unwrap();
    drop(annotator);

    let restarted = start(&storage);
    assert!(restarted.store().points().is_empty());
}

#[test]
fn corrupt_storage_fails_startup() {
    let storage = MemoryStorage::new();
    storage.set("points", "{not json").unwrap();

    let result = Annotator::new(MapInitConfig::default(), storage, HeadlessMap::new());
    assert!(matches!(
        result,
        Err(annotator::AnnotatorError::CorruptData { key: "points", .. })
    ));
}

#[test]
fn mount_waits_for_container() {
    let storage = MemoryStorage::new();
    storage
        .set("points", r#"[{"dateAdded":"01.01.2024","coords":[37,55]}]"#)
        .unwrap();

    let engine = HeadlessMap::without_container();
    let mut annotator = Annotator::new(MapInitConfig::default(), storage, engine).unwrap();
    assert!(!annotator.mount());
    assert!(annotator.engine().source("points").is_none());
}
