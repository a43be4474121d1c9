//! Drive the annotator without a display and print what the map would show.
//! Run with: cargo run --example headless_session

use annotator::types::{AnnotationKind, LayerId, LngLat};
use annotator::{Annotator, ControlAction, HeadlessMap, MapEvent, MapInitConfig, MemoryStorage};

fn main() -> Result<(), annotator::AnnotatorError> {
    annotator::init_logger();

    let storage = MemoryStorage::new();
    let mut annotator =
        Annotator::new(MapInitConfig::from_env(), storage.clone(), HeadlessMap::new())?;
    annotator.mount();

    annotator.press(ControlAction::Add(AnnotationKind::Points))?;
    annotator.handle_map_event(&click(37.6173, 55.7558))?;

    annotator.press(ControlAction::Add(AnnotationKind::Lines))?;
    annotator.handle_map_event(&click(37.60, 55.75))?;
    println!("Status: {}", annotator.tooltip().text().unwrap_or_default());
    annotator.handle_map_event(&click(37.64, 55.76))?;

    if let Some(hit) = annotator.engine().hit(LayerId::Lines, 0) {
        annotator.handle_map_event(&MapEvent::Click {
            lnglat: LngLat::new(37.62, 55.755),
            hit: Some(hit),
        })?;
    }
    if let Some(popup) = annotator.engine().popup() {
        println!("Popup at {:?}: {}", popup.anchor, popup.content);
    }

    for group in annotator.controls() {
        println!("{}: {:?}", group.label, group.icon);
    }

    // A second annotator over the same storage sees everything written above.
    let restarted = Annotator::new(MapInitConfig::default(), storage, HeadlessMap::new())?;
    println!(
        "After restart: {} points, {} lines",
        restarted.store().points().len(),
        restarted.store().lines().len()
    );

    Ok(())
}

fn click(lng: f64, lat: f64) -> MapEvent {
    MapEvent::Click {
        lnglat: LngLat::new(lng, lat),
        hit: None,
    }
}
