//! Annotate a galileo map and show it in a window.
//! Run with: cargo run --example galileo_map --features egui

use annotator::types::{AnnotationKind, LngLat};
use annotator::{Annotator, ControlAction, GalileoMap, MapEvent, MapInitConfig, MemoryStorage};

fn main() -> Result<(), annotator::AnnotatorError> {
    annotator::init_logger();

    let config = MapInitConfig::from_env();
    let mut annotator = Annotator::new(config, MemoryStorage::new(), GalileoMap::new())?;
    annotator.mount();

    annotator.press(ControlAction::Add(AnnotationKind::Points))?;
    annotator.handle_map_event(&click(37.6173, 55.7558))?;

    annotator.press(ControlAction::Add(AnnotationKind::Lines))?;
    annotator.handle_map_event(&click(37.60, 55.75))?;
    annotator.handle_map_event(&click(37.64, 55.76))?;

    if let Some(position) = annotator.engine().navigation_control() {
        log::info!("Navigation control requested at {position:?}");
    }

    let Some(map) = annotator.into_engine().into_map() else {
        log::error!("Map was not mounted");
        return Ok(());
    };

    galileo_egui::InitBuilder::new(map)
        .init()
        .expect("failed to initialize");

    Ok(())
}

fn click(lng: f64, lat: f64) -> MapEvent {
    MapEvent::Click {
        lnglat: LngLat::new(lng, lat),
        hit: None,
    }
}
