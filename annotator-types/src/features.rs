//! Projection of annotation lists into GeoJSON feature collections.
//!
//! The map engine never receives annotations directly. Every time a list changes
//! the whole collection for its source is rebuilt by one of these functions and
//! handed over as a replacement, so the displayed features are always a function
//! of the list alone.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::{Line, LngLat, Point};

/// Name of the feature property carrying the annotation's creation date.
pub const DATE_ADDED_PROPERTY: &str = "dateAdded";

/// Builds the collection for the `points` source: one Point feature per point.
pub fn points_collection(points: &[Point]) -> FeatureCollection {
    collection(
        points
            .iter()
            .map(|point| point_feature(&point.date_added, point.coords))
            .collect(),
    )
}

/// Builds the collection for the `lines` source.
///
/// Every line contributes a LineString followed by two Point features at its
/// vertices (the end caps). All three carry the line's creation date so clicks
/// on a cap inspect the line it belongs to.
pub fn lines_collection(lines: &[Line]) -> FeatureCollection {
    collection(
        lines
            .iter()
            .flat_map(|line| {
                [
                    line_feature(line),
                    point_feature(&line.date_added, line.start()),
                    point_feature(&line.date_added, line.end()),
                ]
            })
            .collect(),
    )
}

/// Creation date stored in a feature's properties, if any.
pub fn date_added(feature: &Feature) -> Option<&str> {
    feature
        .property(DATE_ADDED_PROPERTY)
        .and_then(JsonValue::as_str)
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn point_feature(date_added: &str, coords: LngLat) -> Feature {
    feature(date_added, Value::Point(coords.to_position()))
}

fn line_feature(line: &Line) -> Feature {
    feature(
        &line.date_added,
        Value::LineString(line.coords.iter().map(|c| c.to_position()).collect()),
    )
}

fn feature(date_added: &str, value: Value) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert(
        DATE_ADDED_PROPERTY.to_string(),
        JsonValue::String(date_added.to_string()),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
