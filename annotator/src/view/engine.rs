//! Boundary to the map rendering engine.

use annotator_types::features::date_added;
use annotator_types::{LayerId, LngLat};
use geojson::{Feature, FeatureCollection, Value};

use crate::config::MapInitConfig;

/// Identifier of a marker placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// Places DOM-anchored markers on the map.
pub trait MarkerHost {
    /// Shows a marker at the given position.
    fn add_marker(&mut self, at: LngLat) -> MarkerId;

    /// Removes a marker. Removing an unknown marker does nothing.
    fn remove_marker(&mut self, id: MarkerId);
}

/// Mouse cursor shown over the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Arrow cursor.
    #[default]
    Default,
    /// Hand shown over clickable features.
    Pointer,
    /// Closed hand shown while the map is dragged.
    Grab,
}

/// Geometry type a layer draws from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFilter {
    /// Only Point features.
    Point,
    /// Only LineString features.
    LineString,
}

impl GeometryFilter {
    /// Returns true if a geometry of this value passes the filter.
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (GeometryFilter::Point, Value::Point(_))
                | (GeometryFilter::LineString, Value::LineString(_))
        )
    }
}

/// Paint parameters of an annotation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerPaint {
    /// Filled circles with an outline.
    Circle {
        /// Circle radius in pixels.
        radius: f32,
        /// Fill color.
        color: &'static str,
        /// Outline width in pixels.
        stroke_width: f32,
        /// Outline color.
        stroke_color: &'static str,
    },
    /// Lines with round caps and joins.
    Line {
        /// Line width in pixels.
        width: f32,
        /// Line color.
        color: &'static str,
    },
}

/// Description of an annotation layer to register in the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSpec {
    /// Layer id.
    pub id: LayerId,
    /// Data source the layer draws.
    pub source: &'static str,
    /// Paint parameters.
    pub paint: LayerPaint,
    /// Geometry filter, `None` to draw every feature of the source.
    pub filter: Option<GeometryFilter>,
}

impl LayerSpec {
    /// Returns true if the layer draws the given feature.
    pub fn draws(&self, feature: &Feature) -> bool {
        match (&self.filter, &feature.geometry) {
            (None, _) => true,
            (Some(filter), Some(geometry)) => filter.matches(&geometry.value),
            (Some(_), None) => false,
        }
    }
}

/// Geometry of a feature under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum HitGeometry {
    /// A point feature.
    Point(LngLat),
    /// A line string feature.
    LineString(Vec<LngLat>),
}

/// Annotation feature found under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureHit {
    /// Layer the feature belongs to.
    pub layer: LayerId,
    /// The feature's `dateAdded` property.
    pub date_added: String,
    /// The feature's geometry.
    pub geometry: HitGeometry,
}

impl FeatureHit {
    /// Builds a hit from a feature of the layer's source. Returns `None` for
    /// features without a creation date or with an unsupported geometry.
    pub fn from_feature(layer: LayerId, feature: &Feature) -> Option<Self> {
        let date_added = date_added(feature)?.to_string();
        let geometry = match &feature.geometry.as_ref()?.value {
            Value::Point(position) => HitGeometry::Point(lnglat(position)?),
            Value::LineString(positions) => HitGeometry::LineString(
                positions
                    .iter()
                    .map(|p| lnglat(p))
                    .collect::<Option<Vec<_>>>()?,
            ),
            _ => return None,
        };

        Some(Self {
            layer,
            date_added,
            geometry,
        })
    }
}

fn lnglat(position: &[f64]) -> Option<LngLat> {
    match position {
        [lng, lat, ..] => Some(LngLat::new(*lng, *lat)),
        _ => None,
    }
}

/// Pointer event emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Pointer moved onto a feature of the layer.
    PointerEnter {
        /// Layer of the feature.
        layer: LayerId,
    },
    /// Pointer left the features of the layer.
    PointerLeave {
        /// Layer of the feature.
        layer: LayerId,
    },
    /// The map was clicked.
    Click {
        /// Geographic position of the click.
        lnglat: LngLat,
        /// Topmost annotation feature under the click, if any.
        hit: Option<FeatureHit>,
    },
    /// The user started dragging the map.
    DragStart,
    /// The user released the map after dragging.
    DragEnd,
}

/// Event types listeners can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`MapEvent::PointerEnter`].
    Enter,
    /// [`MapEvent::PointerLeave`].
    Leave,
    /// [`MapEvent::Click`].
    Click,
    /// [`MapEvent::DragStart`].
    DragStart,
    /// [`MapEvent::DragEnd`].
    DragEnd,
}

impl MapEvent {
    /// Type of the event.
    pub fn kind(&self) -> EventKind {
        match self {
            MapEvent::PointerEnter { .. } => EventKind::Enter,
            MapEvent::PointerLeave { .. } => EventKind::Leave,
            MapEvent::Click { .. } => EventKind::Click,
            MapEvent::DragStart => EventKind::DragStart,
            MapEvent::DragEnd => EventKind::DragEnd,
        }
    }

    /// Layer the event is scoped to, if any.
    pub fn layer(&self) -> Option<LayerId> {
        match self {
            MapEvent::PointerEnter { layer } | MapEvent::PointerLeave { layer } => Some(*layer),
            MapEvent::Click { hit, .. } => hit.as_ref().map(|hit| hit.layer),
            MapEvent::DragStart | MapEvent::DragEnd => None,
        }
    }
}

/// Map rendering engine.
///
/// The annotator treats the engine as a set of capabilities: it renders a styled
/// basemap, draws layers from named sources whose data is replaced as a whole,
/// shows markers and a single popup, and sets the cursor. Pointer events flow
/// back as [`MapEvent`] values passed to the annotator.
pub trait MapEngine: MarkerHost {
    /// Returns true once the surface the map is mounted into exists.
    fn container_ready(&self) -> bool;

    /// Creates the basemap view.
    fn init_basemap(&mut self, config: &MapInitConfig);

    /// Registers an annotation layer.
    fn add_layer(&mut self, layer: LayerSpec);

    /// Replaces all features of a source.
    fn set_source_data(&mut self, source: &str, data: FeatureCollection);

    /// Shows or hides a layer.
    fn set_layer_visibility(&mut self, layer: LayerId, visible: bool);

    /// Opens the popup at the anchor, replacing any open popup.
    fn show_popup(&mut self, anchor: LngLat, content: &str);

    /// Closes the popup if it is open.
    fn close_popup(&mut self);

    /// Sets the cursor over the map canvas.
    fn set_cursor(&mut self, cursor: Cursor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotator_types::features::lines_collection;
    use annotator_types::Line;

    #[test]
    fn hits_are_built_from_line_features() {
        let collection = lines_collection(&[Line::new("d", (1.0, 2.0), (3.0, 4.0))]);

        let line = FeatureHit::from_feature(LayerId::Lines, &collection.features[0]).unwrap();
        assert_eq!(
            line.geometry,
            HitGeometry::LineString(vec![LngLat::new(1.0, 2.0), LngLat::new(3.0, 4.0)])
        );

        let cap = FeatureHit::from_feature(LayerId::LineCaps, &collection.features[2]).unwrap();
        assert_eq!(cap.geometry, HitGeometry::Point(LngLat::new(3.0, 4.0)));
        assert_eq!(cap.date_added, "d");
    }

    #[test]
    fn filters_select_geometry_type() {
        let collection = lines_collection(&[Line::new("d", (1.0, 2.0), (3.0, 4.0))]);
        let caps = LayerSpec {
            id: LayerId::LineCaps,
            source: "lines",
            paint: LayerPaint::Circle {
                radius: 4.0,
                color: "#FFF",
                stroke_width: 3.0,
                stroke_color: "#252525",
            },
            filter: Some(GeometryFilter::Point),
        };

        let drawn = collection.features.iter().filter(|f| caps.draws(f)).count();
        assert_eq!(drawn, 2);
    }

    #[test]
    fn click_is_scoped_to_hit_layer() {
        let event = MapEvent::Click {
            lnglat: LngLat::new(0.0, 0.0),
            hit: None,
        };
        assert_eq!(event.layer(), None);
        assert_eq!(event.kind(), EventKind::Click);
    }
}
