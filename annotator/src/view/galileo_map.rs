//! Map engine rendering through a galileo [`Map`].

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use annotator_types::{LayerId, LngLat};
use galileo::galileo_types::geo::impls::GeoPoint2d;
use galileo::galileo_types::geo::{Crs, NewGeoPoint};
use galileo::galileo_types::geometry::Geom;
use galileo::galileo_types::impls::Contour;
use galileo::layer::feature_layer::symbol::{CirclePointSymbol, SimpleContourSymbol};
use galileo::layer::feature_layer::{Feature, FeatureLayer};
use galileo::layer::raster_tile_layer::RasterTileLayerBuilder;
use galileo::tile_schema::TileIndex;
use galileo::{Color, Map, MapBuilder};
use geojson::{FeatureCollection, Value};

use super::engine::{Cursor, LayerPaint, LayerSpec, MapEngine, MarkerHost, MarkerId};
use super::headless::Popup;
use crate::config::{ControlPosition, MapInitConfig};

const MARKER_COLOR: &str = "#252525";
const MARKER_SIZE: f64 = 10.0;
const MAX_Z_LEVEL: f64 = 22.0;

/// Annotation geometry drawn by a galileo feature layer.
pub struct AnnotationFeature {
    geometry: Geom<GeoPoint2d>,
}

impl Feature for AnnotationFeature {
    type Geom = Geom<GeoPoint2d>;

    fn geometry(&self) -> &Self::Geom {
        &self.geometry
    }
}

/// Engine backed by a galileo map.
///
/// The basemap is a raster tile layer derived from the configured style (OSM
/// tiles when the style has no raster counterpart). Every annotation layer is
/// one galileo feature layer, circle layers get a second one underneath for the
/// outline. Annotation layers are rebuilt from the stored sources whenever a
/// source, a visibility flag or a marker changes.
///
/// Galileo has no popups, DOM markers or cursors: the popup and cursor are
/// kept here for the host window to draw, markers are drawn as an extra layer
/// on top.
pub struct GalileoMap {
    map: Option<Map>,
    basemap_layers: usize,
    navigation_control: Option<ControlPosition>,
    layers: Vec<LayerSpec>,
    sources: HashMap<String, FeatureCollection>,
    hidden: Vec<LayerId>,
    markers: BTreeMap<MarkerId, LngLat>,
    next_marker: u64,
    popup: Option<Popup>,
    cursor: Cursor,
}

impl Default for GalileoMap {
    fn default() -> Self {
        Self::new()
    }
}

impl GalileoMap {
    /// Creates an engine. The galileo map is built when the basemap is
    /// initialized.
    pub fn new() -> Self {
        Self {
            map: None,
            basemap_layers: 0,
            navigation_control: None,
            layers: Vec::new(),
            sources: HashMap::new(),
            hidden: Vec::new(),
            markers: BTreeMap::new(),
            next_marker: 0,
            popup: None,
            cursor: Cursor::Default,
        }
    }

    /// The galileo map, once built.
    pub fn map(&self) -> Option<&Map> {
        self.map.as_ref()
    }

    /// The galileo map, mutably.
    pub fn map_mut(&mut self) -> Option<&mut Map> {
        self.map.as_mut()
    }

    /// Takes the galileo map out, e.g. to hand it to a window.
    pub fn into_map(self) -> Option<Map> {
        self.map
    }

    /// Where the host should place the zoom control, if anywhere.
    pub fn navigation_control(&self) -> Option<ControlPosition> {
        self.navigation_control
    }

    /// Markers currently shown.
    pub fn markers(&self) -> &BTreeMap<MarkerId, LngLat> {
        &self.markers
    }

    /// Open popup.
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Cursor the host should show over the map.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn rebuild(&mut self) {
        let Some(map) = self.map.as_mut() else {
            return;
        };

        let layers = map.layers_mut();
        layers.truncate(self.basemap_layers);

        for spec in &self.layers {
            let Some(data) = self.sources.get(spec.source) else {
                continue;
            };

            let first = layers.len();
            let features = || features_for(spec, data);
            match spec.paint {
                LayerPaint::Circle {
                    radius,
                    color,
                    stroke_width,
                    stroke_color,
                } => {
                    let diameter = f64::from(radius) * 2.0;
                    let outline = diameter + f64::from(stroke_width) * 2.0;
                    layers.push(FeatureLayer::new(
                        features(),
                        CirclePointSymbol::new(parse_color(stroke_color), outline),
                        Crs::WGS84,
                    ));
                    layers.push(FeatureLayer::new(
                        features(),
                        CirclePointSymbol::new(parse_color(color), diameter),
                        Crs::WGS84,
                    ));
                }
                LayerPaint::Line { width, color } => {
                    layers.push(FeatureLayer::new(
                        features(),
                        SimpleContourSymbol::new(parse_color(color), f64::from(width)),
                        Crs::WGS84,
                    ));
                }
            }

            if self.hidden.contains(&spec.id) {
                for index in first..layers.len() {
                    layers.hide(index);
                }
            }
        }

        if !self.markers.is_empty() {
            let markers = self
                .markers
                .values()
                .map(|at| AnnotationFeature {
                    geometry: Geom::Point(geo_point(*at)),
                })
                .collect::<Vec<_>>();
            layers.push(FeatureLayer::new(
                markers,
                CirclePointSymbol::new(parse_color(MARKER_COLOR), MARKER_SIZE),
                Crs::WGS84,
            ));
        }

        map.redraw();
    }
}

impl MarkerHost for GalileoMap {
    fn add_marker(&mut self, at: LngLat) -> MarkerId {
        self.next_marker += 1;
        let id = MarkerId(self.next_marker);
        self.markers.insert(id, at);
        self.rebuild();
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        if self.markers.remove(&id).is_some() {
            self.rebuild();
        }
    }
}

impl MapEngine for GalileoMap {
    fn container_ready(&self) -> bool {
        true
    }

    fn init_basemap(&mut self, config: &MapInitConfig) {
        let tiles = match config.raster_tile_url_template() {
            Some(template) => {
                log::info!("Basemap tiles from {}", config.style_url);
                RasterTileLayerBuilder::new_rest(move |index: &TileIndex| {
                    tile_url(&template, index.z, index.x, index.y)
                })
            }
            None => {
                log::warn!(
                    "Style {} has no raster tiles, using OpenStreetMap",
                    config.style_url
                );
                RasterTileLayerBuilder::new_osm()
            }
        };

        let mut builder = MapBuilder::default()
            .with_latlon(config.center.lat, config.center.lng)
            .with_z_level(z_level(config.zoom_level));

        self.basemap_layers = 0;
        match tiles.build() {
            Ok(layer) => {
                builder = builder.with_layer(layer);
                self.basemap_layers = 1;
            }
            Err(err) => log::error!("Failed to create basemap layer: {err}"),
        }

        self.map = Some(builder.build());
        self.navigation_control = config.navigation_control;
        self.rebuild();
    }

    fn add_layer(&mut self, layer: LayerSpec) {
        self.layers.push(layer);
        self.rebuild();
    }

    fn set_source_data(&mut self, source: &str, data: FeatureCollection) {
        self.sources.insert(source.to_string(), data);
        self.rebuild();
    }

    fn set_layer_visibility(&mut self, layer: LayerId, visible: bool) {
        self.hidden.retain(|hidden| *hidden != layer);
        if !visible {
            self.hidden.push(layer);
        }
        self.rebuild();
    }

    fn show_popup(&mut self, anchor: LngLat, content: &str) {
        self.popup = Some(Popup {
            anchor,
            content: content.to_string(),
        });
    }

    fn close_popup(&mut self) {
        self.popup = None;
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}

/// Galileo features of the source that the layer draws.
fn features_for(spec: &LayerSpec, data: &FeatureCollection) -> Vec<AnnotationFeature> {
    data.features
        .iter()
        .filter(|feature| spec.draws(feature))
        .filter_map(|feature| feature.geometry.as_ref())
        .filter_map(|geometry| to_geom(&geometry.value))
        .map(|geometry| AnnotationFeature { geometry })
        .collect()
}

fn to_geom(value: &Value) -> Option<Geom<GeoPoint2d>> {
    match value {
        Value::Point(position) => Some(Geom::Point(position_point(position)?)),
        Value::LineString(positions) => {
            let points = positions
                .iter()
                .map(|position| position_point(position))
                .collect::<Option<Vec<_>>>()?;
            Some(Geom::Contour(Contour::open(points)))
        }
        _ => None,
    }
}

fn position_point(position: &[f64]) -> Option<GeoPoint2d> {
    match position {
        [lng, lat, ..] => Some(geo_point(LngLat::new(*lng, *lat))),
        _ => None,
    }
}

fn geo_point(at: LngLat) -> GeoPoint2d {
    GeoPoint2d::latlon(at.lat, at.lng)
}

fn z_level(zoom: f64) -> u32 {
    zoom.round().clamp(0.0, MAX_Z_LEVEL) as u32
}

fn tile_url(template: &str, z: impl Display, x: impl Display, y: impl Display) -> String {
    template
        .replace("{z}", &z.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

fn parse_color(hex: &str) -> Color {
    let [r, g, b, a] = rgba_from_hex(hex).unwrap_or_else(|| {
        log::warn!("Invalid color '{hex}', using black");
        [0, 0, 0, 255]
    });
    Color::rgba(r, g, b, a)
}

/// Parses `#RGB` and `#RRGGBB` colors.
fn rgba_from_hex(hex: &str) -> Option<[u8; 4]> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut rgb = [0; 3];
            for (i, value) in rgb.iter_mut().enumerate() {
                *value = channel(&digits[i..=i])? * 17;
            }
            Some([rgb[0], rgb[1], rgb[2], 255])
        }
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
            255,
        ]),
        _ => None,
    }
}
