//! Map engine without a renderer.

use std::collections::{BTreeMap, HashMap};

use annotator_types::{LayerId, LngLat};
use geojson::{Feature, FeatureCollection};

use super::engine::{Cursor, FeatureHit, LayerSpec, MapEngine, MarkerHost, MarkerId};
use crate::config::MapInitConfig;

/// Open popup.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Position the popup points at.
    pub anchor: LngLat,
    /// Text shown in the popup.
    pub content: String,
}

/// Engine that keeps everything it is given in memory.
///
/// Used to drive the annotator without a display, for example from a test or a
/// command script, and to inspect what a real engine would be showing.
#[derive(Debug)]
pub struct HeadlessMap {
    container_ready: bool,
    basemap: Option<MapInitConfig>,
    layers: Vec<LayerSpec>,
    sources: HashMap<String, FeatureCollection>,
    source_updates: HashMap<String, usize>,
    hidden: Vec<LayerId>,
    markers: BTreeMap<MarkerId, LngLat>,
    next_marker: u64,
    popup: Option<Popup>,
    cursor: Cursor,
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessMap {
    /// Creates an engine whose container is ready.
    pub fn new() -> Self {
        Self {
            container_ready: true,
            basemap: None,
            layers: Vec::new(),
            sources: HashMap::new(),
            source_updates: HashMap::new(),
            hidden: Vec::new(),
            markers: BTreeMap::new(),
            next_marker: 0,
            popup: None,
            cursor: Cursor::Default,
        }
    }

    /// Creates an engine whose container does not exist yet.
    pub fn without_container() -> Self {
        Self {
            container_ready: false,
            ..Self::new()
        }
    }

    /// Makes the container available.
    pub fn attach_container(&mut self) {
        self.container_ready = true;
    }

    /// Configuration the basemap was created with.
    pub fn basemap(&self) -> Option<&MapInitConfig> {
        self.basemap.as_ref()
    }

    /// Registered layers.
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Current data of a source.
    pub fn source(&self, name: &str) -> Option<&FeatureCollection> {
        self.sources.get(name)
    }

    /// How many times the data of a source was replaced.
    pub fn source_updates(&self, name: &str) -> usize {
        self.source_updates.get(name).copied().unwrap_or_default()
    }

    /// Returns true unless the layer was hidden.
    pub fn is_layer_visible(&self, layer: LayerId) -> bool {
        !self.hidden.contains(&layer)
    }

    /// Features a layer currently draws. Hidden and unknown layers draw nothing.
    pub fn rendered_features(&self, layer: LayerId) -> Vec<&Feature> {
        let Some(spec) = self.layers.iter().find(|spec| spec.id == layer) else {
            return Vec::new();
        };
        if !self.is_layer_visible(layer) {
            return Vec::new();
        }

        self.source(spec.source)
            .map(|data| data.features.iter().filter(|f| spec.draws(f)).collect())
            .unwrap_or_default()
    }

    /// Hit for the `index`-th feature drawn by the layer, as a click on it would
    /// report.
    pub fn hit(&self, layer: LayerId, index: usize) -> Option<FeatureHit> {
        let features = self.rendered_features(layer);
        FeatureHit::from_feature(layer, features.get(index)?)
    }

    /// Markers currently shown.
    pub fn markers(&self) -> &BTreeMap<MarkerId, LngLat> {
        &self.markers
    }

    /// Open popup.
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}

impl MarkerHost for HeadlessMap {
    fn add_marker(&mut self, at: LngLat) -> MarkerId {
        self.next_marker += 1;
        let id = MarkerId(self.next_marker);
        self.markers.insert(id, at);
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }
}

impl MapEngine for HeadlessMap {
    fn container_ready(&self) -> bool {
        self.container_ready
    }

    fn init_basemap(&mut self, config: &MapInitConfig) {
        log::debug!("Headless basemap from {}", config.style_url);
        self.basemap = Some(config.clone());
    }

    fn add_layer(&mut self, layer: LayerSpec) {
        self.layers.push(layer);
    }

    fn set_source_data(&mut self, source: &str, data: FeatureCollection) {
        self.sources.insert(source.to_string(), data);
        *self.source_updates.entry(source.to_string()).or_default() += 1;
    }

    fn set_layer_visibility(&mut self, layer: LayerId, visible: bool) {
        self.hidden.retain(|hidden| *hidden != layer);
        if !visible {
            self.hidden.push(layer);
        }
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
