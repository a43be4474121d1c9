//! Keeps the engine's layers in sync with the annotation store.

use annotator_types::features::{lines_collection, points_collection};
use annotator_types::{AnnotationKind, LayerId, LngLat};

use super::engine::{
    Cursor, EventKind, FeatureHit, GeometryFilter, HitGeometry, LayerPaint, LayerSpec, MapEngine,
    MapEvent,
};
use super::events::{EventRegistry, EventScope, ListenerId, ListenerTarget};
use crate::config::MapInitConfig;
use crate::store::{AnnotationStore, StoreChange};

const PRIMARY_COLOR: &str = "#252525";
const SECONDARY_COLOR: &str = "#FFF";

/// Annotation layers in the order they are added to the engine.
pub const ANNOTATION_LAYERS: [LayerSpec; 3] = [
    LayerSpec {
        id: LayerId::Points,
        source: "points",
        paint: LayerPaint::Circle {
            radius: 6.0,
            color: SECONDARY_COLOR,
            stroke_width: 4.0,
            stroke_color: PRIMARY_COLOR,
        },
        filter: None,
    },
    LayerSpec {
        id: LayerId::Lines,
        source: "lines",
        paint: LayerPaint::Line {
            width: 3.0,
            color: PRIMARY_COLOR,
        },
        filter: Some(GeometryFilter::LineString),
    },
    LayerSpec {
        id: LayerId::LineCaps,
        source: "lines",
        paint: LayerPaint::Circle {
            radius: 4.0,
            color: SECONDARY_COLOR,
            stroke_width: 3.0,
            stroke_color: PRIMARY_COLOR,
        },
        filter: Some(GeometryFilter::Point),
    },
];

/// Layers whose features react to hover and click, in subscription order.
const INTERACTIVE_LAYERS: [LayerId; 3] = [LayerId::Points, LayerId::LineCaps, LayerId::Lines];

/// Visibility of the annotation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerVisibility {
    /// Point layer is shown.
    pub points: bool,
    /// Line and line cap layers are shown.
    pub lines: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            points: true,
            lines: true,
        }
    }
}

impl LayerVisibility {
    /// Visibility of the kind.
    pub fn get(&self, kind: AnnotationKind) -> bool {
        match kind {
            AnnotationKind::Points => self.points,
            AnnotationKind::Lines => self.lines,
        }
    }

    fn flip(&mut self, kind: AnnotationKind) -> bool {
        let flag = match kind {
            AnnotationKind::Points => &mut self.points,
            AnnotationKind::Lines => &mut self.lines,
        };
        *flag = !*flag;
        *flag
    }
}

/// Binds the annotation store to a map engine.
///
/// The engine's annotation sources are only ever written here, always with the
/// full projection of the current store lists.
pub struct MapViewBinding<E: MapEngine> {
    engine: E,
    events: EventRegistry,
    mounted: bool,
    visibility: LayerVisibility,
    popup_open: bool,
    draw_listener: Option<ListenerId>,
}

impl<E: MapEngine> MapViewBinding<E> {
    /// Creates an unmounted binding.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            events: EventRegistry::new(),
            mounted: false,
            visibility: LayerVisibility::default(),
            popup_open: false,
            draw_listener: None,
        }
    }

    /// The engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine, mutably. Used to place the draw session's transient markers.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consumes the binding and returns the engine.
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Subscribed event listeners.
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Returns true once the map has been mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current layer visibility.
    pub fn visibility(&self) -> LayerVisibility {
        self.visibility
    }

    /// Returns true if an inspection popup is open.
    pub fn popup_open(&self) -> bool {
        self.popup_open
    }

    /// Mounts the map: creates the basemap, annotation layers and event
    /// listeners, and pushes the store contents.
    ///
    /// If the engine's container does not exist yet, nothing happens and false is
    /// returned; call again on the next render. Mounting twice is a no-op.
    pub fn mount(&mut self, config: &MapInitConfig, store: &AnnotationStore) -> bool {
        if self.mounted {
            return true;
        }

        if !self.engine.container_ready() {
            log::debug!("Map container is not ready, deferring mount");
            return false;
        }

        self.engine.init_basemap(config);
        self.engine.set_cursor(Cursor::Default);

        for layer in ANNOTATION_LAYERS {
            self.engine.add_layer(layer);
        }

        self.mounted = true;
        for kind in AnnotationKind::ALL {
            self.render(kind, store);
            if !self.visibility.get(kind) {
                self.apply_visibility(kind);
            }
        }

        self.subscribe();

        log::info!(
            "Map mounted at {:?}, zoom {}",
            config.center,
            config.zoom_level
        );
        true
    }

    fn subscribe(&mut self) {
        self.events
            .attach(EventScope::Map, EventKind::DragStart, ListenerTarget::GrabCursor);
        self.events
            .attach(EventScope::Map, EventKind::DragEnd, ListenerTarget::DefaultCursor);

        for layer in INTERACTIVE_LAYERS {
            let scope = EventScope::Layer(layer);
            self.events
                .attach(scope, EventKind::Enter, ListenerTarget::PointerCursor);
            self.events
                .attach(scope, EventKind::Leave, ListenerTarget::DefaultCursor);
            self.events
                .attach(scope, EventKind::Click, ListenerTarget::Inspect);
        }
    }

    /// Re-renders the layer affected by a store change.
    pub fn sync(&mut self, change: StoreChange, store: &AnnotationStore) {
        self.render(change.kind, store);
    }

    fn render(&mut self, kind: AnnotationKind, store: &AnnotationStore) {
        if !self.mounted {
            return;
        }

        let data = match kind {
            AnnotationKind::Points => points_collection(store.points()),
            AnnotationKind::Lines => lines_collection(store.lines()),
        };

        log::trace!(
            "Replacing {} source with {} features",
            kind.source_id(),
            data.features.len()
        );
        self.engine.set_source_data(kind.source_id(), data);
    }

    /// Flips the visibility of the kind's layers and returns the new value.
    pub fn toggle_visibility(&mut self, kind: AnnotationKind) -> bool {
        let visible = self.visibility.flip(kind);
        self.apply_visibility(kind);
        visible
    }

    fn apply_visibility(&mut self, kind: AnnotationKind) {
        if !self.mounted {
            return;
        }

        let visible = self.visibility.get(kind);
        for layer in kind.layers() {
            self.engine.set_layer_visibility(*layer, visible);
        }
    }

    /// Sets the canvas cursor.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.engine.set_cursor(cursor);
    }

    /// Opens the popup for a clicked feature.
    ///
    /// Point geometries anchor the popup at the point itself; line strings anchor
    /// it where the user clicked.
    pub fn open_popup(&mut self, hit: &FeatureHit, click: LngLat) {
        let anchor = match &hit.geometry {
            HitGeometry::Point(point) => *point,
            HitGeometry::LineString(_) => click,
        };

        self.engine.show_popup(anchor, &hit.date_added);
        self.popup_open = true;
    }

    /// Closes the popup if it is open.
    pub fn close_popup(&mut self) {
        if self.popup_open {
            self.engine.close_popup();
            self.popup_open = false;
        }
    }

    /// Attaches the map click listener of the draw session.
    ///
    /// The previous listener is always detached before a new one is attached, so
    /// a single click is never delivered to the session twice.
    pub fn rebind_draw_listener(&mut self, active: bool) {
        if let Some(id) = self.draw_listener.take() {
            self.events.detach(id);
        }

        if active {
            self.draw_listener = Some(self.events.attach(
                EventScope::Map,
                EventKind::Click,
                ListenerTarget::Draw,
            ));
        }
    }

    /// Targets of the listeners subscribed to the event.
    pub fn dispatch(&self, event: &MapEvent) -> Vec<ListenerTarget> {
        self.events.dispatch(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::view::HeadlessMap;
    use annotator_types::{Line, Point};

    fn mounted(store: &AnnotationStore) -> MapViewBinding<HeadlessMap> {
        let mut binding = MapViewBinding::new(HeadlessMap::new());
        assert!(binding.mount(&MapInitConfig::default(), store));
        binding
    }

    #[test]
    fn mount_is_deferred_without_container() {
        let store = AnnotationStore::default();
        let mut binding = MapViewBinding::new(HeadlessMap::without_container());

        assert!(!binding.mount(&MapInitConfig::default(), &store));
        assert!(!binding.is_mounted());
        assert!(binding.engine().layers().is_empty());
        assert!(binding.events().is_empty());

        binding.engine_mut().attach_container();
        assert!(binding.mount(&MapInitConfig::default(), &store));
        assert_eq!(binding.engine().layers().len(), 3);
    }

    #[test]
    fn mount_pushes_existing_annotations() {
        let storage = MemoryStorage::new();
        let mut store = AnnotationStore::default();
        let _ = store
            .set_lines(&storage, vec![Line::new("d", (1.0, 1.0), (2.0, 2.0))])
            .unwrap();

        let binding = mounted(&store);

        assert_eq!(binding.engine().source("lines").unwrap().features.len(), 3);
        assert!(binding.engine().source("points").unwrap().features.is_empty());
        assert_eq!(binding.engine().cursor(), Cursor::Default);
    }

    #[test]
    fn sync_replaces_only_the_changed_source() {
        let storage = MemoryStorage::new();
        let mut store = AnnotationStore::default();
        let mut binding = mounted(&store);

        let change = store
            .set_points(&storage, vec![Point::new("d", (1.0, 1.0))])
            .unwrap();
        binding.sync(change, &store);

        assert_eq!(binding.engine().source_updates("points"), 2);
        assert_eq!(binding.engine().source_updates("lines"), 1);
        assert_eq!(binding.engine().source("points").unwrap().features.len(), 1);
    }

    #[test]
    fn repeated_sync_gives_identical_data() {
        let storage = MemoryStorage::new();
        let mut store = AnnotationStore::default();
        let mut binding = mounted(&store);

        let change = store
            .set_lines(&storage, vec![Line::new("d", (1.0, 1.0), (2.0, 2.0))])
            .unwrap();
        binding.sync(change, &store);
        let first = binding.engine().source("lines").cloned();
        binding.sync(change, &store);

        assert_eq!(binding.engine().source("lines").cloned(), first);
    }

    #[test]
    fn lines_toggle_with_their_caps() {
        let mut binding = mounted(&AnnotationStore::default());

        assert!(!binding.toggle_visibility(AnnotationKind::Lines));
        assert!(!binding.engine().is_layer_visible(LayerId::Lines));
        assert!(!binding.engine().is_layer_visible(LayerId::LineCaps));
        assert!(binding.engine().is_layer_visible(LayerId::Points));

        assert!(binding.toggle_visibility(AnnotationKind::Lines));
        assert!(binding.engine().is_layer_visible(LayerId::LineCaps));
    }

    #[test]
    fn popup_anchor_depends_on_geometry() {
        let mut binding = mounted(&AnnotationStore::default());
        let click = LngLat::new(1.5, 1.5);

        let line = FeatureHit {
            layer: LayerId::Lines,
            date_added: "line".into(),
            geometry: HitGeometry::LineString(vec![LngLat::new(1.0, 1.0), LngLat::new(2.0, 2.0)]),
        };
        binding.open_popup(&line, click);
        assert_eq!(binding.engine().popup().unwrap().anchor, click);

        let cap = FeatureHit {
            layer: LayerId::LineCaps,
            date_added: "cap".into(),
            geometry: HitGeometry::Point(LngLat::new(2.0, 2.0)),
        };
        binding.open_popup(&cap, click);
        let popup = binding.engine().popup().unwrap();
        assert_eq!(popup.anchor, LngLat::new(2.0, 2.0));
        assert_eq!(popup.content, "cap");

        binding.close_popup();
        assert!(binding.engine().popup().is_none());
        assert!(!binding.popup_open());
    }

    #[test]
    fn draw_listener_is_never_duplicated() {
        let mut binding = mounted(&AnnotationStore::default());

        binding.rebind_draw_listener(true);
        binding.rebind_draw_listener(true);
        assert_eq!(binding.events().count(ListenerTarget::Draw), 1);

        binding.rebind_draw_listener(false);
        assert_eq!(binding.events().count(ListenerTarget::Draw), 0);
    }
}
