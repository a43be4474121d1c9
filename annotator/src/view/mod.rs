//! Map view: the engine boundary, event listeners and the store-to-layer binding.

mod binding;
mod engine;
mod events;
#[cfg(feature = "galileo")]
mod galileo_map;
mod headless;

pub use binding::{LayerVisibility, MapViewBinding, ANNOTATION_LAYERS};
pub use engine::{
    Cursor, EventKind, FeatureHit, GeometryFilter, HitGeometry, LayerPaint, LayerSpec, MapEngine,
    MapEvent, MarkerHost, MarkerId,
};
pub use events::{EventRegistry, EventScope, ListenerId, ListenerTarget};
#[cfg(feature = "galileo")]
pub use galileo_map::{AnnotationFeature, GalileoMap};
pub use headless::{HeadlessMap, Popup};
