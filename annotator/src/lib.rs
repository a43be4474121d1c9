//! Point and line annotations over a slippy map.
//!
//! The crate keeps three copies of the user's annotations consistent: the
//! in-memory [`AnnotationStore`], the feature collections drawn by the map
//! engine, and the serialized lists in a local key-value storage.
//!
//! The map engine and the storage are collaborators behind the [`MapEngine`]
//! and [`KeyValueStorage`] traits. [`HeadlessMap`] and [`MemoryStorage`] are
//! in-memory implementations; [`storage::LocalStorage`] is available on wasm32
//! and [`storage::SledStorage`] with the `sled` feature on native targets.
//! With the `galileo` feature, `view::GalileoMap` renders the basemap and the
//! annotation layers on a galileo map.
//!
//! ```ignore
//! use annotator::{Annotator, ControlAction, HeadlessMap, MapEvent, MapInitConfig, MemoryStorage};
//! use annotator::types::{AnnotationKind, LngLat};
//!
//! let config = MapInitConfig::from_env();
//! let mut annotator = Annotator::new(config, MemoryStorage::new(), HeadlessMap::new())?;
//! annotator.mount();
//! annotator.press(ControlAction::Add(AnnotationKind::Points))?;
//! let lnglat = LngLat::new(37.0, 55.0);
//! annotator.handle_map_event(&MapEvent::Click { lnglat, hit: None })?;
//! assert_eq!(annotator.store().points().len(), 1);
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod controls;
pub mod error;
pub mod locale;
mod logging;
pub mod session;
pub mod storage;
pub mod store;
pub mod view;

pub use annotator_types as types;

pub use app::Annotator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::MapInitConfig;
pub use controls::{ControlAction, Tooltip};
pub use error::{AnnotatorError, StorageError};
pub use locale::Locale;
pub use logging::init_logger;
pub use session::{DrawSession, DrawState};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{AnnotationStore, StoreChange};
#[cfg(feature = "galileo")]
pub use view::GalileoMap;
pub use view::{HeadlessMap, MapEngine, MapEvent, MapViewBinding};
