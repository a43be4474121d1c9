//! Data model shared by the map annotator crates.
//!
//! The crate contains the annotation types that are persisted between sessions
//! ([`Point`], [`Line`]), the coordinate type they are built from ([`LngLat`]),
//! identifiers of the map layers that display them ([`AnnotationKind`],
//! [`LayerId`]) and the pure projection of annotation lists into GeoJSON feature
//! collections ([`features`]).

mod annotation;
pub mod features;
mod layer;
mod lnglat;

pub use annotation::{Line, Point};
pub use layer::{AnnotationKind, LayerId};
pub use lnglat::LngLat;
