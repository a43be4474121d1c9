use serde::{Deserialize, Serialize};

use crate::LngLat;

/// A single point annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Creation date, already formatted for display.
    pub date_added: String,
    /// Position of the point.
    pub coords: LngLat,
}

impl Point {
    /// Creates a new point annotation.
    pub fn new(date_added: impl Into<String>, coords: impl Into<LngLat>) -> Self {
        Self {
            date_added: date_added.into(),
            coords: coords.into(),
        }
    }
}

/// A straight segment between two positions.
///
/// A line always has exactly two vertices. They may coincide, in which case the
/// line has zero length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Creation date, already formatted for display.
    pub date_added: String,
    /// Start and end vertices in the order they were placed.
    pub coords: [LngLat; 2],
}

impl Line {
    /// Creates a new line annotation.
    pub fn new(
        date_added: impl Into<String>,
        start: impl Into<LngLat>,
        end: impl Into<LngLat>,
    ) -> Self {
        Self {
            date_added: date_added.into(),
            coords: [start.into(), end.into()],
        }
    }

    /// First vertex.
    pub fn start(&self) -> LngLat {
        self.coords[0]
    }

    /// Second vertex.
    pub fn end(&self) -> LngLat {
        self.coords[1]
    }
}
