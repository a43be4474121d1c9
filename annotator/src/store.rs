//! Authoritative in-memory lists of annotations with write-through persistence.

use annotator_types::{AnnotationKind, Line, Point};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AnnotatorError;
use crate::storage::KeyValueStorage;

/// Notification that the list of one annotation kind was replaced.
///
/// Every mutating store method returns one. The caller forwards it to the map
/// view so the affected layer is re-rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "store changes must be forwarded to the map view"]
pub struct StoreChange {
    /// Kind whose list changed.
    pub kind: AnnotationKind,
}

/// Point and line annotations.
///
/// The store is the single source of truth for annotations. It is hydrated once
/// with [`AnnotationStore::load`] and every mutation is written to the storage
/// before the method returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    points: Vec<Point>,
    lines: Vec<Line>,
}

impl AnnotationStore {
    /// Reads both annotation lists from the storage.
    ///
    /// An absent key gives an empty list. A blob that is not a valid list fails
    /// with [`AnnotatorError::CorruptData`].
    pub fn load(storage: &impl KeyValueStorage) -> Result<Self, AnnotatorError> {
        let points = read_list(storage, AnnotationKind::Points)?;
        let lines = read_list(storage, AnnotationKind::Lines)?;

        log::info!(
            "Loaded {} points and {} lines from storage",
            points.len(),
            lines.len()
        );

        Ok(Self { points, lines })
    }

    /// Point annotations in the order they were added.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Line annotations in the order they were added.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of annotations of the given kind.
    pub fn count(&self, kind: AnnotationKind) -> usize {
        match kind {
            AnnotationKind::Points => self.points.len(),
            AnnotationKind::Lines => self.lines.len(),
        }
    }

    /// Replaces the point list and writes it to the storage.
    pub fn set_points(
        &mut self,
        storage: &impl KeyValueStorage,
        points: Vec<Point>,
    ) -> Result<StoreChange, AnnotatorError> {
        write_list(storage, AnnotationKind::Points, &points)?;
        self.points = points;
        Ok(StoreChange {
            kind: AnnotationKind::Points,
        })
    }

    /// Replaces the line list and writes it to the storage.
    pub fn set_lines(
        &mut self,
        storage: &impl KeyValueStorage,
        lines: Vec<Line>,
    ) -> Result<StoreChange, AnnotatorError> {
        write_list(storage, AnnotationKind::Lines, &lines)?;
        self.lines = lines;
        Ok(StoreChange {
            kind: AnnotationKind::Lines,
        })
    }

    /// Appends a point. Same contract as [`AnnotationStore::set_points`].
    pub fn push_point(
        &mut self,
        storage: &impl KeyValueStorage,
        point: Point,
    ) -> Result<StoreChange, AnnotatorError> {
        let mut points = self.points.clone();
        points.push(point);
        self.set_points(storage, points)
    }

    /// Appends a line. Same contract as [`AnnotationStore::set_lines`].
    pub fn push_line(
        &mut self,
        storage: &impl KeyValueStorage,
        line: Line,
    ) -> Result<StoreChange, AnnotatorError> {
        let mut lines = self.lines.clone();
        lines.push(line);
        self.set_lines(storage, lines)
    }

    /// Deletes all points and removes the `points` key from the storage.
    pub fn clear_points(
        &mut self,
        storage: &impl KeyValueStorage,
    ) -> Result<StoreChange, AnnotatorError> {
        self.clear(storage, AnnotationKind::Points)
    }

    /// Deletes all lines and removes the `lines` key from the storage.
    pub fn clear_lines(
        &mut self,
        storage: &impl KeyValueStorage,
    ) -> Result<StoreChange, AnnotatorError> {
        self.clear(storage, AnnotationKind::Lines)
    }

    /// Deletes all annotations of the given kind.
    pub fn clear(
        &mut self,
        storage: &impl KeyValueStorage,
        kind: AnnotationKind,
    ) -> Result<StoreChange, AnnotatorError> {
        storage.remove(kind.storage_key())?;
        match kind {
            AnnotationKind::Points => self.points.clear(),
            AnnotationKind::Lines => self.lines.clear(),
        }

        log::debug!("Cleared {}", kind.storage_key());
        Ok(StoreChange { kind })
    }
}

fn read_list<T: DeserializeOwned>(
    storage: &impl KeyValueStorage,
    kind: AnnotationKind,
) -> Result<Vec<T>, AnnotatorError> {
    let key = kind.storage_key();
    match storage.get(key)? {
        None => Ok(Vec::new()),
        Some(blob) => serde_json::from_str(&blob)
            .map_err(|source| AnnotatorError::CorruptData { key, source }),
    }
}

fn write_list<T: Serialize>(
    storage: &impl KeyValueStorage,
    kind: AnnotationKind,
    list: &[T],
) -> Result<(), AnnotatorError> {
    let blob = serde_json::to_string(list).map_err(AnnotatorError::Serialize)?;
    storage.set(kind.storage_key(), &blob)?;
    log::trace!("Stored {} {}", list.len(), kind.storage_key());
    Ok(())
}
