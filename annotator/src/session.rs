//! State machine of the "add annotation" interaction.

use annotator_types::{AnnotationKind, Line, LngLat, Point};

use crate::view::{MarkerHost, MarkerId};

/// Vertex of a line that has been placed but not yet committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingVertex {
    /// Position of the vertex.
    pub coords: LngLat,
    /// Transient marker shown at the vertex.
    pub marker: MarkerId,
}

/// Current state of the draw session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawState {
    /// Map clicks do not create annotations.
    #[default]
    Idle,
    /// The next map click creates a point.
    AddingPoint,
    /// Map clicks place line vertices. `start` holds the first vertex once it is
    /// placed; the second click commits the line.
    AddingLine {
        /// First vertex, if already placed.
        start: Option<PendingVertex>,
    },
}

impl DrawState {
    /// Kind of annotation being added, if any.
    pub fn adding(&self) -> Option<AnnotationKind> {
        match self {
            DrawState::Idle => None,
            DrawState::AddingPoint => Some(AnnotationKind::Points),
            DrawState::AddingLine { .. } => Some(AnnotationKind::Lines),
        }
    }
}

/// Annotation produced by a map click.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    /// A new point.
    Point(Point),
    /// A new line.
    Line(Line),
}

/// Tracks the in-progress "add point" / "add line" interaction.
///
/// A line is committed in the same call that receives its second vertex, so the
/// number of pending vertices observed from outside is always 0 or 1, and it is
/// always equal to the number of transient markers on the map.
#[derive(Debug, Default)]
pub struct DrawSession {
    state: DrawState,
}

impl DrawSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Returns true if map clicks are not captured.
    pub fn is_idle(&self) -> bool {
        self.state == DrawState::Idle
    }

    /// Number of line vertices placed but not committed.
    pub fn pending_vertices(&self) -> usize {
        match self.state {
            DrawState::AddingLine { start: Some(_) } => 1,
            _ => 0,
        }
    }

    /// Starts adding an annotation of the given kind. Any in-progress line is
    /// discarded first.
    pub fn begin(&mut self, kind: AnnotationKind, markers: &mut impl MarkerHost) {
        self.discard_line(markers);
        self.state = match kind {
            AnnotationKind::Points => DrawState::AddingPoint,
            AnnotationKind::Lines => DrawState::AddingLine { start: None },
        };
        log::debug!("Draw session: {:?}", self.state);
    }

    /// Discards an in-progress line: removes its transient marker and returns to
    /// idle without committing anything.
    ///
    /// Does nothing unless a line is being added. Returns true if the state
    /// changed.
    pub fn discard_line(&mut self, markers: &mut impl MarkerHost) -> bool {
        let DrawState::AddingLine { start } = self.state else {
            return false;
        };

        if let Some(vertex) = start {
            markers.remove_marker(vertex.marker);
        }
        self.state = DrawState::Idle;
        log::debug!("Draw session: in-progress line discarded");
        true
    }

    /// Handles a map click at `at`.
    ///
    /// `date_added` is only called when an annotation is created.
    pub fn click(
        &mut self,
        at: LngLat,
        markers: &mut impl MarkerHost,
        date_added: impl FnOnce() -> String,
    ) -> Option<Commit> {
        match self.state {
            DrawState::Idle => {
                log::warn!("Map click at {at:?} received while not drawing, ignoring");
                None
            }
            DrawState::AddingPoint => {
                self.state = DrawState::Idle;
                Some(Commit::Point(Point::new(date_added(), at)))
            }
            DrawState::AddingLine { start: None } => {
                let marker = markers.add_marker(at);
                self.state = DrawState::AddingLine {
                    start: Some(PendingVertex { coords: at, marker }),
                };
                None
            }
            DrawState::AddingLine { start: Some(start) } => {
                let end_marker = markers.add_marker(at);
                markers.remove_marker(start.marker);
                markers.remove_marker(end_marker);
                self.state = DrawState::Idle;
                Some(Commit::Line(Line::new(date_added(), start.coords, at)))
            }
        }
    }

    /// Returns to the state that produced `commit`, for a commit that could not
    /// be stored. A line gets its first vertex and marker back; the click that
    /// placed the second vertex has to be repeated.
    pub fn resume(&mut self, commit: &Commit, markers: &mut impl MarkerHost) {
        self.discard_line(markers);
        self.state = match commit {
            Commit::Point(_) => DrawState::AddingPoint,
            Commit::Line(line) => {
                let coords = line.start();
                let marker = markers.add_marker(coords);
                DrawState::AddingLine {
                    start: Some(PendingVertex { coords, marker }),
                }
            }
        };
        log::debug!("Draw session resumed: {:?}", self.state);
    }
}
