use std::fmt;

/// Kind of annotation. Each kind has its own storage key, data source and
/// control group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// Point markers.
    Points,
    /// Two-vertex line segments.
    Lines,
}

impl AnnotationKind {
    /// Both kinds in display order.
    pub const ALL: [AnnotationKind; 2] = [AnnotationKind::Points, AnnotationKind::Lines];

    /// Key the kind's list is stored under.
    pub fn storage_key(self) -> &'static str {
        match self {
            AnnotationKind::Points => "points",
            AnnotationKind::Lines => "lines",
        }
    }

    /// Name of the data source holding the kind's feature collection.
    pub fn source_id(self) -> &'static str {
        self.storage_key()
    }

    /// Layers that display the kind. Their visibility is toggled as one unit.
    pub fn layers(self) -> &'static [LayerId] {
        match self {
            AnnotationKind::Points => &[LayerId::Points],
            AnnotationKind::Lines => &[LayerId::Lines, LayerId::LineCaps],
        }
    }
}

/// Map layers showing annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerId {
    /// Circles for point annotations.
    Points,
    /// Line strings of line annotations.
    Lines,
    /// Circles at both ends of every line annotation.
    LineCaps,
}

impl LayerId {
    /// All annotation layers in drawing order.
    pub const ALL: [LayerId; 3] = [LayerId::Points, LayerId::Lines, LayerId::LineCaps];

    /// Layer name as known to the map engine.
    pub fn name(self) -> &'static str {
        match self {
            LayerId::Points => "points",
            LayerId::Lines => "lines",
            LayerId::LineCaps => "linesCaps",
        }
    }

    /// Annotation kind the layer displays.
    pub fn kind(self) -> AnnotationKind {
        match self {
            LayerId::Points => AnnotationKind::Points,
            LayerId::Lines | LayerId::LineCaps => AnnotationKind::Lines,
        }
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
