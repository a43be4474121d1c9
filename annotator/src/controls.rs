//! Control panel and status tooltip.

use annotator_types::AnnotationKind;

use crate::locale::Locale;
use crate::session::DrawState;
use crate::view::LayerVisibility;

/// Button pressed on the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Show or hide the kind's layers.
    ToggleVisibility(AnnotationKind),
    /// Start adding an annotation of the kind.
    Add(AnnotationKind),
    /// Delete every annotation of the kind.
    DeleteAll(AnnotationKind),
}

impl ControlAction {
    /// Returns true if the action discards an in-progress line.
    ///
    /// Starting any add action, and toggling or deleting lines do; toggling or
    /// deleting points leave a line being drawn untouched.
    pub fn discards_line(self) -> bool {
        match self {
            ControlAction::Add(_) => true,
            ControlAction::ToggleVisibility(kind) | ControlAction::DeleteAll(kind) => {
                kind == AnnotationKind::Lines
            }
        }
    }

    /// Returns true if the action closes the inspection popup.
    pub fn closes_popup(self) -> bool {
        !matches!(self, ControlAction::Add(_))
    }
}

/// Icon of the visibility toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityIcon {
    /// Layer is shown.
    Eye,
    /// Layer is hidden.
    EyeOff,
}

/// Button of a control group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlButton {
    /// Action performed on press.
    pub action: ControlAction,
    /// Tooltip title.
    pub title: &'static str,
}

/// Controls of one annotation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlGroup {
    /// Kind the group controls.
    pub kind: AnnotationKind,
    /// Label shown next to the visibility icon.
    pub label: &'static str,
    /// Visibility icon.
    pub icon: VisibilityIcon,
    /// The group is rendered dimmed while its layers are hidden.
    pub hidden: bool,
    /// Visibility toggle.
    pub toggle: ControlButton,
    /// Add button.
    pub add: ControlButton,
    /// Delete-all button.
    pub delete: ControlButton,
}

impl ControlGroup {
    /// Builds the group for a kind.
    pub fn new(kind: AnnotationKind, visible: bool, locale: Locale) -> Self {
        let strings = locale.strings();
        let (label, add_title, delete_title) = match kind {
            AnnotationKind::Points => (
                strings.points_label,
                strings.add_point,
                strings.delete_points,
            ),
            AnnotationKind::Lines => (
                strings.lines_label,
                strings.add_line,
                strings.delete_lines,
            ),
        };

        Self {
            kind,
            label,
            icon: if visible {
                VisibilityIcon::Eye
            } else {
                VisibilityIcon::EyeOff
            },
            hidden: !visible,
            toggle: ControlButton {
                action: ControlAction::ToggleVisibility(kind),
                title: strings.toggle_layer,
            },
            add: ControlButton {
                action: ControlAction::Add(kind),
                title: add_title,
            },
            delete: ControlButton {
                action: ControlAction::DeleteAll(kind),
                title: delete_title,
            },
        }
    }

    /// Buttons in display order.
    pub fn buttons(&self) -> [ControlButton; 3] {
        [self.toggle, self.add, self.delete]
    }
}

/// Control groups for both kinds.
pub fn control_groups(visibility: LayerVisibility, locale: Locale) -> [ControlGroup; 2] {
    AnnotationKind::ALL.map(|kind| ControlGroup::new(kind, visibility.get(kind), locale))
}

/// Status line shown while an annotation is being added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tooltip {
    text: Option<&'static str>,
}

impl Tooltip {
    /// Tooltip for the draw state.
    pub fn new(state: DrawState, locale: Locale) -> Self {
        let strings = locale.strings();
        let text = match state {
            DrawState::Idle => None,
            DrawState::AddingPoint => Some(strings.status_point),
            DrawState::AddingLine { start: None } => Some(strings.status_line_start),
            DrawState::AddingLine { start: Some(_) } => Some(strings.status_line_end),
        };

        Self { text }
    }

    /// Returns true if the tooltip is shown.
    pub fn is_visible(&self) -> bool {
        self.text.is_some()
    }

    /// Status text, `None` while idle.
    pub fn text(&self) -> Option<&'static str> {
        self.text
    }
}
