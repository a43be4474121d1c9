//! User-facing strings and date formatting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Language of the interface and of the stored creation dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Russian.
    #[default]
    Ru,
    /// English (US date order).
    En,
}

/// Interface strings of one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    /// Label of the points control group.
    pub points_label: &'static str,
    /// Label of the lines control group.
    pub lines_label: &'static str,
    /// Title of the visibility toggle buttons.
    pub toggle_layer: &'static str,
    /// Title of the "add point" button.
    pub add_point: &'static str,
    /// Title of the "add line" button.
    pub add_line: &'static str,
    /// Title of the "delete points" button.
    pub delete_points: &'static str,
    /// Title of the "delete lines" button.
    pub delete_lines: &'static str,
    /// Status while waiting for a point click.
    pub status_point: &'static str,
    /// Status while waiting for the first vertex of a line.
    pub status_line_start: &'static str,
    /// Status while waiting for the second vertex of a line.
    pub status_line_end: &'static str,
}

const RU: Strings = Strings {
    points_label: "Точки",
    lines_label: "Линии",
    toggle_layer: "Скрыть слой",
    add_point: "Добавить точку",
    add_line: "Добавить линию",
    delete_points: "Удалить точки",
    delete_lines: "Удалить линии",
    status_point: "Нажмите на карту чтобы добавить точку",
    status_line_start: "Добавьте начальную точку линии",
    status_line_end: "Добавьте конечную точку линии",
};

const EN: Strings = Strings {
    points_label: "Points",
    lines_label: "Lines",
    toggle_layer: "Hide layer",
    add_point: "Add point",
    add_line: "Add line",
    delete_points: "Delete points",
    delete_lines: "Delete lines",
    status_point: "Click on the map to add a point",
    status_line_start: "Add the start point of the line",
    status_line_end: "Add the end point of the line",
};

impl Locale {
    /// Strings of the locale.
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::Ru => &RU,
            Locale::En => &EN,
        }
    }

    /// Formats a date the way the locale writes short dates.
    pub fn format_date(self, date: NaiveDate) -> String {
        match self {
            Locale::Ru => date.format("%d.%m.%Y").to_string(),
            Locale::En => date.format("%-m/%-d/%Y").to_string(),
        }
    }

    /// Parses a locale tag such as `ru`, `en` or `en-US`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let language = tag.split(['-', '_']).next()?.to_ascii_lowercase();
        match language.as_str() {
            "ru" => Some(Locale::Ru),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}
