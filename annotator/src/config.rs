//! Initial map configuration.

use annotator_types::LngLat;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

const DEFAULT_STYLE_URL: &str = "https://api.maptiler.com/maps/streets-v2/style.json";

/// Corner of the map the navigation (zoom/rotate) control is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    /// Top left corner.
    #[default]
    TopLeft,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

/// Configuration used when the map is first mounted.
///
/// All fields can be given in a serialized config. Missing fields fall back to
/// the defaults, which centre the map on Moscow at zoom 12.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapInitConfig {
    /// Initial map centre.
    pub center: LngLat,
    /// Initial zoom level.
    pub zoom_level: f64,
    /// URL of the basemap style document.
    pub style_url: String,
    /// Key appended to the style URL as the `key` query parameter.
    pub api_key: Option<String>,
    /// Position of the navigation control, `None` to hide it.
    pub navigation_control: Option<ControlPosition>,
    /// Interface locale, also used to format creation dates.
    pub locale: Locale,
}

impl Default for MapInitConfig {
    fn default() -> Self {
        Self {
            center: LngLat::new(37.62223524930375, 55.75374851787201),
            zoom_level: 12.0,
            style_url: DEFAULT_STYLE_URL.to_string(),
            api_key: None,
            navigation_control: Some(ControlPosition::TopLeft),
            locale: Locale::Ru,
        }
    }
}

impl MapInitConfig {
    /// Default configuration with values overridden from the environment.
    ///
    /// Recognized variables: `ANNOTATOR_CENTER_LNG`, `ANNOTATOR_CENTER_LAT`,
    /// `ANNOTATOR_ZOOM`, `ANNOTATOR_STYLE_URL`, `ANNOTATOR_API_KEY` and
    /// `ANNOTATOR_LOCALE`. Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides looked up by variable name.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(lng) = parse(&lookup, "ANNOTATOR_CENTER_LNG") {
            self.center.lng = lng;
        }
        if let Some(lat) = parse(&lookup, "ANNOTATOR_CENTER_LAT") {
            self.center.lat = lat;
        }
        if let Some(zoom) = parse(&lookup, "ANNOTATOR_ZOOM") {
            self.zoom_level = zoom;
        }
        if let Some(url) = lookup("ANNOTATOR_STYLE_URL") {
            self.style_url = url;
        }
        if let Some(key) = lookup("ANNOTATOR_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(tag) = lookup("ANNOTATOR_LOCALE") {
            match Locale::from_tag(&tag) {
                Some(locale) => self.locale = locale,
                None => log::warn!("Unsupported locale '{tag}', keeping {:?}", self.locale),
            }
        }

        self
    }

    /// Style URL with the API key attached.
    pub fn style_url_with_key(&self) -> String {
        match &self.api_key {
            Some(key) => {
                let separator = if self.style_url.contains('?') { '&' } else { '?' };
                format!("{}{separator}key={key}", self.style_url)
            }
            None => self.style_url.clone(),
        }
    }

    /// Raster tile URL template of the style, with `{z}`, `{x}` and `{y}`
    /// placeholders and the API key attached.
    ///
    /// Only styles served as `.../style.json` have a raster counterpart; returns
    /// `None` for any other URL.
    pub fn raster_tile_url_template(&self) -> Option<String> {
        let url = self.style_url_with_key();
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url.as_str(), None),
        };
        let base = path.strip_suffix("/style.json")?;

        Some(match query {
            Some(query) => format!("{base}/256/{{z}}/{{x}}/{{y}}.png?{query}"),
            None => format!("{base}/256/{{z}}/{{x}}/{{y}}.png"),
        })
    }
}

fn parse(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<f64> {
    let value = lookup(name)?;
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {name}={value}: not a number");
            None
        }
    }
}
