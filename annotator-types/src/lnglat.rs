use serde::{Deserialize, Serialize};

/// Geographic position given as longitude and latitude in degrees.
///
/// Serializes as a two-element array `[lng, lat]`, the same order GeoJSON uses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl LngLat {
    /// Creates a new position.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Position as a GeoJSON coordinate vector.
    pub fn to_position(self) -> Vec<f64> {
        vec![self.lng, self.lat]
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(value: LngLat) -> Self {
        [value.lng, value.lat]
    }
}

impl From<(f64, f64)> for LngLat {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self { lng, lat }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_string(&LngLat::new(37.5, 55.25)).unwrap();
        assert_eq!(json, "[37.5,55.25]");
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(serde_json::from_str::<LngLat>("[37.5]").is_err());
        assert!(serde_json::from_str::<LngLat>("[37.5, 55.0, 1.0]").is_err());
    }

    #[test]
    fn accepts_integer_coordinates() {
        let value: LngLat = serde_json::from_str("[37, 55]").unwrap();
        approx::assert_abs_diff_eq!(value.lng, 37.0);
        approx::assert_abs_diff_eq!(value.lat, 55.0);
    }
}
