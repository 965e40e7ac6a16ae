//! Camera moves and tileset metadata exchanged with the sphere SDK.
//!
//! [`CameraMove`] serializes to the options object accepted by
//! `map.goTo(...)`: `{ center: [lon, lat], zoom, pitch, duration? }`.
//! [`TilesetOverview`] is the same object minus the center, which comes
//! straight from the loaded tileset.

use geo_types::{coord, Coord};
use serde::{Deserialize, Serialize, Serializer};

/// Pitch used for every camera move, in degrees.
pub const CAMERA_PITCH_DEG: f64 = 60.0;

/// Animation length of a navigate command, in milliseconds.
pub const NAVIGATE_DURATION_MS: u32 = 2000;

/// Zoom used when a navigate command does not specify one.
pub const DEFAULT_NAVIGATE_ZOOM: f64 = 15.0;

/// Zoom levels added on top of the tileset's own zoom when recentering.
pub const TILESET_ZOOM_OFFSET: f64 = 3.0;

/// A single `goTo` request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraMove {
    #[serde(serialize_with = "serialize_lon_lat")]
    pub center: Coord<f64>,
    pub zoom: f64,
    pub pitch: f64,
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
}

impl CameraMove {
    /// Animated flight to a location.
    pub fn navigate(center: Coord<f64>, zoom: Option<f64>) -> Self {
        Self {
            center,
            zoom: zoom.unwrap_or(DEFAULT_NAVIGATE_ZOOM),
            pitch: CAMERA_PITCH_DEG,
            duration_ms: Some(NAVIGATE_DURATION_MS),
        }
    }
}

fn serialize_lon_lat<S: Serializer>(c: &Coord<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    [c.x, c.y].serialize(serializer)
}

/// `cartographicCenter` as reported by the tileset load callback.
///
/// The SDK has reported both `[lon, lat]` pairs and `{ lon, lat }` objects.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CartographicCenter {
    Pair([f64; 2]),
    LonLat { lon: f64, lat: f64 },
}

impl CartographicCenter {
    pub fn to_coord(self) -> Coord<f64> {
        match self {
            CartographicCenter::Pair([lon, lat]) => coord! { x: lon, y: lat },
            CartographicCenter::LonLat { lon, lat } => coord! { x: lon, y: lat },
        }
    }
}

/// The parts of a loaded tileset the bridge uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilesetInfo {
    /// Parsed center, when the SDK reports a shape we recognize. The camera
    /// is framed on the SDK's own value either way.
    pub center: Option<Coord<f64>>,
    pub zoom: f64,
}

/// `goTo` options for framing a loaded tileset. The center is filled in by
/// the provider from the tileset itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TilesetOverview {
    pub zoom: f64,
    pub pitch: f64,
}

impl TilesetOverview {
    pub fn for_tileset(tileset: &TilesetInfo) -> Self {
        Self {
            zoom: tileset.zoom + TILESET_ZOOM_OFFSET,
            pitch: CAMERA_PITCH_DEG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_defaults() {
        let c = coord! { x: 100.559301, y: 13.720125 };

        let default_zoom = CameraMove::navigate(c, None);
        assert_eq!(default_zoom.zoom, 15.0);
        assert_eq!(default_zoom.pitch, 60.0);
        assert_eq!(default_zoom.duration_ms, Some(2000));

        let explicit = CameraMove::navigate(c, Some(16.0));
        assert_eq!(explicit.zoom, 16.0);
        assert_eq!(explicit.center, c);
    }

    #[test]
    fn test_go_to_options_shape() {
        let m = CameraMove::navigate(coord! { x: 100.5, y: 13.7 }, Some(16.0));
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "center": [100.5, 13.7],
                "zoom": 16.0,
                "pitch": 60.0,
                "duration": 2000
            })
        );
    }

    #[test]
    fn test_tileset_overview_options() {
        let info = TilesetInfo {
            center: None,
            zoom: 12.0,
        };
        let overview = TilesetOverview::for_tileset(&info);
        assert_eq!(overview.zoom, 15.0);
        assert_eq!(overview.pitch, 60.0);

        let json = serde_json::to_value(overview).unwrap();
        assert_eq!(json, serde_json::json!({ "zoom": 15.0, "pitch": 60.0 }));
    }

    #[test]
    fn test_cartographic_center_forms() {
        let pair: CartographicCenter = serde_json::from_str("[100.5,13.7]").unwrap();
        assert_eq!(pair.to_coord(), coord! { x: 100.5, y: 13.7 });

        let object: CartographicCenter =
            serde_json::from_str(r#"{"lon":100.5,"lat":13.7,"height":0}"#).unwrap();
        assert_eq!(object.to_coord(), coord! { x: 100.5, y: 13.7 });

        assert!(serde_json::from_str::<CartographicCenter>(r#"{"lon":100.5}"#).is_err());
    }
}
