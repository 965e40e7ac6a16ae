//! Static registry of the highlighted Bangkok districts.
//!
//! Each entry pairs two coordinate spaces: a percentage position on the
//! illustrative Bangkok overlay and a WGS84 longitude/latitude used by the
//! 3D map.

use geo_types::{coord, Coord};

/// Development potential tier shown in the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotentialTier {
    High,
    Medium,
}

impl PotentialTier {
    pub fn label(&self) -> &'static str {
        match self {
            PotentialTier::High => "พื้นที่ศักยภาพสูง",
            PotentialTier::Medium => "พื้นที่ศักยภาพปานกลาง",
        }
    }
}

/// Marker position on the overlay, in percent of the container (0-100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPosition {
    pub x: f32,
    pub y: f32,
}

/// A highlighted district.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Short code such as "A1"
    pub id: &'static str,
    pub name: &'static str,
    pub display_position: DisplayPosition,
    /// Longitude in `x`, latitude in `y`
    pub coordinates: Coord<f64>,
    pub description: &'static str,
    pub tier: PotentialTier,
}

impl Location {
    pub fn longitude(&self) -> f64 {
        self.coordinates.x
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.y
    }

    /// Label for the details card, e.g. "พิกัด: 13.720125, 100.559301".
    pub fn coordinate_label(&self) -> String {
        format!("พิกัด: {}, {}", self.latitude(), self.longitude())
    }
}

pub static LOCATIONS: [Location; 5] = [
    Location {
        id: "A1",
        name: "พื้นที่เขตบางเขน",
        // Central-North Bangkok
        display_position: DisplayPosition { x: 50.0, y: 20.0 },
        coordinates: coord! { x: 100.532867, y: 13.847277 },
        description: "พื้นที่ศักยภาพสูง \n เขตบางเขน (District 5)",
        tier: PotentialTier::High,
    },
    Location {
        id: "A2",
        name: "พื้นที่เขตปทุมวัน",
        display_position: DisplayPosition { x: 34.5, y: 47.0 },
        coordinates: coord! { x: 100.534402, y: 13.738529 },
        description: "พื้นที่ศักยภาพสูง \n เขตปทุมวัน (District 7)",
        tier: PotentialTier::High,
    },
    Location {
        id: "B1",
        name: "พื้นที่เขตคลองเตย",
        display_position: DisplayPosition { x: 41.0, y: 52.0 },
        coordinates: coord! { x: 100.559301, y: 13.720125 },
        description: "พื้นที่ศักยภาพปานกลาง \n เขตคลองเตย (District 33)",
        tier: PotentialTier::Medium,
    },
    Location {
        id: "B2",
        name: "พื้นที่เขตบางขุนเทียน",
        // Western Bangkok
        display_position: DisplayPosition { x: 16.0, y: 74.0 },
        coordinates: coord! { x: 100.449055, y: 13.695512 },
        description: "พื้นที่ศักยภาพปานกลาง \n เขตบางขุนเทียน (District 21)",
        tier: PotentialTier::Medium,
    },
    Location {
        id: "B3",
        name: "พื้นที่เขตลาดกระบัง",
        // Eastern Bangkok
        display_position: DisplayPosition { x: 75.0, y: 45.0 },
        coordinates: coord! { x: 100.7493, y: 13.723062 },
        description: "พื้นที่ศักยภาพปานกลาง \n เขตลาดกระบัง (District 11)",
        tier: PotentialTier::Medium,
    },
];

/// Looks up a location by id (case-insensitive).
pub fn get_location(id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Rough bounding box of the Bangkok metropolitan region (lon/lat).
    const BANGKOK_BOUNDS: (Coord<f64>, Coord<f64>) = (
        coord! { x: 100.30, y: 13.45 },
        coord! { x: 100.95, y: 14.00 },
    );

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = LOCATIONS.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), LOCATIONS.len());
    }

    #[test]
    fn test_display_positions_within_container() {
        for location in &LOCATIONS {
            let p = location.display_position;
            assert!((0.0..=100.0).contains(&p.x), "{} x={}", location.id, p.x);
            assert!((0.0..=100.0).contains(&p.y), "{} y={}", location.id, p.y);
        }
    }

    #[test]
    fn test_coordinates_within_bangkok() {
        let (min, max) = BANGKOK_BOUNDS;
        for location in &LOCATIONS {
            let c = location.coordinates;
            assert!(c.x >= min.x && c.x <= max.x, "{} lon={}", location.id, c.x);
            assert!(c.y >= min.y && c.y <= max.y, "{} lat={}", location.id, c.y);
        }
    }

    #[test]
    fn test_description_matches_tier() {
        for location in &LOCATIONS {
            assert!(location.description.starts_with(location.tier.label()));
        }
    }

    #[test]
    fn test_lookup() {
        let b1 = get_location("b1").unwrap();
        assert_eq!(b1.id, "B1");
        assert_eq!(b1.longitude(), 100.559301);
        assert_eq!(b1.latitude(), 13.720125);
        assert_eq!(b1.coordinate_label(), "พิกัด: 13.720125, 100.559301");
        assert!(get_location("C9").is_none());
    }
}
