//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all UI panels.

use eframe::egui::Color32;

/// Page-wide brand colors.
pub mod brand {
    use super::Color32;

    /// Deep forest green page background (#042918).
    pub const BACKGROUND: Color32 = Color32::from_rgb(0x04, 0x29, 0x18);
    /// Lime accent (#A3E047).
    pub const ACCENT: Color32 = Color32::from_rgb(0xA3, 0xE0, 0x47);
    /// Primary text.
    pub const TEXT: Color32 = Color32::WHITE;

    /// Secondary text - requires alpha, use function.
    pub fn text_muted() -> Color32 {
        Color32::from_white_alpha(153)
    }

    /// Translucent card fill - requires alpha, use function.
    pub fn card() -> Color32 {
        Color32::from_white_alpha(13)
    }

    /// Card border - requires alpha, use function.
    pub fn card_border() -> Color32 {
        Color32::from_white_alpha(26)
    }
}

/// Colors for the Bangkok overlay map.
pub mod overlay {
    use super::Color32;

    /// Map background fill.
    pub const LAND: Color32 = Color32::from_rgb(0x0B, 0x3B, 0x25);
    /// District grid lines.
    pub const GRID: Color32 = Color32::from_rgb(0x15, 0x4D, 0x33);
    /// Chao Phraya river.
    pub const RIVER: Color32 = Color32::from_rgb(0x2E, 0x6F, 0x8E);
    /// Marker outline.
    pub const MARKER_STROKE: Color32 = Color32::WHITE;
    /// Marker label text.
    pub const MARKER_LABEL: Color32 = super::brand::BACKGROUND;

    /// Tooltip background - requires alpha, use function.
    pub fn tooltip() -> Color32 {
        Color32::from_rgba_unmultiplied(0x04, 0x29, 0x18, 230)
    }
}

/// Colors for the 3D map pane.
pub mod map_pane {
    use super::Color32;

    /// Loading overlay fill (gray-800).
    pub const LOADING: Color32 = Color32::from_rgb(31, 41, 55);
    /// Failure message text.
    pub const ERROR: Color32 = Color32::from_rgb(255, 120, 100);
}

/// Marker color for a location id, from bright to dark green.
pub fn location_color(id: &str) -> Color32 {
    match id {
        "A1" => Color32::from_rgb(0xA3, 0xE0, 0x47),
        "A2" => Color32::from_rgb(0x86, 0xD9, 0x33),
        "B1" => Color32::from_rgb(0x6B, 0xCF, 0x1F),
        "B2" => Color32::from_rgb(0x50, 0xC5, 0x0B),
        "B3" => Color32::from_rgb(0x3A, 0xB8, 0x00),
        _ => brand::ACCENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LOCATIONS;
    use std::collections::HashSet;

    #[test]
    fn test_location_colors_distinct() {
        let colors: HashSet<_> = LOCATIONS.iter().map(|l| location_color(l.id)).collect();
        assert_eq!(colors.len(), LOCATIONS.len());
        assert_eq!(location_color("??"), brand::ACCENT);
    }
}
