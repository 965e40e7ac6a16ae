//! Map settings persisted in the browser.
//!
//! Settings are read from localStorage so deployments and power users can
//! tune them without a rebuild.

use serde::{Deserialize, Serialize};

/// User-adjustable map settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Seconds to wait for the SDK script and Ready event before giving up.
    pub load_timeout_secs: u64,
    /// Location id selected when the page opens.
    pub initial_selection: Option<String>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            load_timeout_secs: 30,
            initial_selection: None,
        }
    }
}

impl MapSettings {
    /// localStorage key holding the settings JSON.
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "oasis_map_settings";

    /// Shortest timeout accepted from storage.
    pub const MIN_LOAD_TIMEOUT_SECS: u64 = 5;

    /// Longest timeout accepted from storage.
    pub const MAX_LOAD_TIMEOUT_SECS: u64 = 600;

    /// Parses settings from JSON, clamping the timeout into range.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.load_timeout_secs = settings
            .load_timeout_secs
            .clamp(Self::MIN_LOAD_TIMEOUT_SECS, Self::MAX_LOAD_TIMEOUT_SECS);
        Ok(settings)
    }

    /// Load settings from localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Self::default(),
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        let json = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded map settings from localStorage");
                settings
            }
            Err(e) => {
                log::warn!("Failed to parse map settings: {}", e);
                Self::default()
            }
        }
    }

    /// No persisted settings on native builds.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = MapSettings::from_json(r#"{"initial_selection":"B1"}"#).unwrap();
        assert_eq!(settings.load_timeout_secs, 30);
        assert_eq!(settings.initial_selection.as_deref(), Some("B1"));
    }

    #[test]
    fn test_timeout_clamped() {
        let settings = MapSettings::from_json(r#"{"load_timeout_secs":0}"#).unwrap();
        assert_eq!(settings.load_timeout_secs, MapSettings::MIN_LOAD_TIMEOUT_SECS);

        let settings =
            MapSettings::from_json(r#"{"load_timeout_secs":18446744073709551615}"#).unwrap();
        assert_eq!(settings.load_timeout_secs, MapSettings::MAX_LOAD_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_json() {
        assert!(MapSettings::from_json("not json").is_err());
    }
}
