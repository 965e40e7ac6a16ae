//! GISTDA sphere 3D map integration.
//!
//! The sphere SDK is a JavaScript library loaded from a remote script and
//! reached through the `window.sphere` global. This module keeps that global
//! behind the `MapProvider` trait so the [`MapBridge`] state machine never
//! touches ambient browser state directly:
//!
//! - `provider`: capability traits and the event channel fed by JS callbacks
//! - `bridge`: load/ready lifecycle and the navigate command
//! - `camera`: typed camera moves and tileset metadata
//! - `web` (WASM only): the real `window.sphere` provider
//! - `native`: provider for desktop builds, where the SDK is unavailable

mod bridge;
mod camera;
mod provider;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
mod native;

#[cfg(test)]
pub(crate) mod fake;

pub use bridge::{LoadState, MapBridge};

#[cfg(target_arch = "wasm32")]
pub use web::{align_placeholder, GlobalSphereProvider as PlatformProvider};

#[cfg(not(target_arch = "wasm32"))]
pub use native::{align_placeholder, UnavailableProvider as PlatformProvider};

/// Remote 3D tileset rendered on top of the base map.
pub const TILESET_URL: &str = "https://va-cdn-02.vallarismaps.com/core/api/3d/1.0/tiles/66b8e76b869b1bcce1183566/tileset.json?api_key=5tIayeGkvLPb33FlO80Z20BHG4ptpQqGiQbD69mSMORanxJ00PgkxdsLsL2mERZ0";

/// Layer name passed to `sphere.Layer`.
pub const TILESET_LAYER_NAME: &str = "3dt";

/// Opacity of the 3D tileset layer.
pub const TILESET_OPACITY: f64 = 0.5;

/// DOM id of the element the map renders into.
pub const PLACEHOLDER_ID: &str = "sphere_map";

/// DOM id given to the injected SDK script element.
pub const SCRIPT_ELEMENT_ID: &str = "sphere_sdk";

/// Builds the SDK script URL for an API key.
pub fn script_url(api_key: &str) -> String {
    format!("https://api.sphere.gistda.or.th/map/?key={}", api_key)
}

/// Errors raised while loading or driving the sphere map.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// No API key was configured, so the SDK cannot be requested.
    NotConfigured(String),
    /// The SDK script element could not be created or failed to load.
    ScriptLoad(String),
    /// The SDK loaded but `window.sphere` is missing.
    LibraryMissing,
    /// The DOM placeholder for the map does not exist.
    PlaceholderMissing(String),
    /// `sphere.Map` could not be constructed.
    MapConstruction(String),
    /// The 3D tileset layer could not be constructed or attached.
    LayerConstruction(String),
    /// A call into the SDK threw.
    Js(String),
    /// The SDK did not finish loading within the configured timeout.
    Timeout { waited_secs: u64 },
    /// The platform has no browser to host the SDK.
    Unsupported,
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::NotConfigured(msg) => write!(f, "Map is not configured: {}", msg),
            BridgeError::ScriptLoad(msg) => write!(f, "Failed to load map SDK: {}", msg),
            BridgeError::LibraryMissing => write!(f, "Map SDK is not available"),
            BridgeError::PlaceholderMissing(id) => write!(f, "Map container #{} not found", id),
            BridgeError::MapConstruction(msg) => write!(f, "Failed to create map: {}", msg),
            BridgeError::LayerConstruction(msg) => write!(f, "Failed to add 3D layer: {}", msg),
            BridgeError::Js(msg) => write!(f, "Map SDK error: {}", msg),
            BridgeError::Timeout { waited_secs } => {
                write!(f, "Map did not load within {} seconds", waited_secs)
            }
            BridgeError::Unsupported => write!(f, "The 3D map is only available in the web build"),
        }
    }
}

impl std::error::Error for BridgeError {}
