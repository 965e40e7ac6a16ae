//! Provider for native builds.
//!
//! The sphere SDK only runs inside a browser, so every request fails with
//! `BridgeError::Unsupported` and the map pane shows its fallback message.

use super::provider::{EventSink, MapHandle, MapProvider, ScriptTag};
use super::BridgeError;
use eframe::egui::Rect;

#[derive(Default)]
pub struct UnavailableProvider;

impl MapProvider for UnavailableProvider {
    fn library_present(&self) -> bool {
        false
    }

    fn inject_script(&mut self, _src: &str, _events: EventSink) -> Result<ScriptTag, BridgeError> {
        Err(BridgeError::Unsupported)
    }

    fn remove_script(&mut self, _tag: &ScriptTag) {}

    fn create_map(
        &mut self,
        _placeholder_id: &str,
        _events: EventSink,
    ) -> Result<Box<dyn MapHandle>, BridgeError> {
        Err(BridgeError::Unsupported)
    }
}

/// No-op stub for native builds.
pub fn align_placeholder(_placeholder_id: &str, _rect: Option<Rect>) {}
