//! Capability traits over the sphere SDK and the event channel its
//! callbacks report through.
//!
//! SDK callbacks are async but egui's update() is synchronous. Callbacks
//! push [`ProviderEvent`]s into an [`EventSink`]; the bridge drains the
//! matching receiver from the update loop. Dropping the receiver is how a
//! torn-down session ignores callbacks that fire late.

use super::camera::{CameraMove, TilesetInfo, TilesetOverview};
use super::BridgeError;
use eframe::egui;
use std::sync::mpsc::Sender;

/// Something the SDK reported asynchronously.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    /// The injected SDK script finished loading.
    ScriptLoaded,
    /// The injected SDK script failed to load.
    ScriptFailed(String),
    /// The map fired its one-time Ready event.
    MapReady,
    /// The 3D layer finished loading its tileset.
    TilesetLoaded(TilesetInfo),
    /// The tileset loaded but its zoom could not be read.
    TilesetUnreadable(String),
}

/// Sending half of a bridge session's event channel.
///
/// Emitting also requests a repaint so the update loop picks the event up
/// without waiting for user input.
#[derive(Clone)]
pub struct EventSink {
    sender: Sender<ProviderEvent>,
    repaint: Option<egui::Context>,
}

impl EventSink {
    pub fn new(sender: Sender<ProviderEvent>, repaint: Option<egui::Context>) -> Self {
        Self { sender, repaint }
    }

    /// Delivers an event. Returns false if the session is gone.
    pub fn emit(&self, event: ProviderEvent) -> bool {
        let delivered = self.sender.send(event).is_ok();
        if delivered {
            if let Some(ctx) = &self.repaint {
                ctx.request_repaint();
            }
        }
        delivered
    }
}

/// Handle to an injected script element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag {
    pub element_id: String,
    pub src: String,
}

/// Parameters of the 3D tileset layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tiles3dLayer {
    pub name: String,
    pub url: String,
    pub opacity: f64,
}

impl Default for Tiles3dLayer {
    fn default() -> Self {
        Self {
            name: super::TILESET_LAYER_NAME.to_string(),
            url: super::TILESET_URL.to_string(),
            opacity: super::TILESET_OPACITY,
        }
    }
}

/// Access to the globally loaded SDK.
pub trait MapProvider {
    /// Whether the SDK global is already present.
    fn library_present(&self) -> bool;

    /// Adds the SDK script to the document. The sink receives
    /// `ScriptLoaded` or `ScriptFailed`.
    fn inject_script(&mut self, src: &str, events: EventSink) -> Result<ScriptTag, BridgeError>;

    /// Removes a previously injected script if it is still attached.
    fn remove_script(&mut self, tag: &ScriptTag);

    /// Constructs a map inside the placeholder element and binds its Ready
    /// event to the sink.
    fn create_map(
        &mut self,
        placeholder_id: &str,
        events: EventSink,
    ) -> Result<Box<dyn MapHandle>, BridgeError>;
}

/// A constructed map.
pub trait MapHandle {
    /// Moves the camera.
    fn go_to(&self, camera: &CameraMove) -> Result<(), BridgeError>;

    /// Creates and attaches a 3D tileset layer. The sink receives
    /// `TilesetLoaded` once the tileset is ready.
    fn add_tiles3d_layer(&mut self, layer: &Tiles3dLayer, events: EventSink)
        -> Result<(), BridgeError>;

    /// Moves the camera over the most recently loaded tileset, centered on
    /// the center the SDK reported for it.
    fn frame_tileset(&self, overview: &TilesetOverview) -> Result<(), BridgeError>;
}
