//! Lifecycle of the embedded sphere map.
//!
//! ```text
//! Uninitialized ──mount──► AwaitingScript ──ScriptLoaded──► Initializing
//!       │                        │                               │
//!       └──(library present)─────┼──────────────────────────────►┤
//!                                │                               ▼
//!                          ScriptFailed /                  AwaitingReady
//!                            timeout                             │
//!                                ▼                            MapReady
//!                              Failed ◄──────timeout─────────────┤
//!                                                                ▼
//!                                                              Ready
//! ```
//!
//! Initializing is transient: the bridge constructs the map and moves on to
//! AwaitingReady within the same call.

use super::camera::{CameraMove, TilesetOverview};
use super::provider::{EventSink, MapHandle, MapProvider, ProviderEvent, ScriptTag, Tiles3dLayer};
use super::BridgeError;
use eframe::egui;
use geo_types::Coord;
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;
use web_time::Instant;

/// Default time allowed for the script and the Ready event.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Current phase in the bridge state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgePhase {
    Uninitialized,
    AwaitingScript(ScriptTag),
    Initializing,
    AwaitingReady,
    Ready,
    Failed(BridgeError),
}

impl BridgePhase {
    pub fn label(&self) -> &'static str {
        match self {
            BridgePhase::Uninitialized => "uninitialized",
            BridgePhase::AwaitingScript(_) => "awaiting script",
            BridgePhase::Initializing => "initializing",
            BridgePhase::AwaitingReady => "awaiting ready",
            BridgePhase::Ready => "ready",
            BridgePhase::Failed(_) => "failed",
        }
    }
}

/// What the map pane should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadState<'a> {
    Pending,
    Ready,
    Failed(&'a BridgeError),
}

/// Event channel and timing for one mount cycle.
struct Session {
    events: Receiver<ProviderEvent>,
    sink: EventSink,
    deadline: Instant,
}

/// Owns the external map and exposes the navigate command.
pub struct MapBridge<P: MapProvider> {
    provider: P,
    script_src: String,
    placeholder_id: String,
    layer: Tiles3dLayer,
    load_timeout: Duration,
    repaint: Option<egui::Context>,
    phase: BridgePhase,
    session: Option<Session>,
    map: Option<Box<dyn MapHandle>>,
}

impl<P: MapProvider> MapBridge<P> {
    pub fn new(provider: P, script_src: impl Into<String>, placeholder_id: impl Into<String>) -> Self {
        Self {
            provider,
            script_src: script_src.into(),
            placeholder_id: placeholder_id.into(),
            layer: Tiles3dLayer::default(),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            repaint: None,
            phase: BridgePhase::Uninitialized,
            session: None,
            map: None,
        }
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Context woken whenever an SDK callback delivers an event.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn phase(&self) -> &BridgePhase {
        &self.phase
    }

    #[cfg(test)]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn load_state(&self) -> LoadState<'_> {
        match &self.phase {
            BridgePhase::Ready => LoadState::Ready,
            BridgePhase::Failed(e) => LoadState::Failed(e),
            _ => LoadState::Pending,
        }
    }

    /// Starts loading the map. Does nothing unless the bridge is
    /// uninitialized, so at most one script is injected per mount.
    pub fn mount(&mut self, now: Instant) {
        if self.phase != BridgePhase::Uninitialized {
            log::debug!("Map bridge already mounted ({})", self.phase.label());
            return;
        }

        let deadline = match now.checked_add(self.load_timeout) {
            Some(deadline) => deadline,
            None => {
                log::warn!(
                    "Load timeout of {}s is out of range, using {}s",
                    self.load_timeout.as_secs(),
                    DEFAULT_LOAD_TIMEOUT.as_secs()
                );
                self.load_timeout = DEFAULT_LOAD_TIMEOUT;
                now + DEFAULT_LOAD_TIMEOUT
            }
        };

        let (tx, rx) = channel();
        let sink = EventSink::new(tx, self.repaint.clone());
        self.session = Some(Session {
            events: rx,
            sink: sink.clone(),
            deadline,
        });

        if self.provider.library_present() {
            log::info!("Sphere SDK already present, skipping script injection");
            self.initialize();
            return;
        }

        log::info!("Injecting sphere SDK script");
        match self.provider.inject_script(&self.script_src, sink) {
            Ok(tag) => self.transition(BridgePhase::AwaitingScript(tag)),
            Err(e) => self.fail(e),
        }
    }

    /// Tears the session down. A pending script is removed and any events
    /// still in flight are discarded.
    pub fn unmount(&mut self) {
        if let BridgePhase::AwaitingScript(tag) = &self.phase {
            log::info!("Removing pending sphere SDK script #{}", tag.element_id);
            self.provider.remove_script(tag);
        }
        self.session = None;
        self.map = None;
        if self.phase != BridgePhase::Uninitialized {
            self.transition(BridgePhase::Uninitialized);
        }
    }

    /// Fails the bridge without loading anything, e.g. when configuration is
    /// missing.
    pub fn abort(&mut self, reason: BridgeError) {
        if let BridgePhase::AwaitingScript(tag) = &self.phase {
            self.provider.remove_script(tag);
        }
        self.fail(reason);
    }

    /// Drains SDK events and enforces the load timeout.
    pub fn poll(&mut self, now: Instant) {
        loop {
            let Some(event) = self
                .session
                .as_ref()
                .and_then(|s| s.events.try_recv().ok())
            else {
                break;
            };
            self.handle_event(event);
        }

        let timed_out = matches!(
            self.phase,
            BridgePhase::AwaitingScript(_) | BridgePhase::AwaitingReady
        ) && self.session.as_ref().is_some_and(|s| now >= s.deadline);

        if timed_out {
            self.fail(BridgeError::Timeout {
                waited_secs: self.load_timeout.as_secs(),
            });
        }
    }

    /// Next instant at which `poll` has time-based work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            BridgePhase::AwaitingScript(_) | BridgePhase::AwaitingReady => {
                self.session.as_ref().map(|s| s.deadline)
            }
            _ => None,
        }
    }

    /// Flies the camera to `coordinates`. Zoom defaults to 15.
    ///
    /// A no-op until the map is ready.
    pub fn navigate_to_location(&self, coordinates: Coord<f64>, zoom: Option<f64>) {
        let (BridgePhase::Ready, Some(map)) = (&self.phase, &self.map) else {
            log::debug!(
                "Ignoring navigate to ({}, {}): map is {}",
                coordinates.x,
                coordinates.y,
                self.phase.label()
            );
            return;
        };

        let camera = CameraMove::navigate(coordinates, zoom);
        if let Err(e) = map.go_to(&camera) {
            log::warn!("Navigate failed: {}", e);
        }
    }

    fn handle_event(&mut self, event: ProviderEvent) {
        let awaiting_script = matches!(self.phase, BridgePhase::AwaitingScript(_));
        let ready = self.phase == BridgePhase::Ready;

        match event {
            ProviderEvent::ScriptLoaded if awaiting_script => {
                log::info!("Sphere SDK script loaded");
                self.initialize();
            }
            ProviderEvent::ScriptFailed(msg) if awaiting_script => {
                self.fail(BridgeError::ScriptLoad(msg));
            }
            ProviderEvent::MapReady if self.phase == BridgePhase::AwaitingReady => self.on_ready(),
            ProviderEvent::TilesetLoaded(tileset) if ready => {
                match tileset.center {
                    Some(c) => log::info!("Tileset loaded at ({}, {}) zoom {}", c.x, c.y, tileset.zoom),
                    None => log::info!("Tileset loaded at zoom {}", tileset.zoom),
                }
                if let Some(map) = &self.map {
                    if let Err(e) = map.frame_tileset(&TilesetOverview::for_tileset(&tileset)) {
                        log::warn!("Failed to recenter on tileset: {}", e);
                    }
                }
            }
            ProviderEvent::TilesetUnreadable(msg) if ready => {
                log::warn!("Tileset loaded without usable metadata: {}", msg);
            }
            event => {
                log::debug!("Ignoring {:?} while {}", event, self.phase.label());
            }
        }
    }

    fn initialize(&mut self) {
        self.transition(BridgePhase::Initializing);

        let Some(sink) = self.session.as_ref().map(|s| s.sink.clone()) else {
            return;
        };

        match self.provider.create_map(&self.placeholder_id, sink) {
            Ok(map) => {
                self.map = Some(map);
                self.transition(BridgePhase::AwaitingReady);
            }
            Err(e) => self.fail(e),
        }
    }

    fn on_ready(&mut self) {
        let Some(sink) = self.session.as_ref().map(|s| s.sink.clone()) else {
            return;
        };
        let Some(map) = self.map.as_mut() else {
            return;
        };

        match map.add_tiles3d_layer(&self.layer, sink) {
            Ok(()) => self.transition(BridgePhase::Ready),
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, reason: BridgeError) {
        log::error!("Sphere map failed: {}", reason);
        self.session = None;
        self.map = None;
        self.transition(BridgePhase::Failed(reason));
    }

    fn transition(&mut self, next: BridgePhase) {
        log::info!("Map bridge: {} -> {}", self.phase.label(), next.label());
        self.phase = next;
    }
}

impl<P: MapProvider> Drop for MapBridge<P> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::camera::TilesetInfo;
    use crate::sphere::fake::FakeProvider;
    use geo_types::coord;

    const SRC: &str = "https://api.sphere.gistda.or.th/map/?key=test";

    fn bridge(provider: FakeProvider) -> MapBridge<FakeProvider> {
        MapBridge::new(provider, SRC, "sphere_map").with_load_timeout(Duration::from_secs(10))
    }

    /// Drives a bridge with the library present all the way to Ready.
    fn ready_bridge(now: Instant) -> MapBridge<FakeProvider> {
        let mut b = bridge(FakeProvider::with_library());
        b.mount(now);
        b.provider().emit(ProviderEvent::MapReady);
        b.poll(now);
        assert_eq!(*b.phase(), BridgePhase::Ready);
        b
    }

    #[test]
    fn test_library_present_skips_injection() {
        let now = Instant::now();
        let mut b = bridge(FakeProvider::with_library());
        b.mount(now);

        let log = b.provider().log();
        assert!(log.injected.is_empty());
        assert_eq!(log.maps_created, 1);
        drop(log);
        assert_eq!(*b.phase(), BridgePhase::AwaitingReady);
    }

    #[test]
    fn test_script_load_sequence() {
        let now = Instant::now();
        let mut b = bridge(FakeProvider::default());
        b.mount(now);

        assert!(matches!(b.phase(), BridgePhase::AwaitingScript(_)));
        assert_eq!(b.provider().log().injected, vec![SRC.to_string()]);
        assert_eq!(b.load_state(), LoadState::Pending);

        b.provider().emit(ProviderEvent::ScriptLoaded);
        b.poll(now);
        assert_eq!(*b.phase(), BridgePhase::AwaitingReady);
        assert_eq!(b.provider().log().maps_created, 1);
        assert!(b.provider().log().layers.is_empty());

        b.provider().emit(ProviderEvent::MapReady);
        b.poll(now);
        assert_eq!(b.load_state(), LoadState::Ready);

        let log = b.provider().log();
        assert_eq!(log.layers, vec![Tiles3dLayer::default()]);
        assert_eq!(log.maps_created, 1);
    }

    #[test]
    fn test_mount_twice_injects_once() {
        let now = Instant::now();
        let mut b = bridge(FakeProvider::default());
        b.mount(now);
        b.mount(now);
        assert_eq!(b.provider().log().injected.len(), 1);
    }

    #[test]
    fn test_tileset_load_recenters() {
        let now = Instant::now();
        let b = &mut ready_bridge(now);

        b.provider().emit(ProviderEvent::TilesetLoaded(TilesetInfo {
            center: Some(coord! { x: 100.52, y: 13.75 }),
            zoom: 13.0,
        }));
        b.poll(now);

        let log = b.provider().log();
        assert_eq!(
            log.framed,
            vec![TilesetOverview {
                zoom: 16.0,
                pitch: 60.0,
            }]
        );
        assert!(log.moves.is_empty());
    }

    #[test]
    fn test_tileset_with_unrecognized_center_still_recenters() {
        let now = Instant::now();
        let b = &mut ready_bridge(now);

        b.provider().emit(ProviderEvent::TilesetLoaded(TilesetInfo {
            center: None,
            zoom: 10.5,
        }));
        b.poll(now);

        let log = b.provider().log();
        assert_eq!(log.framed.len(), 1);
        assert_eq!(log.framed[0].zoom, 13.5);
    }

    #[test]
    fn test_navigate_before_ready_is_noop() {
        let now = Instant::now();
        let mut b = bridge(FakeProvider::default());
        let target = coord! { x: 100.559301, y: 13.720125 };

        b.navigate_to_location(target, Some(16.0));
        b.mount(now);
        b.navigate_to_location(target, Some(16.0));
        b.provider().emit(ProviderEvent::ScriptLoaded);
        b.poll(now);
        b.navigate_to_location(target, None);

        assert!(b.provider().log().moves.is_empty());
    }

    #[test]
    fn test_navigate_after_ready() {
        let now = Instant::now();
        let b = ready_bridge(now);
        let target = coord! { x: 100.559301, y: 13.720125 };

        b.navigate_to_location(target, Some(16.0));

        let log = b.provider().log();
        assert_eq!(log.moves.len(), 1);
        assert_eq!(log.moves[0].center, target);
        assert_eq!(log.moves[0].zoom, 16.0);
        assert_eq!(log.moves[0].pitch, 60.0);
        assert_eq!(log.moves[0].duration_ms, Some(2000));
    }

    #[test]
    fn test_navigate_default_zoom() {
        let b = ready_bridge(Instant::now());
        b.navigate_to_location(coord! { x: 100.5, y: 13.7 }, None);
        assert_eq!(b.provider().log().moves[0].zoom, 15.0);
    }

    #[test]
    fn test_unmount_while_awaiting_script() {
        let now = Instant::now();
        let mut b = bridge(FakeProvider::default());
        b.mount(now);
        b.unmount();

        assert_eq!(b.provider().log().removed.len(), 1);
        assert_eq!(b.provider().log().removed[0].src, SRC);
        assert_eq!(*b.phase(), BridgePhase::Uninitialized);

        // A load callback arriving after teardown goes nowhere
        assert!(!b.provider().emit(ProviderEvent::ScriptLoaded));
        b.poll(now);
        let log = b.provider().log();
        assert_eq!(log.maps_created, 0);
        assert!(log.moves.is_empty());
    }

    #[test]
    fn test_unmount_while_awaiting_ready_discards_callbacks() {
        let now = Instant::now();
        let mut b = bridge(FakeProvider::with_library());
        b.mount(now);
        b.unmount();

        assert!(b.provider().log().removed.is_empty());
        assert!(!b.provider().emit(ProviderEvent::MapReady));
        b.poll(now);
        assert!(b.provider().log().layers.is_empty());
    }

    #[test]
    fn test_script_error_fails() {
        let now = Instant::now();
        let mut b = bridge(FakeProvider::default());
        b.mount(now);
        b.provider()
            .emit(ProviderEvent::ScriptFailed("net::ERR_BLOCKED".to_string()));
        b.poll(now);

        assert_eq!(
            b.load_state(),
            LoadState::Failed(&BridgeError::ScriptLoad("net::ERR_BLOCKED".to_string()))
        );
    }

    #[test]
    fn test_injection_error_fails() {
        let mut b = bridge(FakeProvider::failing_injection());
        b.mount(Instant::now());
        assert!(matches!(b.load_state(), LoadState::Failed(BridgeError::ScriptLoad(_))));
    }

    #[test]
    fn test_timeout_waiting_for_script() {
        let now = Instant::now();
        let mut b = bridge(FakeProvider::default());
        b.mount(now);
        assert_eq!(b.next_deadline(), Some(now + Duration::from_secs(10)));

        b.poll(now + Duration::from_secs(9));
        assert_eq!(b.load_state(), LoadState::Pending);

        b.poll(now + Duration::from_secs(10));
        assert_eq!(
            b.load_state(),
            LoadState::Failed(&BridgeError::Timeout { waited_secs: 10 })
        );
        assert_eq!(b.next_deadline(), None);
    }

    #[test]
    fn test_timeout_waiting_for_ready() {
        let now = Instant::now();
        let mut b = bridge(FakeProvider::with_library());
        b.mount(now);
        b.poll(now + Duration::from_secs(11));
        assert!(matches!(b.load_state(), LoadState::Failed(BridgeError::Timeout { .. })));

        // Ready arriving after the timeout is ignored
        assert!(!b.provider().emit(ProviderEvent::MapReady));
        b.poll(now + Duration::from_secs(12));
        assert!(b.provider().log().layers.is_empty());
    }

    #[test]
    fn test_unrepresentable_timeout_falls_back_to_default() {
        let now = Instant::now();
        let mut b = MapBridge::new(FakeProvider::default(), SRC, "sphere_map")
            .with_load_timeout(Duration::from_secs(u64::MAX));
        b.mount(now);

        assert!(matches!(b.phase(), BridgePhase::AwaitingScript(_)));
        assert_eq!(b.next_deadline(), Some(now + DEFAULT_LOAD_TIMEOUT));

        b.poll(now + DEFAULT_LOAD_TIMEOUT);
        assert_eq!(
            b.load_state(),
            LoadState::Failed(&BridgeError::Timeout { waited_secs: 30 })
        );
    }

    #[test]
    fn test_ready_never_times_out() {
        let now = Instant::now();
        let mut b = ready_bridge(now);
        b.poll(now + Duration::from_secs(3600));
        assert_eq!(b.load_state(), LoadState::Ready);
    }

    #[test]
    fn test_abort() {
        let mut b = bridge(FakeProvider::default());
        b.abort(BridgeError::NotConfigured("missing key".to_string()));
        assert!(matches!(b.load_state(), LoadState::Failed(BridgeError::NotConfigured(_))));

        b.mount(Instant::now());
        assert!(b.provider().log().injected.is_empty());
    }
}
