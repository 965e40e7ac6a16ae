//! In-memory provider used by tests.
//!
//! Records every call made into it and hands out the most recent event sink
//! so tests can play the SDK's part by emitting events.

use super::camera::{CameraMove, TilesetOverview};
use super::provider::{EventSink, MapHandle, MapProvider, ProviderEvent, ScriptTag, Tiles3dLayer};
use super::BridgeError;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

#[derive(Default)]
pub struct FakeLog {
    pub injected: Vec<String>,
    pub removed: Vec<ScriptTag>,
    pub maps_created: usize,
    pub layers: Vec<Tiles3dLayer>,
    pub moves: Vec<CameraMove>,
    pub framed: Vec<TilesetOverview>,
    sink: Option<EventSink>,
}

#[derive(Default)]
pub struct FakeProvider {
    library_present: bool,
    fail_injection: bool,
    log: Rc<RefCell<FakeLog>>,
}

impl FakeProvider {
    pub fn with_library() -> Self {
        Self {
            library_present: true,
            ..Default::default()
        }
    }

    pub fn failing_injection() -> Self {
        Self {
            fail_injection: true,
            ..Default::default()
        }
    }

    pub fn log(&self) -> Ref<'_, FakeLog> {
        self.log.borrow()
    }

    /// Emits an event through the latest sink, as an SDK callback would.
    pub fn emit(&self, event: ProviderEvent) -> bool {
        let sink = self.log.borrow().sink.clone();
        sink.is_some_and(|s| s.emit(event))
    }
}

impl MapProvider for FakeProvider {
    fn library_present(&self) -> bool {
        self.library_present
    }

    fn inject_script(&mut self, src: &str, events: EventSink) -> Result<ScriptTag, BridgeError> {
        if self.fail_injection {
            return Err(BridgeError::ScriptLoad("document has no <head>".to_string()));
        }
        let mut log = self.log.borrow_mut();
        log.injected.push(src.to_string());
        log.sink = Some(events);
        Ok(ScriptTag {
            element_id: super::SCRIPT_ELEMENT_ID.to_string(),
            src: src.to_string(),
        })
    }

    fn remove_script(&mut self, tag: &ScriptTag) {
        self.log.borrow_mut().removed.push(tag.clone());
    }

    fn create_map(
        &mut self,
        _placeholder_id: &str,
        events: EventSink,
    ) -> Result<Box<dyn MapHandle>, BridgeError> {
        let mut log = self.log.borrow_mut();
        log.maps_created += 1;
        log.sink = Some(events);
        Ok(Box::new(FakeMap {
            log: self.log.clone(),
        }))
    }
}

struct FakeMap {
    log: Rc<RefCell<FakeLog>>,
}

impl MapHandle for FakeMap {
    fn go_to(&self, camera: &CameraMove) -> Result<(), BridgeError> {
        self.log.borrow_mut().moves.push(*camera);
        Ok(())
    }

    fn add_tiles3d_layer(
        &mut self,
        layer: &Tiles3dLayer,
        events: EventSink,
    ) -> Result<(), BridgeError> {
        let mut log = self.log.borrow_mut();
        log.layers.push(layer.clone());
        log.sink = Some(events);
        Ok(())
    }

    fn frame_tileset(&self, overview: &TilesetOverview) -> Result<(), BridgeError> {
        self.log.borrow_mut().framed.push(*overview);
        Ok(())
    }
}
