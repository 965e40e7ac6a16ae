//! `window.sphere` provider for WASM targets.
//!
//! Wraps the untyped SDK in the narrow [`MapProvider`]/[`MapHandle`]
//! interfaces. Every SDK object is reached through `js_sys::Reflect` so a
//! missing property surfaces as a `BridgeError` rather than a JS exception.

use super::camera::{CameraMove, CartographicCenter, TilesetInfo, TilesetOverview};
use super::provider::{EventSink, MapHandle, MapProvider, ProviderEvent, ScriptTag, Tiles3dLayer};
use super::{BridgeError, SCRIPT_ELEMENT_ID};
use eframe::egui::Rect;
use js_sys::{Array, Function, Object, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlScriptElement};

/// Provider backed by the SDK's global namespace.
#[derive(Default)]
pub struct GlobalSphereProvider;

impl MapProvider for GlobalSphereProvider {
    fn library_present(&self) -> bool {
        sphere_namespace().is_some()
    }

    fn inject_script(&mut self, src: &str, events: EventSink) -> Result<ScriptTag, BridgeError> {
        let document = document()?;
        let head = document
            .head()
            .ok_or_else(|| BridgeError::ScriptLoad("document has no <head>".to_string()))?;

        let script: HtmlScriptElement = document
            .create_element("script")
            .map_err(|e| BridgeError::ScriptLoad(js_error(e)))?
            .dyn_into()
            .map_err(|_| BridgeError::ScriptLoad("created element is not a <script>".to_string()))?;

        script.set_type("text/javascript");
        script.set_src(src);
        script.set_async(true);
        script.set_id(SCRIPT_ELEMENT_ID);

        let load_events = events.clone();
        let onload = Closure::once_into_js(move || {
            load_events.emit(ProviderEvent::ScriptLoaded);
        });
        let error_src = src.to_string();
        let onerror = Closure::once_into_js(move |_event: web_sys::Event| {
            events.emit(ProviderEvent::ScriptFailed(format!("could not fetch {}", error_src)));
        });
        script.set_onload(Some(onload.unchecked_ref()));
        script.set_onerror(Some(onerror.unchecked_ref()));

        head.append_child(&script)
            .map_err(|e| BridgeError::ScriptLoad(js_error(e)))?;

        Ok(ScriptTag {
            element_id: SCRIPT_ELEMENT_ID.to_string(),
            src: src.to_string(),
        })
    }

    fn remove_script(&mut self, tag: &ScriptTag) {
        let Ok(document) = document() else {
            return;
        };
        let (Some(head), Some(script)) = (document.head(), document.get_element_by_id(&tag.element_id))
        else {
            return;
        };
        if head.contains(Some(script.as_ref())) {
            script.remove();
        }
    }

    fn create_map(
        &mut self,
        placeholder_id: &str,
        events: EventSink,
    ) -> Result<Box<dyn MapHandle>, BridgeError> {
        let namespace = sphere_namespace().ok_or(BridgeError::LibraryMissing)?;
        let placeholder = document()?
            .get_element_by_id(placeholder_id)
            .ok_or_else(|| BridgeError::PlaceholderMissing(placeholder_id.to_string()))?;

        let ctor: Function = get(&namespace, "Map")?
            .dyn_into()
            .map_err(|_| BridgeError::MapConstruction("sphere.Map is not a constructor".to_string()))?;

        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("placeholder"), &placeholder)
            .map_err(|e| BridgeError::MapConstruction(js_error(e)))?;

        let map = Reflect::construct(&ctor, &Array::of1(&options))
            .map_err(|e| BridgeError::MapConstruction(js_error(e)))?;

        // map.Event.bind(sphere.EventName.Ready, callback)
        let ready_event = get(&get(&namespace, "EventName")?, "Ready")?;
        let event_api = get(&map, "Event")?;
        let bind: Function = get(&event_api, "bind")?
            .dyn_into()
            .map_err(|_| BridgeError::Js("map.Event.bind is not a function".to_string()))?;

        let on_ready = Closure::wrap(Box::new(move || {
            events.emit(ProviderEvent::MapReady);
        }) as Box<dyn FnMut()>);
        bind.call2(&event_api, &ready_event, on_ready.as_ref())
            .map_err(|e| BridgeError::Js(js_error(e)))?;
        on_ready.forget(); // Owned by the SDK from here on

        log::info!("Created sphere map in #{}", placeholder_id);

        Ok(Box::new(SphereMapHandle {
            namespace,
            map,
            tileset_center: Rc::default(),
        }))
    }
}

/// A constructed `sphere.Map`.
struct SphereMapHandle {
    namespace: JsValue,
    map: JsValue,
    /// `cartographicCenter` of the last loaded tileset, exactly as the SDK
    /// reported it
    tileset_center: Rc<RefCell<Option<JsValue>>>,
}

impl MapHandle for SphereMapHandle {
    fn go_to(&self, camera: &CameraMove) -> Result<(), BridgeError> {
        let options =
            serde_wasm_bindgen::to_value(camera).map_err(|e| BridgeError::Js(e.to_string()))?;
        let go_to: Function = get(&self.map, "goTo")?
            .dyn_into()
            .map_err(|_| BridgeError::Js("map.goTo is not a function".to_string()))?;

        go_to
            .call1(&self.map, &options)
            .map_err(|e| BridgeError::Js(js_error(e)))?;
        Ok(())
    }

    fn add_tiles3d_layer(
        &mut self,
        layer: &Tiles3dLayer,
        events: EventSink,
    ) -> Result<(), BridgeError> {
        let layer_err = |e: JsValue| BridgeError::LayerConstruction(js_error(e));

        let ctor: Function = get(&self.namespace, "Layer")?.dyn_into().map_err(|_| {
            BridgeError::LayerConstruction("sphere.Layer is not a constructor".to_string())
        })?;
        let layer_type = get(&get(&self.namespace, "LayerType")?, "Tiles3D")?;

        let tileset_center = self.tileset_center.clone();
        let on_tileset_load = Closure::wrap(Box::new(move |tileset: JsValue| {
            if let Ok(center) = get(&tileset, "cartographicCenter") {
                *tileset_center.borrow_mut() = Some(center);
            }
            let event = match read_tileset(&tileset) {
                Ok(info) => ProviderEvent::TilesetLoaded(info),
                Err(msg) => ProviderEvent::TilesetUnreadable(msg),
            };
            events.emit(event);
        }) as Box<dyn FnMut(JsValue)>);

        let options = Object::new();
        let entries: [(&str, JsValue); 4] = [
            ("type", layer_type),
            ("url", JsValue::from_str(&layer.url)),
            ("onTilesetLoad", on_tileset_load.as_ref().clone()),
            ("opacity", JsValue::from_f64(layer.opacity)),
        ];
        for (key, value) in entries {
            Reflect::set(&options, &JsValue::from_str(key), &value).map_err(layer_err)?;
        }

        let instance = Reflect::construct(
            &ctor,
            &Array::of2(&JsValue::from_str(&layer.name), &options),
        )
        .map_err(layer_err)?;
        on_tileset_load.forget();

        let layers = get(&self.map, "Layers")?;
        let add: Function = get(&layers, "add")?.dyn_into().map_err(|_| {
            BridgeError::LayerConstruction("map.Layers.add is not a function".to_string())
        })?;
        add.call1(&layers, &instance).map_err(layer_err)?;

        log::info!("Added 3D tileset layer '{}'", layer.name);
        Ok(())
    }

    fn frame_tileset(&self, overview: &TilesetOverview) -> Result<(), BridgeError> {
        let center = self
            .tileset_center
            .borrow()
            .clone()
            .ok_or_else(|| BridgeError::Js("tileset has no cartographicCenter".to_string()))?;

        let options =
            serde_wasm_bindgen::to_value(overview).map_err(|e| BridgeError::Js(e.to_string()))?;
        Reflect::set(&options, &JsValue::from_str("center"), &center)
            .map_err(|e| BridgeError::Js(js_error(e)))?;

        let go_to: Function = get(&self.map, "goTo")?
            .dyn_into()
            .map_err(|_| BridgeError::Js("map.goTo is not a function".to_string()))?;
        go_to
            .call1(&self.map, &options)
            .map_err(|e| BridgeError::Js(js_error(e)))?;
        Ok(())
    }
}

/// Positions the map's DOM placeholder over the rectangle egui reserved for
/// it, or hides it when `rect` is `None`.
pub fn align_placeholder(placeholder_id: &str, rect: Option<Rect>) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(placeholder_id))
    else {
        return;
    };
    let Ok(element) = element.dyn_into::<HtmlElement>() else {
        return;
    };

    let style = element.style();
    let result = match rect {
        Some(rect) => [
            ("display", "block".to_string()),
            ("left", format!("{}px", rect.min.x)),
            ("top", format!("{}px", rect.min.y)),
            ("width", format!("{}px", rect.width())),
            ("height", format!("{}px", rect.height())),
        ]
        .iter()
        .try_for_each(|(property, value)| style.set_property(property, value)),
        None => style.set_property("display", "none"),
    };

    if let Err(e) = result {
        log::warn!("Failed to position map placeholder: {}", js_error(e));
    }
}

fn read_tileset(tileset: &JsValue) -> Result<TilesetInfo, String> {
    let zoom = Reflect::get(tileset, &JsValue::from_str("zoom"))
        .map_err(js_error)?
        .as_f64()
        .ok_or_else(|| "tileset zoom is not a number".to_string())?;

    // Only used for logging; the camera gets the SDK's value untouched
    let center = Reflect::get(tileset, &JsValue::from_str("cartographicCenter"))
        .ok()
        .and_then(|c| serde_wasm_bindgen::from_value::<CartographicCenter>(c).ok())
        .map(CartographicCenter::to_coord);

    Ok(TilesetInfo { center, zoom })
}

fn sphere_namespace() -> Option<JsValue> {
    let window = web_sys::window()?;
    get(&window, "sphere").ok()
}

fn document() -> Result<Document, BridgeError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| BridgeError::Js("No document".to_string()))
}

/// Reads a property, treating `undefined`/`null` as an error.
fn get(target: &JsValue, key: &str) -> Result<JsValue, BridgeError> {
    let value =
        Reflect::get(target, &JsValue::from_str(key)).map_err(|e| BridgeError::Js(js_error(e)))?;
    if value.is_undefined() || value.is_null() {
        return Err(BridgeError::Js(format!("missing property `{}`", key)));
    }
    Ok(value)
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
