#![warn(clippy::all)]

//! OASIS-H - Bangkok urban-heat potential map.
//!
//! A Bangkok overlay lets the user pick one of five candidate districts; the
//! GISTDA sphere 3D map then flies to the chosen spot.

mod config;
mod data;
mod sphere;
mod state;
mod ui;

use config::AppConfig;
use eframe::egui;
use sphere::{BridgeError, MapBridge, PlatformProvider, PLACEHOLDER_ID};
use state::AppState;
use web_time::Instant;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "OASIS-H",
        native_options,
        Box::new(|cc| Ok(Box::new(OasisApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(OasisApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct OasisApp {
    /// Selection, details card, and navigation timers
    state: AppState,

    /// Bridge to the sphere 3D map SDK
    bridge: MapBridge<PlatformProvider>,

    /// Resolved configuration, absent when no API key is available
    config: Option<AppConfig>,
}

impl OasisApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let config = match AppConfig::load() {
            Ok(config) => Some(config),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        };

        // Without a key the overlay still works; only the 3D map is disabled.
        let initial_selection = match &config {
            Some(config) => config.initial_selection.clone(),
            None => state::url_state::parse_from_url()
                .location
                .or_else(|| state::settings::MapSettings::load().initial_selection),
        };
        let state = AppState::new(initial_selection.as_deref());

        let api_key = config.as_ref().map(|c| c.api_key.as_str()).unwrap_or("");
        let mut bridge = MapBridge::new(
            PlatformProvider::default(),
            sphere::script_url(api_key),
            PLACEHOLDER_ID,
        )
        .with_repaint(cc.egui_ctx.clone());

        match &config {
            Some(config) => {
                bridge = bridge.with_load_timeout(config.load_timeout);
                bridge.mount(Instant::now());
            }
            None => bridge.abort(BridgeError::NotConfigured(
                config::ConfigError::MissingApiKey.to_string(),
            )),
        }

        Self {
            state,
            bridge,
            config,
        }
    }

    fn select_location(&mut self, location: &'static data::Location, now: Instant) {
        log::info!("Selected location {} ({})", location.id, location.name);
        self.state.navigation.select(location, now);
        state::url_state::push_selection(location.id);
    }
}

impl eframe::App for OasisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.bridge.poll(now);
        for command in self.state.navigation.poll(now) {
            self.bridge
                .navigate_to_location(command.coordinates, Some(command.zoom));
        }

        let load_state = self.bridge.load_state();
        ui::render_top_bar(ctx, &self.state, load_state, self.config.as_ref());
        // The ring pulses while a navigation is in flight
        let pulsing = self.state.navigation.status.is_some();
        let overlay = ui::render_bangkok_panel(ctx, &mut self.state.selection, pulsing);
        ui::render_map_pane(ctx, load_state, self.state.navigation.selected);
        // Painted over the overlay panel: the map element covers the central pane
        ui::render_status_toast(
            ctx,
            self.state.navigation.status.as_deref(),
            overlay.response.rect,
        );

        if let Some(location) = overlay.inner {
            self.select_location(location, now);
        }

        // Wake up for the next timer even if there is no input
        let deadline = [
            self.bridge.next_deadline(),
            self.state.navigation.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min();
        if let Some(deadline) = deadline {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("Shutting down, map bridge {}", self.bridge.phase().label());
        self.state.navigation.cancel_all();
        self.bridge.unmount();
    }
}
