//! Central pane: reserves screen space for the 3D map and shows the
//! selected location's details beneath it.

use super::colors::{brand, map_pane};
use crate::data::Location;
use crate::sphere::{self, LoadState, PLACEHOLDER_ID};
use eframe::egui::{self, vec2, Align2, FontId, RichText, Sense, Stroke, StrokeKind};

/// Fraction of the pane height given to the map when a details card is shown.
const MAP_HEIGHT_WITH_DETAILS: f32 = 0.75;

pub fn render_map_pane(
    ctx: &egui::Context,
    load_state: LoadState<'_>,
    selected: Option<&'static Location>,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(brand::BACKGROUND).inner_margin(16.0))
        .show(ctx, |ui| {
            let available = ui.available_size();
            let map_height = if selected.is_some() {
                available.y * MAP_HEIGHT_WITH_DETAILS
            } else {
                available.y
            };

            let (rect, _) = ui.allocate_exact_size(vec2(available.x, map_height), Sense::hover());
            let painter = ui.painter_at(rect);

            match load_state {
                LoadState::Ready => {
                    sphere::align_placeholder(PLACEHOLDER_ID, Some(rect));
                }
                LoadState::Pending => {
                    // The placeholder must be laid out before the SDK binds to it
                    sphere::align_placeholder(PLACEHOLDER_ID, Some(rect));
                    painter.rect_filled(rect, 8.0, map_pane::LOADING);
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        "Loading Map...",
                        FontId::proportional(16.0),
                        brand::TEXT,
                    );
                }
                LoadState::Failed(error) => {
                    sphere::align_placeholder(PLACEHOLDER_ID, None);
                    painter.rect_filled(rect, 8.0, map_pane::LOADING);
                    painter.text(
                        rect.center() - vec2(0.0, 12.0),
                        Align2::CENTER_CENTER,
                        "3D map unavailable",
                        FontId::proportional(16.0),
                        map_pane::ERROR,
                    );
                    painter.text(
                        rect.center() + vec2(0.0, 12.0),
                        Align2::CENTER_CENTER,
                        error.to_string(),
                        FontId::proportional(12.0),
                        brand::text_muted(),
                    );
                }
            }
            painter.rect_stroke(
                rect,
                8.0,
                Stroke::new(1.0, brand::card_border()),
                StrokeKind::Inside,
            );

            if let Some(location) = selected {
                ui.add_space(12.0);
                render_details(ui, location);
            }
        });
}

fn render_details(ui: &mut egui::Ui, location: &Location) {
    egui::Frame::new()
        .fill(brand::card())
        .stroke(Stroke::new(1.0, brand::card_border()))
        .corner_radius(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("{} - {}", location.name, location.id))
                    .size(20.0)
                    .strong()
                    .color(brand::ACCENT),
            );
            ui.add_space(4.0);
            ui.label(RichText::new(location.description).color(brand::TEXT));
            ui.add_space(4.0);
            ui.label(
                RichText::new(location.coordinate_label())
                    .size(12.0)
                    .color(brand::text_muted()),
            );
        });
}
