use super::colors::brand;
use eframe::egui::{self, Pos2, Rect, RichText, Stroke};
use egui_phosphor::regular as icons;

/// Gap between the top of the host panel and the toast.
const TOP_MARGIN: f32 = 12.0;

/// Floating navigation status message, centered at the top of `over`.
///
/// `over` must be an egui-only region: the 3D map is a DOM element stacked
/// above the canvas and would hide anything painted beneath it.
pub fn render_status_toast(ctx: &egui::Context, status: Option<&str>, over: Rect) {
    let Some(status) = status else {
        return;
    };

    egui::Area::new(egui::Id::new("navigation_status"))
        .pivot(egui::Align2::CENTER_TOP)
        .fixed_pos(toast_anchor(over))
        .constrain_to(over)
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(brand::ACCENT)
                .stroke(Stroke::new(1.0, brand::card_border()))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(14, 8))
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(format!("{} {}", icons::MAP_PIN, status))
                            .strong()
                            .color(brand::BACKGROUND),
                    );
                });
        });
}

/// Top-center point of the toast within its host panel.
fn toast_anchor(over: Rect) -> Pos2 {
    Pos2::new(over.center().x, over.min.y + TOP_MARGIN)
}
