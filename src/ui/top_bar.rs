//! Top bar UI: brand, section labels, and map status.

use super::colors::brand;
use crate::config::AppConfig;
use crate::sphere::LoadState;
use crate::state::AppState;
use eframe::egui::{self, RichText};
use egui_phosphor::regular as icons;

const SECTIONS: [&str; 3] = ["ข้อมูลพื้นที่", "ข้อมูล Index", "เกี่ยวกับเรา"];

pub fn render_top_bar(
    ctx: &egui::Context,
    state: &AppState,
    load_state: LoadState<'_>,
    config: Option<&AppConfig>,
) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(48.0)
        .frame(egui::Frame::new().fill(brand::BACKGROUND).inner_margin(8.0))
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new("OASIS-H")
                        .strong()
                        .size(20.0)
                        .color(brand::TEXT),
                );

                ui.add_space(24.0);

                for section in SECTIONS {
                    ui.label(RichText::new(section).size(13.0).color(brand::text_muted()));
                    ui.add_space(12.0);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (icon, text) = match load_state {
                        LoadState::Pending => (icons::HOURGLASS, "3D map loading"),
                        LoadState::Ready => (icons::GLOBE_HEMISPHERE_EAST, "3D map ready"),
                        LoadState::Failed(_) => (icons::WARNING, "3D map unavailable"),
                    };
                    ui.label(
                        RichText::new(format!("{} {}", icon, text))
                            .size(12.0)
                            .color(brand::text_muted()),
                    );

                    // Share link for the current selection
                    let link = state
                        .selection
                        .selected
                        .zip(config)
                        .and_then(|(id, config)| config.share_link(id));
                    if let Some(link) = link {
                        ui.separator();
                        ui.hyperlink_to(
                            RichText::new(format!("{} Share", icons::LINK)).color(brand::ACCENT),
                            link,
                        );
                    }
                });
            });
        });
}
