//! Bangkok overlay panel: clickable district markers and legend.

use super::colors::{self, brand, location_color, overlay};
use crate::data::{Location, LOCATIONS};
use crate::state::SelectionState;
use eframe::egui::{
    self, vec2, Align2, FontId, Painter, Pos2, Rect, RichText, Sense, Shape, Stroke, StrokeKind,
};
use std::time::Duration;

/// Width / height of the Bangkok background artwork.
pub const MAP_ASPECT: f32 = 871.0 / 692.0;

const MARKER_RADIUS: f32 = 10.0;
const HOVER_SCALE: f32 = 1.25;
const SELECTED_RING_RADIUS: f32 = 14.0;
const PULSE_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// Chao Phraya centerline across the artwork, in percent.
const RIVER: [(f32, f32); 9] = [
    (38.0, 0.0),
    (36.0, 15.0),
    (40.0, 30.0),
    (33.0, 42.0),
    (37.0, 50.0),
    (45.0, 58.0),
    (42.0, 68.0),
    (48.0, 80.0),
    (44.0, 100.0),
];

/// Maps overlay percentages onto a screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    pub rect: Rect,
}

impl OverlayLayout {
    /// Largest rectangle with the artwork's aspect ratio that fits in
    /// `available`, centered horizontally.
    pub fn fit(available: Rect) -> Self {
        let mut width = available.width();
        let mut height = width / MAP_ASPECT;
        if height > available.height() {
            height = available.height();
            width = height * MAP_ASPECT;
        }
        let min = Pos2::new(
            available.center().x - width / 2.0,
            available.min.y,
        );
        Self {
            rect: Rect::from_min_size(min, vec2(width, height)),
        }
    }

    /// Screen position of a percentage point.
    pub fn to_screen(&self, x_percent: f32, y_percent: f32) -> Pos2 {
        self.rect.min
            + vec2(
                self.rect.width() * x_percent / 100.0,
                self.rect.height() * y_percent / 100.0,
            )
    }

    pub fn marker_center(&self, location: &Location) -> Pos2 {
        let p = location.display_position;
        self.to_screen(p.x, p.y)
    }

    /// Location whose marker is under `pointer`, nearest first.
    pub fn hit_test(&self, pointer: Pos2) -> Option<&'static Location> {
        let hit_radius = MARKER_RADIUS * HOVER_SCALE;
        LOCATIONS
            .iter()
            .map(|l| (l, self.marker_center(l).distance(pointer)))
            .filter(|(_, d)| *d <= hit_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(l, _)| l)
    }
}

/// Renders the overlay panel. The inner value is the location clicked this
/// frame; the response rect is the panel's screen area.
pub fn render_bangkok_panel(
    ctx: &egui::Context,
    selection: &mut SelectionState,
    pulsing: bool,
) -> egui::InnerResponse<Option<&'static Location>> {
    egui::SidePanel::right("bangkok_map")
        .resizable(true)
        .default_width(520.0)
        .min_width(320.0)
        .frame(egui::Frame::new().fill(brand::BACKGROUND).inner_margin(16.0))
        .show(ctx, |ui| {
            let mut clicked = None;

            ui.label(
                RichText::new("แผนที่กรุงเทพมหานคร")
                    .size(22.0)
                    .color(brand::TEXT),
            );
            ui.label(
                RichText::new("คลิกที่จุดสีเขียวเพื่อดูข้อมูลพื้นที่และไปยังตำแหน่งบนแผนที่")
                    .color(brand::text_muted()),
            );
            ui.add_space(12.0);

            let available = Rect::from_min_size(
                ui.cursor().min,
                vec2(ui.available_width(), ui.available_height() * 0.7),
            );
            let layout = OverlayLayout::fit(available);
            let (response, painter) =
                ui.allocate_painter(vec2(available.width(), layout.rect.height()), Sense::click());

            let hovered = response.hover_pos().and_then(|p| layout.hit_test(p));
            selection.set_hovered(hovered);

            if response.clicked() {
                if let Some(location) = response
                    .interact_pointer_pos()
                    .and_then(|p| layout.hit_test(p))
                {
                    clicked = Some(selection.click(location));
                }
            }
            if hovered.is_some() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }

            let time = ui.input(|i| i.time);
            draw_background(&painter, &layout);
            draw_markers(&painter, &layout, selection, ring_pulse(time, pulsing));
            if let Some(location) = hovered {
                draw_tooltip(&painter, &layout, location);
            }

            ui.add_space(16.0);
            if let Some(location) = render_legend(ui, selection) {
                clicked = Some(location);
            }

            if let Some(interval) = pulse_repaint_interval(pulsing) {
                ui.ctx().request_repaint_after(interval);
            }

            clicked
        })
}

/// Brightness of the selection ring in `0..=1`. The ring pulses only while
/// `pulsing` and holds steady otherwise.
fn ring_pulse(time: f64, pulsing: bool) -> f32 {
    if pulsing {
        0.5 + 0.5 * (time * 3.0).sin() as f32
    } else {
        1.0
    }
}

/// Repaint interval needed to animate the ring, if any.
fn pulse_repaint_interval(pulsing: bool) -> Option<Duration> {
    pulsing.then_some(PULSE_REPAINT_INTERVAL)
}

fn draw_background(painter: &Painter, layout: &OverlayLayout) {
    let rect = layout.rect;
    painter.rect_filled(rect, 8.0, overlay::LAND);

    let grid = Stroke::new(1.0, overlay::GRID);
    for i in 1..10 {
        let t = i as f32 * 10.0;
        painter.line_segment([layout.to_screen(t, 0.0), layout.to_screen(t, 100.0)], grid);
        painter.line_segment([layout.to_screen(0.0, t), layout.to_screen(100.0, t)], grid);
    }

    let river: Vec<Pos2> = RIVER.iter().map(|&(x, y)| layout.to_screen(x, y)).collect();
    painter.add(Shape::line(river, Stroke::new(6.0, overlay::RIVER)));

    painter.rect_stroke(
        rect,
        8.0,
        Stroke::new(1.0, brand::card_border()),
        StrokeKind::Inside,
    );
}

fn draw_markers(painter: &Painter, layout: &OverlayLayout, selection: &SelectionState, pulse: f32) {
    for location in &LOCATIONS {
        let center = layout.marker_center(location);
        let color = location_color(location.id);

        if selection.is_selected(location) {
            painter.circle_filled(
                center,
                SELECTED_RING_RADIUS,
                color.gamma_multiply(0.2 + 0.2 * pulse),
            );
        }

        let radius = if selection.is_hovered(location) {
            MARKER_RADIUS * HOVER_SCALE
        } else {
            MARKER_RADIUS
        };
        painter.circle_filled(center, radius, color);
        painter.circle_stroke(center, radius, Stroke::new(2.0, overlay::MARKER_STROKE));
        painter.text(
            center,
            Align2::CENTER_CENTER,
            location.id,
            FontId::proportional(9.0),
            overlay::MARKER_LABEL,
        );
    }
}

fn draw_tooltip(painter: &Painter, layout: &OverlayLayout, location: &Location) {
    let name = painter.layout_no_wrap(
        location.name.to_string(),
        FontId::proportional(13.0),
        brand::TEXT,
    );
    let description = painter.layout_no_wrap(
        location.description.to_string(),
        FontId::proportional(11.0),
        brand::text_muted(),
    );

    let padding = vec2(10.0, 6.0);
    let size = vec2(
        name.size().x.max(description.size().x),
        name.size().y + description.size().y,
    ) + padding * 2.0;

    let anchor = layout.marker_center(location);
    let min = Pos2::new(
        anchor.x - size.x / 2.0,
        anchor.y - MARKER_RADIUS * HOVER_SCALE - 8.0 - size.y,
    );
    let rect = Rect::from_min_size(min, size);

    painter.rect_filled(rect, 6.0, overlay::tooltip());
    painter.rect_stroke(
        rect,
        6.0,
        Stroke::new(1.0, colors::brand::card_border()),
        StrokeKind::Inside,
    );
    let text_min = rect.min + padding;
    let name_height = name.size().y;
    painter.galley(text_min, name, brand::TEXT);
    painter.galley(text_min + vec2(0.0, name_height), description, brand::TEXT);
}

/// Legend listing every location. Clicking an entry selects it just like
/// clicking its marker.
fn render_legend(ui: &mut egui::Ui, selection: &mut SelectionState) -> Option<&'static Location> {
    let mut clicked = None;

    egui::Frame::new()
        .fill(brand::card())
        .stroke(Stroke::new(1.0, brand::card_border()))
        .corner_radius(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new("ระดับศักยภาพพื้นที่")
                    .strong()
                    .color(brand::TEXT),
            );
            ui.add_space(6.0);

            ui.horizontal_wrapped(|ui| {
                for location in &LOCATIONS {
                    let (dot, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
                    ui.painter()
                        .circle_filled(dot.center(), 7.0, location_color(location.id));

                    let text = RichText::new(format!("{}  {}", location.id, location.name))
                        .size(12.0)
                        .color(brand::TEXT);
                    let response = ui
                        .selectable_label(selection.is_selected(location), text)
                        .on_hover_text(location.tier.label());
                    if response.clicked() {
                        clicked = Some(selection.click(location));
                    }
                    ui.add_space(8.0);
                }
            });
        });

    clicked
}
