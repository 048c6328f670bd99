use eframe::egui::{self, Visuals};

use super::constants::*;

pub fn native_options() -> eframe::NativeOptions {
    let viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size(WINDOW_SIZE);
    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}

pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = Visuals::light();
    visuals.panel_fill = PAGE_BG;
    visuals.window_fill = CARD_BG;
    visuals.override_text_color = None;
    ctx.set_visuals(visuals);
}

/// White card with rounded corners, the container for each dashboard section.
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(CARD_BG)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(24))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(229)))
}
