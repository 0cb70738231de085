use eframe::egui::{self, RichText};

use super::style;
use crate::egui_app::state::StatusBarState;

pub(super) fn render(ui: &mut egui::Ui, status: &StatusBarState, dark: bool) {
    let palette = style::palette(dark);
    ui.horizontal(|ui| {
        ui.add_space(6.0);
        let (badge_rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter()
            .circle_filled(badge_rect.center(), 6.0, status.badge_color);
        ui.add_space(6.0);
        ui.label(RichText::new(status.tone.label()).color(palette.text_primary));
        ui.separator();
        ui.label(RichText::new(&status.text).color(palette.text_muted));
    });
}
