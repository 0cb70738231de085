use eframe::egui::{self, RichText};

use super::style;

pub(super) fn render(ui: &mut egui::Ui, dark_mode: &mut bool) {
    let palette = style::palette(*dark_mode);
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new("🐉 HydraHacks Quant Validator")
                    .size(22.0)
                    .strong()
                    .color(palette.accent),
            );
            ui.label(
                RichText::new("Multi-Agent Self-Validating Problem Generator")
                    .color(palette.text_muted),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (icon, hint) = if *dark_mode {
                ("☀", "Switch to light theme")
            } else {
                ("🌙", "Switch to dark theme")
            };
            if ui
                .button(RichText::new(icon).size(18.0))
                .on_hover_text(hint)
                .clicked()
            {
                *dark_mode = !*dark_mode;
            }
        });
    });
    ui.add_space(6.0);
}
