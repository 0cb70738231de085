use eframe::egui::{self, Frame, ProgressBar, RichText, Stroke};

use super::style;
use crate::egui_app::view_model;
use crate::quiz::AgentStatus;

/// Agent progress grid; hidden when the backend reports no agents.
pub(super) fn render(ui: &mut egui::Ui, agents: &[AgentStatus], dark: bool) {
    let rows = view_model::agent_rows(agents);
    if rows.is_empty() {
        return;
    }
    let palette = style::palette(dark);
    ui.heading("Agent Status");
    ui.add_space(6.0);
    ui.horizontal_wrapped(|ui| {
        for row in &rows {
            let color = style::agent_state_color(row.state, &palette);
            Frame::new()
                .fill(palette.bg_secondary)
                .stroke(Stroke::new(1.0, palette.panel_outline))
                .corner_radius(style::card_corner())
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.set_width(200.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&row.name).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(RichText::new(row.state.label()).small().color(color));
                        });
                    });
                    ui.add(
                        ProgressBar::new(row.fraction)
                            .fill(color)
                            .desired_width(180.0)
                            .show_percentage(),
                    );
                    if let Some(message) = &row.message {
                        ui.label(RichText::new(message).small().color(palette.text_muted));
                    }
                });
        }
    });
    ui.add_space(12.0);
}
