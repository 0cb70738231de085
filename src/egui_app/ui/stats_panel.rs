use eframe::egui::{self, Frame, RichText, Stroke};

use super::style;
use crate::insights::{self, BreakdownRow};
use crate::quiz::Stats;

pub(super) fn render(ui: &mut egui::Ui, stats: &Stats, dark: bool) {
    let palette = style::palette(dark);
    let summary = insights::stats_summary(stats);
    ui.heading("Generation Stats");
    ui.add_space(6.0);
    ui.horizontal_wrapped(|ui| {
        for card in &summary.cards {
            Frame::new()
                .fill(palette.bg_secondary)
                .stroke(Stroke::new(1.0, palette.panel_outline))
                .corner_radius(style::card_corner())
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.set_min_width(130.0);
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&card.value)
                                .size(24.0)
                                .strong()
                                .color(palette.accent),
                        );
                        ui.label(RichText::new(card.label).color(palette.text_muted));
                    });
                });
        }
    });
    breakdown(ui, "Error Breakdown", "stats_errors", &summary.errors);
    breakdown(ui, "Failure Breakdown", "stats_failures", &summary.failures);
    breakdown(ui, "Difficulty", "stats_difficulty", &summary.difficulty);
    ui.add_space(12.0);
}

fn breakdown(ui: &mut egui::Ui, title: &str, id: &str, rows: &[BreakdownRow]) {
    if rows.is_empty() {
        return;
    }
    ui.add_space(8.0);
    ui.label(RichText::new(title).strong());
    egui::Grid::new(id)
        .num_columns(2)
        .striped(true)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            for row in rows {
                ui.label(&row.label);
                ui.label(row.count.to_string());
                ui.end_row();
            }
        });
}
