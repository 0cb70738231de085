use eframe::egui::{self, RichText, Sense};

use super::style;
use crate::insights;
use crate::quiz::Problem;

const BAR_HEIGHT: f32 = 14.0;

/// Per-category confidence bars coloured by tier.
pub(super) fn render(ui: &mut egui::Ui, problems: &[Problem], dark: bool) {
    let rows = insights::confidence_by_category(problems);
    if rows.is_empty() {
        return;
    }
    let palette = style::palette(dark);
    ui.heading("Confidence Heatmap");
    ui.add_space(6.0);
    egui::Grid::new("confidence_heatmap")
        .num_columns(3)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for row in &rows {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&row.category).strong());
                    ui.label(
                        RichText::new(insights::plural(row.count, "problem"))
                            .small()
                            .color(palette.text_muted),
                    );
                });
                let width = (ui.available_width() - 220.0).max(120.0);
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(width, BAR_HEIGHT), Sense::hover());
                let painter = ui.painter();
                painter.rect_filled(rect, style::card_corner(), palette.bg_tertiary);
                let fill_width = rect.width() * (row.combined / 100.0).clamp(0.0, 1.0) as f32;
                let filled = egui::Rect::from_min_size(rect.min, egui::vec2(fill_width, rect.height()));
                painter.rect_filled(filled, style::card_corner(), style::tier_color(row.tier));
                response.on_hover_text(format!(
                    "Solver A {:.0}% | Solver B {:.0}%",
                    row.solver_a, row.solver_b
                ));
                ui.label(
                    RichText::new(format!("{:.0}%", row.combined))
                        .strong()
                        .color(style::tier_color(row.tier)),
                );
                ui.end_row();
            }
        });
    ui.add_space(12.0);
}
