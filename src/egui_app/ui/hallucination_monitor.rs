use eframe::egui::{self, Color32, Frame, RichText};

use super::style;
use crate::insights::{self, HallucinationReport};
use crate::quiz::Problem;

pub(super) fn render(ui: &mut egui::Ui, problems: &[Problem]) {
    let Some(report) = insights::hallucination_report(problems) else {
        return;
    };
    Frame::new()
        .fill(style::monitor_fill())
        .corner_radius(style::card_corner())
        .inner_margin(14.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new("Hallucination Monitor")
                    .size(18.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.add_space(8.0);
            render_cards(ui, &report);
            render_conflicts(ui, &report);
        });
    ui.add_space(12.0);
}

fn render_cards(ui: &mut egui::Ui, report: &HallucinationReport) {
    ui.horizontal_wrapped(|ui| {
        for tally in report.tallies() {
            let mut detail = insights::plural(tally.errors.len(), "error");
            if tally.unresolved > 0 {
                detail.push_str(&format!(", {} unresolved", tally.unresolved));
            }
            card(
                ui,
                &format!("{} Accuracy", tally.slot.label()),
                &format!("{:.0}%", tally.accuracy),
                &detail,
            );
        }
        card(
            ui,
            "System Accuracy",
            &format!("{:.0}%", report.system_accuracy),
            &insights::plural(report.total, "problem"),
        );
        card(
            ui,
            "Conflicts",
            &report.disagreements.len().to_string(),
            "Solver disagreements",
        );
    });
}

fn card(ui: &mut egui::Ui, title: &str, value: &str, detail: &str) {
    Frame::new()
        .fill(Color32::from_white_alpha(28))
        .corner_radius(style::card_corner())
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_min_width(140.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(title).small().color(Color32::from_white_alpha(200)));
                ui.label(
                    RichText::new(value)
                        .size(22.0)
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.label(RichText::new(detail).small().color(Color32::from_white_alpha(200)));
            });
        });
}

fn render_conflicts(ui: &mut egui::Ui, report: &HallucinationReport) {
    if report.disagreements.is_empty() {
        return;
    }
    ui.add_space(10.0);
    ui.label(RichText::new("Solver Conflicts").strong().color(Color32::WHITE));
    for conflict in report.visible_disagreements() {
        ui.label(
            RichText::new(format!(
                "{} ({}): Solver A picked {}, Solver B picked {}, correct is {}",
                conflict.id, conflict.category, conflict.solver_a, conflict.solver_b, conflict.correct
            ))
            .color(Color32::WHITE),
        );
    }
    let hidden = report.hidden_disagreements();
    if hidden > 0 {
        ui.label(
            RichText::new(format!("+{hidden} more conflicts detected"))
                .italics()
                .color(Color32::from_white_alpha(200)),
        );
    }
}
