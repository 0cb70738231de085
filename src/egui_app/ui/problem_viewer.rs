use eframe::egui::{self, Color32, Frame, RichText, Stroke};

use super::EguiApp;
use super::style::{self, Palette};
use crate::egui_app::view_model::{self, OptionMarker, ProblemCard, SolverColumn, SolverComparison};
use crate::insights::AnswerFeedback;
use crate::quiz::OptionLabel;

enum CardAction {
    Select(String, OptionLabel),
    ToggleReveal(String),
}

impl EguiApp {
    pub(super) fn render_problem_viewer(&mut self, ui: &mut egui::Ui) {
        let cards = view_model::problem_cards(
            self.controller.store().problems(),
            &self.controller.ui.viewer,
        );
        if cards.is_empty() {
            return;
        }
        let palette = style::palette(self.controller.ui.dark_mode);
        let review_mode = self.controller.ui.viewer.review_mode;
        ui.heading(format!("Problems ({})", cards.len()));
        ui.add_space(6.0);
        let mut actions = Vec::new();
        for (index, card) in cards.iter().enumerate() {
            render_card(ui, index, card, review_mode, &palette, &mut actions);
            ui.add_space(10.0);
        }
        for action in actions {
            match action {
                CardAction::Select(id, label) => self.controller.select_answer(&id, label),
                CardAction::ToggleReveal(id) => self.controller.toggle_reveal(&id),
            }
        }
    }
}

fn render_card(
    ui: &mut egui::Ui,
    index: usize,
    card: &ProblemCard,
    review_mode: bool,
    palette: &Palette,
    actions: &mut Vec<CardAction>,
) {
    Frame::new()
        .fill(palette.bg_secondary)
        .stroke(Stroke::new(1.0, palette.panel_outline))
        .corner_radius(style::card_corner())
        .inner_margin(14.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(format!("#{}", index + 1)).strong());
                tag(ui, &card.category, palette.accent);
                if !card.difficulty.is_empty() {
                    tag(ui, &card.difficulty, palette.accent_soft);
                }
                if !card.validation_status.is_empty() {
                    tag(ui, &card.validation_status, palette.text_muted);
                }
                ui.label(RichText::new(&card.id).small().color(palette.text_muted));
            });
            ui.add_space(6.0);
            ui.label(RichText::new(&card.question).size(15.0));
            ui.add_space(6.0);
            for row in &card.options {
                ui.horizontal(|ui| {
                    let color = match row.marker {
                        OptionMarker::Correct => palette.success,
                        OptionMarker::WrongPick => palette.danger,
                        OptionMarker::Plain => palette.text_primary,
                    };
                    let text = RichText::new(format!("{}. {}", row.label, row.text)).color(color);
                    let checked = card.choice == Some(row.label);
                    if review_mode {
                        ui.label(text);
                    } else if ui.radio(checked, text).clicked() {
                        actions.push(CardAction::Select(card.id.clone(), row.label));
                    }
                    for slot in &row.picked_by {
                        tag(ui, slot.label(), palette.warning);
                    }
                });
            }
            if !review_mode {
                ui.add_space(6.0);
                let label = if card.revealed { "Hide answer" } else { "Check answer" };
                if ui
                    .add_enabled(card.choice.is_some(), egui::Button::new(label))
                    .clicked()
                {
                    actions.push(CardAction::ToggleReveal(card.id.clone()));
                }
            }
            if let Some(feedback) = &card.feedback {
                ui.add_space(4.0);
                match feedback {
                    AnswerFeedback::Correct => {
                        ui.label(RichText::new("✔ Correct!").strong().color(palette.success));
                    }
                    AnswerFeedback::Incorrect {
                        correct,
                        correct_text,
                    } => {
                        ui.label(
                            RichText::new(format!(
                                "✘ Incorrect. The correct answer is {correct}. {correct_text}"
                            ))
                            .strong()
                            .color(palette.danger),
                        );
                    }
                }
            }
            if let Some(explanation) = &card.explanation {
                ui.add_space(6.0);
                ui.label(RichText::new("Explanation").strong());
                ui.label(RichText::new(explanation).color(palette.text_muted));
            }
            if let Some(comparison) = &card.comparison {
                ui.add_space(8.0);
                render_comparison(ui, comparison, palette);
            }
        });
}

fn render_comparison(ui: &mut egui::Ui, comparison: &SolverComparison, palette: &Palette) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Solver Comparison").strong());
        let color = if comparison.validated {
            palette.success
        } else {
            palette.warning
        };
        tag(ui, &comparison.agreement, color);
    });
    ui.columns(2, |columns| {
        solver_column(&mut columns[0], &comparison.solver_a, palette);
        solver_column(&mut columns[1], &comparison.solver_b, palette);
    });
    if let Some(ground_truth) = &comparison.ground_truth {
        ui.label(
            RichText::new(format!("Ground truth: {ground_truth}"))
                .small()
                .color(palette.text_muted),
        );
    }
}

fn solver_column(ui: &mut egui::Ui, column: &SolverColumn, palette: &Palette) {
    Frame::new()
        .fill(palette.bg_tertiary)
        .corner_radius(style::card_corner())
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(column.title).strong());
            ui.label(RichText::new(column.approach).small().color(palette.text_muted));
            ui.label(RichText::new(&column.answer).size(18.0).color(palette.accent));
            ui.label(RichText::new(&column.confidence).small());
            ui.label(RichText::new(&column.selected).small());
        });
}

fn tag(ui: &mut egui::Ui, text: &str, color: Color32) {
    Frame::new()
        .fill(color.gamma_multiply(0.2))
        .corner_radius(style::card_corner())
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(color));
        });
}
