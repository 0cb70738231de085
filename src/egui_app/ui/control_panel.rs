use eframe::egui::{self, RichText};

use super::EguiApp;
use super::style;
use crate::quiz::{CategorySelection, MAX_PROBLEMS, MIN_PROBLEMS};

impl EguiApp {
    pub(super) fn render_control_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette(self.controller.ui.dark_mode);
        let loading = self.controller.store().is_loading();
        ui.add_space(8.0);
        ui.heading("Generate Problems");
        ui.add_space(8.0);
        ui.add_enabled_ui(!loading, |ui| self.render_form(ui));
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            let label = if self.controller.store().is_generating() {
                "Generating..."
            } else {
                "Generate"
            };
            let generate = egui::Button::new(RichText::new(label).strong())
                .fill(palette.accent)
                .min_size(egui::vec2(120.0, 28.0));
            if ui.add_enabled(!loading, generate).clicked() {
                self.controller.generate();
            }
            if loading && ui.button("Cancel").clicked() {
                self.controller.cancel_generate();
            }
        });
        if loading {
            ui.add_space(6.0);
            ui.add(egui::Spinner::new());
        }
        if ui
            .add_enabled(!loading, egui::Button::new("Load latest batch"))
            .on_hover_text("Fetch the most recent problems from the backend")
            .clicked()
        {
            self.controller.fetch_latest();
        }

        ui.separator();
        ui.heading("Export");
        ui.add_space(4.0);
        let export_label = if self.controller.store().is_exporting() {
            "Exporting..."
        } else {
            "Export quiz as HTML"
        };
        if ui
            .add_enabled(
                self.controller.export_enabled(),
                egui::Button::new(export_label),
            )
            .on_disabled_hover_text("Generate problems before exporting")
            .clicked()
        {
            self.controller.request_export_via_dialog();
        }
        if let Some(path) = self.controller.store().last_export_path() {
            let shown = path.display().to_string();
            ui.label(RichText::new(shown).small().color(palette.text_muted));
            if ui.small_button("Open last export").clicked() {
                self.controller.open_last_export();
            }
        }
        if let Some(error) = self.controller.store().export_error() {
            ui.label(RichText::new(error).small().color(palette.danger));
        }

        ui.separator();
        let mut review_mode = self.controller.ui.viewer.review_mode;
        if ui
            .checkbox(&mut review_mode, "Review mode")
            .on_hover_text("Show answers and solver picks for every problem")
            .changed()
        {
            self.controller.set_review_mode(review_mode);
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.controller.ui.form;
        egui::Grid::new("generate_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Number of problems");
                ui.add(egui::DragValue::new(&mut form.num_problems).range(MIN_PROBLEMS..=MAX_PROBLEMS));
                ui.end_row();

                ui.label("Category");
                egui::ComboBox::from_id_salt("category_select")
                    .selected_text(form.category.label())
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        for option in CategorySelection::options() {
                            ui.selectable_value(&mut form.category, option, option.label());
                        }
                    });
                ui.end_row();
            });
        ui.add_space(6.0);
        ui.checkbox(&mut form.use_difficulty_mix, "Custom difficulty mix");
        if form.use_difficulty_mix {
            egui::Grid::new("difficulty_mix")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    let mix = &mut form.difficulty;
                    for (label, value) in [
                        ("Easy", &mut mix.easy),
                        ("Medium", &mut mix.medium),
                        ("Hard", &mut mix.hard),
                    ] {
                        ui.label(label);
                        ui.add(egui::DragValue::new(value).range(0..=MAX_PROBLEMS));
                        ui.end_row();
                    }
                });
        }
    }
}
