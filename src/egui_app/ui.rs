//! egui renderer for the quiz validator.

mod agent_status;
mod confidence_heatmap;
mod control_panel;
mod hallucination_monitor;
mod header;
mod notice;
mod problem_viewer;
mod stats_panel;
mod status_bar;
pub mod style;

use std::time::{Duration, Instant};

use eframe::egui::{self, RichText};
use tracing::{info, warn};

use crate::egui_app::controller::EguiController;

/// Smallest window the layout stays usable at.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(960.0, 640.0);
/// Repaint cadence while requests are in flight.
const BUSY_REPAINT: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    applied_dark_mode: Option<bool>,
}

impl EguiApp {
    pub fn new(controller: EguiController) -> Self {
        Self {
            controller,
            applied_dark_mode: None,
        }
    }

    fn prepare_frame(&mut self, ctx: &egui::Context) {
        let dark = self.controller.ui.dark_mode;
        if self.applied_dark_mode != Some(dark) {
            ctx.set_visuals(style::visuals(dark));
            self.applied_dark_mode = Some(dark);
        }
        self.controller.poll_background_jobs();
        self.controller.maybe_poll_status(Instant::now());
        if self.controller.has_pending_work() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }

    fn render_error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(error) = self.controller.store().error().map(str::to_string) else {
            return;
        };
        let palette = style::palette(self.controller.ui.dark_mode);
        egui::Frame::new()
            .fill(palette.danger.gamma_multiply(0.15))
            .stroke(egui::Stroke::new(1.0, palette.danger))
            .corner_radius(style::card_corner())
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(error).color(palette.danger));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Dismiss").clicked() {
                            self.controller.dismiss_error();
                        }
                    });
                });
            });
        ui.add_space(12.0);
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        let dark = self.controller.ui.dark_mode;
        egui::ScrollArea::vertical()
            .id_salt("results_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.render_error_banner(ui);
                agent_status::render(ui, self.controller.store().agents(), dark);
                if let Some(stats) = self.controller.store().stats() {
                    stats_panel::render(ui, stats, dark);
                }
                let problems = self.controller.store().problems();
                confidence_heatmap::render(ui, problems, dark);
                hallucination_monitor::render(ui, problems);
                self.render_problem_viewer(ui);
                if self.controller.store().problems().is_empty() && !self.controller.store().is_loading()
                {
                    self.render_empty_state(ui);
                }
            });
    }

    fn render_empty_state(&self, ui: &mut egui::Ui) {
        let palette = style::palette(self.controller.ui.dark_mode);
        ui.add_space(48.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("No problems yet")
                    .size(20.0)
                    .color(palette.text_primary),
            );
            ui.label(
                RichText::new("Pick a category and count on the left, then press Generate.")
                    .color(palette.text_muted),
            );
        });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.prepare_frame(ctx);
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            header::render(ui, &mut self.controller.ui.dark_mode);
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar::render(ui, &self.controller.ui.status, self.controller.ui.dark_mode);
        });
        egui::SidePanel::left("control_panel")
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| self.render_control_panel(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.render_results(ui));
        self.render_notice(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        match self.controller.persist_form_defaults() {
            Ok(true) => info!("saved generation defaults"),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "could not save generation defaults"),
        }
    }
}
