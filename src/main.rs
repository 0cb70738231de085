//! Entry point for the egui-based quant quiz client.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::sync::Arc;

use eframe::egui;
use quantquiz::api::QuizApi;
use quantquiz::config::{self, AppConfig};
use quantquiz::egui_app::controller::EguiController;
use quantquiz::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use quantquiz::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match config::load_or_default() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Using default settings: {err}");
            AppConfig::default()
        }
    };

    if let Err(err) = logging::init(&config.logging) {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(1280.0, 860.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Quant Quiz Validator",
        native_options,
        Box::new(move |_cc| match QuizApi::from_config(&config) {
            Ok(api) => {
                let controller = EguiController::new(config, Arc::new(api));
                Ok(Box::new(EguiApp::new(controller)))
            }
            Err(err) => Ok(Box::new(LaunchError {
                message: err.to_string(),
            })),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
