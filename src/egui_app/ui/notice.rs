use eframe::egui::{self, Id, RichText};

use super::EguiApp;

impl EguiApp {
    /// Blocking notice; input behind it is ignored until acknowledged.
    pub(super) fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.controller.ui.notice.clone() else {
            return;
        };
        let mut acknowledged = false;
        let response = egui::Modal::new(Id::new("notice_modal")).show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.heading(RichText::new(&notice.title).strong());
            ui.add_space(8.0);
            ui.label(&notice.message);
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        });
        if acknowledged || response.should_close() {
            self.controller.dismiss_notice();
        }
    }
}
