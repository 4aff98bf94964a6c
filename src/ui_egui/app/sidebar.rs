//! Results sidebar: participant focus and best-time recommendations.

use super::MeetGridApp;
use crate::services::best_times::export_json;
use egui::RichText;

impl MeetGridApp {
    pub(super) fn render_sidebar(&mut self, ctx: &egui::Context) {
        const SIDEBAR_MIN_WIDTH: f32 = 180.0;
        const SIDEBAR_DEFAULT_WIDTH: f32 = 220.0;

        egui::SidePanel::right("results_sidebar")
            .default_width(SIDEBAR_DEFAULT_WIDTH)
            .min_width(SIDEBAR_MIN_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_participants(ui);
                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);
                self.render_best_times(ui, ctx);
            });
    }

    fn render_participants(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new(format!("Participants ({})", self.poll.participants.len())).strong());
        ui.selectable_value(&mut self.poll.focus, None, "Everyone");
        for participant in &self.poll.participants {
            ui.selectable_value(&mut self.poll.focus, Some(participant.id), &participant.name);
        }
    }

    fn render_best_times(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.label(RichText::new("Best times").strong());
        let best = self.poll.best_times();
        if best.is_empty() {
            ui.label(RichText::new("No availability yet").color(self.active_theme.text_secondary));
            return;
        }

        for (rank, time) in best.iter().enumerate() {
            ui.label(format!("{}. {} at {}", rank + 1, time.day, time.time));
            ui.label(
                RichText::new(format!("{} available", time.count))
                    .small()
                    .color(self.active_theme.text_secondary),
            );
        }

        if ui.button("Copy as JSON").clicked() {
            match export_json(&best) {
                Ok(json) => {
                    ctx.output_mut(|o| o.copied_text = json);
                    self.status = Some("Best times copied".to_string());
                }
                Err(e) => {
                    log::warn!("Failed to export best times: {:#}", e);
                    self.status = Some(format!("Export failed: {}", e));
                }
            }
        }
    }
}
