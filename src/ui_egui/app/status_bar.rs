use super::MeetGridApp;
use egui::RichText;

impl MeetGridApp {
    /// Render the status bar at the bottom of the window
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let secondary = self.active_theme.text_secondary;
        let interaction = self.grid.interaction();
        let selected = self.poll.selection.len();
        let mode = match interaction.drag_mode() {
            Some(mode) if interaction.is_dragging() && mode.target_selected() => "Selecting",
            Some(_) if interaction.is_dragging() => "Erasing",
            _ => "",
        };

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(RichText::new(format!("{} slots selected", selected)).small().color(secondary));
                    if !mode.is_empty() {
                        ui.separator();
                        ui.label(RichText::new(mode).small());
                    }
                    if interaction.is_touch_primary() {
                        ui.separator();
                        ui.label(RichText::new("Touch").small().color(secondary));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(status) = &self.status {
                            ui.label(RichText::new(status).small());
                        }
                    });
                });
            });
    }
}
