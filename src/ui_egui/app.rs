mod sidebar;
mod state;
mod status_bar;

use self::state::{PollState, ViewType};
use crate::models::event::MeetingEvent;
use crate::models::settings::GridSettings;
use crate::ui_egui::grid_view::{GridMode, GridView};
use crate::ui_egui::theme::GridTheme;

pub struct MeetGridApp {
    /// Event, participants and the in-progress selection
    poll: PollState,
    grid: GridView,
    active_theme: GridTheme,
    /// Last user-facing message (submit errors, copy confirmations)
    status: Option<String>,
}

impl MeetGridApp {
    pub fn new(cc: &eframe::CreationContext<'_>, event: MeetingEvent, settings: GridSettings) -> Self {
        let active_theme = if cc.egui_ctx.style().visuals.dark_mode {
            GridTheme::dark()
        } else {
            GridTheme::light()
        };
        active_theme.apply_to_context(&cc.egui_ctx);

        let shape = event.grid_shape(settings.display_window());
        log::info!(
            "Opening poll '{}' with {} dates and {} hour rows",
            event.name,
            shape.date_count,
            shape.hour_count()
        );

        Self {
            grid: GridView::new(shape, &settings, active_theme.clone()),
            poll: PollState::new(event, &settings),
            active_theme,
            status: None,
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.poll.event.name);
                ui.separator();
                ui.selectable_value(&mut self.poll.view, ViewType::Edit, "Your availability");
                ui.selectable_value(&mut self.poll.view, ViewType::Results, "Group results");

                if self.poll.view == ViewType::Edit {
                    ui.separator();
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut self.poll.participant_name);
                    if ui.button("Submit").clicked() {
                        self.status = Some(match self.poll.submit() {
                            Ok(participant) => format!("Saved availability for {}", participant.name),
                            Err(e) => e,
                        });
                    }
                    if ui.button("Clear").clicked() {
                        self.poll.selection.clear();
                    }
                }
            });
        });
    }
}

impl eframe::App for MeetGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_bar(ctx);
        self.render_status_bar(ctx);
        if self.poll.view == ViewType::Results {
            self.render_sidebar(ctx);
        }

        let heatmap = (self.poll.view == ViewType::Results).then(|| self.poll.heatmap());
        egui::CentralPanel::default().show(ctx, |ui| {
            let mode = match &heatmap {
                Some(heatmap) => GridMode::Heatmap(heatmap),
                None => GridMode::Edit,
            };
            self.grid
                .show(ui, &self.poll.event.dates, &mut self.poll.selection, mode);
        });
    }
}
