// Meet Grid Application
// Main entry point

use chrono::{Duration, Local};
use meet_grid::models::event::MeetingEvent;
use meet_grid::services::settings::SettingsService;
use meet_grid::ui_egui::MeetGridApp;
use meet_grid::utils::date::generate_date_range;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Meet Grid");

    let settings = match SettingsService::from_project_dirs() {
        Some(service) => service.load().unwrap_or_else(|e| {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            Default::default()
        }),
        None => Default::default(),
    };

    // Demo poll over the coming week
    let today = Local::now().date_naive();
    let dates = generate_date_range(today, today + Duration::days(6));
    let event = match MeetingEvent::new("Team availability", dates) {
        Ok(event) => event,
        Err(e) => {
            log::error!("Failed to create poll: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Meet Grid",
        options,
        Box::new(move |cc| Ok(Box::new(MeetGridApp::new(cc, event, settings)))),
    )
}
