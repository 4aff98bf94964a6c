mod app;
pub mod grid_view;
pub mod theme;

pub use app::MeetGridApp;
