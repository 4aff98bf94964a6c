// Settings service module
// Loads and stores grid settings as TOML in the platform config directory

mod service;

pub use service::SettingsService;
