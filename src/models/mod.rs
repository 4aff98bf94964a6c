// Module exports for models

pub mod cell;
pub mod event;
pub mod settings;
pub mod window;
