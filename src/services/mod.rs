// Service module exports

pub mod best_times;
pub mod heatmap;
pub mod settings;
