// Utility functions module

pub mod date;
