//! Application constants and configuration

pub const APP_NAME: &str = "Grid Collector";
pub const APP_TITLE: &str = "Reinforcement Learning Grid Collector";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cells per grid side
pub const GRID_SIZE: usize = 10;
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Dataset size that triggers the automatic export
pub const TARGET_COUNT: usize = 100;

pub const EXPORT_FILE_NAME: &str = "dataset.json";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
