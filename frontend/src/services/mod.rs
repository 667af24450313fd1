pub mod alerts;
pub mod api;
pub mod logging;
pub mod weekly_grid;
