pub mod app;
pub mod effects;
pub mod export;
pub mod logging;
pub mod ui;
