pub mod app;
pub mod constants;
pub mod dims;
pub mod helpers;
pub mod logging;
pub mod renderer;
pub mod settings;
pub mod ui;
