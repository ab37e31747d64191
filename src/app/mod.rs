pub mod activity;
#[allow(clippy::module_inception)]
pub mod app;
pub mod demo;
pub mod event;

use thiserror::Error;

pub use activity::{Activities, Activity, ActivityHandler, Change};
pub use app::{app_theme_resolver, App, AppData};
pub use event::Event;

use crate::settings::{theme::LoadError, SettingsError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("theme error: {0}")]
    Theme(#[from] LoadError),
}
