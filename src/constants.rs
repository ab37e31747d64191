pub const APP_NAME: &str = "tmenu";

/// Glyph on the orientation toggle button.
pub const BURGER_CHAR: char = '☰';

pub mod paths {
    use std::path::PathBuf;

    use super::APP_NAME;

    pub fn config_base() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
    }

    pub fn settings_path() -> PathBuf {
        config_base().join("settings.ron")
    }

    pub fn theme_file_path(name: &str) -> PathBuf {
        config_base().join("themes").join(name)
    }
}
