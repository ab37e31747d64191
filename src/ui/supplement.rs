use crate::{
    constants::BURGER_CHAR,
    dims::Dims,
    settings::theme::ThemeResolver,
    ui::{button::Button, countdown::CountdownMessage, input::InputPrompt},
};

/// Optional collaborator consulted by [`Menu`](crate::ui::menu::Menu).
/// Every capability defaults to "not provided"; the menu degrades with
/// a warning instead of failing when one is missing.
pub trait Supplement {
    /// Cosmetic style bundle for the menu's root container and items.
    fn navbar_style(&self) -> Option<NavbarStyle> {
        None
    }

    /// Prompt used by the interactive add-item flow.
    fn input_form(&self, _label: &str, _watermark: &str) -> Option<InputPrompt> {
        None
    }

    /// Timed banner counting down `duration` seconds.
    fn countdown(&self, _duration: u64, _template: &str) -> Option<CountdownMessage> {
        None
    }

    /// Toggle button that flips a menu's orientation on activation.
    fn burger_button(&self, _pos: Dims) -> Option<Button> {
        None
    }
}

/// The default collaborator: provides nothing.
pub struct NoSupplement;

impl Supplement for NoSupplement {}

/// The full set of embellishments.
pub struct Embellish;

impl Supplement for Embellish {
    fn navbar_style(&self) -> Option<NavbarStyle> {
        Some(NavbarStyle::default())
    }

    fn input_form(&self, label: &str, watermark: &str) -> Option<InputPrompt> {
        Some(InputPrompt::new(label, watermark))
    }

    fn countdown(&self, duration: u64, template: &str) -> Option<CountdownMessage> {
        Some(CountdownMessage::new(duration, template))
    }

    fn burger_button(&self, pos: Dims) -> Option<Button> {
        Some(Button::new(BURGER_CHAR.to_string(), pos))
    }
}

/// Theme keys for the navbar look, resolved against the active
/// [`Theme`](crate::settings::theme::Theme) at draw time.
#[derive(Debug, Clone)]
pub struct NavbarStyle {
    pub bg: &'static str,
    pub border: &'static str,
    pub item: &'static str,
    pub hover: &'static str,
}

impl Default for NavbarStyle {
    fn default() -> Self {
        Self {
            bg: "ui_navbar_bg",
            border: "ui_navbar_border",
            item: "ui_navbar_item",
            hover: "ui_navbar_hover",
        }
    }
}

pub fn navbar_theme_resolver() -> ThemeResolver {
    let mut resolver = ThemeResolver::new();

    resolver
        .link("ui_navbar_bg", "default")
        .link("ui_navbar_border", "border")
        .link("ui_navbar_item", "ui_menu_text")
        .link("ui_navbar_hover", "ui_menu_hover");

    resolver
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_supplement_provides_nothing() {
        let none = NoSupplement;
        assert!(none.navbar_style().is_none());
        assert!(none.input_form("a", "b").is_none());
        assert!(none.countdown(5, "{seconds}").is_none());
        assert!(none.burger_button(Dims(0, 0)).is_none());
    }

    #[test]
    fn embellish_provides_everything() {
        let full = Embellish;
        assert!(full.navbar_style().is_some());
        assert!(full.input_form("a", "b").is_some());
        assert!(full.burger_button(Dims(0, 0)).is_some());

        let countdown = full.countdown(5, "{seconds}").unwrap();
        assert!(!countdown.is_running());
    }
}
