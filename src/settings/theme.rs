use std::{collections::HashMap, ops, path::PathBuf};

use crossterm::style::{Attributes, ContentStyle};
use serde::{de::Error as _, Deserialize, Serialize};
use thiserror::Error;

use crate::{constants::paths::theme_file_path, settings::attribute::deserialize_attributes};

/// Fully resolved style table. Lookups are by the keys the UI modules
/// register through their `*_theme_resolver()` functions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn get(&self, key: &str) -> Style {
        let Some(style) = self.styles.get(key) else {
            panic!("style not found: {}", key);
        };

        *style
    }

    pub fn extract<const N: usize>(&self, keys: [&str; N]) -> [Style; N] {
        keys.map(|key| self.get(key))
    }
}

impl ops::Index<&str> for Theme {
    type Output = Style;

    fn index(&self, key: &str) -> &Self::Output {
        let Some(style) = self.styles.get(key) else {
            panic!("style not found: {}", key);
        };

        style
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeDefinition {
    meta: Option<HashMap<String, String>>,
    styles: HashMap<String, StyleIdent>,
}

// `concat!` doesn't take consts, hence the macro.
macro_rules! default_theme_name {
    () => {
        "default_theme.json5"
    };
}
const DEFAULT_THEME_NAME: &str = default_theme_name!();
const DEFAULT_THEME: &str = include_str!(concat!("./", default_theme_name!()));

impl ThemeDefinition {
    pub fn parse_default() -> Self {
        json5::from_str(DEFAULT_THEME).expect("default theme should be always valid")
    }

    pub fn load_default() -> Result<Self, LoadError> {
        let path = theme_file_path(DEFAULT_THEME_NAME);

        std::fs::create_dir_all(path.parent().expect("theme path has a parent"))?;
        if !path.exists() {
            std::fs::write(&path, DEFAULT_THEME)?;
        }

        Self::load_by_path(path)
    }

    pub fn load_by_name(name: &str) -> Result<Self, LoadError> {
        Self::load_by_path(theme_file_path(name))
    }

    pub fn load_by_path(path: PathBuf) -> Result<Self, LoadError> {
        log::debug!("Loading theme from {:?}", path);

        let ext = path.extension().and_then(|s| s.to_str());

        match ext {
            Some("toml") => Self::load_toml(path),
            Some("json") | Some("json5") => Self::load_json(path),
            _ => Err(LoadError::UnknownExtension),
        }
    }

    fn load_json(path: PathBuf) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        let theme: Self = json5::from_str(&content)?;
        Ok(theme)
    }

    fn load_toml(path: PathBuf) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        let theme: Self = toml::from_str(&content)?;
        Ok(theme)
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.as_ref()?.get(key).map(|s| s.as_str())
    }

    pub fn get(&self, key: &str) -> Option<StyleIdent> {
        if let Some(style) = self.styles.get(key) {
            Some(style.clone())
        } else if key == "default" {
            Some(StyleIdent::Style(Style::default()))
        } else {
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json5 theme: {0}")]
    Json5(#[from] json5::Error),
    #[error("invalid toml theme: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown theme file extension")]
    UnknownExtension,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StyleIdent {
    Style(Style),
    Ref(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(debug_assertions, serde(deny_unknown_fields))]
pub struct Style {
    pub bg: Option<Color>,
    pub fg: Option<Color>,
    #[serde(deserialize_with = "deserialize_attributes", default)]
    pub attr: Attributes,
}

impl Style {
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::default()
        }
    }

    pub fn bg(color: Color) -> Self {
        Self {
            bg: Some(color),
            ..Self::default()
        }
    }

    pub fn invert(self) -> Self {
        Style {
            fg: Some(self.bg.unwrap_or(Color::Named(NamedColor::Black))),
            bg: Some(self.fg.unwrap_or(Color::Named(NamedColor::White))),
            ..self
        }
    }

    pub fn with_attr(mut self, attr: crossterm::style::Attribute) -> Self {
        self.attr.set(attr);
        self
    }

    pub fn to_cross(self) -> ContentStyle {
        self.into()
    }
}

impl From<Style> for ContentStyle {
    fn from(value: Style) -> Self {
        ContentStyle {
            foreground_color: value.fg.map(|c| c.into()),
            background_color: value.bg.map(|c| c.into()),
            attributes: value.attr,
            ..ContentStyle::default()
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Color {
    RGB(u8, u8, u8),
    Named(NamedColor),
    #[serde(deserialize_with = "deserialize_hex")]
    Hex(u8, u8, u8),
}

impl From<Color> for crossterm::style::Color {
    fn from(value: Color) -> Self {
        use crossterm::style::Color as CsColor;
        use NamedColor as NmColor;

        match value {
            Color::Named(named) => match named {
                NmColor::Black => CsColor::Black,
                NmColor::DarkGrey => CsColor::DarkGrey,
                NmColor::Red => CsColor::Red,
                NmColor::DarkRed => CsColor::DarkRed,
                NmColor::Green => CsColor::Green,
                NmColor::DarkGreen => CsColor::DarkGreen,
                NmColor::Yellow => CsColor::Yellow,
                NmColor::DarkYellow => CsColor::DarkYellow,
                NmColor::Blue => CsColor::Blue,
                NmColor::DarkBlue => CsColor::DarkBlue,
                NmColor::Magenta => CsColor::Magenta,
                NmColor::DarkMagenta => CsColor::DarkMagenta,
                NmColor::Cyan => CsColor::Cyan,
                NmColor::DarkCyan => CsColor::DarkCyan,
                NmColor::White => CsColor::White,
                NmColor::Grey => CsColor::Grey,
            },
            Color::RGB(r, g, b) | Color::Hex(r, g, b) => CsColor::Rgb { r, g, b },
        }
    }
}

fn deserialize_hex<'de, D>(deserializer: D) -> Result<(u8, u8, u8), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let stripped = s.trim_start_matches('#');
    if !(stripped.len() == 6 || stripped.len() == 3) {
        return Err(D::Error::custom(format!(
            "invalid hex color, expected format `#RGB` or `#RRGGBB`: {:?}",
            s
        )));
    }

    let (r, g, b) = if stripped.len() == 6 {
        (
            u8::from_str_radix(&stripped[0..2], 16).map_err(D::Error::custom)?,
            u8::from_str_radix(&stripped[2..4], 16).map_err(D::Error::custom)?,
            u8::from_str_radix(&stripped[4..6], 16).map_err(D::Error::custom)?,
        )
    } else {
        (
            u8::from_str_radix(&stripped[0..1], 16).map_err(D::Error::custom)? * 17,
            u8::from_str_radix(&stripped[1..2], 16).map_err(D::Error::custom)? * 17,
            u8::from_str_radix(&stripped[2..3], 16).map_err(D::Error::custom)? * 17,
        )
    };

    Ok((r, g, b))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
}

/// Maps style keys onto the keys they fall back to. UI modules register
/// their keys here; resolving walks the chain until the definition file
/// provides a concrete style, bottoming out at `default`.
#[derive(Clone, Debug, Default)]
pub struct ThemeResolver(HashMap<String, String>);

impl ThemeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link<S: Into<String>>(&mut self, key: S, based_on: S) -> &mut Self {
        self.0.insert(key.into(), based_on.into());
        self
    }

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(|s| s.as_str()).unwrap_or("default")
    }

    pub fn resolve(&self, definition: &ThemeDefinition) -> Theme {
        let mut resolved = HashMap::new();
        for key in self.0.keys() {
            let style = self.resolve_style(definition, key);
            resolved.insert(key.clone(), style);
        }
        Theme { styles: resolved }
    }

    fn resolve_style(&self, definition: &ThemeDefinition, key: &str) -> Style {
        let mut key = key.to_string();
        let mut used = vec![key.clone()];
        loop {
            let style = definition.get(&key);
            match style {
                Some(StyleIdent::Style(style)) => return style,
                Some(StyleIdent::Ref(new_key)) => key = new_key,
                None => key = self.get(&key).to_string(),
            }

            if used.contains(&key) {
                used.push(key.clone());
                panic!("loop detected: {:?}", used);
            }

            used.push(key.clone());
        }
    }

    /// Merge `other` into `self`, overwriting existing keys. Returns
    /// `&mut self` for chaining.
    pub fn extend(&mut self, other: Self) -> &mut Self {
        self.0.extend(other.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(styles: &[(&str, StyleIdent)]) -> ThemeDefinition {
        ThemeDefinition {
            meta: None,
            styles: styles
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn unlinked_key_falls_back_to_default() {
        let mut resolver = ThemeResolver::new();
        resolver.link("nonexistent", "");

        let theme = resolver.resolve(&definition(&[]));
        assert_eq!(theme.get("nonexistent"), Style::default());
    }

    #[test]
    fn link_chain_resolves() {
        let mut resolver = ThemeResolver::new();
        resolver
            .link("ui_navbar_item", "text")
            .link("text", "default");

        let text = Style::fg(Color::Named(NamedColor::Grey));
        let theme = resolver.resolve(&definition(&[("text", StyleIdent::Style(text))]));

        assert_eq!(theme.get("ui_navbar_item"), text);
        assert_eq!(theme["text"], text);
    }

    #[test]
    fn reference_in_definition_wins_over_resolver_link() {
        let mut resolver = ThemeResolver::new();
        resolver.link("key", "text").link("text", "default");

        let accent = Style::bg(Color::RGB(10, 20, 30));
        let theme = resolver.resolve(&definition(&[
            ("key", StyleIdent::Ref("accent".into())),
            ("accent", StyleIdent::Style(accent)),
        ]));

        assert_eq!(theme.get("key"), accent);
    }

    #[test]
    fn default_theme_parses_and_resolves() {
        let definition = ThemeDefinition::parse_default();
        let theme = crate::app::app_theme_resolver().resolve(&definition);
        // spot checks; a panic here means the embedded file and the
        // registered keys drifted apart
        let _ = theme.get("ui_menu_text");
        let _ = theme.get("ui_navbar_bg");
        let _ = theme.get("ui_countdown_text");
    }

    #[test]
    fn invert_swaps_colors() {
        let style = Style {
            fg: Some(Color::Named(NamedColor::Yellow)),
            bg: Some(Color::Named(NamedColor::Black)),
            attr: Attributes::default(),
        };
        let inverted = style.invert();
        assert_eq!(inverted.fg, Some(Color::Named(NamedColor::Black)));
        assert_eq!(inverted.bg, Some(Color::Named(NamedColor::Yellow)));
    }
}
