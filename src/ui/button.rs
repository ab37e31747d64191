use unicode_width::UnicodeWidthStr;

use crate::{
    dims::Dims,
    renderer::{Cell, Frame},
    settings::theme::{Theme, ThemeResolver},
    ui::{draw_box, Rect},
};

/// Boxed clickable button. Hover state is fed in by the owner from
/// mouse-move events.
#[derive(Debug)]
pub struct Button {
    text: String,
    pos: Dims,
    size: Dims,
    hovered: bool,
    styles: ButtonStyles,
}

#[derive(Debug)]
pub struct ButtonStyles {
    pub text: &'static str,
    pub border: &'static str,
    pub hover: &'static str,
}

impl Default for ButtonStyles {
    fn default() -> Self {
        Self {
            text: "ui_button_text",
            border: "ui_button_border",
            hover: "ui_button_hover",
        }
    }
}

impl Button {
    pub fn new(text: impl Into<String>, pos: Dims) -> Self {
        let text = text.into();
        let size = Dims(text.width() as i32 + 2, 3);

        Self {
            text,
            pos,
            size,
            hovered: false,
            styles: ButtonStyles::default(),
        }
    }

    pub fn with_styles(mut self, styles: ButtonStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn set_pos(&mut self, pos: Dims) {
        self.pos = pos;
    }

    pub fn pos(&self) -> Dims {
        self.pos
    }

    pub fn size(&self) -> Dims {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::sized_at(self.pos, self.size)
    }

    pub fn detect_over(&self, pos: Dims) -> bool {
        self.rect().contains(pos)
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn draw(&self, frame: &mut Frame, theme: &Theme) {
        let [text_style, border_style, hover_style] =
            theme.extract([self.styles.text, self.styles.border, self.styles.hover]);

        let text_style = if self.hovered { hover_style } else { text_style };

        frame.fill_rect(self.rect(), Cell::styled(' ', text_style));
        draw_box(frame, self.pos, self.size, border_style);
        frame.draw(self.pos + Dims(1, 1), &self.text, text_style);
    }
}

pub fn button_theme_resolver() -> ThemeResolver {
    let mut resolver = ThemeResolver::new();

    resolver
        .link("ui_button_text", "text")
        .link("ui_button_border", "border")
        .link("ui_button_hover", "ui_button_text");

    resolver
}
