use std::io;

use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{
        activity::{Activity, ActivityHandler, Change},
        app::AppData,
        event::Event,
    },
    dims::Dims,
    helpers::is_release,
    renderer::{Cell, Frame},
    settings::theme::{Theme, ThemeResolver},
    ui::{center_box_in_screen, draw_box, Rect, Screen},
};

const MIN_WIDTH: usize = 20;

/// Centered one-line text prompt. Enter pops with the entered `String`,
/// Esc pops with no result.
pub struct InputPrompt {
    label: String,
    watermark: String,
    value: String,
    styles: InputStyles,
}

pub struct InputStyles {
    pub text: &'static str,
    pub border: &'static str,
    pub watermark: &'static str,
}

impl Default for InputStyles {
    fn default() -> Self {
        Self {
            text: "ui_input_text",
            border: "ui_input_border",
            watermark: "ui_input_watermark",
        }
    }
}

impl InputPrompt {
    pub fn new(label: impl Into<String>, watermark: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            watermark: watermark.into(),
            value: String::new(),
            styles: InputStyles::default(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_activity(self) -> Activity {
        Activity::new("input", Box::new(self))
    }

    fn box_size(&self) -> Dims {
        let width = self
            .label
            .width()
            .max(self.watermark.width())
            .max(self.value.width())
            .max(MIN_WIDTH);

        Dims(width as i32 + 2, 4)
    }
}

impl ActivityHandler for InputPrompt {
    fn update(&mut self, events: Vec<Event>, _data: &mut AppData) -> Option<Change> {
        for event in events {
            if let Event::Term(TermEvent::Key(KeyEvent { code, kind, .. })) = event {
                if is_release(kind) {
                    continue;
                }

                match code {
                    KeyCode::Enter => {
                        return Some(Change::pop_top_with(std::mem::take(&mut self.value)));
                    }
                    KeyCode::Esc => return Some(Change::pop_top()),
                    KeyCode::Backspace => {
                        self.value.pop();
                    }
                    KeyCode::Char(c) => {
                        self.value.push(c);
                    }
                    _ => {}
                }
            }
        }

        None
    }

    fn screen(&self) -> &dyn Screen {
        self
    }
}

impl Screen for InputPrompt {
    fn draw(&self, frame: &mut Frame, theme: &Theme) -> Result<(), io::Error> {
        let [text_style, border_style, watermark_style] = theme.extract([
            self.styles.text,
            self.styles.border,
            self.styles.watermark,
        ]);

        let box_size = self.box_size();
        let pos = center_box_in_screen(frame.size(), box_size);

        frame.fill_rect(Rect::sized_at(pos, box_size), Cell::styled(' ', text_style));
        draw_box(frame, pos, box_size, border_style);

        frame.draw(pos + Dims(1, 1), &self.label, text_style);
        if self.value.is_empty() {
            frame.draw(pos + Dims(1, 2), &self.watermark, watermark_style);
        } else {
            frame.draw(pos + Dims(1, 2), &self.value, text_style);
        }

        Ok(())
    }
}

pub fn input_theme_resolver() -> ThemeResolver {
    let mut resolver = ThemeResolver::new();

    resolver
        .link("ui_input_text", "text")
        .link("ui_input_border", "border")
        .link("ui_input_watermark", "watermark");

    resolver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use crate::app::app::AppData;

    fn key(code: KeyCode) -> Event {
        Event::Term(TermEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    #[test]
    fn typing_builds_value_and_enter_submits() {
        let mut prompt = InputPrompt::new("Entity: ", "Enter the entity name");
        let mut data = AppData::for_tests();

        let events = vec![key(KeyCode::Char('a')), key(KeyCode::Char('b'))];
        assert!(prompt.update(events, &mut data).is_none());
        assert_eq!(prompt.value(), "ab");

        let change = prompt.update(vec![key(KeyCode::Enter)], &mut data);
        let Some(Change::Pop { n: 1, res: Some(res) }) = change else {
            panic!("expected pop with result");
        };
        assert_eq!(*res.downcast::<String>().unwrap(), "ab");
    }

    #[test]
    fn backspace_deletes_and_esc_cancels() {
        let mut prompt = InputPrompt::new("Entity: ", "").with_value("abc");
        let mut data = AppData::for_tests();

        prompt.update(vec![key(KeyCode::Backspace)], &mut data);
        assert_eq!(prompt.value(), "ab");

        let change = prompt.update(vec![key(KeyCode::Esc)], &mut data);
        assert!(matches!(change, Some(Change::Pop { n: 1, res: None })));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut prompt = InputPrompt::new("Entity: ", "");
        let mut data = AppData::for_tests();

        let release = Event::Term(TermEvent::Key(KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }));
        prompt.update(vec![release], &mut data);
        assert_eq!(prompt.value(), "");
    }
}
