use std::{
    io,
    time::{Duration, Instant},
};

use unicode_width::UnicodeWidthStr;

use crate::{
    dims::Dims,
    helpers::trim_center,
    renderer::{Cell, Frame},
    settings::theme::{Theme, ThemeResolver},
    ui::{center_box_in_screen, draw_box, Rect},
};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running { remaining: u64, next_tick: Instant },
}

/// Countdown banner: idle until started, then ticks once a second and
/// removes itself when the count reaches zero. The tick deadline is
/// owned by the instance; stopping drops it.
#[derive(Debug)]
pub struct CountdownMessage {
    duration: u64,
    template: String,
    state: State,
}

pub struct CountdownStyles {
    pub text: &'static str,
    pub border: &'static str,
}

impl Default for CountdownStyles {
    fn default() -> Self {
        Self {
            text: "ui_countdown_text",
            border: "ui_countdown_border",
        }
    }
}

impl CountdownMessage {
    pub fn new(duration: u64, template: impl Into<String>) -> Self {
        Self {
            duration,
            template: template.into(),
            state: State::Idle,
        }
    }

    pub fn start(&mut self) -> &mut Self {
        self.start_at(Instant::now())
    }

    /// Shows the banner with the full duration. Starting while already
    /// running restarts cleanly: the old deadline is discarded.
    pub fn start_at(&mut self, now: Instant) -> &mut Self {
        self.state = if self.duration == 0 {
            State::Idle
        } else {
            State::Running {
                remaining: self.duration,
                next_tick: now + TICK,
            }
        };
        self
    }

    pub fn stop(&mut self) {
        self.state = State::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn remaining(&self) -> Option<u64> {
        match self.state {
            State::Running { remaining, .. } => Some(remaining),
            State::Idle => None,
        }
    }

    /// Consumes whole elapsed seconds. Returns `true` when the
    /// countdown expired on this update.
    pub fn update(&mut self, now: Instant) -> bool {
        let State::Running { remaining, next_tick } = &mut self.state else {
            return false;
        };

        while now >= *next_tick {
            *remaining -= 1;
            *next_tick += TICK;

            if *remaining == 0 {
                self.state = State::Idle;
                return true;
            }
        }

        false
    }

    /// Banner text for the current tick, `None` while idle.
    pub fn message(&self) -> Option<String> {
        self.remaining().map(|secs| self.format_message(secs))
    }

    fn format_message(&self, seconds: u64) -> String {
        let s = if seconds != 1 { "s" } else { "" };
        self.template
            .replace("{seconds}", &seconds.to_string())
            .replace("{s}", s)
    }

    pub fn draw(&self, frame: &mut Frame, theme: &Theme) -> Result<(), io::Error> {
        let Some(message) = self.message() else {
            return Ok(());
        };

        let styles = CountdownStyles::default();
        let [text_style, border_style] = theme.extract([styles.text, styles.border]);

        // never let the banner poke out of a narrow screen
        let text = trim_center(&message, (frame.size().0 as usize).saturating_sub(4));

        let box_size = Dims(text.width() as i32 + 4, 3);
        let x = center_box_in_screen(frame.size(), box_size).0;
        let pos = Dims(x, 1);

        frame.fill_rect(Rect::sized_at(pos, box_size), Cell::styled(' ', text_style));
        draw_box(frame, pos, box_size, border_style);
        frame.draw(pos + Dims(2, 1), text, text_style);

        Ok(())
    }
}

pub fn countdown_theme_resolver() -> ThemeResolver {
    let mut resolver = ThemeResolver::new();

    resolver
        .link("ui_countdown_text", "text")
        .link("ui_countdown_border", "border");

    resolver
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn duration_d_shows_exactly_d_ticks() {
        let mut msg = CountdownMessage::new(3, "{seconds}");
        let start = t0();
        msg.start_at(start);

        let mut shown = vec![msg.message().unwrap()];
        for i in 1..=3 {
            let expired = msg.update(start + secs(i));
            if let Some(text) = msg.message() {
                shown.push(text);
            }
            assert_eq!(expired, i == 3);
        }

        assert_eq!(shown, ["3", "2", "1"]);
        assert!(!msg.is_running());
        assert_eq!(msg.message(), None);
    }

    #[test]
    fn stop_removes_immediately_and_prevents_ticks() {
        let mut msg = CountdownMessage::new(5, "{seconds}");
        let start = t0();
        msg.start_at(start);
        msg.stop();

        assert!(!msg.is_running());
        assert_eq!(msg.message(), None);
        assert!(!msg.update(start + secs(10)));
        assert_eq!(msg.message(), None);
    }

    #[test]
    fn restart_while_running_resets_cleanly() {
        let mut msg = CountdownMessage::new(3, "{seconds}");
        let start = t0();
        msg.start_at(start);
        msg.update(start + secs(1));
        assert_eq!(msg.remaining(), Some(2));

        msg.start_at(start + secs(1));
        assert_eq!(msg.remaining(), Some(3));

        // old deadline is gone; the next tick is a full second away
        msg.update(start + secs(1) + Duration::from_millis(900));
        assert_eq!(msg.remaining(), Some(3));
        msg.update(start + secs(2));
        assert_eq!(msg.remaining(), Some(2));
    }

    #[test]
    fn catches_up_over_multiple_missed_ticks() {
        let mut msg = CountdownMessage::new(3, "{seconds}");
        let start = t0();
        msg.start_at(start);

        assert!(msg.update(start + secs(10)));
        assert!(!msg.is_running());
    }

    #[test]
    fn template_substitution_handles_plural() {
        let mut msg = CountdownMessage::new(2, "flip in {seconds} second{s}...");
        let start = t0();
        msg.start_at(start);

        assert_eq!(msg.message().unwrap(), "flip in 2 seconds...");
        msg.update(start + secs(1));
        assert_eq!(msg.message().unwrap(), "flip in 1 second...");
    }

    #[test]
    fn zero_duration_never_shows() {
        let mut msg = CountdownMessage::new(0, "{seconds}");
        msg.start_at(t0());
        assert!(!msg.is_running());
        assert_eq!(msg.message(), None);
    }
}
