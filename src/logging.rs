use std::{
    sync::{Arc, Mutex, MutexGuard, OnceLock, RwLock},
    time::Duration,
};

use log::{Log, Metadata, Record};
use unicode_width::UnicodeWidthStr;

use crate::{
    dims::Dims,
    renderer::Frame,
    settings::theme::{Color, NamedColor, Style, Theme, ThemeResolver},
};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    const DEFAULT_DECAY: Duration = Duration::from_secs(5);
    const DEFAULT_MAX_VISIBLE: usize = 5;

    let level = log::Level::Warn;

    LOGGER.get_or_init(|| AppLogger::new(level, DEFAULT_DECAY, DEFAULT_MAX_VISIBLE))
}

pub fn init() {
    log::set_logger(get_logger()).expect("logger is set only once");
    log::set_max_level(log::LevelFilter::Trace);
}

#[derive(Clone)]
pub struct Message {
    pub level: log::Level,
    pub pushed: std::time::Instant,
    pub message: String,
    pub source: String,
}

struct Logs {
    logs: [Vec<Message>; 5], // there are 5 levels
}

impl Logs {
    fn push(&mut self, message: Message) {
        self.logs[message.level as usize - 1].insert(0, message);
    }

    fn clear_old(&mut self, decay: Duration) {
        let now = std::time::Instant::now();
        for level in self.logs.iter_mut() {
            level.retain(|msg| now.duration_since(msg.pushed) < decay);
        }
    }
}

pub struct LogsIter<'a> {
    logs: MutexGuard<'a, Logs>,
    level: usize,
    index: usize,
}

impl<'a> Iterator for LogsIter<'a> {
    type Item = Message;

    fn next(&mut self) -> Option<Self::Item> {
        while self.level < self.logs.logs.len() && self.index >= self.logs.logs[self.level].len() {
            self.level += 1;
            self.index = 0;
        }
        if self.level >= self.logs.logs.len() {
            return None;
        }

        let log = self.logs.logs[self.level][self.index].clone();
        self.index += 1;
        Some(log)
    }
}

/// In-app logger: recent messages are drawn over the active screen and
/// decay after a few seconds.
pub struct AppLogger {
    pub min_level: Arc<RwLock<log::Level>>,
    pub decay: Duration,
    pub max_visible: usize,
    logs: Arc<Mutex<Logs>>,
}

impl AppLogger {
    fn new(min_level: log::Level, decay: Duration, max_visible: usize) -> Self {
        Self {
            min_level: Arc::new(RwLock::new(min_level)),
            decay,
            max_visible,
            logs: Arc::new(Mutex::new(Logs {
                logs: Default::default(),
            })),
        }
    }

    pub fn min_level(&self) -> log::Level {
        *self.min_level.read().unwrap()
    }

    fn borrow_mut_logs(&self) -> MutexGuard<Logs> {
        self.logs
            .lock()
            .expect("thread holding log panicked, cannot use this logger")
    }

    pub fn get_logs(&self) -> impl Iterator<Item = Message> + '_ {
        let mut logs = self.borrow_mut_logs();
        logs.clear_old(self.decay);

        LogsIter {
            logs,
            level: 0,
            index: 0,
        }
    }

    pub fn switch_debug(&self) {
        if self.min_level() == log::Level::Debug {
            *self.min_level.write().unwrap() = log::Level::Warn;
        } else {
            *self.min_level.write().unwrap() = log::Level::Debug;
        }
    }

    /// Renders the recent messages right-aligned along the bottom edge.
    pub fn draw(&self, frame: &mut Frame, theme: &Theme) {
        let text_style = theme["log_text"];
        let source_style = theme["log_source"];

        let count = self.get_logs().take(self.max_visible).count();
        let base_y = frame.size().1 - count as i32 - 1;

        for (i, log) in self.get_logs().take(self.max_visible).enumerate() {
            let color = match log.level {
                log::Level::Error => NamedColor::Red,
                log::Level::Warn => NamedColor::Yellow,
                log::Level::Info => NamedColor::White,
                log::Level::Debug => NamedColor::Blue,
                log::Level::Trace => NamedColor::Grey,
            };
            let indicator_style = Style::fg(Color::Named(color));

            let y = base_y + i as i32;
            let len = log.source.width() + 4 + log.message.width();

            let src_x = frame.size().0 - len as i32 - 2;
            let msg_x = src_x + log.source.width() as i32 + 4;

            const INDICATOR_CHAR: char = '|';

            frame.draw(Dims(src_x, y), &log.source, source_style);
            frame.draw(Dims(msg_x - 3, y), "->", text_style);
            frame.draw(Dims(msg_x, y), &log.message, text_style);
            frame.draw_char(Dims(frame.size().0 - 1, y), INDICATOR_CHAR, indicator_style);
        }
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.borrow_mut_logs().push(Message {
                level: record.level(),
                pushed: std::time::Instant::now(),
                message: record.args().to_string(),
                source: record.module_path().unwrap_or("unknown").to_string(),
            });
        }
    }

    fn flush(&self) {}
}

pub fn logging_theme_resolver() -> ThemeResolver {
    let mut resolver = ThemeResolver::new();

    resolver
        .link("log_text", "text")
        .link("log_source", "watermark");

    resolver
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_decay_after_the_configured_window() {
        let logger = AppLogger::new(log::Level::Info, Duration::from_secs(0), 5);
        logger.log(
            &Record::builder()
                .args(format_args!("hello"))
                .level(log::Level::Warn)
                .build(),
        );

        // zero decay window, gone on the first read
        assert_eq!(logger.get_logs().count(), 0);
    }

    #[test]
    fn higher_severity_is_listed_first() {
        let logger = AppLogger::new(log::Level::Info, Duration::from_secs(60), 5);
        for (level, text) in [
            (log::Level::Info, "info"),
            (log::Level::Error, "error"),
            (log::Level::Warn, "warn"),
        ] {
            logger.log(
                &Record::builder()
                    .args(format_args!("{}", text))
                    .level(level)
                    .build(),
            );
        }

        let messages: Vec<_> = logger.get_logs().map(|m| m.message).collect();
        assert_eq!(messages, ["error", "warn", "info"]);
    }

    #[test]
    fn levels_below_minimum_are_dropped() {
        let logger = AppLogger::new(log::Level::Warn, Duration::from_secs(60), 5);
        logger.log(
            &Record::builder()
                .args(format_args!("quiet"))
                .level(log::Level::Debug)
                .build(),
        );

        assert_eq!(logger.get_logs().count(), 0);
    }
}
