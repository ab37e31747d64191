//! Standalone countdown banner. Exits when it reaches zero, or on Esc.

use std::{io, time::Instant};

use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent};

use tmenu::{
    app::{Activity, ActivityHandler, App, AppData, AppError, Change, Event},
    helpers::is_release,
    logging,
    renderer::Frame,
    settings::theme::Theme,
    ui::{countdown::CountdownMessage, Screen},
};

struct CountdownDemo {
    countdown: CountdownMessage,
}

impl ActivityHandler for CountdownDemo {
    fn update(&mut self, events: Vec<Event>, _data: &mut AppData) -> Option<Change> {
        if self.countdown.update(Instant::now()) {
            return Some(Change::pop_all());
        }

        for event in events {
            if let Event::Term(TermEvent::Key(KeyEvent {
                code: KeyCode::Esc,
                kind,
                ..
            })) = event
            {
                if !is_release(kind) {
                    return Some(Change::pop_all());
                }
            }
        }

        None
    }

    fn screen(&self) -> &dyn Screen {
        self
    }
}

impl Screen for CountdownDemo {
    fn draw(&self, frame: &mut Frame, theme: &Theme) -> Result<(), io::Error> {
        self.countdown.draw(frame, theme)
    }
}

fn main() -> Result<(), AppError> {
    logging::init();

    let mut countdown = CountdownMessage::new(10, "Closing in {seconds} second{s}...");
    countdown.start();

    let mut app = App::empty()?;
    app.activities_mut()
        .push(Activity::new("countdown demo", Box::new(CountdownDemo { countdown })));
    app.run()
}
