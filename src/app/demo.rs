use std::{io, rc::Rc, time::Instant};

use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};

use crate::{
    dims::Dims,
    helpers::is_release,
    renderer::Frame,
    settings::{theme::Theme, Settings},
    ui::{
        button::Button,
        countdown::CountdownMessage,
        menu::{Menu, MenuConfig, MenuEvent},
        supplement::{Embellish, Supplement},
        Screen,
    },
};

use super::{
    activity::{Activity, ActivityHandler, Change},
    app::AppData,
    event::Event,
};

const SHUTDOWN_SECS: u64 = 5;

/// Showcase activity: a navbar-styled menu with the full set of
/// embellishments wired up. Lives at the bottom of the stack; popping
/// it exits the app.
pub struct DemoActivity {
    menu: Menu,
    burger: Option<Button>,
    countdown: Option<CountdownMessage>,
}

impl DemoActivity {
    pub fn new(settings: &Settings) -> Self {
        let supplement = Rc::new(Embellish);

        let config = MenuConfig::new_from_strs(&["Home", "Products", "Contact"])
            .spacing(settings.get_spacing())
            .orientation(settings.get_orientation())
            .origin(Dims(3, 2));

        let mut menu = Menu::with_supplement(config, supplement.clone());
        menu.apply_navbar_style();

        let countdown =
            menu.message_shutdown(SHUTDOWN_SECS, settings.get_countdown_template());
        let burger = supplement.burger_button(Dims(0, 0));

        Self {
            menu,
            burger,
            countdown,
        }
    }

    pub fn into_activity(self) -> Activity {
        Activity::new("demo", Box::new(self))
    }

    fn flip_orientation(&mut self) {
        let flipped = self.menu.orientation().flipped();
        self.menu.set_orientation(flipped);
    }
}

impl ActivityHandler for DemoActivity {
    fn update(&mut self, events: Vec<Event>, data: &mut AppData) -> Option<Change> {
        if let Some(burger) = &mut self.burger {
            burger.set_pos(Dims(data.screen_size().0 - burger.size().0 - 2, 1));
        }

        let expired = self
            .countdown
            .as_mut()
            .is_some_and(|countdown| countdown.update(Instant::now()));
        if expired {
            self.flip_orientation();
            self.menu.add_item("Test");
            self.countdown = None;
        }

        for event in events {
            match event {
                Event::ActiveAfterPop(res) => {
                    let entry = res
                        .and_then(|res| res.downcast::<String>().ok())
                        .map(|boxed| *boxed);
                    self.menu.complete_add_item(entry);
                }
                Event::Term(TermEvent::Key(key @ KeyEvent { .. })) if !is_release(key.kind) => {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => return Some(Change::pop_all()),
                        KeyCode::Char('b') => self.flip_orientation(),
                        KeyCode::Char('i') => {
                            let index = self.menu.len();
                            if let Some(prompt) = self.menu.add_item_at(index) {
                                return Some(Change::push(prompt));
                            }
                        }
                        _ => {
                            if let Some(MenuEvent::Selected(index)) =
                                self.menu.handle_event(&Event::Term(TermEvent::Key(key)))
                            {
                                log::info!("Clicked {}", self.menu.labels()[index]);
                            }
                        }
                    }
                }
                Event::Term(TermEvent::Mouse(mouse @ MouseEvent { kind, column, row, .. })) => {
                    let pos = Dims(column as i32, row as i32);

                    if let Some(burger) = &mut self.burger {
                        if kind == MouseEventKind::Moved {
                            let over = burger.detect_over(pos);
                            burger.set_hovered(over);
                        }
                    }

                    let burger_hit = kind == MouseEventKind::Up(MouseButton::Left)
                        && self.burger.as_ref().is_some_and(|b| b.detect_over(pos));
                    if burger_hit {
                        self.flip_orientation();
                        continue;
                    }

                    if let Some(MenuEvent::Selected(index)) =
                        self.menu.handle_event(&Event::Term(TermEvent::Mouse(mouse)))
                    {
                        log::info!("Clicked {}", self.menu.labels()[index]);
                    }
                }
                _ => {}
            }
        }

        None
    }

    fn screen(&self) -> &dyn Screen {
        self
    }
}

impl Screen for DemoActivity {
    fn draw(&self, frame: &mut Frame, theme: &Theme) -> Result<(), io::Error> {
        self.menu.draw(frame, theme);

        if let Some(burger) = &self.burger {
            burger.draw(frame, theme);
        }

        if let Some(countdown) = &self.countdown {
            countdown.draw(frame, theme)?;
        }

        Ok(())
    }
}
