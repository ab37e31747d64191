use std::time::Duration;

use crossterm::event;

use crate::{
    dims::Dims,
    logging,
    renderer::Renderer,
    settings::{
        theme::{Theme, ThemeDefinition, ThemeResolver},
        Settings,
    },
    ui::{self, Screen as _},
};

use super::{
    activity::{Activities, Activity, Change},
    event::Event,
    AppError,
};

/// How long one loop iteration waits for input before updating anyway.
const POLL_TIMEOUT: Duration = Duration::from_millis(45);

/// Shared state handed to every activity on update.
pub struct AppData {
    settings: Settings,
    theme: Theme,
    screen_size: Dims,
}

impl AppData {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn screen_size(&self) -> Dims {
        self.screen_size
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            settings: Settings::new(),
            theme: app_theme_resolver().resolve(&ThemeDefinition::parse_default()),
            screen_size: Dims(80, 25),
        }
    }
}

/// Every style key the UI can ask for, with its fallback chain.
pub fn app_theme_resolver() -> ThemeResolver {
    let mut resolver = ThemeResolver::new();

    resolver
        .link("text", "default")
        .link("border", "text")
        .link("watermark", "border");

    resolver
        .extend(ui::menu::menu_theme_resolver())
        .extend(ui::supplement::navbar_theme_resolver())
        .extend(ui::button::button_theme_resolver())
        .extend(ui::input::input_theme_resolver())
        .extend(ui::countdown::countdown_theme_resolver())
        .extend(logging::logging_theme_resolver());

    resolver
}

/// Owns the renderer, the activity stack and the shared data, and runs
/// the update/draw loop until the stack empties.
pub struct App {
    renderer: Renderer,
    activities: Activities,
    data: AppData,
}

impl App {
    pub fn new(base: Activity) -> Result<Self, AppError> {
        let mut app = Self::empty()?;
        app.activities.push(base);
        Ok(app)
    }

    pub fn empty() -> Result<Self, AppError> {
        let settings = Settings::load(Settings::default_path())?;

        let definition = match ThemeDefinition::load_by_name(settings.get_theme_name()) {
            Ok(definition) => definition,
            Err(err) => {
                log::warn!(
                    "Failed to load theme {:?} ({}), using the default",
                    settings.get_theme_name(),
                    err
                );
                ThemeDefinition::load_default().unwrap_or_else(|_| ThemeDefinition::parse_default())
            }
        };

        let theme = app_theme_resolver().resolve(&definition);
        let renderer = Renderer::new()?;
        let screen_size = renderer.frame_size();

        Ok(Self {
            renderer,
            activities: Activities::empty(),
            data: AppData {
                settings,
                theme,
                screen_size,
            },
        })
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn activities_mut(&mut self) -> &mut Activities {
        &mut self.activities
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        'mainloop: loop {
            let mut events = vec![];

            // block for the first event, then drain whatever queued up
            if event::poll(POLL_TIMEOUT)? {
                loop {
                    let term_event = event::read()?;
                    self.renderer.on_event(&term_event);
                    events.push(Event::Term(term_event));

                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }

            self.data.screen_size = self.renderer.frame_size();

            let Some(active) = self.activities.active_mut() else {
                break 'mainloop;
            };

            let mut change = active.update(events, &mut self.data);
            while let Some(next) = change.take() {
                match next {
                    Change::Push(activity) => {
                        log::debug!("Pushing activity {:?}", activity.name());
                        self.activities.push(activity);
                    }
                    Change::Pop { n, res } => {
                        self.activities.pop_n(n);
                        let Some(active) = self.activities.active_mut() else {
                            break 'mainloop;
                        };
                        change =
                            active.update(vec![Event::ActiveAfterPop(res)], &mut self.data);
                    }
                }
            }

            let Some(active) = self.activities.active() else {
                break 'mainloop;
            };

            let frame = self.renderer.frame();
            active.screen().draw(frame, &self.data.theme)?;
            logging::get_logger().draw(frame, &self.data.theme);
            self.renderer.show()?;
        }

        Ok(())
    }
}
