//! Vertical navbar menu with the full embellishment set. Arrow keys or
//! the mouse move the hover, Enter or a click activates, `q` quits.

use std::rc::Rc;

use tmenu::{
    app::{App, AppError},
    dims::Dims,
    logging,
    ui::{
        menu::{Menu, MenuActivity, MenuConfig, Orientation},
        supplement::Embellish,
    },
};

fn main() -> Result<(), AppError> {
    logging::init();

    let config = MenuConfig::new_from_strs(&["Alpha", "Beta", "Gamma"])
        .orientation(Orientation::Vertical)
        .spacing(1)
        .origin(Dims(4, 2));

    let mut menu = Menu::with_supplement(config, Rc::new(Embellish));
    menu.apply_navbar_style();

    let activity =
        MenuActivity::new(menu).on_select(|_, label, _| log::info!("Clicked {}", label));

    let mut app = App::empty()?;
    app.activities_mut().push(activity.into_activity());
    app.run()
}
