use tmenu::{
    app::{demo::DemoActivity, App, AppError},
    logging,
    settings::Settings,
};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "tmenu")]
struct Args {
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.reset_config {
        Settings::reset_config(Settings::default_path());
        return Ok(());
    }

    if args.show_config_path {
        let settings_path = Settings::default_path();
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(Settings::default_path()));
        return Ok(());
    }

    better_panic::install();
    logging::init();

    let mut app = App::empty()?;
    let demo = DemoActivity::new(app.data().settings());
    app.activities_mut().push(demo.into_activity());

    app.run()
}
