mod arithmetic;
mod calculator;
mod config;
mod sea;
mod sound;
mod ui;

use gtk::prelude::*;
use gtk::Application;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const APP_ID: &str = "com.dolphin.calc";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> glib::ExitCode {
    init_tracing();

    let config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default config");
            config::Config::default()
        }
    };

    // NON_UNIQUE so a second launch opens its own window instead of waiting on D-Bus
    let app = Application::builder()
        .application_id(APP_ID)
        .flags(gio::ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(move |app| {
        if let Some(window) = app.active_window() {
            window.present();
            return;
        }

        ui::build_ui(app, config.clone());
    });

    app.run()
}
