mod app;

use anyhow::Result;
use std::fs::{self, OpenOptions};

use gamenight_core::{
    config::{self, AppConfig},
    library::LibraryStore,
};
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let store = LibraryStore::new(config.library_path());
    let catalog = store.load()?;

    let mut app = app::GamenightApp::new(config, store, catalog);
    app.run()
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("gamenight.log");

    let env_filter = EnvFilter::from_default_env();

    // File only; a stdout layer would write over the alternate screen.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
