//! pluckbox - play the rack from the terminal
//!
//! Run with: cargo run --bin pluckbox
//! Logs go to `pluckbox.log`; set `RUST_LOG=debug` for more detail.

mod app;
mod keys;
mod ui;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use std::{fs::File, sync::Mutex};
use tracing_subscriber::EnvFilter;

use app::Pluckbox;
use pluck_dsp::RackConfig;

const LOG_FILE: &str = "pluckbox.log";

fn init_logging() -> EyreResult<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal belongs to the UI, so logs only ever go to the file
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let config = RackConfig::default().shape_lfo(0.3, 0.2);
    Pluckbox::new(config).run()
}
