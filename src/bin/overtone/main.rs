//! overtone - mix ten harmonics in the terminal, hear and see the result
//!
//! Run with: cargo run -- --preset violin

mod app;
mod audio;
mod cli;
mod ui;

use std::{fs::File, path::Path};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use overtone::synth::PRESETS;

use app::Overtone;
use cli::Args;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if args.list_presets {
        for preset in &PRESETS {
            println!("{:10} {}", preset.label, preset.volumes);
        }
        return Ok(());
    }

    init_logging(args.log_file.as_deref())?;

    Overtone::new()
        .volumes(args.initial_volumes()?)
        .frequency(args.frequency)
        .mute(args.mute)
        .run()
}

/// Log records go to `path`; without one they are dropped, stderr belongs to the TUI.
fn init_logging(path: Option<&Path>) -> EyreResult<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
