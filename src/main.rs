mod config;
mod widget;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Args, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spinbrush::color::Palette;
use spinbrush::graphics::PixelBuffer;
use spinbrush::math::Bounds;
use spinbrush::sim;
use spinbrush::state::SimState;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let settings = Args::parse().into_settings()?;
    init_tracing(settings.log_file.as_deref(), settings.headless.is_some())?;
    info!(seed = settings.seed, flags = ?settings.flags, "starting");

    match settings.headless {
        Some(ticks) => run_headless(&settings, ticks),
        None => widget::run(&settings),
    }
}

/// Interactive runs own the screen, so they only log when given a file.
fn init_tracing(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("could not create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(anyhow::Error::from_boxed)
            .context("could not install the log subscriber")?;
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(anyhow::Error::from_boxed)
            .context("could not install the log subscriber")?;
    }
    Ok(())
}

/// Runs the simulation against an off-screen canvas and prints where it ended.
fn run_headless(settings: &Settings, ticks: usize) -> Result<()> {
    let (width, height) = settings.headless_size;
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let color = Palette::random(&mut rng);
    let mut state = SimState::new(
        Bounds::new(width as f64, height as f64),
        settings.sim,
        color,
        settings.playing,
    );
    let mut canvas = PixelBuffer::new(width, height, settings.background);

    let hud = sim::run_ticks(&mut state, &settings.flags, &mut rng, &mut canvas, ticks);

    info!(
        ticks = state.ticks,
        revolutions = state.revolutions,
        painted = width * height - canvas.count(settings.background),
        "headless run finished"
    );

    match hud {
        Some(hud) => println!("{hud}"),
        None => println!(
            "{}: background {}",
            state.pause.label(),
            state.pause.background().to_hex()
        ),
    }
    Ok(())
}
