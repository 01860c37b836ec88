use anyhow::{ensure, Context, Result};
use clap::Parser;
use spinbrush::color::Palette;
use spinbrush::sim;
use spinbrush::state::{SimConfig, ToggleFlags, LINE, RADIUS};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(version, about = "A circle that wanders the terminal, leaving paint behind")]
pub struct Args {
    /// circle radius in pixels, also the ceiling for resizes
    #[arg(long, default_value_t = RADIUS)]
    pub radius: f64,

    /// outline width in pixels
    #[arg(long, default_value_t = LINE)]
    pub stroke: f64,

    /// rng seed (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// simulation period in milliseconds (defaults to TAU / 500)
    #[arg(long)]
    pub tick_ms: Option<f64>,

    /// redraws per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// cap on simulation ticks run between two redraws
    #[arg(long, default_value_t = 8)]
    pub max_ticks_per_frame: usize,

    /// start with colour changes on
    #[arg(long)]
    pub color: bool,

    /// start with smooth colour walks on
    #[arg(long)]
    pub smooth: bool,

    /// start with size changes on
    #[arg(long)]
    pub resize: bool,

    /// resize by one-pixel nudges instead of fresh random radii
    #[arg(long)]
    pub smooth_size: bool,

    /// start in spin mode
    #[arg(long)]
    pub spin: bool,

    /// start in linear mode
    #[arg(long)]
    pub linear: bool,

    /// start paused
    #[arg(long)]
    pub paused: bool,

    /// let the circle wander past the canvas edges
    #[arg(long)]
    pub allow_off_canvas: bool,

    /// canvas background, as #rrggbb or rgb(r, g, b)
    #[arg(long, default_value = "#000000")]
    pub background: String,

    /// run this many ticks without a terminal, then print the HUD
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<usize>,

    /// canvas width for headless runs
    #[arg(long, default_value_t = 160)]
    pub width: usize,

    /// canvas height for headless runs
    #[arg(long, default_value_t = 96)]
    pub height: usize,

    /// write logs here (interactive runs log nowhere else)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Validated run settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sim: SimConfig,
    pub flags: ToggleFlags,
    pub playing: bool,
    pub seed: u64,
    pub tick_interval: Duration,
    pub frame_interval: Duration,
    pub max_ticks_per_frame: usize,
    pub background: Palette,
    pub headless: Option<usize>,
    pub headless_size: (usize, usize),
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn into_settings(self) -> Result<Settings> {
        ensure!(
            self.radius.is_finite() && self.radius >= 0.0,
            "radius must be a non-negative number, got {}",
            self.radius
        );
        ensure!(
            self.stroke.is_finite() && self.stroke >= 0.0,
            "stroke must be a non-negative number, got {}",
            self.stroke
        );

        let tick_interval = match self.tick_ms {
            Some(ms) => {
                ensure!(
                    ms.is_finite() && ms > 0.0,
                    "tick-ms must be positive, got {ms}"
                );
                Duration::from_secs_f64(ms / 1000.0)
            }
            None => sim::tick_interval(),
        };

        let background: Palette = self
            .background
            .parse()
            .with_context(|| format!("invalid background color {:?}", self.background))?;

        let fps = self.fps.clamp(1, 240);
        let seed = self.seed.unwrap_or_else(clock_seed);

        Ok(Settings {
            sim: SimConfig {
                max_radius: self.radius,
                stroke: self.stroke,
                allow_off_canvas: self.allow_off_canvas,
                smooth_size: self.smooth_size,
                ..SimConfig::default()
            },
            flags: ToggleFlags {
                color_change: self.color,
                smooth_color: self.smooth,
                size_change: self.resize,
                spin_mode: self.spin,
                linear_mode: self.linear,
            },
            playing: !self.paused,
            seed,
            tick_interval,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(fps)),
            max_ticks_per_frame: self.max_ticks_per_frame.max(1),
            background,
            headless: self.headless,
            headless_size: (self.width.max(1), self.height.max(1)),
            log_file: self.log_file,
        })
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Settings> {
        let mut argv = vec!["spinbrush"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv)?.into_settings()
    }

    #[test]
    fn defaults_are_radius_25_with_every_toggle_off() {
        let s = parse(&["--seed", "1"]).unwrap();
        assert_eq!(s.sim.max_radius, 25.0);
        assert_eq!(s.sim.stroke, 2.0);
        assert_eq!(s.flags, ToggleFlags::default());
        assert!(s.playing);
        assert_eq!(s.seed, 1);
        assert_eq!(s.background, Palette::BLACK);
        assert_eq!(s.tick_interval, sim::tick_interval());
    }

    #[test]
    fn tick_ms_overrides_the_period() {
        let s = parse(&["--tick-ms", "20"]).unwrap();
        assert_eq!(s.tick_interval, Duration::from_millis(20));
    }

    #[test]
    fn toggles_map_onto_flags() {
        let s = parse(&[
            "--color", "--smooth", "--resize", "--spin", "--linear", "--paused",
        ])
        .unwrap();
        assert!(s.flags.color_change);
        assert!(s.flags.smooth_color);
        assert!(s.flags.size_change);
        assert!(s.flags.spin_mode);
        assert!(s.flags.linear_mode);
        assert!(!s.playing);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(&["--radius", "-1"]).is_err());
        assert!(parse(&["--tick-ms", "0"]).is_err());
        assert!(parse(&["--background", "#12"]).is_err());
    }

    #[test]
    fn fps_is_clamped() {
        let s = parse(&["--fps", "0"]).unwrap();
        assert_eq!(s.frame_interval, Duration::from_secs(1));
    }
}
