//! The fixed-step driver: one call to [`tick`] per timer period.

use crate::color::{Palette, Rgb};
use crate::graphics::Surface;
use crate::math::Point;
use crate::render::{self, spin_end, Brush, DrawCommand};
use crate::shape::Shape;
use crate::state::{SimState, ToggleFlags, SPIN_STEP};
use rand::Rng;
use std::f64::consts::TAU;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

/// Nominal timer period: `TAU / 500` milliseconds.
pub fn tick_interval() -> Duration {
    Duration::from_secs_f64(SPIN_STEP / 1000.0)
}

/// Values shown in the HUD after a running tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub position: Point,
    pub radius: f64,
    pub hex: String,
    pub rgb: Rgb,
}

impl Hud {
    pub fn new(shape: &Shape, color: Palette) -> Self {
        Self {
            position: shape.position,
            radius: shape.radius,
            hex: color.to_hex(),
            rgb: color.rgb(),
        }
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x: {} y: {} r: {} {} {}",
            self.position.x, self.position.y, self.radius, self.hex, self.rgb
        )
    }
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The brush painted and moved.
    Drew {
        command: DrawCommand,
        hud: Hud,
        /// A spin closed its circle this tick and the colour was re-rolled
        revolution: bool,
    },
    /// Paused: the pause control's background took one pulse step.
    Pulsed { background: Palette },
}

impl TickOutcome {
    pub fn command(&self) -> Option<&DrawCommand> {
        match self {
            TickOutcome::Drew { command, .. } => Some(command),
            TickOutcome::Pulsed { .. } => None,
        }
    }

    pub fn hud(&self) -> Option<&Hud> {
        match self {
            TickOutcome::Drew { hud, .. } => Some(hud),
            TickOutcome::Pulsed { .. } => None,
        }
    }
}

/// Advances the simulation one period.
///
/// While running: emits the draw for the current shape, closes out a finished
/// spin with a fresh random colour, moves the shape, then applies the size and
/// colour changes the flags ask for. While paused: pulses the pause control
/// toward the current colour and leaves everything else alone.
pub fn tick<R: Rng + ?Sized>(
    state: &mut SimState,
    flags: &ToggleFlags,
    rng: &mut R,
) -> TickOutcome {
    state.ticks += 1;
    let config = state.config;

    if !state.is_running() {
        let background = state.pause.pulse(state.color);
        trace!(background = %background, "pulse");
        return TickOutcome::Pulsed { background };
    }

    let shape = state.shape;
    // clear the edges by the largest radius a resize can pick, not the current one
    let next_position = shape.step(rng, config.max_radius, config.allow_off_canvas);

    let command = match flags.brush() {
        Brush::Stamp => DrawCommand::Stamp {
            center: shape.position,
            radius: shape.radius,
            color: state.color,
        },
        Brush::Spin => {
            let start = state.spin_progress;
            state.spin_progress = spin_end(start, config.spin_step);
            DrawCommand::Spin {
                center: shape.position,
                radius: shape.radius,
                start,
                delta: config.spin_step,
                stroke: shape.stroke,
                color: state.color,
            }
        }
        Brush::Linear => DrawCommand::Linear {
            from: shape.position,
            to: next_position,
            stroke: shape.stroke,
            color: state.color,
        },
    };

    let revolution = state.spin_progress > TAU;
    if revolution {
        state.color.randomize(rng);
        state.spin_progress = 0.0;
        state.revolutions += 1;
        debug!(color = %state.color, revolutions = state.revolutions, "spin complete");
    }

    let hud = Hud::new(&shape, state.color);

    state.shape.position = next_position;

    if flags.size_change {
        state.shape.radius = if config.smooth_size {
            state.shape.smooth_resize(rng, config.size_step, config.max_radius)
        } else {
            state.shape.random_resize(rng, config.max_radius)
        };
    }

    if flags.color_change {
        if flags.smooth_color {
            state.color.smooth_step(rng, config.smoothing);
        } else {
            state.color.randomize(rng);
        }
    }

    TickOutcome::Drew {
        command,
        hud,
        revolution,
    }
}

/// Runs `count` ticks, painting each draw onto `surface`. Returns the HUD of
/// the last running tick, if any.
pub fn run_ticks<R, S>(
    state: &mut SimState,
    flags: &ToggleFlags,
    rng: &mut R,
    surface: &mut S,
    count: usize,
) -> Option<Hud>
where
    R: Rng + ?Sized,
    S: Surface + ?Sized,
{
    let mut last = None;
    for _ in 0..count {
        if let TickOutcome::Drew { command, hud, .. } = tick(state, flags, rng) {
            render::draw(surface, &command);
            last = Some(hud);
        }
    }
    last
}
