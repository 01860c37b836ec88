use crate::color::{Palette, SMOOTHING};
use crate::math::{Bounds, Point};
use crate::pulse::PauseButton;
use crate::render::Brush;
use crate::shape::Shape;
use std::f64::consts::TAU;
use tracing::info;

/// Ticks needed for a spin to sweep a full circle.
pub const SPIN_STEPS: f64 = 500.0;

/// Angle a spin advances per tick, and the nominal tick period in milliseconds.
pub const SPIN_STEP: f64 = TAU / SPIN_STEPS;

/// Default circle radius and upper bound for random resizes.
pub const RADIUS: f64 = 25.0;

/// Default outline width.
pub const LINE: f64 = 2.0;

/// Behaviour switches. The host may flip any of them between ticks; each
/// tick reads them as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleFlags {
    /// Change colour every tick
    pub color_change: bool,
    /// Walk the colour instead of re-rolling it
    pub smooth_color: bool,
    /// Change radius every tick
    pub size_change: bool,
    /// Draw a widening slice instead of a stamp
    pub spin_mode: bool,
    /// Draw a stroke along the path (ignored while spinning)
    pub linear_mode: bool,
}

impl ToggleFlags {
    pub fn brush(&self) -> Brush {
        if self.spin_mode {
            Brush::Spin
        } else if self.linear_mode {
            Brush::Linear
        } else {
            Brush::Stamp
        }
    }
}

/// Knobs fixed for the life of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub max_radius: f64,
    pub stroke: f64,
    pub spin_step: f64,
    pub smoothing: u8,
    pub allow_off_canvas: bool,
    /// Resize by `size_step` nudges rather than fresh random radii
    pub smooth_size: bool,
    pub size_step: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_radius: RADIUS,
            stroke: LINE,
            spin_step: SPIN_STEP,
            smoothing: SMOOTHING,
            allow_off_canvas: false,
            smooth_size: false,
            size_step: 1.0,
        }
    }
}

/// Everything the simulation loop mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    pub config: SimConfig,
    pub shape: Shape,
    pub color: Palette,
    /// Angle swept since the last completed spin
    pub spin_progress: f64,
    pub pause: PauseButton,
    pub ticks: u64,
    pub revolutions: u64,
}

impl SimState {
    /// Starts the brush at the canvas center with the full default radius.
    pub fn new(bounds: Bounds, config: SimConfig, color: Palette, playing: bool) -> Self {
        let shape =
            Shape::new(bounds, bounds.center(), config.stroke).with_radius(config.max_radius);
        Self {
            config,
            shape,
            color,
            spin_progress: 0.0,
            pause: PauseButton::new(playing),
            ticks: 0,
            revolutions: 0,
        }
    }

    pub fn position(&self) -> Point {
        self.shape.position
    }

    pub fn is_running(&self) -> bool {
        self.pause.is_playing()
    }

    /// Flips play/pause. Returns whether the simulation is now running.
    pub fn toggle_pause(&mut self) -> bool {
        let playing = self.pause.toggle();
        info!(playing, tick = self.ticks, "pause toggled");
        playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_prefers_spin_then_linear() {
        let mut flags = ToggleFlags::default();
        assert_eq!(flags.brush(), Brush::Stamp);
        flags.linear_mode = true;
        assert_eq!(flags.brush(), Brush::Linear);
        flags.spin_mode = true;
        assert_eq!(flags.brush(), Brush::Spin);
    }

    #[test]
    fn new_state_starts_centered_with_full_radius() {
        let state = SimState::new(
            Bounds::new(200.0, 100.0),
            SimConfig::default(),
            Palette::WHITE,
            true,
        );
        assert_eq!(state.position(), Point::new(100.0, 50.0));
        assert_eq!(state.shape.radius, RADIUS);
        assert_eq!(state.shape.stroke, LINE);
        assert_eq!(state.spin_progress, 0.0);
        assert!(state.is_running());
    }

    #[test]
    fn toggle_pause_flips_running() {
        let mut state = SimState::new(
            Bounds::new(10.0, 10.0),
            SimConfig::default(),
            Palette::WHITE,
            true,
        );
        assert!(!state.toggle_pause());
        assert_eq!(state.pause.label(), "Play");
        assert!(state.toggle_pause());
    }
}
