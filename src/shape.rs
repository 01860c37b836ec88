//! Brush position and size, and the random walks that move them.

use crate::math::{Bounds, Point};
use rand::Rng;

/// Distance covered along each axis by one step.
pub const STEP: f64 = 1.0;

/// Circle that wanders the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub bounds: Bounds,
    pub position: Point,
    pub radius: f64,
    pub stroke: f64,
}

impl Shape {
    pub fn new(bounds: Bounds, position: Point, stroke: f64) -> Self {
        Self {
            bounds,
            position,
            radius: 0.0,
            stroke,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// One-pixel random step on each axis.
    pub fn step<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        clearance: f64,
        allow_off_canvas: bool,
    ) -> Point {
        self.step_by(rng, STEP, clearance, allow_off_canvas)
    }

    /// Moves each axis independently by `±max_step`.
    ///
    /// Unless `allow_off_canvas` is set, an axis whose proposal would bring a
    /// circle of radius `clearance` onto or past the canvas border keeps its
    /// old coordinate. Passing the largest radius a resize can produce keeps
    /// the circle inside however its size changes later.
    pub fn step_by<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        max_step: f64,
        clearance: f64,
        allow_off_canvas: bool,
    ) -> Point {
        let mut next = Point::new(
            self.position.x + max_step * random_sign(rng),
            self.position.y + max_step * random_sign(rng),
        );

        if !allow_off_canvas {
            if !fits(next.x, clearance, self.bounds.width) {
                next.x = self.position.x;
            }
            if !fits(next.y, clearance, self.bounds.height) {
                next.y = self.position.y;
            }
        }

        next
    }

    /// Whole-pixel radius drawn uniformly from `[0, max)`.
    pub fn random_resize<R: Rng + ?Sized>(&self, rng: &mut R, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        rng.gen_range(0.0..max).floor()
    }

    /// Nudges the radius by `±step`, kept within `[0, max]`.
    pub fn smooth_resize<R: Rng + ?Sized>(&self, rng: &mut R, step: f64, max: f64) -> f64 {
        (self.radius + step * random_sign(rng)).clamp(0.0, max.max(0.0))
    }
}

fn fits(coord: f64, clearance: f64, extent: f64) -> bool {
    coord + clearance < extent && coord - clearance > 0.0
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}
