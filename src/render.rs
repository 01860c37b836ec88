//! Brush kinds and the draw commands the simulation hands to a surface.

use crate::color::Palette;
use crate::graphics::{draw_line, fill_disc, fill_sector, stroke_polyline, Surface};
use crate::math::{arc_point, Point};
use std::f64::consts::TAU;

/// How the circle is laid down on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    /// A full filled circle.
    Stamp,
    /// A pie slice that widens across ticks until it closes.
    Spin,
    /// A stroke from the previous position to the new one.
    Linear,
}

impl Brush {
    pub fn name(self) -> &'static str {
        match self {
            Brush::Stamp => "stamp",
            Brush::Spin => "spin",
            Brush::Linear => "linear",
        }
    }
}

/// One paint operation produced by a simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Stamp {
        center: Point,
        radius: f64,
        color: Palette,
    },
    Spin {
        center: Point,
        radius: f64,
        start: f64,
        delta: f64,
        stroke: f64,
        color: Palette,
    },
    Linear {
        from: Point,
        to: Point,
        stroke: f64,
        color: Palette,
    },
}

impl DrawCommand {
    pub fn brush(&self) -> Brush {
        match self {
            DrawCommand::Stamp { .. } => Brush::Stamp,
            DrawCommand::Spin { .. } => Brush::Spin,
            DrawCommand::Linear { .. } => Brush::Linear,
        }
    }

    pub fn color(&self) -> Palette {
        match *self {
            DrawCommand::Stamp { color, .. }
            | DrawCommand::Spin { color, .. }
            | DrawCommand::Linear { color, .. } => color,
        }
    }
}

/// Paints a command onto the surface.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, command: &DrawCommand) {
    match *command {
        DrawCommand::Stamp {
            center,
            radius,
            color,
        } => draw_stamp(surface, center, radius, color),
        DrawCommand::Spin {
            center,
            radius,
            start,
            delta,
            stroke,
            color,
        } => {
            draw_spin(surface, center, radius, start, delta, stroke, color);
        }
        DrawCommand::Linear {
            from,
            to,
            stroke,
            color,
        } => draw_line(surface, from, to, stroke, color),
    }
}

pub fn draw_stamp<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point,
    radius: f64,
    color: Palette,
) {
    fill_disc(surface, center, radius, color);
}

/// Angle reached after advancing a spin by `delta`.
pub fn spin_end(start: f64, delta: f64) -> f64 {
    start + delta
}

/// Draws the slice from angle 0 to `start + delta`: a radius out to the
/// rightmost point, the arc, and a radius back to the center. The outline is
/// stroked and the inside filled.
///
/// Returns the new accumulated angle. Wrapping past a full turn is left to
/// the caller.
pub fn draw_spin<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point,
    radius: f64,
    start: f64,
    delta: f64,
    stroke: f64,
    color: Palette,
) -> f64 {
    let end = spin_end(start, delta);

    stroke_polyline(surface, &spin_outline(center, radius, end), stroke, color);
    fill_sector(surface, center, radius, end, color);

    end
}

/// Closed path of the slice outline, starting and ending at the center.
fn spin_outline(center: Point, radius: f64, end: f64) -> Vec<Point> {
    let sweep = end.clamp(0.0, TAU);
    // about one vertex every two pixels of arc
    let segments = ((sweep * radius.max(1.0)) / 2.0).ceil().max(1.0) as usize;

    let mut points = Vec::with_capacity(segments + 3);
    points.push(center);
    points.extend((0..=segments).map(|i| {
        let angle = sweep * i as f64 / segments as f64;
        arc_point(center, radius, angle)
    }));
    points.push(center);
    points
}
