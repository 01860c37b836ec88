use crate::color::Palette;
use crate::math::{angle_of, distance_squared, Point};
use std::f64::consts::TAU;

/// Something the brush can paint pixels onto.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn put_pixel(&mut self, x: usize, y: usize, color: Palette);
}

/// RGB pixel buffer standing in for a canvas. Paint accumulates; nothing is
/// cleared between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Palette>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, background: Palette) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Palette> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: Palette) -> usize {
        self.pixels.iter().filter(|p| **p == color).count()
    }
}

impl Surface for PixelBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: Palette) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }
}

/// Writes a pixel given signed coordinates, dropping anything off the surface
fn plot<S: Surface + ?Sized>(surface: &mut S, x: isize, y: isize, color: Palette) {
    if x >= 0 && y >= 0 {
        surface.put_pixel(x as usize, y as usize, color);
    }
}

/// Pixel rows and columns touched by a disc, clipped to the surface.
fn disc_box<S: Surface + ?Sized>(
    surface: &S,
    center: Point,
    radius: f64,
) -> Option<(usize, usize, usize, usize)> {
    let w = surface.width() as f64;
    let h = surface.height() as f64;
    if w == 0.0 || h == 0.0 {
        return None;
    }

    let min_x = (center.x - radius).floor().max(0.0);
    let max_x = (center.x + radius).ceil().min(w - 1.0);
    let min_y = (center.y - radius).floor().max(0.0);
    let max_y = (center.y + radius).ceil().min(h - 1.0);
    if min_x > max_x || min_y > max_y {
        return None;
    }

    Some((min_x as usize, max_x as usize, min_y as usize, max_y as usize))
}

/// Fills every pixel whose center lies inside the circle
pub fn fill_disc<S: Surface + ?Sized>(surface: &mut S, center: Point, radius: f64, color: Palette) {
    fill_sector(surface, center, radius, TAU, color);
}

/// Fills the pie slice swept clockwise from angle 0 to `end_angle`.
///
/// An `end_angle` of a full turn or more fills the whole disc.
pub fn fill_sector<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point,
    radius: f64,
    end_angle: f64,
    color: Palette,
) {
    if radius <= 0.0 || end_angle <= 0.0 {
        return;
    }
    let Some((min_x, max_x, min_y, max_y)) = disc_box(surface, center, radius) else {
        return;
    };

    let full = end_angle >= TAU;
    let r2 = radius * radius;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if distance_squared(center, p) > r2 {
                continue;
            }
            if full || angle_of(center, p) <= end_angle {
                surface.put_pixel(x, y, color);
            }
        }
    }
}

/// Draws a line between two points using Bresenham's algorithm, with a square
/// pen roughly `width` pixels across.
pub fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    from: Point,
    to: Point,
    width: f64,
    color: Palette,
) {
    let (mut x0, mut y0, x1, y1) = (
        from.x.round() as isize,
        from.y.round() as isize,
        to.x.round() as isize,
        to.y.round() as isize,
    );
    let half = ((width - 1.0) / 2.0).ceil().max(0.0) as isize;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        for oy in -half..=half {
            for ox in -half..=half {
                plot(surface, x0 + ox, y0 + oy, color);
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Strokes consecutive segments through `points`.
pub fn stroke_polyline<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    width: f64,
    color: Palette,
) {
    for pair in points.windows(2) {
        draw_line(surface, pair[0], pair[1], width, color);
    }
}
