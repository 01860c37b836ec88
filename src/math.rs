use std::f64::consts::TAU;

/// A point on the canvas, in pixels. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Addressable extent of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Squared distance between two points
pub fn distance_squared(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

/// Wraps an angle into `[0, TAU)`
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Angle of `p` around `center`, measured clockwise on screen from the +x axis.
pub fn angle_of(center: Point, p: Point) -> f64 {
    normalize_angle((p.y - center.y).atan2(p.x - center.x))
}

/// Point on the circle of `radius` around `center` at `angle`.
pub fn arc_point(center: Point, radius: f64, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(center.x + radius * cos, center.y + radius * sin)
}
