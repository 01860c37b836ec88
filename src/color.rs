//! Brush colour: three 8-bit channels plus the two ways the brush picks its
//! next colour (full reassignment or a small walk on one channel).

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

/// Exclusive upper bound on the magnitude of a single smooth colour step.
pub const SMOOTHING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex length")]
    InvalidLength,
    #[error("invalid hex digits")]
    InvalidHex,
    #[error("invalid rgb()/rgba() function")]
    InvalidFunc,
    #[error("value {0} out of range [0, 255]")]
    OutOfRange(i64),
}

/// Decomposed channel values, as shown in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Current brush colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    red: u8,
    green: u8,
    blue: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Palette {
    pub const WHITE: Palette = Palette::new(255, 255, 255);
    pub const BLACK: Palette = Palette::new(0, 0, 0);

    /// Palette from raw channel bytes.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a palette from wide integers, rejecting anything outside a byte.
    pub fn from_channels(red: i64, green: i64, blue: i64) -> Result<Self, ColorError> {
        Ok(Self::new(channel(red)?, channel(green)?, channel(blue)?))
    }

    /// A palette with every channel drawn uniformly from [0, 255].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut palette = Self::default();
        palette.randomize(rng);
        palette
    }

    /// Reassigns all three channels independently and uniformly.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.red = rng.gen();
        self.green = rng.gen();
        self.blue = rng.gen();
    }

    /// Shifts one randomly chosen channel by a signed delta whose magnitude is
    /// uniform in `[0, max_delta)`.
    ///
    /// A delta that would push the channel outside `[0, 255]` is dropped and
    /// the channel keeps its value for this call.
    pub fn smooth_step<R: Rng + ?Sized>(&mut self, rng: &mut R, max_delta: u8) {
        if max_delta == 0 {
            return;
        }

        let sign: i16 = if rng.gen_bool(0.5) { 1 } else { -1 };
        let delta = sign * i16::from(rng.gen_range(0..max_delta));

        let slot = match rng.gen_range(0..3) {
            0 => &mut self.red,
            1 => &mut self.green,
            _ => &mut self.blue,
        };

        if let Ok(next) = u8::try_from(i16::from(*slot) + delta) {
            *slot = next;
        }
    }

    /// `#rrggbb`, lowercase and zero padded.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Channels as a `(red, green, blue)` tuple.
    pub fn channels(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Channels in the form the HUD prints.
    pub fn rgb(&self) -> Rgb {
        Rgb {
            r: self.red,
            g: self.green,
            b: self.blue,
        }
    }

    /// Channels in `[red, green, blue]` order, for per-channel loops.
    pub fn to_array(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u8; 3]> for Palette {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Palette {
    type Err = ColorError;

    /// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = s.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or(ColorError::InvalidFunc)?;

        parse_css_rgb(args)
    }
}

fn channel(val: i64) -> Result<u8, ColorError> {
    u8::try_from(val).map_err(|_| ColorError::OutOfRange(val))
}

fn parse_hex(hex: &str) -> Result<Palette, ColorError> {
    if !matches!(hex.len(), 3 | 6) {
        return Err(ColorError::InvalidLength);
    }
    // from_str_radix would also take a sign, and slicing needs char boundaries
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex);
    }

    let byte = |digits: &str| -> Result<u8, ColorError> {
        u8::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex)
    };
    if hex.len() == 3 {
        Ok(Palette::new(
            byte(hex[0..1].repeat(2).as_str())?,
            byte(hex[1..2].repeat(2).as_str())?,
            byte(hex[2..3].repeat(2).as_str())?,
        ))
    } else {
        Ok(Palette::new(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        ))
    }
}

fn parse_css_rgb(args: &str) -> Result<Palette, ColorError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorError::InvalidFunc);
    }

    if let Some(alpha) = parts.get(3) {
        let a: f32 = alpha.parse().map_err(|_| ColorError::InvalidFunc)?;
        if !(0.0..=1.0).contains(&a) {
            return Err(ColorError::InvalidFunc);
        }
    }

    let mut values = [0i64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| ColorError::InvalidFunc)?;
    }

    Palette::from_channels(values[0], values[1], values[2])
}
