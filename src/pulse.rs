//! Paused-state animation of the pause control's background.
//!
//! Each channel walks toward the brush colour one unit per tick. Once every
//! channel has either reached its target or saturated at 255, channels that
//! can no longer move flip direction, so the background keeps pulsing between
//! the brush colour and white instead of settling.

use crate::color::Palette;
use tracing::debug;

/// Per-tick channel change.
pub const PULSE_STEP: i8 = 1;

/// Background the control returns to whenever it is toggled.
pub const RESET_STYLE: &str = "#FFFFFF";

/// Walk direction for each channel, each `-1` or `+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction(pub [i8; 3]);

impl Direction {
    pub const RESET: Direction = Direction([-1, -1, -1]);
}

impl Default for Direction {
    fn default() -> Self {
        Self::RESET
    }
}

/// Advances the background one pulse step toward `target`.
pub fn tick(current: Palette, target: Palette, direction: Direction) -> (Palette, Direction) {
    let from = current.to_array();
    let to = target.to_array();

    let all_done = from
        .iter()
        .zip(to.iter())
        .all(|(f, t)| f <= t || *f == u8::MAX);

    let mut next = from;
    let mut dir = direction.0;
    for i in 0..3 {
        let (f, t, d) = (from[i], to[i], dir[i]);
        if (f > t && d == -1) || (f < u8::MAX && d == 1) {
            next[i] = f.saturating_add_signed(PULSE_STEP * d);
        } else if all_done {
            dir[i] = -d;
        }
    }

    (Palette::from(next), Direction(dir))
}

/// Reads a background style, treating anything unparseable as white.
pub fn background_from_style(style: Option<&str>) -> Palette {
    match style.map(str::parse::<Palette>) {
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            debug!(%err, "unreadable pause background, starting from white");
            Palette::WHITE
        }
        None => Palette::WHITE,
    }
}

/// The play/pause control: its label, its background style and the pulse
/// direction it animates with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseButton {
    playing: bool,
    background: Option<String>,
    direction: Direction,
}

impl PauseButton {
    /// A control with no background style yet, which reads as white.
    pub fn new(playing: bool) -> Self {
        Self {
            playing,
            background: None,
            direction: Direction::RESET,
        }
    }

    /// Whether the simulation is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Text shown on the control: the action it performs.
    pub fn label(&self) -> &'static str {
        if self.playing {
            "Pause"
        } else {
            "Play"
        }
    }

    /// Flips between playing and paused, resetting the pulse. Returns the new
    /// playing state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.direction = Direction::RESET;
        self.background = Some(RESET_STYLE.to_string());
        self.playing
    }

    /// Per-channel direction the next pulse step walks in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Background style exactly as stored.
    pub fn background_style(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Replaces the background style as the host would set it.
    pub fn set_background_style(&mut self, style: impl Into<String>) {
        self.background = Some(style.into());
    }

    /// Current background colour. See [`background_from_style`].
    pub fn background(&self) -> Palette {
        background_from_style(self.background_style())
    }

    /// Runs one pulse step toward `target` and stores the result.
    pub fn pulse(&mut self, target: Palette) -> Palette {
        let (next, direction) = tick(self.background(), target, self.direction);
        self.direction = direction;
        self.background = Some(next.to_hex());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulses_down_to_target_then_back_up_to_white() {
        let target = Palette::BLACK;
        let mut bg = Palette::WHITE;
        let mut dir = Direction::RESET;

        for expected in (0..255u8).rev() {
            (bg, dir) = tick(bg, target, dir);
            assert_eq!(bg.channels(), (expected, expected, expected));
        }
        assert_eq!(dir, Direction::RESET);

        // at target: hold one tick while the direction flips
        (bg, dir) = tick(bg, target, dir);
        assert_eq!(bg, Palette::BLACK);
        assert_eq!(dir, Direction([1, 1, 1]));

        for expected in 1..=255u8 {
            (bg, dir) = tick(bg, target, dir);
            assert_eq!(bg.channels(), (expected, expected, expected));
        }

        (bg, dir) = tick(bg, target, dir);
        assert_eq!(bg, Palette::WHITE);
        assert_eq!(dir, Direction::RESET);

        (bg, _) = tick(bg, target, dir);
        assert_eq!(bg.channels(), (254, 254, 254));
    }

    #[test]
    fn channels_wait_for_each_other_before_reversing() {
        // red is already at its target, blue still has a way to go
        let target = Palette::new(100, 100, 10);
        let (bg, dir) = tick(Palette::new(100, 100, 20), target, Direction::RESET);
        assert_eq!(bg.channels(), (100, 100, 19));
        assert_eq!(dir, Direction::RESET);
    }

    #[test]
    fn done_check_uses_each_channels_own_target() {
        // blue sits below its own target but above red's; it counts as done
        let target = Palette::new(0, 0, 200);
        let (bg, dir) = tick(Palette::new(0, 0, 150), target, Direction::RESET);
        assert_eq!(bg.channels(), (0, 0, 150));
        assert_eq!(dir, Direction([1, 1, 1]));
    }

    #[test]
    fn malformed_background_starts_from_white() {
        assert_eq!(background_from_style(Some("not a color")), Palette::WHITE);
        assert_eq!(background_from_style(None), Palette::WHITE);
        assert_eq!(
            background_from_style(Some("rgb(1, 2, 3)")),
            Palette::new(1, 2, 3)
        );
    }

    #[test]
    fn toggle_resets_label_background_and_direction() {
        let mut button = PauseButton::new(true);
        assert_eq!(button.label(), "Pause");

        assert!(!button.toggle());
        assert_eq!(button.label(), "Play");
        button.pulse(Palette::BLACK);
        button.pulse(Palette::BLACK);
        assert_eq!(button.background(), Palette::new(253, 253, 253));

        button.set_background_style("garbage");
        assert_eq!(button.pulse(Palette::BLACK), Palette::new(254, 254, 254));

        assert!(button.toggle());
        assert_eq!(button.background_style(), Some(RESET_STYLE));
        assert_eq!(button.direction(), Direction::RESET);
    }
}
