//! A circle that wanders a canvas, leaving paint behind.
//!
//! Every fixed tick the brush either paints and takes a random step or, while
//! paused, pulses the pause control's background toward the brush colour.
//! All randomness comes in through an injected [`rand::Rng`], so a seeded
//! generator replays a run exactly.
//!
//! | Module | Role |
//! |--------|------|
//! | [`color`] | `Palette` and the random colour walks |
//! | [`shape`] | Position and radius, and how they wander |
//! | [`math`] | Points, canvas bounds, angles |
//! | [`graphics`] | `Surface` trait, pixel buffer, rasterizers |
//! | [`render`] | Brush kinds and draw commands |
//! | [`pulse`] | Pause control and its background pulse |
//! | [`state`] | Toggle flags, run config, simulation state |
//! | [`sim`] | The per-tick driver |

pub mod color;
pub mod graphics;
pub mod math;
pub mod pulse;
pub mod render;
pub mod shape;
pub mod sim;
pub mod state;
