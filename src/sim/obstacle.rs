//! Obstacle geometry and per-tick animation
//!
//! An obstacle is a column of spikes hanging from the top edge and a column
//! rising from the bottom edge, leaving a vertical gap between them. The gap
//! moves two ways:
//! - `base_top` drifts slowly (time-scaled) and is clamped to stay on-screen
//! - `top` oscillates sinusoidally around `base_top`
//!
//! Collision and rendering always use `top`.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Sinusoidal oscillation and drift parameters, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Peak offset of `top` from `base_top` (px)
    pub amplitude: f32,
    /// Angular frequency (rad/s)
    pub frequency: f32,
    /// Phase offset (rad)
    pub phase: f32,
    /// Drift of `base_top` (px/s, signed)
    pub drift: f32,
}

impl Oscillation {
    /// No oscillation and no drift
    pub const STILL: Self = Self {
        amplitude: 0.0,
        frequency: 0.0,
        phase: 0.0,
        drift: 0.0,
    };

    /// Offset of `top` from `base_top` at simulation time `t` (seconds)
    ///
    /// The phase is evaluated in `f64` so long runs keep their timing.
    #[inline]
    pub fn offset_at(&self, t: f64) -> f32 {
        let angle = t * f64::from(self.frequency) + f64::from(self.phase);
        (angle.sin() * f64::from(self.amplitude)) as f32
    }
}

/// A spike pair with a traversable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Stable id, assigned in spawn order
    pub id: u32,
    /// Left edge (px)
    pub x: f32,
    /// Slow-moving anchor of the gap's upper edge
    pub base_top: f32,
    /// Current upper edge of the gap (`base_top` + oscillation)
    pub top: f32,
    /// Gap height, fixed at spawn
    pub gap: f32,
    pub motion: Oscillation,
    /// Set once the body has cleared this obstacle
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, base_top: f32, gap: f32, motion: Oscillation) -> Self {
        Self {
            id,
            x,
            base_top,
            top: base_top,
            gap,
            motion,
            passed: false,
        }
    }

    /// Upper edge of the bottom spikes
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.gap
    }

    /// Right edge of the spike columns
    #[inline]
    pub fn right(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.obstacle_width
    }

    /// Vertical centre of the current gap
    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.top + self.gap * 0.5
    }

    /// Clamp range for `base_top` while airborne: `[m + amp, h - gap - m - amp]`
    pub fn base_bounds(&self, viewport_height: f32, tuning: &Tuning) -> (f32, f32) {
        let margin = tuning.drift_margin + self.motion.amplitude;
        (margin, viewport_height - self.gap - margin)
    }

    /// Advance one tick
    ///
    /// Scroll is per tick; drift and oscillation are scaled by real time.
    /// `top` is derived from the drifted anchor before it is clamped, so the
    /// oscillating edge may briefly reach past the clamp range by up to `amp`.
    pub fn animate(
        &mut self,
        speed: f32,
        dt_secs: f32,
        sim_time: f64,
        viewport_height: f32,
        tuning: &Tuning,
    ) {
        self.x -= speed;
        self.base_top += self.motion.drift * dt_secs;
        self.top = self.base_top + self.motion.offset_at(sim_time);

        let (min_base, max_base) = self.base_bounds(viewport_height, tuning);
        // Floor first, then ceiling: on a viewport too short for the range,
        // the ceiling wins instead of panicking like f32::clamp would
        if self.base_top < min_base {
            self.base_top = min_base;
        }
        if self.base_top > max_base {
            self.base_top = max_base;
        }
    }

    /// True once the obstacle has scrolled fully past the left edge
    #[inline]
    pub fn is_off_screen(&self, tuning: &Tuning) -> bool {
        self.x < tuning.cull_x
    }
}
