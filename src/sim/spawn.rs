//! Procedural obstacle generation
//!
//! The random source is passed in so runs are reproducible from a seed.

use rand::Rng;

use super::difficulty::DifficultyProfile;
use super::obstacle::{Obstacle, Oscillation};
use super::state::Viewport;
use crate::tuning::Tuning;

/// Gap height for a viewport: a fraction of its height, never below `min_gap`
#[inline]
pub fn gap_for(viewport_height: f32, gap_fraction: f32, tuning: &Tuning) -> f32 {
    (viewport_height * gap_fraction).floor().max(tuning.min_gap)
}

/// Build a new obstacle just beyond the right edge of the viewport
///
/// The anchor range `[margin, h - gap - margin]` is narrowed by the
/// amplitude on both sides so the oscillation starts fully inside it. When
/// the amplitude is too large for the viewport the range keeps one unit of
/// width and the animator's clamp takes over on the first tick.
pub fn generate_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    viewport: Viewport,
    profile: &DifficultyProfile,
    tuning: &Tuning,
) -> Obstacle {
    let h = viewport.height;
    let gap = gap_for(h, profile.gap_fraction, tuning);

    let top_min = tuning.spawn_margin;
    let top_max = h - gap - tuning.spawn_margin;

    let amplitude = (tuning.amp_min + rng.random::<f32>() * tuning.amp_span).floor();
    let span = (top_max - top_min - amplitude * 2.0).max(1.0);
    let base_top = (top_min + amplitude + rng.random::<f32>() * span).floor();

    let frequency = tuning.freq_min + rng.random::<f32>() * tuning.freq_span;
    let phase = rng.random::<f32>() * std::f32::consts::TAU;
    let drift = (rng.random::<f32>() - 0.5) * tuning.drift_span;

    let motion = Oscillation {
        amplitude,
        frequency,
        phase,
        drift,
    };

    Obstacle::new(
        id,
        viewport.width + tuning.spawn_offset_x,
        base_top,
        gap,
        motion,
    )
}
