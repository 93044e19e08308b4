//! Vertical body integration
//!
//! Velocity is in px per tick: lift, gravity and the position step are
//! applied once per tick regardless of how long the tick was.

use super::state::Body;
use crate::tuning::Tuning;

/// Next vertical velocity for one tick
///
/// Boost subtracts `lift`. Otherwise gravity is added and then damped, which
/// flattens the fall into a floaty glide instead of linear acceleration.
/// Either way the result is clamped to `±max_vertical_speed`.
#[inline]
pub fn integrate_velocity(vy: f32, boost: bool, tuning: &Tuning) -> f32 {
    let vy = if boost {
        vy - tuning.lift
    } else {
        (vy + tuning.gravity) * tuning.fall_damp
    };
    vy.clamp(-tuning.max_vertical_speed, tuning.max_vertical_speed)
}

/// Advance the body by one tick
pub fn integrate(body: &mut Body, boost: bool, tuning: &Tuning) {
    body.vy = integrate_velocity(body.vy, boost, tuning);
    body.pos.y += body.vy;
}
