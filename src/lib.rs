//! Spike Glide - A side-scrolling spike-gap avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, run state)
//! - `tuning`: Data-driven physics and geometry constants
//! - `rewards`: Charms that convert a run score into diamonds
//! - `progress`: Diamonds, owned charms and best score (serialized, storage is external)

pub mod progress;
pub mod rewards;
pub mod sim;
pub mod tuning;

pub use progress::{Progress, ProgressError, RunReward};
pub use rewards::{CHARMS, Charm};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration used by the headless driver (ms)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Body defaults
    pub const BODY_X: f32 = 80.0;
    pub const BODY_RADIUS: f32 = 14.0;

    /// Downward acceleration per tick while boost is released
    pub const GRAVITY: f32 = 0.08;
    /// Upward acceleration per tick while boost is held (matches gravity)
    pub const LIFT: f32 = GRAVITY;
    /// Damping applied while falling, keeps the descent floaty
    pub const FALL_DAMP: f32 = 0.99;
    /// Symmetric vertical speed limit (px per tick)
    pub const MAX_VERTICAL_SPEED: f32 = 6.0;

    /// Smallest traversable gap regardless of profile or viewport
    pub const MIN_GAP: f32 = 90.0;
    /// Clearance kept above and below the gap anchor range at spawn
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Oscillation amplitude is `AMP_MIN + floor(rand * AMP_SPAN)`
    pub const AMP_MIN: f32 = 8.0;
    pub const AMP_SPAN: f32 = 48.0;
    /// Oscillation angular frequency is `FREQ_MIN + rand * FREQ_SPAN`
    pub const FREQ_MIN: f32 = 0.4;
    pub const FREQ_SPAN: f32 = 1.0;
    /// Drift is `(rand - 0.5) * DRIFT_SPAN` px per second
    pub const DRIFT_SPAN: f32 = 12.0;
    /// Obstacles appear this far past the right edge
    pub const SPAWN_OFFSET_X: f32 = 20.0;

    /// Margin used by the per-tick base clamp (looser than the spawn margin)
    pub const DRIFT_MARGIN: f32 = 8.0;

    /// Horizontal extent of an obstacle's spike columns
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    /// Distance from an obstacle's x to the edge used for scoring
    pub const SCORE_EDGE: f32 = 40.0;
    /// Obstacles left of this x are removed
    pub const CULL_X: f32 = -60.0;

    /// How many ticks ahead the autopilot extrapolates the body
    pub const AUTOPILOT_LOOKAHEAD: f32 = 8.0;
}
