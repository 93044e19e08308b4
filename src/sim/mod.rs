//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from the caller's per-tick elapsed value
//! - Seeded RNG only
//! - Stable obstacle order (by spawn ID)
//! - No rendering, input or storage dependencies

pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collision, body_bounds_collision, body_obstacle_collision, detect_collision};
pub use difficulty::DifficultyProfile;
pub use obstacle::{Obstacle, Oscillation};
pub use physics::{integrate, integrate_velocity};
pub use spawn::{gap_for, generate_obstacle};
pub use state::{Body, RunEvent, RunPhase, RunSnapshot, RunState, Viewport, start_run};
pub use tick::{TickInput, TickResult, autopilot_boost, tick};
