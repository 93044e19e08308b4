//! Collision detection
//!
//! The body is a circle but is tested as its axis-aligned extent: the top
//! spikes reach down to `top`, the bottom spikes reach up to `top + gap`, and
//! any overlap with either while horizontally inside the spike columns is
//! fatal. Every check is a pure function of its arguments.

use serde::Serialize;

use super::obstacle::Obstacle;
use super::state::Body;
use crate::tuning::Tuning;

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Collision {
    /// Body left through the top of the viewport
    Ceiling,
    /// Body left through the bottom of the viewport
    Floor,
    /// Body touched the spikes hanging from the top
    TopSpikes { obstacle_id: u32 },
    /// Body touched the spikes rising from the bottom
    BottomSpikes { obstacle_id: u32 },
}

/// Check the body against the viewport's top and bottom edges
pub fn body_bounds_collision(body: &Body, viewport_height: f32) -> Option<Collision> {
    if body.top() < 0.0 {
        Some(Collision::Ceiling)
    } else if body.bottom() > viewport_height {
        Some(Collision::Floor)
    } else {
        None
    }
}

/// True when the body's horizontal extent overlaps the obstacle's columns
#[inline]
pub fn overlaps_horizontally(body: &Body, obstacle: &Obstacle, width: f32) -> bool {
    body.right() > obstacle.x && body.left() < obstacle.x + width
}

/// Check the body against one obstacle's current (oscillated) geometry
pub fn body_obstacle_collision(body: &Body, obstacle: &Obstacle, width: f32) -> Option<Collision> {
    if !overlaps_horizontally(body, obstacle, width) {
        return None;
    }

    if body.top() < obstacle.top {
        return Some(Collision::TopSpikes {
            obstacle_id: obstacle.id,
        });
    }

    if body.bottom() > obstacle.bottom() {
        return Some(Collision::BottomSpikes {
            obstacle_id: obstacle.id,
        });
    }

    None
}

/// First terminal condition: bounds, then obstacles in order
pub fn detect_collision(
    body: &Body,
    obstacles: &[Obstacle],
    viewport_height: f32,
    tuning: &Tuning,
) -> Option<Collision> {
    body_bounds_collision(body, viewport_height).or_else(|| {
        obstacles
            .iter()
            .find_map(|o| body_obstacle_collision(body, o, tuning.obstacle_width))
    })
}
