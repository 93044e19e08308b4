//! Per-tick run controller
//!
//! Advances a run by one externally timed step. Order within a tick:
//! physics, spawn timer, obstacle animation and scroll, culling, scoring,
//! collision. Collision runs last so a fatal overlap is caught on the tick
//! that produced it.

use serde::Serialize;

use super::collision::detect_collision;
use super::physics;
use super::spawn::generate_obstacle;
use super::state::{RunEvent, RunPhase, RunState};
use crate::consts::AUTOPILOT_LOOKAHEAD;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Boost held (space/pointer/touch)
    pub boost: bool,
    /// Demo mode - the controller decides when to boost
    pub autopilot: bool,
}

impl TickInput {
    pub fn boost(boost: bool) -> Self {
        Self {
            boost,
            autopilot: false,
        }
    }

    pub fn autopilot() -> Self {
        Self {
            boost: false,
            autopilot: true,
        }
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickResult {
    pub score: u32,
    /// The run is over (set on the ending tick and on every tick after)
    pub terminated: bool,
    pub events: Vec<RunEvent>,
}

/// Advance the run by one tick of `elapsed_ms`
///
/// Idle and terminated runs are left untouched. Panics on a negative or
/// non-finite `elapsed_ms`.
pub fn tick(state: &mut RunState, input: &TickInput, elapsed_ms: f32) -> TickResult {
    assert!(
        elapsed_ms.is_finite() && elapsed_ms >= 0.0,
        "elapsed time must be finite and non-negative, got {elapsed_ms}"
    );

    if state.phase != RunPhase::Running {
        return TickResult {
            score: state.score,
            terminated: state.phase == RunPhase::Terminated,
            events: Vec::new(),
        };
    }

    let mut events = Vec::new();
    let dt_secs = elapsed_ms / 1000.0;
    state.sim_time += f64::from(elapsed_ms) / 1000.0;
    state.ticks += 1;

    // Body
    let boost = if input.autopilot {
        autopilot_boost(state)
    } else {
        input.boost
    };
    physics::integrate(&mut state.body, boost, &state.tuning);

    // Spawn
    state.spawn_timer += elapsed_ms;
    if state.spawn_timer > state.profile.interval_ms {
        state.spawn_timer = 0.0;
        let id = state.next_obstacle_id();
        let obstacle = generate_obstacle(
            &mut state.rng,
            id,
            state.viewport,
            &state.profile,
            &state.tuning,
        );
        log::debug!(
            "Spawned obstacle {} at x={} base_top={} gap={} amp={}",
            id,
            obstacle.x,
            obstacle.base_top,
            obstacle.gap,
            obstacle.motion.amplitude
        );
        state.obstacles.push(obstacle);
        events.push(RunEvent::Spawned { id });
    }

    // Animate and scroll
    let speed = state.profile.speed;
    let sim_time = state.sim_time;
    let height = state.viewport.height;
    for obstacle in &mut state.obstacles {
        obstacle.animate(speed, dt_secs, sim_time, height, &state.tuning);
    }

    // Cull
    let tuning = &state.tuning;
    state.obstacles.retain(|o| {
        let gone = o.is_off_screen(tuning);
        if gone {
            events.push(RunEvent::Culled { id: o.id });
        }
        !gone
    });

    // Score
    let body_left = state.body.left();
    for obstacle in &mut state.obstacles {
        if !obstacle.passed && obstacle.x + state.tuning.score_edge < body_left {
            obstacle.passed = true;
            state.score += 1;
            log::debug!("Cleared obstacle {} (score {})", obstacle.id, state.score);
            events.push(RunEvent::Scored {
                id: obstacle.id,
                score: state.score,
            });
        }
    }

    // Collide
    if let Some(collision) = detect_collision(&state.body, &state.obstacles, height, &state.tuning)
    {
        state.phase = RunPhase::Terminated;
        state.crash = Some(collision);
        log::info!(
            "Run over: {:?} after {} ticks ({:.1}s), score {}",
            collision,
            state.ticks,
            state.sim_time,
            state.score
        );
        events.push(RunEvent::Crashed(collision));
    }

    TickResult {
        score: state.score,
        terminated: state.phase == RunPhase::Terminated,
        events,
    }
}

/// Demo-mode steering: aim for the centre of the next gap
///
/// Boosts whenever the body, extrapolated a few ticks ahead, sits below the
/// target. With no obstacle ahead the target is mid-screen.
pub fn autopilot_boost(state: &RunState) -> bool {
    let body = &state.body;
    let target = state
        .obstacles
        .iter()
        .find(|o| !o.passed && o.right(&state.tuning) > body.left())
        .map(|o| o.gap_center())
        .unwrap_or(state.viewport.height * 0.5);

    let predicted = body.pos.y + body.vy * AUTOPILOT_LOOKAHEAD;
    predicted > target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::collision::Collision;
    use crate::sim::difficulty::DifficultyProfile;
    use crate::sim::obstacle::{Obstacle, Oscillation};
    use crate::sim::state::{Viewport, start_run};
    use crate::tuning::Tuning;

    fn viewport() -> Viewport {
        Viewport::new(480.0, 640.0)
    }

    /// Still obstacle whose gap comfortably contains the starting body
    fn safe_obstacle(state: &mut RunState, x: f32) -> u32 {
        let id = state.next_obstacle_id();
        state
            .obstacles
            .push(Obstacle::new(id, x, 250.0, 140.0, Oscillation::STILL));
        id
    }

    #[test]
    fn test_idle_run_ignores_ticks() {
        let mut state = RunState::new(DifficultyProfile::MEDIUM, viewport(), 1);
        let result = tick(&mut state, &TickInput::boost(true), FRAME_MS);
        assert_eq!(result.score, 0);
        assert!(!result.terminated);
        assert_eq!(state.ticks(), 0);
        assert_eq!(state.body().pos.y, 320.0);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        // Hover: alternate boost so the body stays near the middle
        for i in 0..75 {
            let result = tick(&mut state, &TickInput::boost(i % 2 == 0), 20.0);
            assert!(result.events.is_empty());
        }
        // Exactly 1500ms has elapsed; the timer must exceed the interval
        assert!(state.obstacles().is_empty());
        let result = tick(&mut state, &TickInput::boost(false), 20.0);
        assert_eq!(result.events, vec![RunEvent::Spawned { id: 1 }]);
        assert_eq!(state.obstacles().len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
        // Spawned at width + 20 and scrolled once in the same tick
        assert!((state.obstacles()[0].x - (500.0 - 2.6)).abs() < 1e-4);
    }

    #[test]
    fn test_scoring_exactly_once() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        // Scoring edge at x + 40, body left edge at 66
        let id = safe_obstacle(&mut state, 26.5);

        let result = tick(&mut state, &TickInput::boost(false), FRAME_MS);
        assert_eq!(result.score, 1);
        assert!(result.events.contains(&RunEvent::Scored { id, score: 1 }));
        assert!(state.obstacles()[0].passed);

        for i in 0..5 {
            let result = tick(&mut state, &TickInput::boost(i % 2 == 0), FRAME_MS);
            assert_eq!(result.score, 1);
            assert!(!result.terminated);
        }
    }

    #[test]
    fn test_not_scored_before_crossing() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        safe_obstacle(&mut state, 40.0);
        let result = tick(&mut state, &TickInput::boost(false), FRAME_MS);
        // 37.4 + 40 = 77.4 is not left of 66
        assert_eq!(result.score, 0);
        assert!(!state.obstacles()[0].passed);
    }

    #[test]
    fn test_culled_exactly_once() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        let id = safe_obstacle(&mut state, -50.0);

        let mut culls = 0;
        let mut last_x = state.obstacles()[0].x;
        for i in 0..6 {
            let result = tick(&mut state, &TickInput::boost(i % 2 == 0), FRAME_MS);
            culls += result
                .events
                .iter()
                .filter(|e| **e == RunEvent::Culled { id })
                .count();
            if let Some(o) = state.obstacles().first() {
                assert!(o.x < last_x);
                assert!(o.x >= -60.0);
                last_x = o.x;
            }
        }
        // -50 -> -52.6 -> -55.2 -> -57.8 -> -60.4 (removed)
        assert_eq!(culls, 1);
        assert!(state.obstacles().is_empty());
    }

    #[test]
    fn test_ceiling_ends_run() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        state.body.pos.y = 14.5;
        state.body.vy = -1.0;

        let result = tick(&mut state, &TickInput::boost(true), FRAME_MS);
        assert!(result.terminated);
        assert_eq!(result.events, vec![RunEvent::Crashed(Collision::Ceiling)]);
        assert_eq!(state.crash(), Some(Collision::Ceiling));
    }

    #[test]
    fn test_collision_same_tick() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        // Gap far above the body; the obstacle scrolls into it this tick
        let id = state.next_obstacle_id();
        state
            .obstacles
            .push(Obstacle::new(id, 96.0, 50.0, 140.0, Oscillation::STILL));

        let result = tick(&mut state, &TickInput::boost(false), FRAME_MS);
        assert!(result.terminated);
        assert_eq!(
            state.crash(),
            Some(Collision::BottomSpikes { obstacle_id: id })
        );
    }

    #[test]
    fn test_terminated_is_sticky() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        state.body.pos.y = 0.0;
        assert!(tick(&mut state, &TickInput::default(), FRAME_MS).terminated);

        let frozen_y = state.body().pos.y;
        let frozen_ticks = state.ticks();
        for _ in 0..10 {
            let result = tick(&mut state, &TickInput::boost(true), FRAME_MS);
            assert!(result.terminated);
            assert!(result.events.is_empty());
        }
        assert_eq!(state.body().pos.y, frozen_y);
        assert_eq!(state.ticks(), frozen_ticks);
        assert_eq!(state.phase(), RunPhase::Terminated);
    }

    #[test]
    fn test_zero_elapsed_still_steps_physics() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        tick(&mut state, &TickInput::boost(true), 0.0);
        assert!(state.body().vy < 0.0);
        assert_eq!(state.sim_time(), 0.0);
    }

    #[test]
    #[should_panic(expected = "elapsed time")]
    fn test_nan_elapsed_rejected() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        tick(&mut state, &TickInput::default(), f32::NAN);
    }

    #[test]
    fn test_resize_affects_bounds() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        // Body centre at 320; shrink so its bottom edge (334) is past the floor
        state.resize(Viewport::new(480.0, 330.0));
        let result = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(result.terminated);
        assert_eq!(state.crash(), Some(Collision::Floor));
    }

    #[test]
    fn test_autopilot_steers_toward_gap() {
        let mut state = start_run(DifficultyProfile::MEDIUM, viewport(), 1);
        // Gap centre at 150 + 70 = 220, body at 320: climb
        let id = state.next_obstacle_id();
        state
            .obstacles
            .push(Obstacle::new(id, 300.0, 150.0, 140.0, Oscillation::STILL));
        assert!(autopilot_boost(&state));

        // Body above the gap centre: fall
        state.body.pos.y = 150.0;
        assert!(!autopilot_boost(&state));

        // Rising fast toward the centre: stop boosting early
        state.body.pos.y = 240.0;
        state.body.vy = -4.0;
        assert!(!autopilot_boost(&state));
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs stay identical
        let mut state1 = start_run(DifficultyProfile::HARD, viewport(), 99999);
        let mut state2 = start_run(DifficultyProfile::HARD, viewport(), 99999);

        for _ in 0..600 {
            let r1 = tick(&mut state1, &TickInput::autopilot(), FRAME_MS);
            let r2 = tick(&mut state2, &TickInput::autopilot(), FRAME_MS);
            assert_eq!(r1.events, r2.events);
        }

        assert_eq!(state1.ticks(), state2.ticks());
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.body(), state2.body());
        assert_eq!(state1.obstacles(), state2.obstacles());
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let mut a = start_run(DifficultyProfile::EASY, viewport(), 1);
        let b = start_run(DifficultyProfile::EASY, viewport(), 1);
        for _ in 0..120 {
            tick(&mut a, &TickInput::autopilot(), FRAME_MS);
        }
        assert_eq!(b.ticks(), 0);
        assert!(b.obstacles().is_empty());
    }

    #[test]
    fn test_restart_replays_sequence() {
        let mut state = start_run(DifficultyProfile::VERY_HARD, viewport(), 77);
        for _ in 0..200 {
            tick(&mut state, &TickInput::autopilot(), FRAME_MS);
        }
        let first: Vec<_> = state.obstacles().to_vec();

        state.start();
        for _ in 0..200 {
            tick(&mut state, &TickInput::autopilot(), FRAME_MS);
        }
        assert_eq!(state.obstacles(), first.as_slice());
    }

    #[test]
    fn test_obstacles_stay_in_spawn_order() {
        let mut state = start_run(DifficultyProfile::VERY_HARD, viewport(), 3);
        for _ in 0..400 {
            tick(&mut state, &TickInput::autopilot(), FRAME_MS);
            let ids: Vec<u32> = state.obstacles().iter().map(|o| o.id).collect();
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            let xs: Vec<f32> = state.obstacles().iter().map(|o| o.x).collect();
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_sim_time_holds_precision_over_an_hour() {
        let tuning = Tuning {
            gravity: 0.0,
            lift: 0.0,
            ..Tuning::default()
        };
        let profile = DifficultyProfile {
            interval_ms: 1.0e9,
            ..DifficultyProfile::MEDIUM
        };
        let mut state = RunState::with_tuning(profile, viewport(), 1, tuning);
        state.start();

        let frames = 60 * 60 * 60;
        for _ in 0..frames {
            assert!(!tick(&mut state, &TickInput::default(), FRAME_MS).terminated);
        }

        let expected = frames as f64 * f64::from(FRAME_MS) / 1000.0;
        assert!((state.sim_time() - expected).abs() < 1e-6);
        assert!((state.sim_time() - 3600.0).abs() < 1e-3);
    }
}
