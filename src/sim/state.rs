//! Run state and core simulation types
//!
//! A [`RunState`] is one full run: it owns the body, the active obstacles,
//! the timers, the score and the seeded RNG. Several runs can coexist.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Collision;
use super::difficulty::DifficultyProfile;
use super::obstacle::Obstacle;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    /// Created but not started
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by a collision (sticky)
    Terminated,
}

/// Visible play area supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Panics on non-positive or non-finite dimensions
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width.is_finite() && width > 0.0,
            "viewport width must be positive and finite, got {width}"
        );
        assert!(
            height.is_finite() && height > 0.0,
            "viewport height must be positive and finite, got {height}"
        );
        Self { width, height }
    }

    /// Both dimensions positive and finite
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0
    }
}

/// The player-controlled body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Body {
    /// Centre; `x` is fixed for the run
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical velocity (px per tick, positive is down)
    pub vy: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            vy: 0.0,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RunEvent {
    /// A new obstacle entered from the right
    Spawned { id: u32 },
    /// The body cleared an obstacle; `score` is the new total
    Scored { id: u32, score: u32 },
    /// An obstacle scrolled off the left edge and was removed
    Culled { id: u32 },
    /// The run ended
    Crashed(Collision),
}

/// Read-only view of a run for rendering
#[derive(Debug, Clone, Serialize)]
pub struct RunSnapshot {
    pub phase: RunPhase,
    pub score: u32,
    pub sim_time: f64,
    pub viewport: Viewport,
    pub body: Body,
    pub obstacles: Vec<Obstacle>,
}

/// Complete state of one run (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct RunState {
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) profile: DifficultyProfile,
    pub(crate) tuning: Tuning,
    pub(crate) viewport: Viewport,
    pub(crate) body: Body,
    /// Active obstacles in spawn order (also left-to-right order)
    pub(crate) obstacles: Vec<Obstacle>,
    /// Simulation time (seconds)
    pub(crate) sim_time: f64,
    /// Time since the last spawn (ms)
    pub(crate) spawn_timer: f32,
    pub(crate) score: u32,
    pub(crate) ticks: u64,
    pub(crate) phase: RunPhase,
    /// Collision that ended the run, if any
    pub(crate) crash: Option<Collision>,
    next_id: u32,
}

impl RunState {
    /// Create an idle run with default tuning
    pub fn new(profile: DifficultyProfile, viewport: Viewport, seed: u64) -> Self {
        Self::with_tuning(profile, viewport, seed, Tuning::default())
    }

    /// Create an idle run with custom tuning
    ///
    /// Panics on an invalid profile, viewport or tuning.
    pub fn with_tuning(
        profile: DifficultyProfile,
        viewport: Viewport,
        seed: u64,
        tuning: Tuning,
    ) -> Self {
        assert!(profile.is_valid(), "invalid difficulty profile: {profile:?}");
        assert!(viewport.is_valid(), "invalid viewport: {viewport:?}");
        assert!(tuning.is_valid(), "invalid tuning: {tuning:?}");

        let body = Self::initial_body(&tuning, viewport);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            profile,
            tuning,
            viewport,
            body,
            obstacles: Vec::new(),
            sim_time: 0.0,
            spawn_timer: 0.0,
            score: 0,
            ticks: 0,
            phase: RunPhase::Idle,
            crash: None,
            next_id: 1,
        }
    }

    fn initial_body(tuning: &Tuning, viewport: Viewport) -> Body {
        Body::new(
            Vec2::new(tuning.body_x, viewport.height / 2.0),
            tuning.body_radius,
        )
    }

    /// Reset everything and enter `Running`
    ///
    /// The RNG is reseeded, so restarting replays the same obstacle sequence
    /// for the same inputs.
    pub fn start(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.body = Self::initial_body(&self.tuning, self.viewport);
        self.obstacles.clear();
        self.sim_time = 0.0;
        self.spawn_timer = 0.0;
        self.score = 0;
        self.ticks = 0;
        self.crash = None;
        self.next_id = 1;
        self.phase = RunPhase::Running;

        log::info!(
            "Run started: mode={} seed={} viewport={}x{}",
            self.profile.id,
            self.seed,
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Start a new run with a different seed
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.start();
    }

    /// Apply a new viewport size; later spawns, clamps and bounds use it
    ///
    /// Panics on a non-positive or non-finite size.
    pub fn resize(&mut self, viewport: Viewport) {
        assert!(viewport.is_valid(), "invalid viewport: {viewport:?}");
        if viewport != self.viewport {
            log::debug!(
                "Viewport resized {}x{} -> {}x{}",
                self.viewport.width,
                self.viewport.height,
                viewport.width,
                viewport.height
            );
            self.viewport = viewport;
        }
    }

    /// Allocate a new obstacle ID
    pub(crate) fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == RunPhase::Terminated
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn crash(&self) -> Option<Collision> {
        self.crash
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            phase: self.phase,
            score: self.score,
            sim_time: self.sim_time,
            viewport: self.viewport,
            body: self.body,
            obstacles: self.obstacles.clone(),
        }
    }
}

/// Create a run and start it immediately
pub fn start_run(profile: DifficultyProfile, viewport: Viewport, seed: u64) -> RunState {
    let mut state = RunState::new(profile, viewport, seed);
    state.start();
    state
}
