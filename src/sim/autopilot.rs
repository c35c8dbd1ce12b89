//! Idle/demo input generator
//!
//! Plays the patterns without a human: wanders a cursor around the field,
//! fires in bursts and strafes the shooter. Seeded, so a headless run with
//! the same seed replays exactly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::SimState;
use super::tick::TickInput;

/// Cursor drift speed in field units per tick
const CURSOR_SPEED: f32 = 6.0;
/// Chance per tick of picking a new cursor heading
const TURN_CHANCE: f64 = 0.05;
/// Chance per tick that an idle tuning key gets pressed (live-tuned patterns)
const TUNE_CHANCE: f64 = 0.002;

/// Seeded input generator
#[derive(Debug, Clone)]
pub struct Autopilot {
    seed: u64,
    rng: Pcg32,
    /// None until the first input, then always inside the field
    cursor: Option<Vec2>,
    heading: Vec2,
    /// Ticks left in the current fire burst / pause
    burst_ticks: u32,
    firing: bool,
    /// Ticks left holding the current movement keys
    strafe_ticks: u32,
    strafe: Vec2,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            cursor: None,
            heading: Vec2::X,
            burst_ticks: 0,
            firing: false,
            strafe_ticks: 0,
            strafe: Vec2::ZERO,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Produce the input for the next tick of `state`
    pub fn next_input(&mut self, state: &SimState) -> TickInput {
        let bounds = state.bounds();
        let cursor = match self.cursor {
            Some(cursor) if bounds.contains(cursor) => cursor,
            _ => bounds.center(),
        };

        // Cursor: random walk that bounces off the field edges
        if self.rng.random_bool(TURN_CHANCE) {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            self.heading = Vec2::from_angle(angle);
        }
        if !bounds.contains(cursor + self.heading * CURSOR_SPEED) {
            self.heading = -self.heading;
        }
        let next = cursor + self.heading * CURSOR_SPEED;
        let cursor = if bounds.contains(next) { next } else { cursor };
        self.cursor = Some(cursor);

        // Trigger: alternate bursts and pauses
        if self.burst_ticks == 0 {
            self.firing = !self.firing;
            self.burst_ticks = if self.firing {
                self.rng.random_range(30..180)
            } else {
                self.rng.random_range(10..60)
            };
        }
        self.burst_ticks -= 1;

        // Movement: hold a random direction for a while
        if self.strafe_ticks == 0 {
            let pick = |rng: &mut Pcg32| rng.random_range(-1i32..=1) as f32;
            self.strafe = Vec2::new(pick(&mut self.rng), pick(&mut self.rng));
            self.strafe_ticks = self.rng.random_range(20..90);
        }
        self.strafe_ticks -= 1;

        let mut input = TickInput {
            move_up: self.strafe.y < 0.0,
            move_down: self.strafe.y > 0.0,
            move_left: self.strafe.x < 0.0,
            move_right: self.strafe.x > 0.0,
            fire: self.firing,
            aim: Some(cursor),
            ..Default::default()
        };

        if state.config.live_tuning && self.rng.random_bool(TUNE_CHANCE) {
            match self.rng.random_range(0..5) {
                0 => input.step_up = true,
                1 => input.step_down = true,
                2 => input.step_reset = true,
                3 => input.interval_up = true,
                _ => input.interval_down = true,
            }
        }

        input
    }
}
