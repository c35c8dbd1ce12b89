//! Fixed timestep simulation tick
//!
//! One call = input, move, reclaim, spawn, advance emitter. Same state plus
//! same inputs always produces the same result.

use glam::Vec2;

use super::emitter::Emitter;
use super::state::SimState;
use super::velocity::try_compute_velocity;
use crate::config::{EmitterConfig, FireMode, SpawnAt};

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Movement keys (screen space, +y is down)
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Trigger held (mouse button / space)
    pub fire: bool,
    /// Cursor position in field coordinates
    pub aim: Option<Vec2>,
    /// Live tuning one-shots: orbit step +1 / -1 / reset
    pub step_up: bool,
    pub step_down: bool,
    pub step_reset: bool,
    /// Live tuning one-shots: shoot interval +1 / -1
    pub interval_up: bool,
    pub interval_down: bool,
}

impl TickInput {
    /// Movement direction from the held keys, components in {-1, 0, 1}
    pub fn move_dir(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(
            axis(self.move_left, self.move_right),
            axis(self.move_up, self.move_down),
        )
    }
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    apply_input(state, input, dt);

    // Move projectiles in flight
    state.pool.for_each_active_mut(|_, p| p.pos += p.vel * dt);

    // Reclaim anything outside the field; parked slots are checked too
    let bounds = state.bounds();
    for slot in 0..state.pool.capacity() {
        let outside = state.pool.get(slot).is_some_and(|p| !bounds.contains(p.pos));
        if outside {
            state.pool.reset(slot);
            state.reclaimed += 1;
        }
    }

    // Rate-limited spawn, one projectile per target point
    let counting = match state.config.fire_mode {
        FireMode::Always => true,
        FireMode::Trigger => input.fire,
    };
    if counting && state.count_frame() {
        spawn_wave(state);
    }

    state.emitter.step();
    state.time_ticks += 1;
}

fn apply_input(state: &mut SimState, input: &TickInput, dt: f32) {
    let bounds = state.bounds();

    if let Some(shooter) = &mut state.shooter {
        if shooter.steer(input.move_dir(), dt, &bounds) {
            state.origin = shooter.center;
            state.pool.set_parked(shooter.center);
        }
    }

    if let Emitter::Aim(aim) = &mut state.emitter {
        match &state.config.emitter {
            EmitterConfig::Cursor => {
                if let Some(cursor) = input.aim {
                    aim.set(cursor);
                }
            }
            EmitterConfig::Heading { direction } => aim.set(state.origin + *direction),
            _ => {}
        }
    }

    if !state.config.live_tuning {
        return;
    }

    if let Emitter::Orbit(orbit) = &mut state.emitter {
        if input.step_up {
            orbit.nudge_step(1.0);
        }
        if input.step_down {
            orbit.nudge_step(-1.0);
        }
        if input.step_reset {
            orbit.reset_step();
        }
    }
    if input.interval_up {
        state.shoot_interval += 1;
    }
    if input.interval_down {
        state.shoot_interval = state.shoot_interval.saturating_sub(1).max(1);
    }
}

fn spawn_wave(state: &mut SimState) {
    let origin = state.origin;
    let speed = state.config.speed;
    let spawn_at = state.config.spawn_at;

    for &target in state.emitter.current_targets() {
        let Some(vel) = try_compute_velocity(origin, target, speed) else {
            state.shots_skipped += 1;
            log::debug!("Skipping shot: target {} sits on the emitter origin", target);
            continue;
        };
        let pos = match spawn_at {
            SpawnAt::Origin => origin,
            SpawnAt::Target => target,
        };
        state.pool.spawn(pos, vel);
        state.shots_fired += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PatternPreset, SimConfig};
    use crate::consts::SIM_DT;
    use crate::polar_deg;

    fn ring_config(capacity: usize, speed: f32) -> SimConfig {
        let mut config = SimConfig::from_preset(PatternPreset::Ring);
        config.capacity = capacity;
        config.speed = speed;
        config.emitter = EmitterConfig::Ring {
            count: 5,
            radius: 1.0,
            spin_deg: 0.0,
            spin_accel_deg: 0.0,
        };
        config
    }

    #[test]
    fn test_ring_spawn_velocities() {
        let mut state = SimState::new(ring_config(5, 5.0)).unwrap();
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.pool.active_count(), 5);
        assert_eq!(state.shots_fired, 5);
        for k in 0..5 {
            let p = state.pool.get(k).unwrap();
            let dir = polar_deg(1.0, 72.0 * k as f32);
            assert!((p.vel.length() - 5.0).abs() < 1e-4);
            assert!((p.vel / 5.0 - dir).length() < 1e-4, "slot {} vel {}", k, p.vel);
            // Ring bullets start on their target point
            assert!((p.pos - dir).length() < 1e-5);
        }
        assert_eq!(state.pool.next_slot(), 0);
    }

    #[test]
    fn test_ring_overwrites_when_pool_exhausted() {
        let mut state = SimState::new(ring_config(5, 5.0)).unwrap();
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);

        // Every first-wave bullet was still in flight
        assert_eq!(state.pool.overwrites(), 5);
        assert_eq!(state.pool.active_count(), 5);
    }

    #[test]
    fn test_projectiles_move_then_get_reclaimed() {
        let mut state = SimState::new(ring_config(50, 6000.0)).unwrap();
        tick(&mut state, &TickInput::default(), SIM_DT);
        let before = state.pool.get(0).unwrap().pos;

        tick(&mut state, &TickInput::default(), SIM_DT);
        let after = state.pool.get(0).unwrap().pos;
        assert!((after - before - Vec2::new(100.0, 0.0)).length() < 1e-3);

        // 100 units per tick clears the 800-unit half-width in under 10 ticks
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.reclaimed > 0);
        let bounds = state.bounds();
        assert!(state.pool.slots().iter().all(|p| bounds.contains(p.pos)));
    }

    #[test]
    fn test_parked_inside_bounds_never_reclaimed() {
        let mut config = ring_config(20, 5.0);
        // Counter tops out at 60, so this never fires
        config.shoot_interval = 1000;
        let mut state = SimState::new(config).unwrap();

        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.reclaimed, 0);
        assert_eq!(state.pool.active_count(), 0);
    }

    #[test]
    fn test_parked_outside_bounds_resets_every_tick() {
        let mut config = ring_config(20, 5.0);
        config.shoot_interval = 1000;
        let mut state = SimState::new(config).unwrap();
        // Bypass validation to show why it exists
        state.config.bounds = crate::sim::Playfield::screen(100.0, 100.0);
        state.pool.set_parked(Vec2::new(-5.0, -5.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.reclaimed, 40);
    }

    #[test]
    fn test_orbit_fires_every_fourth_tick_from_center() {
        let mut state = SimState::from_preset(PatternPreset::Orbit).unwrap();
        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.shots_fired, 0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.shots_fired, 1);
        let shot = state.pool.get(0).unwrap();
        assert_eq!(shot.pos, state.origin);
        assert!((shot.vel.length() - state.config.speed).abs() < 1e-2);
        // Emitter keeps turning every tick whether or not it fired
        assert!(state.emitter.angle_deg().unwrap() > 30.0);
    }

    #[test]
    fn test_trigger_gates_frame_counter() {
        let mut state = SimState::from_preset(PatternPreset::Aimed).unwrap();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.frame_counter, 0);
        assert_eq!(state.shots_fired, 0);

        let firing = TickInput {
            fire: true,
            aim: Some(Vec2::new(400.0, 0.0)),
            ..Default::default()
        };
        for _ in 0..4 {
            tick(&mut state, &firing, SIM_DT);
        }
        assert_eq!(state.shots_fired, 1);
        let shot = state.pool.iter_active().next().unwrap().1;
        // Straight up from the center toward the cursor
        assert!(shot.vel.x.abs() < 1e-3);
        assert!(shot.vel.y < 0.0);
    }

    #[test]
    fn test_aim_on_origin_skips_shot() {
        let mut state = SimState::from_preset(PatternPreset::Aimed).unwrap();
        let firing = TickInput {
            fire: true,
            aim: Some(state.origin),
            ..Default::default()
        };
        for _ in 0..4 {
            tick(&mut state, &firing, SIM_DT);
        }
        assert_eq!(state.shots_fired, 0);
        assert_eq!(state.shots_skipped, 1);
        assert!(state.pool.slots().iter().all(|p| p.pos.is_finite()));
    }

    #[test]
    fn test_forward_shooter_moves_parked_slots() {
        let mut state = SimState::from_preset(PatternPreset::Forward).unwrap();
        let start = state.origin;
        let up = TickInput {
            move_up: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &up, SIM_DT);

        // Vertical only: 600 units/s for one tick
        assert_eq!(state.origin.x, start.x);
        assert!((state.origin.y - (start.y - 10.0)).abs() < 1e-3);
        assert!(state.pool.slots().iter().all(|p| p.pos == state.origin));
        assert_eq!(state.emitter.current_targets(), &[state.origin + Vec2::X]);
    }

    #[test]
    fn test_forward_shots_fly_right() {
        let mut state = SimState::from_preset(PatternPreset::Forward).unwrap();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..8 {
            tick(&mut state, &fire, SIM_DT);
        }
        assert_eq!(state.shots_fired, 2);
        state.pool.for_each_active(|_, p| {
            assert!((p.vel - Vec2::new(1200.0, 0.0)).length() < 1e-2);
        });
    }

    #[test]
    fn test_live_tuning_only_when_enabled() {
        let mut state = SimState::from_preset(PatternPreset::Orbit).unwrap();
        let tune = TickInput {
            interval_up: true,
            step_reset: true,
            ..Default::default()
        };
        tick(&mut state, &tune, SIM_DT);
        assert_eq!(state.shoot_interval, 5);
        if let Emitter::Orbit(orbit) = &state.emitter {
            // Reset to the floor, then one accelerated step
            assert!((orbit.step_deg - (1.0 + 0.025)).abs() < 1e-5);
        } else {
            panic!("orbit preset should build an orbiter");
        }

        let slow = TickInput {
            interval_down: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &slow, SIM_DT);
        }
        assert_eq!(state.shoot_interval, 1);

        let mut ring = SimState::from_preset(PatternPreset::Ring).unwrap();
        tick(&mut ring, &tune, SIM_DT);
        assert_eq!(ring.shoot_interval, 1);
    }

    #[test]
    fn test_move_dir() {
        let input = TickInput {
            move_up: true,
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        assert_eq!(input.move_dir(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_determinism() {
        // Two states with the same config must stay identical
        let mut state1 = SimState::from_preset(PatternPreset::Aimed).unwrap();
        let mut state2 = SimState::from_preset(PatternPreset::Aimed).unwrap();

        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                aim: Some(Vec2::new(10.0, 20.0)),
                ..Default::default()
            },
            TickInput {
                fire: true,
                move_down: true,
                aim: Some(Vec2::new(700.0, 400.0)),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..30 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.shots_fired, state2.shots_fired);
        assert_eq!(state1.pool.slots(), state2.pool.slots());
        assert_eq!(state1.emitter, state2.emitter);
    }
}
