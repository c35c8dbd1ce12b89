//! Read-only render snapshot
//!
//! The simulation never draws. Once per tick a renderer captures a
//! `RenderFrame` from `&SimState` and uploads the instance slice as-is.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::config::PatternPreset;
use crate::sim::SimState;

/// One circle/quad instance in screen pixels
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub position: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl Instance {
    pub const fn new(pos: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self {
            position: [pos.x, pos.y],
            radius,
            _pad: 0.0,
            color,
        }
    }
}

/// Colors for pattern elements
pub mod colors {
    pub const PROJECTILE: [f32; 4] = [0.6, 0.2, 0.8, 1.0]; // Purple
    pub const PROJECTILE_DARK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const SHOT_YELLOW: [f32; 4] = [1.0, 0.85, 0.1, 1.0];
    pub const SHOT_GRAY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const TARGET: [f32; 4] = [1.0, 0.85, 0.1, 1.0];
    pub const EMITTER: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const SHOOTER: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND_DARK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND_LIGHT: [f32; 4] = [0.96, 0.96, 0.96, 1.0];
}

/// Projectile draw radius in pixels
pub const PROJECTILE_RADIUS: f32 = 5.0;
/// Target/emitter marker radius in pixels
pub const MARKER_RADIUS: f32 = 5.0;

/// Everything a renderer needs for one frame, in screen pixels
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub background: [f32; 4],
    /// Active projectiles, slot order
    pub projectiles: Vec<Instance>,
    /// Target points (ring points or orbiter; aim points are not drawn)
    pub targets: Vec<Instance>,
    /// Emitter origin marker, for patterns that show one
    pub emitter: Option<Instance>,
    /// Shooter rectangle as (top-left, size)
    pub shooter: Option<(Vec2, Vec2)>,
}

impl RenderFrame {
    /// Capture the current state for drawing
    pub fn capture(state: &SimState) -> Self {
        let mut frame = Self::default();
        frame.fill(state);
        frame
    }

    /// Refill an existing frame, reusing its buffers
    pub fn fill(&mut self, state: &SimState) {
        let bounds = state.bounds();
        let preset = state.config.preset;

        let (background, shot_color) = match preset {
            PatternPreset::Ring => (colors::BACKGROUND_DARK, colors::PROJECTILE),
            PatternPreset::Orbit => (colors::BACKGROUND_LIGHT, colors::PROJECTILE_DARK),
            PatternPreset::Aimed => (colors::BACKGROUND_LIGHT, colors::SHOT_YELLOW),
            PatternPreset::Forward => (colors::BACKGROUND_LIGHT, colors::SHOT_GRAY),
        };
        self.background = background;

        self.projectiles.clear();
        self.projectiles.reserve(state.pool.capacity());
        state.pool.for_each_active(|_, p| {
            self.projectiles
                .push(Instance::new(bounds.to_screen(p.pos), PROJECTILE_RADIUS, shot_color));
        });

        self.targets.clear();
        if matches!(preset, PatternPreset::Ring | PatternPreset::Orbit) {
            self.targets.extend(
                state
                    .emitter
                    .current_targets()
                    .iter()
                    .map(|t| Instance::new(bounds.to_screen(*t), MARKER_RADIUS, colors::TARGET)),
            );
        }

        self.emitter = (preset == PatternPreset::Orbit)
            .then(|| Instance::new(bounds.to_screen(state.origin), MARKER_RADIUS, colors::EMITTER));

        self.shooter = state
            .shooter
            .as_ref()
            .map(|s| (bounds.to_screen(s.corner()), s.half_size * 2.0));
    }

    /// Raw bytes of the projectile instances for a GPU upload
    pub fn projectile_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.projectiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_capture_ring_in_screen_space() {
        let mut state = SimState::from_preset(PatternPreset::Ring).unwrap();
        tick(&mut state, &TickInput::default(), SIM_DT);

        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.projectiles.len(), state.pool.active_count());
        assert_eq!(frame.targets.len(), 5);
        assert!(frame.emitter.is_none());
        assert!(frame.shooter.is_none());
        // Field center maps to the middle of the 1600x900 screen
        let first = frame.targets[0].position;
        assert!((first[0] - 801.0).abs() < 1e-3);
        assert!((first[1] - 450.0).abs() < 1e-3);
    }

    #[test]
    fn test_capture_shooter_hides_aim_point() {
        let state = SimState::from_preset(PatternPreset::Aimed).unwrap();
        let frame = RenderFrame::capture(&state);
        assert!(frame.targets.is_empty());
        assert!(frame.projectiles.is_empty());
        let (corner, size) = frame.shooter.unwrap();
        assert_eq!(corner, Vec2::new(380.0, 205.0));
        assert_eq!(size, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_instance_bytes() {
        let mut state = SimState::from_preset(PatternPreset::Orbit).unwrap();
        for _ in 0..8 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.projectiles.len(), 2);
        assert_eq!(frame.projectile_bytes().len(), 2 * std::mem::size_of::<Instance>());
        assert_eq!(std::mem::size_of::<Instance>(), 32);
        assert!(frame.emitter.is_some());
    }
}
