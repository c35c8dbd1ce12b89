//! Deterministic simulation module
//!
//! All pattern logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod emitter;
pub mod playfield;
pub mod pool;
pub mod state;
pub mod tick;
pub mod velocity;

pub use autopilot::Autopilot;
pub use emitter::{AimPoint, Emitter, Orbiter, TargetRing};
pub use playfield::{Edges, Playfield};
pub use pool::{Projectile, ProjectilePool};
pub use state::{Shooter, SimState};
pub use tick::{TickInput, tick};
pub use velocity::{compute_velocity, try_compute_velocity};
