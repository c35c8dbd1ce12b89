//! Axis-aligned playfield bounds
//!
//! Projectiles live in field coordinates. The ring pattern uses a field
//! centered on the origin, the screen-space patterns use `[0, W) x [0, H)`;
//! `to_screen` maps either onto pixel coordinates for the renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Whether the max edge of each axis counts as inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Edges {
    /// `[min, max]`: centered fields
    #[default]
    Inclusive,
    /// `[min, max)`: pixel grids, where `max` is one past the last column
    HalfOpen,
}

/// Rectangle from `min` to `max`, closed or half-open per `edges`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub min: Vec2,
    pub max: Vec2,
    #[serde(default)]
    pub edges: Edges,
}

impl Playfield {
    /// Inclusive field from `min` to `max`
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min,
            max,
            edges: Edges::Inclusive,
        }
    }

    pub fn with_edges(mut self, edges: Edges) -> Self {
        self.edges = edges;
        self
    }

    /// Field of `width` x `height` centered on the origin, both edges inside
    pub fn centered(width: f32, height: f32) -> Self {
        let half = Vec2::new(width, height) / 2.0;
        Self::new(-half, half)
    }

    /// Field of `width` x `height` with its top-left corner at the origin
    ///
    /// Half-open: a point at exactly `width` or `height` has left the screen.
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height)).with_edges(Edges::HalfOpen)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Check a point against each axis independently
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let low = p.cmpge(self.min).all();
        let high = match self.edges {
            Edges::Inclusive => p.cmple(self.max).all(),
            Edges::HalfOpen => p.cmplt(self.max).all(),
        };
        low && high
    }

    /// True if the min corner does not exceed the max corner on either axis
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Clamp a rectangle of `half_extent` centered at `center` so it stays inside
    pub fn clamp_box(&self, center: Vec2, half_extent: Vec2) -> Vec2 {
        let lo = self.min + half_extent;
        let hi = self.max - half_extent;
        // Boxes wider than the field pin to the middle instead of inverting the clamp
        Vec2::new(
            if lo.x <= hi.x { center.x.clamp(lo.x, hi.x) } else { self.center().x },
            if lo.y <= hi.y { center.y.clamp(lo.y, hi.y) } else { self.center().y },
        )
    }

    /// Map a field point to screen pixels with the field's min corner at (0, 0)
    #[inline]
    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        p - self.min
    }
}
