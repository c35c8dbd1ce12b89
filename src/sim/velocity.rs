//! Target-directed launch velocity

use glam::Vec2;

/// Velocity of magnitude `speed` pointing from `origin` toward `target`
///
/// Similar triangles: the offset is scaled by `speed / distance`. Requires
/// `origin != target`; a zero distance yields a non-finite vector. Use
/// [`try_compute_velocity`] where that can happen at runtime.
#[inline]
pub fn compute_velocity(origin: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let delta = target - origin;
    let distance = delta.length();
    delta * (speed / distance)
}

/// Like [`compute_velocity`] but `None` when origin and target coincide
pub fn try_compute_velocity(origin: Vec2, target: Vec2, speed: f32) -> Option<Vec2> {
    let distance = (target - origin).length();
    if distance > 0.0 && distance.is_finite() {
        Some(compute_velocity(origin, target, speed))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_velocity_points_at_target() {
        let vel = compute_velocity(Vec2::new(400.0, 225.0), Vec2::new(400.0, 325.0), 25.0);
        assert!(vel.x.abs() < 1e-5);
        assert!((vel.y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_aim_is_non_finite() {
        let p = Vec2::new(3.0, 4.0);
        assert!(!compute_velocity(p, p, 5.0).is_finite());
        assert_eq!(try_compute_velocity(p, p, 5.0), None);
    }

    #[test]
    fn test_try_matches_plain_for_valid_aim() {
        let o = Vec2::new(1.0, 1.0);
        let t = Vec2::new(4.0, 5.0);
        assert_eq!(try_compute_velocity(o, t, 10.0), Some(compute_velocity(o, t, 10.0)));
        // 3-4-5 triangle
        assert!((compute_velocity(o, t, 10.0) - Vec2::new(6.0, 8.0)).length() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_magnitude_equals_speed(
            ox in -1000.0f32..1000.0,
            oy in -1000.0f32..1000.0,
            dx in -500.0f32..500.0,
            dy in -500.0f32..500.0,
            speed in 0.1f32..2000.0,
        ) {
            let delta = Vec2::new(dx, dy);
            prop_assume!(delta.length() > 1.0);
            let origin = Vec2::new(ox, oy);
            let vel = compute_velocity(origin, origin + delta, speed);

            prop_assert!((vel.length() - speed).abs() <= speed * 1e-3);
            // Parallel and same direction
            prop_assert!(vel.perp_dot(delta).abs() <= vel.length() * delta.length() * 1e-3);
            prop_assert!(vel.dot(delta) > 0.0);
        }
    }
}
