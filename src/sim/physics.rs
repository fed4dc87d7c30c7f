//! Bird flight dynamics
//!
//! One call to [`Physics::step`] is one fixed-timestep tick. The reachability
//! oracle replays this exact integrator, so any change here changes which
//! gaps are considered passable.

use serde::{Deserialize, Serialize};

/// Gravity/flap/terminal-velocity triple (px per tick units, +y is down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative = upward)
    pub flap_force: f32,
    /// Maximum downward velocity
    pub terminal_velocity: f32,
}

impl Physics {
    pub const fn new(gravity: f32, flap_force: f32, terminal_velocity: f32) -> Self {
        Self {
            gravity,
            flap_force,
            terminal_velocity,
        }
    }

    /// Advance one tick. A flap replaces the velocity before gravity applies.
    #[inline]
    pub fn step(&self, y: f32, vy: f32, flap: bool) -> (f32, f32) {
        let vy = if flap { self.flap_force } else { vy };
        let vy = (vy + self.gravity).min(self.terminal_velocity);
        (y + vy, vy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_fall_reaches_terminal_velocity() {
        let physics = Physics::new(0.5, -8.0, 3.0);
        let (mut y, mut vy) = (100.0, 0.0);
        for _ in 0..20 {
            (y, vy) = physics.step(y, vy, false);
        }
        assert_eq!(vy, 3.0);
        assert!(y > 100.0);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let physics = Physics::new(0.5, -8.0, 10.0);
        let (y, vy) = physics.step(100.0, 9.0, true);
        assert!((vy - (-7.5)).abs() < 0.0001);
        assert!((y - 92.5).abs() < 0.0001);
    }
}
