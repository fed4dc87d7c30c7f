//! Playfield geometry, pacing and physics presets per difficulty

use serde::{Deserialize, Serialize};

use super::Difficulty;
use crate::consts::*;
use crate::sim::physics::Physics;

/// Everything the generator needs to know about the engine's world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Canvas width (px)
    pub width: f32,
    /// Canvas height (px)
    pub height: f32,
    /// Ground strip height at the bottom of the canvas (px)
    pub ground_height: f32,
    /// Pipe width (px)
    pub pipe_width: f32,
    /// Horizontal scroll speed (px per tick)
    pub pipe_speed: f32,
    /// Default delay between pipe spawns (ms)
    pub pipe_spawn: f32,
    /// Base vertical gap size before phase multipliers (px)
    pub base_gap: f32,
    /// Minimum distance between a gap edge and the ceiling/ground (px)
    pub margin: f32,
    /// Bird flight dynamics
    pub physics: Physics,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Normal)
    }
}

impl GameConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (pipe_speed, pipe_spawn, base_gap) = match difficulty {
            Difficulty::Easy => (2.2, 1700.0, 190.0),
            Difficulty::Normal => (2.6, 1500.0, 165.0),
            Difficulty::Hard => (3.0, 1350.0, 145.0),
            Difficulty::Souls => (3.4, 1200.0, 130.0),
        };

        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            ground_height: GROUND_HEIGHT,
            pipe_width: PIPE_WIDTH,
            pipe_speed,
            pipe_spawn,
            base_gap,
            margin: PIPE_MARGIN,
            physics: Physics::for_difficulty(difficulty),
        }
    }

    /// Vertical extent the bird can occupy (ceiling to ground top)
    #[inline]
    pub fn playable_height(&self) -> f32 {
        (self.height - self.ground_height).max(0.0)
    }

    /// Copy with the scroll speed and spawn delay replaced by phase-effective values
    pub fn with_pace(&self, pipe_speed: f32, pipe_spawn: f32) -> Self {
        Self {
            pipe_speed,
            pipe_spawn,
            ..*self
        }
    }
}

impl Physics {
    /// Gravity/flap/terminal-velocity triple for a difficulty (per-tick units)
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Physics::new(0.35, -6.5, 8.0),
            Difficulty::Normal => Physics::new(0.45, -7.5, 10.0),
            Difficulty::Hard => Physics::new(0.55, -8.2, 11.0),
            Difficulty::Souls => Physics::new(0.65, -8.8, 12.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_gap_fits_playfield() {
        for difficulty in Difficulty::ALL {
            let config = GameConfig::for_difficulty(difficulty);
            // Drift widens the gap by 15%; it still has to fit between the margins
            let widest = config.base_gap * 1.15;
            assert!(widest < config.playable_height() - 2.0 * config.margin);
        }
    }

    #[test]
    fn test_with_pace_keeps_geometry() {
        let config = GameConfig::default();
        let paced = config.with_pace(4.0, 900.0);
        assert_eq!(paced.pipe_speed, 4.0);
        assert_eq!(paced.pipe_spawn, 900.0);
        assert_eq!(paced.height, config.height);
        assert_eq!(paced.physics, config.physics);
    }
}
