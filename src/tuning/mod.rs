//! Data-driven game balance
//!
//! Static tables only: nothing in here changes during a run.

pub mod config;
pub mod profiles;

pub use config::GameConfig;
pub use profiles::{DifficultyProfile, Milestone, PhaseConfig};

use serde::{Deserialize, Serialize};

/// User-facing difficulty setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Souls,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Souls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Souls => "Souls",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "souls" | "dark" => Some(Difficulty::Souls),
            _ => None,
        }
    }

    /// Static tuning table for this difficulty
    pub fn profile(&self) -> &'static DifficultyProfile {
        profiles::profile(*self)
    }

    /// Geometry and physics for this difficulty
    pub fn config(&self) -> GameConfig {
        GameConfig::for_difficulty(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str(" normal "), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("dark"), Some(Difficulty::Souls));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_difficulty_round_trips_through_name() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(difficulty.as_str()), Some(difficulty));
        }
    }
}
