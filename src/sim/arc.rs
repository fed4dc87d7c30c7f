//! Narrative arc: the Build → Climax → Release pacing cycle
//!
//! The arc decides which patterns a phrase may use. Each arc lasts a
//! randomized number of phrases whose range depends on the difficulty.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::patterns::PatternKind;
use crate::tuning::Difficulty;

/// Movement of the narrative cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MovementArc {
    /// Calmer shapes while tension builds
    #[default]
    Build,
    /// Tense shapes only
    Climax,
    /// Forced relief (Scatter/Drift)
    Release,
}

const BUILD_PATTERNS: &[PatternKind] = &[
    PatternKind::Scatter,
    PatternKind::StairUp,
    PatternKind::StairDown,
    PatternKind::SineWave,
    PatternKind::Tunnel,
];

const CLIMAX_PATTERNS: &[PatternKind] = &[
    PatternKind::Zigzag,
    PatternKind::Squeeze,
    PatternKind::Rapids,
    PatternKind::Tunnel,
    PatternKind::StairUp,
    PatternKind::StairDown,
];

const RELEASE_PATTERNS: &[PatternKind] = &[PatternKind::Scatter, PatternKind::Drift];

impl MovementArc {
    /// Cyclic transition table
    pub fn next(self) -> Self {
        match self {
            MovementArc::Build => MovementArc::Climax,
            MovementArc::Climax => MovementArc::Release,
            MovementArc::Release => MovementArc::Build,
        }
    }

    /// Patterns a weighted pick may choose from during this arc
    pub fn allowed_patterns(self) -> &'static [PatternKind] {
        match self {
            MovementArc::Build => BUILD_PATTERNS,
            MovementArc::Climax => CLIMAX_PATTERNS,
            MovementArc::Release => RELEASE_PATTERNS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementArc::Build => "Build",
            MovementArc::Climax => "Climax",
            MovementArc::Release => "Release",
        }
    }
}

/// Inclusive phrase-count ranges for each arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcLengths {
    pub build: (u32, u32),
    pub climax: (u32, u32),
    pub release: (u32, u32),
}

impl ArcLengths {
    pub const NORMAL: ArcLengths = ArcLengths {
        build: (3, 4),
        climax: (1, 2),
        release: (1, 2),
    };

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => ArcLengths {
                build: (3, 5),
                climax: (1, 1),
                release: (2, 3),
            },
            Difficulty::Normal => Self::NORMAL,
            Difficulty::Hard => ArcLengths {
                build: (2, 3),
                climax: (2, 3),
                release: (1, 1),
            },
            Difficulty::Souls => ArcLengths {
                build: (1, 2),
                climax: (2, 4),
                release: (1, 1),
            },
        }
    }

    /// Ranges for a difficulty key; unknown keys get Normal's ranges
    pub fn for_key(key: &str) -> Self {
        Difficulty::from_str(key)
            .map(Self::for_difficulty)
            .unwrap_or(Self::NORMAL)
    }

    pub fn range(&self, arc: MovementArc) -> (u32, u32) {
        match arc {
            MovementArc::Build => self.build,
            MovementArc::Climax => self.climax,
            MovementArc::Release => self.release,
        }
    }

    /// Roll how many phrases `arc` lasts (always at least 1)
    pub fn roll(&self, arc: MovementArc, rng: &mut dyn RngCore) -> u32 {
        let (min, max) = self.range(arc);
        let min = min.max(1);
        rng.random_range(min..=max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_arc_cycles() {
        let mut arc = MovementArc::Build;
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(arc);
            arc = arc.next();
        }
        assert_eq!(
            seen,
            [
                MovementArc::Build,
                MovementArc::Climax,
                MovementArc::Release,
                MovementArc::Build,
                MovementArc::Climax,
                MovementArc::Release,
            ]
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_normal() {
        assert_eq!(ArcLengths::for_key("nightmare"), ArcLengths::NORMAL);
        assert_eq!(
            ArcLengths::for_key("souls"),
            ArcLengths::for_difficulty(Difficulty::Souls)
        );
    }

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(5);
        let lengths = ArcLengths::NORMAL;
        for _ in 0..200 {
            let build = lengths.roll(MovementArc::Build, &mut rng);
            assert!((3..=4).contains(&build));
            let climax = lengths.roll(MovementArc::Climax, &mut rng);
            assert!((1..=2).contains(&climax));
        }
    }

    #[test]
    fn test_climax_excludes_calm_patterns() {
        let climax = MovementArc::Climax.allowed_patterns();
        assert!(!climax.contains(&PatternKind::Scatter));
        assert!(!climax.contains(&PatternKind::Drift));
        assert!(!climax.contains(&PatternKind::SineWave));
        let build = MovementArc::Build.allowed_patterns();
        assert!(!build.contains(&PatternKind::Rapids));
        assert!(!build.contains(&PatternKind::Squeeze));
    }
}
