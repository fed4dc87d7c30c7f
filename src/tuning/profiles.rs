//! Difficulty profiles: the four complete tuning tables
//!
//! Each profile is a ladder of phases keyed by score, plus the hard clamps,
//! variation knobs and milestone list that give a difficulty its personality.

use std::sync::LazyLock;

use serde::Serialize;

use super::Difficulty;
use crate::sim::patterns::PatternKind::*;
use crate::sim::patterns::{PatternKind, PatternWeights};
use crate::sim::state::CelebrationTier;
use crate::sim::state::CelebrationTier::{Epic, Major, Minor};

/// One rung of the difficulty ladder
#[derive(Debug, Clone, Serialize)]
pub struct PhaseConfig {
    pub name: &'static str,
    /// Score at which this phase becomes active
    pub score_threshold: u32,
    pub gap_multiplier: f32,
    pub speed_multiplier: f32,
    pub spawn_multiplier: f32,
    pub pattern_weights: PatternWeights,
    /// Phrases between forced breathers
    pub breather_frequency: u32,
    /// Phrase intensity range `[min, max]` fed to generators
    pub intensity_range: (f32, f32),
}

/// Score milestone celebrated by the game-feel layer
#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub score: u32,
    pub label: &'static str,
    pub tier: CelebrationTier,
}

/// Complete personality for one difficulty key
#[derive(Debug, Clone, Serialize)]
pub struct DifficultyProfile {
    pub key: Difficulty,
    /// Ascending thresholds, first threshold is 0
    pub phases: Vec<PhaseConfig>,
    /// 0 = frame-perfect play required, 1 = reachable band collapses to its midpoint
    pub grace_factor: f32,
    /// Gap never shrinks below this (px)
    pub gap_floor: f32,
    /// Scroll speed never exceeds this (px per tick)
    pub speed_ceiling: f32,
    /// Ascending by score
    pub milestones: Vec<Milestone>,
    pub gap_variation: bool,
    /// Max gap jitter either way (px)
    pub gap_variation_amount: f32,
    pub timing_variation: bool,
    /// Max delay jitter either way (ms)
    pub timing_variation_amount: f32,
    /// Clearance (px) under which a pass counts as a near miss
    pub near_miss_margin: f32,
}

impl DifficultyProfile {
    /// Index of the highest phase whose threshold is `<= score`
    pub fn phase_index_for(&self, score: u32) -> usize {
        self.phases
            .partition_point(|phase| phase.score_threshold <= score)
            .saturating_sub(1)
    }
}

static PROFILES: LazyLock<[DifficultyProfile; 4]> =
    LazyLock::new(|| [easy(), normal(), hard(), souls()]);

/// Static profile for a difficulty
pub fn profile(difficulty: Difficulty) -> &'static DifficultyProfile {
    let index = match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Normal => 1,
        Difficulty::Hard => 2,
        Difficulty::Souls => 3,
    };
    &PROFILES[index]
}

#[allow(clippy::too_many_arguments)]
fn phase(
    name: &'static str,
    score_threshold: u32,
    gap_multiplier: f32,
    speed_multiplier: f32,
    spawn_multiplier: f32,
    weights: &[(PatternKind, f32)],
    breather_frequency: u32,
    intensity_range: (f32, f32),
) -> PhaseConfig {
    PhaseConfig {
        name,
        score_threshold,
        gap_multiplier,
        speed_multiplier,
        spawn_multiplier,
        pattern_weights: PatternWeights::from_pairs(weights),
        breather_frequency,
        intensity_range,
    }
}

fn milestone(score: u32, label: &'static str, tier: CelebrationTier) -> Milestone {
    Milestone { score, label, tier }
}

fn easy() -> DifficultyProfile {
    DifficultyProfile {
        key: Difficulty::Easy,
        phases: vec![
            phase(
                "Awakening",
                0,
                1.0,
                1.0,
                1.0,
                &[(Scatter, 5.0), (SineWave, 2.0), (StairUp, 1.0), (StairDown, 1.0)],
                2,
                (0.0, 0.2),
            ),
            phase(
                "Rhythm",
                10,
                0.97,
                1.03,
                0.98,
                &[
                    (Scatter, 4.0),
                    (SineWave, 3.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 1.0),
                ],
                3,
                (0.1, 0.35),
            ),
            phase(
                "Escalation",
                25,
                0.94,
                1.07,
                0.96,
                &[
                    (Scatter, 3.0),
                    (SineWave, 3.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 2.0),
                    (Tunnel, 1.0),
                ],
                3,
                (0.2, 0.45),
            ),
            phase(
                "Intensification",
                50,
                0.9,
                1.12,
                0.93,
                &[
                    (Scatter, 2.0),
                    (SineWave, 3.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 2.0),
                    (Tunnel, 2.0),
                    (Squeeze, 1.0),
                ],
                4,
                (0.3, 0.6),
            ),
            phase(
                "Mastery",
                80,
                0.87,
                1.16,
                0.9,
                &[
                    (Scatter, 2.0),
                    (SineWave, 2.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 2.0),
                    (Tunnel, 2.0),
                    (Squeeze, 2.0),
                    (Rapids, 1.0),
                ],
                4,
                (0.4, 0.7),
            ),
        ],
        grace_factor: 0.35,
        gap_floor: 150.0,
        speed_ceiling: 3.2,
        milestones: vec![
            milestone(10, "First Flight", Minor),
            milestone(25, "Quarter Century", Minor),
            milestone(50, "Half Century", Major),
            milestone(100, "Centurion", Epic),
        ],
        gap_variation: false,
        gap_variation_amount: 0.0,
        timing_variation: false,
        timing_variation_amount: 0.0,
        near_miss_margin: 6.0,
    }
}

fn normal() -> DifficultyProfile {
    DifficultyProfile {
        key: Difficulty::Normal,
        phases: vec![
            phase(
                "Awakening",
                0,
                1.0,
                1.0,
                1.0,
                &[(Scatter, 4.0), (SineWave, 2.0), (StairUp, 1.0), (StairDown, 1.0)],
                3,
                (0.0, 0.3),
            ),
            phase(
                "Rhythm",
                6,
                0.95,
                1.05,
                0.97,
                &[
                    (Scatter, 3.0),
                    (SineWave, 3.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 1.0),
                    (Tunnel, 1.0),
                ],
                3,
                (0.2, 0.45),
            ),
            phase(
                "Escalation",
                16,
                0.9,
                1.12,
                0.93,
                &[
                    (Scatter, 2.0),
                    (SineWave, 3.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 2.0),
                    (Tunnel, 2.0),
                    (Squeeze, 1.0),
                    (Rapids, 1.0),
                ],
                4,
                (0.35, 0.6),
            ),
            phase(
                "Intensification",
                36,
                0.85,
                1.2,
                0.9,
                &[
                    (Scatter, 1.0),
                    (SineWave, 2.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 3.0),
                    (Tunnel, 2.0),
                    (Squeeze, 2.0),
                    (Rapids, 2.0),
                    (Drift, 1.0),
                ],
                4,
                (0.5, 0.8),
            ),
            phase(
                "Mastery",
                61,
                0.8,
                1.28,
                0.86,
                &[
                    (Scatter, 1.0),
                    (SineWave, 2.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 3.0),
                    (Tunnel, 3.0),
                    (Squeeze, 3.0),
                    (Rapids, 3.0),
                    (Drift, 1.0),
                ],
                5,
                (0.65, 1.0),
            ),
        ],
        grace_factor: 0.2,
        gap_floor: 120.0,
        speed_ceiling: 4.0,
        milestones: vec![
            milestone(10, "Double Digits", Minor),
            milestone(25, "Quarter Century", Minor),
            milestone(50, "Half Century", Major),
            milestone(100, "Centurion", Epic),
            milestone(200, "Unstoppable", Epic),
        ],
        gap_variation: false,
        gap_variation_amount: 0.0,
        timing_variation: false,
        timing_variation_amount: 0.0,
        near_miss_margin: 8.0,
    }
}

fn hard() -> DifficultyProfile {
    DifficultyProfile {
        key: Difficulty::Hard,
        phases: vec![
            phase(
                "Awakening",
                0,
                1.0,
                1.0,
                1.0,
                &[
                    (Scatter, 3.0),
                    (SineWave, 2.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 1.0),
                ],
                3,
                (0.2, 0.45),
            ),
            phase(
                "Rhythm",
                4,
                0.94,
                1.08,
                0.95,
                &[
                    (Scatter, 2.0),
                    (SineWave, 3.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 2.0),
                    (Tunnel, 2.0),
                    (Rapids, 1.0),
                ],
                4,
                (0.3, 0.6),
            ),
            phase(
                "Escalation",
                12,
                0.88,
                1.16,
                0.9,
                &[
                    (Scatter, 1.0),
                    (SineWave, 2.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 3.0),
                    (Tunnel, 2.0),
                    (Squeeze, 2.0),
                    (Rapids, 2.0),
                    (Drift, 1.0),
                ],
                4,
                (0.45, 0.75),
            ),
            phase(
                "Intensification",
                28,
                0.82,
                1.24,
                0.86,
                &[
                    (Scatter, 1.0),
                    (SineWave, 2.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 3.0),
                    (Tunnel, 3.0),
                    (Squeeze, 3.0),
                    (Rapids, 3.0),
                    (Drift, 1.0),
                ],
                5,
                (0.6, 0.9),
            ),
            phase(
                "Mastery",
                50,
                0.78,
                1.32,
                0.82,
                &[
                    (SineWave, 1.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 3.0),
                    (Tunnel, 3.0),
                    (Squeeze, 4.0),
                    (Rapids, 4.0),
                    (Drift, 1.0),
                ],
                6,
                (0.75, 1.0),
            ),
        ],
        grace_factor: 0.1,
        gap_floor: 105.0,
        speed_ceiling: 4.6,
        milestones: vec![
            milestone(10, "Double Digits", Minor),
            milestone(25, "Quarter Century", Minor),
            milestone(50, "Half Century", Major),
            milestone(75, "Iron Wings", Major),
            milestone(100, "Centurion", Epic),
            milestone(150, "Untouchable", Epic),
        ],
        gap_variation: true,
        gap_variation_amount: 8.0,
        timing_variation: false,
        timing_variation_amount: 0.0,
        near_miss_margin: 10.0,
    }
}

fn souls() -> DifficultyProfile {
    DifficultyProfile {
        key: Difficulty::Souls,
        phases: vec![
            phase(
                "Undead",
                0,
                1.0,
                1.0,
                1.0,
                &[
                    (Scatter, 2.0),
                    (SineWave, 2.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 2.0),
                    (Tunnel, 1.0),
                ],
                4,
                (0.35, 0.6),
            ),
            phase(
                "Hollowing",
                3,
                0.93,
                1.1,
                0.93,
                &[
                    (Scatter, 1.0),
                    (SineWave, 2.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 3.0),
                    (Tunnel, 2.0),
                    (Squeeze, 2.0),
                    (Rapids, 1.0),
                ],
                4,
                (0.45, 0.7),
            ),
            phase(
                "Escalation",
                10,
                0.86,
                1.18,
                0.88,
                &[
                    (Scatter, 1.0),
                    (SineWave, 1.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 3.0),
                    (Tunnel, 3.0),
                    (Squeeze, 3.0),
                    (Rapids, 3.0),
                    (Drift, 1.0),
                ],
                5,
                (0.55, 0.85),
            ),
            phase(
                "Intensification",
                22,
                0.8,
                1.26,
                0.84,
                &[
                    (SineWave, 1.0),
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 4.0),
                    (Tunnel, 3.0),
                    (Squeeze, 4.0),
                    (Rapids, 4.0),
                    (Drift, 1.0),
                ],
                6,
                (0.7, 0.95),
            ),
            phase(
                "Ascension",
                40,
                0.76,
                1.34,
                0.8,
                &[
                    (StairUp, 2.0),
                    (StairDown, 2.0),
                    (Zigzag, 4.0),
                    (Tunnel, 4.0),
                    (Squeeze, 5.0),
                    (Rapids, 5.0),
                    (Drift, 1.0),
                ],
                7,
                (0.8, 1.0),
            ),
            phase(
                "Kindled",
                70,
                0.72,
                1.4,
                0.76,
                &[
                    (StairUp, 1.0),
                    (StairDown, 1.0),
                    (Zigzag, 5.0),
                    (Tunnel, 4.0),
                    (Squeeze, 5.0),
                    (Rapids, 6.0),
                    (Drift, 1.0),
                ],
                8,
                (0.9, 1.0),
            ),
        ],
        grace_factor: 0.0,
        gap_floor: 95.0,
        speed_ceiling: 5.2,
        milestones: vec![
            milestone(5, "Still Standing", Minor),
            milestone(10, "Double Digits", Minor),
            milestone(25, "Quarter Century", Major),
            milestone(50, "Half Century", Major),
            milestone(100, "Lord of Cinder", Epic),
        ],
        gap_variation: true,
        gap_variation_amount: 14.0,
        timing_variation: true,
        timing_variation_amount: 120.0,
        near_miss_margin: 12.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_thresholds_ascend_from_zero() {
        for difficulty in Difficulty::ALL {
            let profile = difficulty.profile();
            assert_eq!(profile.key, difficulty);
            assert_eq!(profile.phases[0].score_threshold, 0);
            assert!(
                profile
                    .phases
                    .windows(2)
                    .all(|w| w[0].score_threshold < w[1].score_threshold)
            );
        }
    }

    #[test]
    fn test_milestones_ascend() {
        for difficulty in Difficulty::ALL {
            let profile = difficulty.profile();
            assert!(profile.milestones.windows(2).all(|w| w[0].score < w[1].score));
        }
    }

    #[test]
    fn test_intensity_ranges_are_valid() {
        for difficulty in Difficulty::ALL {
            for phase in &difficulty.profile().phases {
                let (min, max) = phase.intensity_range;
                assert!((0.0..=1.0).contains(&min), "{} {}", difficulty.as_str(), phase.name);
                assert!((0.0..=1.0).contains(&max));
                assert!(min <= max);
                assert!(phase.breather_frequency > 0);
            }
        }
    }

    #[test]
    fn test_grace_factor_tightens_with_difficulty() {
        let graces: Vec<f32> = Difficulty::ALL
            .iter()
            .map(|d| d.profile().grace_factor)
            .collect();
        assert!(graces.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_normal_phase_lookup() {
        let profile = Difficulty::Normal.profile();
        assert_eq!(profile.phase_index_for(0), 0);
        assert_eq!(profile.phase_index_for(5), 0);
        assert_eq!(profile.phase_index_for(6), 1);
        assert_eq!(profile.phase_index_for(36), 3);
        assert_eq!(profile.phases[3].name, "Intensification");
        assert_eq!(profile.phase_index_for(10_000), 4);
    }
}
