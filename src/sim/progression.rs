//! Score-driven progression
//!
//! Tracks which phase of the active profile is live, which milestones have
//! been celebrated, and the clean-streak / clutch statistics.

use serde::Serialize;

use super::arc::MovementArc;
use super::state::GameEvent;
use crate::tuning::{DifficultyProfile, GameConfig, PhaseConfig};

/// Read-only projection of the live progression state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionState {
    pub phase_name: &'static str,
    pub phase_index: usize,
    pub arc: MovementArc,
    pub effective_gap: f32,
    pub effective_speed: f32,
    pub effective_spawn_delay: f32,
    pub clean_streak: u32,
    pub clutch_count: u32,
    pub longest_clean_streak: u32,
}

/// Phase state machine over a profile's score ladder
#[derive(Debug, Clone)]
pub struct ProgressionManager<'a> {
    profile: &'a DifficultyProfile,
    base_gap: f32,
    base_speed: f32,
    base_spawn_delay: f32,
    phase_index: usize,
    /// Next milestone to emit
    milestone_index: usize,
    clean_streak: u32,
    clutch_count: u32,
    longest_clean_streak: u32,
}

impl<'a> ProgressionManager<'a> {
    pub fn new(profile: &'a DifficultyProfile, config: &GameConfig) -> Self {
        Self {
            profile,
            base_gap: config.base_gap,
            base_speed: config.pipe_speed,
            base_spawn_delay: config.pipe_spawn,
            phase_index: 0,
            milestone_index: 0,
            clean_streak: 0,
            clutch_count: 0,
            longest_clean_streak: 0,
        }
    }

    pub fn profile(&self) -> &'a DifficultyProfile {
        self.profile
    }

    /// Push a score update; returns the events it triggered
    ///
    /// At most one `PhaseChange` (for the phase finally entered), followed by
    /// every newly crossed milestone in ascending order.
    pub fn on_score(&mut self, score: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        let index = self.profile.phase_index_for(score);
        if index != self.phase_index {
            self.phase_index = index;
            let name = self.current_phase().name;
            log::info!("Phase {} ({}) at score {}", index, name, score);
            events.push(GameEvent::PhaseChange { index, name });
        }

        while let Some(milestone) = self.profile.milestones.get(self.milestone_index) {
            if milestone.score > score {
                break;
            }
            log::info!("Milestone {}: {}", milestone.score, milestone.label);
            events.push(GameEvent::Milestone {
                score: milestone.score,
                label: milestone.label,
                tier: milestone.tier,
            });
            self.milestone_index += 1;
        }

        events
    }

    pub fn current_phase(&self) -> &'a PhaseConfig {
        &self.profile.phases[self.phase_index]
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Score of the next milestone not yet reached
    pub fn next_milestone(&self) -> Option<u32> {
        self.profile
            .milestones
            .get(self.milestone_index)
            .map(|m| m.score)
    }

    pub fn effective_gap(&self) -> f32 {
        (self.base_gap * self.current_phase().gap_multiplier).max(self.profile.gap_floor)
    }

    pub fn effective_speed(&self) -> f32 {
        (self.base_speed * self.current_phase().speed_multiplier).min(self.profile.speed_ceiling)
    }

    pub fn effective_spawn_delay(&self) -> f32 {
        self.base_spawn_delay * self.current_phase().spawn_multiplier
    }

    pub fn record_clean_pass(&mut self) {
        self.clean_streak += 1;
        self.longest_clean_streak = self.longest_clean_streak.max(self.clean_streak);
    }

    pub fn record_near_miss(&mut self) {
        self.finish_streak();
        self.clean_streak = 0;
        self.clutch_count += 1;
    }

    /// Classify a pass by the bird's clearance to the nearest pipe edge (px)
    ///
    /// Returns true when it counted as a near miss.
    pub fn record_pass(&mut self, clearance: f32) -> bool {
        if clearance < self.profile.near_miss_margin {
            self.record_near_miss();
            true
        } else {
            self.record_clean_pass();
            false
        }
    }

    /// Fold the live streak into the longest streak; returns the longest
    pub fn finish_run(&mut self) -> u32 {
        self.finish_streak();
        self.longest_clean_streak
    }

    fn finish_streak(&mut self) {
        self.longest_clean_streak = self.longest_clean_streak.max(self.clean_streak);
    }

    pub fn clean_streak(&self) -> u32 {
        self.clean_streak
    }

    pub fn clutch_count(&self) -> u32 {
        self.clutch_count
    }

    pub fn longest_clean_streak(&self) -> u32 {
        self.longest_clean_streak
    }

    /// Snapshot for debug/UI display; the arc is owned by the director
    pub fn snapshot(&self, arc: MovementArc) -> ProgressionState {
        ProgressionState {
            phase_name: self.current_phase().name,
            phase_index: self.phase_index,
            arc,
            effective_gap: self.effective_gap(),
            effective_speed: self.effective_speed(),
            effective_spawn_delay: self.effective_spawn_delay(),
            clean_streak: self.clean_streak,
            clutch_count: self.clutch_count,
            longest_clean_streak: self.longest_clean_streak,
        }
    }

    /// Back to phase 0 with no milestones or streaks (run start)
    pub fn reset(&mut self) {
        self.phase_index = 0;
        self.milestone_index = 0;
        self.clean_streak = 0;
        self.clutch_count = 0;
        self.longest_clean_streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CelebrationTier;
    use crate::tuning::Difficulty;

    fn normal() -> ProgressionManager<'static> {
        ProgressionManager::new(Difficulty::Normal.profile(), &GameConfig::default())
    }

    fn phase_changes(events: &[GameEvent]) -> Vec<(usize, &'static str)> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::PhaseChange { index, name } => Some((*index, *name)),
                _ => None,
            })
            .collect()
    }

    fn milestone_scores(events: &[GameEvent]) -> Vec<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Milestone { score, .. } => Some(*score),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_jump_fires_single_phase_change() {
        let mut progression = normal();
        let events = progression.on_score(36);
        assert_eq!(progression.phase_index(), 3);
        assert_eq!(phase_changes(&events), vec![(3, "Intensification")]);
    }

    #[test]
    fn test_jump_emits_every_milestone_once_in_order() {
        let mut progression = normal();
        let events = progression.on_score(150);
        assert_eq!(phase_changes(&events), vec![(4, "Mastery")]);
        assert_eq!(milestone_scores(&events), vec![10, 25, 50, 100]);
        // Phase change comes first
        assert!(matches!(events[0], GameEvent::PhaseChange { .. }));

        let again = progression.on_score(150);
        assert!(again.is_empty());
        let later = progression.on_score(201);
        assert_eq!(milestone_scores(&later), vec![200]);
    }

    #[test]
    fn test_next_milestone_walks_the_table() {
        let mut progression = normal();
        assert_eq!(progression.next_milestone(), Some(10));
        progression.on_score(30);
        assert_eq!(progression.next_milestone(), Some(50));
        progression.on_score(500);
        assert_eq!(progression.next_milestone(), None);
    }

    #[test]
    fn test_same_phase_emits_nothing() {
        let mut progression = normal();
        assert!(progression.on_score(1).is_empty());
        assert!(progression.on_score(5).is_empty());
        assert_eq!(progression.phase_index(), 0);
    }

    #[test]
    fn test_milestone_carries_tier() {
        let mut progression = normal();
        let events = progression.on_score(100);
        assert!(events.contains(&GameEvent::Milestone {
            score: 100,
            label: "Centurion",
            tier: CelebrationTier::Epic,
        }));
    }

    #[test]
    fn test_streaks() {
        let mut progression = normal();
        progression.record_clean_pass();
        progression.record_clean_pass();
        progression.record_clean_pass();
        progression.record_near_miss();
        assert_eq!(progression.clean_streak(), 0);
        assert_eq!(progression.clutch_count(), 1);
        assert_eq!(progression.longest_clean_streak(), 3);
    }

    #[test]
    fn test_record_pass_uses_near_miss_margin() {
        let mut progression = normal();
        let margin = progression.profile().near_miss_margin;
        assert!(!progression.record_pass(margin + 1.0));
        assert!(progression.record_pass(margin - 1.0));
        assert_eq!(progression.clutch_count(), 1);
        assert_eq!(progression.longest_clean_streak(), 1);
    }

    #[test]
    fn test_finish_run_folds_live_streak() {
        let mut progression = normal();
        for _ in 0..5 {
            progression.record_clean_pass();
        }
        assert_eq!(progression.finish_run(), 5);
    }

    #[test]
    fn test_effective_values_follow_phase() {
        let config = GameConfig::default();
        let mut progression = normal();
        assert_eq!(progression.effective_gap(), config.base_gap);
        assert_eq!(progression.effective_spawn_delay(), config.pipe_spawn);

        progression.on_score(61);
        let profile = progression.profile();
        let phase = progression.current_phase();
        assert_eq!(
            progression.effective_gap(),
            (config.base_gap * phase.gap_multiplier).max(profile.gap_floor)
        );
        assert_eq!(
            progression.effective_speed(),
            (config.pipe_speed * phase.speed_multiplier).min(profile.speed_ceiling)
        );
        assert_eq!(
            progression.effective_spawn_delay(),
            config.pipe_spawn * phase.spawn_multiplier
        );
    }

    #[test]
    fn test_gap_floor_and_speed_ceiling_clamp() {
        let config = GameConfig {
            base_gap: 50.0,
            pipe_speed: 100.0,
            ..GameConfig::default()
        };
        let profile = Difficulty::Normal.profile();
        let progression = ProgressionManager::new(profile, &config);
        assert_eq!(progression.effective_gap(), profile.gap_floor);
        assert_eq!(progression.effective_speed(), profile.speed_ceiling);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut progression = normal();
        progression.on_score(80);
        progression.record_clean_pass();
        progression.record_near_miss();
        progression.reset();

        let snapshot = progression.snapshot(MovementArc::Build);
        assert_eq!(snapshot.phase_index, 0);
        assert_eq!(snapshot.phase_name, "Awakening");
        assert_eq!(snapshot.clean_streak, 0);
        assert_eq!(snapshot.clutch_count, 0);
        assert_eq!(snapshot.longest_clean_streak, 0);
        // Milestones fire again after a reset
        assert_eq!(milestone_scores(&progression.on_score(10)), vec![10]);
    }
}
