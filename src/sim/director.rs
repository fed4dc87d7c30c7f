//! Pipe director
//!
//! Pulls phrases out of the pattern generators, paces them with the
//! Build/Climax/Release arc, jitters them per the profile, and runs every
//! pipe through the reachability oracle before queueing it for the engine.
//!
//! Data flow per phrase:
//! 1. pick a pattern (forced relief when in Release or a breather is overdue)
//! 2. roll intensity and pipe count
//! 3. generate raw intents from the last queued center
//! 4. per pipe: gap jitter, timing jitter, winnability clamp against the previous pipe
//! 5. queue the whole phrase and advance the arc

use std::collections::VecDeque;

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use super::arc::{ArcLengths, MovementArc};
use super::patterns::{PatternKind, PatternParams, PatternWeights, clamp_to_bounds};
use super::progression::{ProgressionManager, ProgressionState};
use super::reachability::validate_and_clamp;
use super::state::{GameEvent, PipeIntent};
use crate::consts::*;
use crate::lerp;
use crate::tuning::{DifficultyProfile, GameConfig};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectorError {
    #[error("pattern {pattern:?} produced no pipes")]
    EmptyPhrase { pattern: PatternKind },
}

/// Owns the intent queue and narrative pacing for one run
#[derive(Debug, Clone)]
pub struct PipeDirector<'a> {
    config: GameConfig,
    profile: &'a DifficultyProfile,
    progression: ProgressionManager<'a>,
    arc_lengths: ArcLengths,
    rng: Pcg32,
    queue: VecDeque<PipeIntent>,
    last_center: f32,
    last_pattern: Option<PatternKind>,
    arc: MovementArc,
    arc_phrase_idx: u32,
    arc_target: u32,
    phrases_since_breather: u32,
    events: Vec<GameEvent>,
}

impl<'a> PipeDirector<'a> {
    pub fn new(profile: &'a DifficultyProfile, config: GameConfig, seed: u64) -> Self {
        let mut director = Self {
            config,
            profile,
            progression: ProgressionManager::new(profile, &config),
            arc_lengths: ArcLengths::for_difficulty(profile.key),
            rng: Pcg32::seed_from_u64(seed),
            queue: VecDeque::with_capacity(PHRASE_MAX_PIPES),
            last_center: config.height / 2.0,
            last_pattern: None,
            arc: MovementArc::Build,
            arc_phrase_idx: 0,
            arc_target: 1,
            phrases_since_breather: 0,
            events: Vec::new(),
        };
        director.reset();
        director
    }

    /// Pull the next obstacle (one per spawn event)
    pub fn next(&mut self) -> Result<PipeIntent, DirectorError> {
        if let Some(intent) = self.queue.pop_front() {
            return Ok(intent);
        }
        let pattern = self.enqueue_phrase();
        self.queue
            .pop_front()
            .ok_or(DirectorError::EmptyPhrase { pattern })
    }

    /// Generate, vary, validate and queue one whole phrase; returns its pattern
    pub fn enqueue_phrase(&mut self) -> PatternKind {
        let phase = self.progression.current_phase();

        let breather_due = self.phrases_since_breather >= phase.breather_frequency;
        let breather = self.arc == MovementArc::Release || breather_due;
        let pattern = if breather {
            self.phrases_since_breather = 0;
            if self.rng.random_bool(0.5) {
                PatternKind::Scatter
            } else {
                PatternKind::Drift
            }
        } else {
            self.pick_pattern(&phase.pattern_weights)
        };

        let (min_intensity, max_intensity) = phase.intensity_range;
        let intensity = lerp(min_intensity, max_intensity, self.rng.random::<f32>());
        let count = self.rng.random_range(PHRASE_MIN_PIPES..=PHRASE_MAX_PIPES);

        let params = PatternParams {
            count,
            start_center: self.last_center,
            base_gap: self.progression.effective_gap(),
            canvas_h: self.config.height,
            ground_h: self.config.ground_height,
            margin: self.config.margin,
            base_delay: self.progression.effective_spawn_delay(),
            intensity,
        };
        let raw = pattern.generate(&params, &mut self.rng);

        let paced = self.config.with_pace(
            self.progression.effective_speed(),
            self.progression.effective_spawn_delay(),
        );
        let mut prev_center = self.last_center;
        for intent in raw {
            let varied = self.apply_variation(intent);
            let validated = validate_and_clamp(&varied, prev_center, &paced, self.profile.grace_factor);
            let center = clamp_to_bounds(
                validated.gap_center,
                validated.gap_size,
                self.config.height,
                self.config.ground_height,
                self.config.margin,
            );
            let intent = validated.with_center(center);
            prev_center = intent.gap_center;
            self.queue.push_back(intent);
        }

        log::debug!(
            "Queued {} x{} (intensity {:.2}, arc {}, breather {})",
            pattern.as_str(),
            count,
            intensity,
            self.arc.as_str(),
            breather
        );
        self.events.push(GameEvent::PhraseQueued {
            pattern,
            count,
            intensity,
            arc: self.arc,
            breather,
        });

        if let Some(last) = self.queue.back() {
            self.last_center = last.gap_center;
        }
        self.last_pattern = Some(pattern);
        self.phrases_since_breather += 1;
        self.advance_arc();

        pattern
    }

    /// Weighted pick within the current arc, rerolling repeats of the previous pattern
    fn pick_pattern(&mut self, weights: &PatternWeights) -> PatternKind {
        let allowed = self.arc.allowed_patterns();
        let mut pick = pick_weighted(weights, allowed, &mut self.rng);
        for _ in 0..PATTERN_REROLLS {
            if Some(pick) != self.last_pattern {
                break;
            }
            pick = pick_weighted(weights, allowed, &mut self.rng);
        }
        pick
    }

    /// Per-pipe jitter: gap first, then timing
    fn apply_variation(&mut self, intent: PipeIntent) -> PipeIntent {
        let mut intent = intent;
        if self.profile.gap_variation {
            let jitter = self.rng.random_range(-1.0f32..=1.0) * self.profile.gap_variation_amount;
            intent.gap_size = (intent.gap_size + jitter).max(self.profile.gap_floor);
        }
        if self.profile.timing_variation && intent.delay > 0.0 {
            let jitter = self.rng.random_range(-1.0f32..=1.0) * self.profile.timing_variation_amount;
            intent.delay = (intent.delay + jitter).max(MIN_PIPE_DELAY_MS);
        }
        intent
    }

    fn advance_arc(&mut self) {
        self.arc_phrase_idx += 1;
        if self.arc_phrase_idx < self.arc_target {
            return;
        }

        let from = self.arc;
        self.arc = from.next();
        self.arc_phrase_idx = 0;
        self.arc_target = self.arc_lengths.roll(self.arc, &mut self.rng);
        log::info!(
            "Arc {} -> {} for {} phrases",
            from.as_str(),
            self.arc.as_str(),
            self.arc_target
        );
        self.events.push(GameEvent::ArcChange {
            from,
            to: self.arc,
            phrases: self.arc_target,
        });
    }

    /// Fresh run: empty queue, centered start, Build arc
    ///
    /// The random stream keeps running so consecutive runs differ; use
    /// [`PipeDirector::reseed`] to replay a run.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.last_center = self.config.height / 2.0;
        self.last_pattern = None;
        self.arc = MovementArc::Build;
        self.arc_phrase_idx = 0;
        self.arc_target = self.arc_lengths.roll(MovementArc::Build, &mut self.rng);
        self.phrases_since_breather = 0;
        self.events.clear();
        self.progression.reset();
    }

    /// Restart the random stream from `seed` and reset the run
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
        self.reset();
    }

    /// Forward a score update to the progression manager
    pub fn on_score(&mut self, score: u32) -> Vec<GameEvent> {
        self.progression.on_score(score)
    }

    pub fn progression(&self) -> &ProgressionManager<'a> {
        &self.progression
    }

    pub fn progression_mut(&mut self) -> &mut ProgressionManager<'a> {
        &mut self.progression
    }

    pub fn snapshot(&self) -> ProgressionState {
        self.progression.snapshot(self.arc)
    }

    pub fn arc(&self) -> MovementArc {
        self.arc
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn profile(&self) -> &'a DifficultyProfile {
        self.profile
    }

    /// Validated intents waiting to be pulled
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Take the arc/phrase events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Weighted pick restricted to `allowed`; Scatter when nothing has weight
///
/// Entries with zero weight are never picked, even on a zero draw.
pub fn pick_weighted(
    weights: &PatternWeights,
    allowed: &[PatternKind],
    rng: &mut dyn RngCore,
) -> PatternKind {
    let total = weights.total(allowed);
    if total <= 0.0 {
        return PatternKind::Scatter;
    }

    let mut r = rng.random::<f32>() * total;
    let mut pick = PatternKind::Scatter;
    for &kind in allowed {
        let weight = weights.get(kind);
        if weight <= 0.0 {
            continue;
        }
        pick = kind;
        r -= weight;
        if r <= 0.0 {
            break;
        }
    }
    pick
}
