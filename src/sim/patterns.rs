//! Pattern generators
//!
//! Each generator turns shared parameters into one phrase of raw pipe
//! intents. Every center passes through [`clamp_to_bounds`] before it leaves
//! here, whatever `start_center` the caller passed in.

use std::f32::consts::TAU;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::state::PipeIntent;

/// Pattern identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Scatter,
    StairUp,
    StairDown,
    SineWave,
    Zigzag,
    Tunnel,
    Squeeze,
    Rapids,
    Drift,
}

impl PatternKind {
    pub const COUNT: usize = 9;

    pub const ALL: [PatternKind; Self::COUNT] = [
        PatternKind::Scatter,
        PatternKind::StairUp,
        PatternKind::StairDown,
        PatternKind::SineWave,
        PatternKind::Zigzag,
        PatternKind::Tunnel,
        PatternKind::Squeeze,
        PatternKind::Rapids,
        PatternKind::Drift,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Scatter => "Scatter",
            PatternKind::StairUp => "StairUp",
            PatternKind::StairDown => "StairDown",
            PatternKind::SineWave => "SineWave",
            PatternKind::Zigzag => "Zigzag",
            PatternKind::Tunnel => "Tunnel",
            PatternKind::Squeeze => "Squeeze",
            PatternKind::Rapids => "Rapids",
            PatternKind::Drift => "Drift",
        }
    }

    pub fn generator(self) -> PatternGenerator {
        PATTERN_GENERATORS[self.index()].1
    }

    /// Run this pattern's generator
    pub fn generate(self, params: &PatternParams, rng: &mut dyn RngCore) -> Vec<PipeIntent> {
        (self.generator())(params, rng)
    }
}

/// Shared generator input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternParams {
    /// Pipes to produce
    pub count: usize,
    /// Center the phrase starts from (usually the previous pipe's)
    pub start_center: f32,
    pub base_gap: f32,
    pub canvas_h: f32,
    pub ground_h: f32,
    pub margin: f32,
    /// Phase spawn delay (ms)
    pub base_delay: f32,
    /// 0 = calm, 1 = as tense as the pattern gets
    pub intensity: f32,
}

impl PatternParams {
    fn intent(&self, center: f32, gap: f32, delay: f32) -> PipeIntent {
        let center = clamp_to_bounds(center, gap, self.canvas_h, self.ground_h, self.margin);
        PipeIntent::new(center, gap, delay)
    }
}

pub type PatternGenerator = fn(&PatternParams, &mut dyn RngCore) -> Vec<PipeIntent>;

/// Generator table, indexed by [`PatternKind::index`]
pub const PATTERN_GENERATORS: [(PatternKind, PatternGenerator); PatternKind::COUNT] = [
    (PatternKind::Scatter, scatter),
    (PatternKind::StairUp, stair_up),
    (PatternKind::StairDown, stair_down),
    (PatternKind::SineWave, sine_wave),
    (PatternKind::Zigzag, zigzag),
    (PatternKind::Tunnel, tunnel),
    (PatternKind::Squeeze, squeeze),
    (PatternKind::Rapids, rapids),
    (PatternKind::Drift, drift),
];

/// One non-negative weight per pattern
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternWeights([f32; PatternKind::COUNT]);

impl PatternWeights {
    /// Unlisted patterns get weight 0; negative weights are treated as 0
    pub fn from_pairs(pairs: &[(PatternKind, f32)]) -> Self {
        let mut weights = [0.0; PatternKind::COUNT];
        for &(kind, weight) in pairs {
            weights[kind.index()] = weight.max(0.0);
        }
        Self(weights)
    }

    #[inline]
    pub fn get(&self, kind: PatternKind) -> f32 {
        self.0[kind.index()]
    }

    /// Sum of weights over `allowed`
    pub fn total(&self, allowed: &[PatternKind]) -> f32 {
        allowed.iter().map(|&kind| self.get(kind)).sum()
    }
}

/// Keep a gap of size `gap` fully between the margins
///
/// Falls back to the midpoint of the (inverted) range when the gap cannot fit.
pub fn clamp_to_bounds(center: f32, gap: f32, canvas_h: f32, ground_h: f32, margin: f32) -> f32 {
    let min = margin + gap / 2.0;
    let max = canvas_h - ground_h - margin - gap / 2.0;
    if min > max {
        return (min + max) / 2.0;
    }
    center.clamp(min, max)
}

fn scatter(params: &PatternParams, rng: &mut dyn RngCore) -> Vec<PipeIntent> {
    let gap = params.base_gap;
    let min = params.margin + gap / 2.0;
    let max = params.canvas_h - params.ground_h - params.margin - gap / 2.0;

    (0..params.count)
        .map(|_| {
            let center = min + rng.random::<f32>() * (max - min);
            params.intent(center, gap, 0.0)
        })
        .collect()
}

fn stair_step(params: &PatternParams) -> f32 {
    20.0 + params.intensity * 30.0
}

fn stair_up(params: &PatternParams, _rng: &mut dyn RngCore) -> Vec<PipeIntent> {
    let step = stair_step(params);
    (0..params.count)
        .map(|i| params.intent(params.start_center - step * (i + 1) as f32, params.base_gap, 0.0))
        .collect()
}

fn stair_down(params: &PatternParams, _rng: &mut dyn RngCore) -> Vec<PipeIntent> {
    let step = stair_step(params);
    (0..params.count)
        .map(|i| params.intent(params.start_center + step * (i + 1) as f32, params.base_gap, 0.0))
        .collect()
}

fn sine_wave(params: &PatternParams, rng: &mut dyn RngCore) -> Vec<PipeIntent> {
    let amp = 40.0 + params.intensity * 60.0;
    let freq = rng.random_range(0.8f32..1.2);
    let phase = rng.random::<f32>() * TAU;

    (0..params.count)
        .map(|i| {
            let center = params.start_center + amp * (i as f32 * freq + phase).sin();
            params.intent(center, params.base_gap, 0.0)
        })
        .collect()
}

fn zigzag(params: &PatternParams, _rng: &mut dyn RngCore) -> Vec<PipeIntent> {
    let offset = 30.0 + params.intensity * 50.0;
    (0..params.count)
        .map(|i| {
            let sign = if i % 2 == 0 { -1.0 } else { 1.0 };
            params.intent(params.start_center + sign * offset, params.base_gap, 0.0)
        })
        .collect()
}

fn tunnel(params: &PatternParams, rng: &mut dyn RngCore) -> Vec<PipeIntent> {
    let gap = params.base_gap * (0.85 - params.intensity * 0.1);
    (0..params.count)
        .map(|_| {
            let noise = (rng.random::<f32>() * 2.0 - 1.0) * 5.0;
            params.intent(params.start_center + noise, gap, 0.0)
        })
        .collect()
}

fn squeeze(params: &PatternParams, _rng: &mut dyn RngCore) -> Vec<PipeIntent> {
    let mid = params.count.saturating_sub(1) as f32 / 2.0;
    let max_squeeze = params.intensity * 0.25;

    (0..params.count)
        .map(|i| {
            // 0 at the middle pipe, 1 at both ends
            let edge = if mid > 0.0 {
                (i as f32 - mid).abs() / mid
            } else {
                0.0
            };
            let gap = params.base_gap * (1.0 - max_squeeze * (1.0 - edge));
            params.intent(params.start_center, gap, 0.0)
        })
        .collect()
}

fn rapids(params: &PatternParams, rng: &mut dyn RngCore) -> Vec<PipeIntent> {
    let delay = params.base_delay * (0.5 + (1.0 - params.intensity) * 0.2);
    (0..params.count)
        .map(|_| {
            let wobble = (rng.random::<f32>() - 0.5) * 40.0;
            params.intent(params.start_center + wobble, params.base_gap, delay)
        })
        .collect()
}

fn drift(params: &PatternParams, rng: &mut dyn RngCore) -> Vec<PipeIntent> {
    let gap = params.base_gap * 1.15;
    let delay = params.base_delay * (1.2 + (1.0 - params.intensity) * 0.2);
    let amp = 20.0 + (1.0 - params.intensity) * 20.0;
    let phase = rng.random::<f32>() * TAU;

    (0..params.count)
        .map(|i| {
            let center = params.start_center + amp * (i as f32 * 0.5 + phase).sin();
            params.intent(center, gap, delay)
        })
        .collect()
}
