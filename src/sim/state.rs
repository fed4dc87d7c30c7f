//! Core generation types shared by every stage of the pipeline

use serde::{Deserialize, Serialize};

use super::arc::MovementArc;
use super::patterns::PatternKind;

/// Blueprint for one obstacle
///
/// `gap_center`/`gap_size` use the same vertical pixel units as the bird.
/// `delay` is milliseconds since the previous spawn; 0 means "use the phase default".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeIntent {
    pub gap_center: f32,
    pub gap_size: f32,
    pub delay: f32,
}

impl PipeIntent {
    pub fn new(gap_center: f32, gap_size: f32, delay: f32) -> Self {
        Self {
            gap_center,
            gap_size,
            delay,
        }
    }

    /// Top edge of the gap
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_size / 2.0
    }

    /// Bottom edge of the gap
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_size / 2.0
    }

    /// Same size and delay, different center
    pub fn with_center(&self, gap_center: f32) -> Self {
        Self {
            gap_center,
            ..*self
        }
    }
}

/// How loudly the game-feel layer should celebrate a milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CelebrationTier {
    Minor,
    Major,
    Epic,
}

/// Outbox events, delivered by whoever drives the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Entered a new difficulty phase (one per `on_score`, even when skipping phases)
    PhaseChange { index: usize, name: &'static str },
    /// Crossed a score milestone
    Milestone {
        score: u32,
        label: &'static str,
        tier: CelebrationTier,
    },
    /// Narrative arc moved on after `phrases` phrases
    ArcChange {
        from: MovementArc,
        to: MovementArc,
        phrases: u32,
    },
    /// A phrase of validated intents was queued
    PhraseQueued {
        pattern: PatternKind,
        count: usize,
        intensity: f32,
        arc: MovementArc,
        breather: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_edges() {
        let intent = PipeIntent::new(200.0, 100.0, 0.0);
        assert_eq!(intent.gap_top(), 150.0);
        assert_eq!(intent.gap_bottom(), 250.0);
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = GameEvent::PhaseChange {
            index: 3,
            name: "Intensification",
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"phaseChange","index":3,"name":"Intensification"}"#);
    }
}
