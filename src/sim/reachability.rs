//! Reachability oracle
//!
//! Answers "where can the bird physically be N ticks from now?" by running the
//! two extreme inputs through the physics integrator:
//! - flap every tick (fastest ascent, stopped by the ceiling)
//! - never flap (free fall, capped by terminal velocity)
//!
//! Every generated gap center is clamped into that band, shrunk by a grace
//! factor, before the engine sees it.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::physics::Physics;
use super::state::PipeIntent;
use crate::consts::TICK_MS;
use crate::tuning::GameConfig;

/// Vertical interval reachable within a tick budget (`min_y` is the highest point on screen)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReachableBand {
    pub min_y: f32,
    pub max_y: f32,
}

impl ReachableBand {
    pub fn point(y: f32) -> Self {
        Self { min_y: y, max_y: y }
    }

    #[inline]
    pub fn midpoint(&self) -> f32 {
        (self.min_y + self.max_y) / 2.0
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.min_y && y <= self.max_y
    }

    /// Restrict both ends to `[lo, hi]`
    pub fn bounded(&self, lo: f32, hi: f32) -> Self {
        Self {
            min_y: self.min_y.clamp(lo, hi),
            max_y: self.max_y.clamp(lo, hi),
        }
    }

    /// Shrink symmetrically by `grace` (0 = unchanged, 1 = collapsed to the midpoint)
    pub fn graced(&self, grace: f32) -> Self {
        let grace = grace.clamp(0.0, 1.0);
        if grace >= 1.0 {
            return Self::point(self.midpoint());
        }
        let inset = self.span() * grace / 2.0;
        Self {
            min_y: self.min_y + inset,
            max_y: self.max_y - inset,
        }
    }
}

/// Band reachable from `from_center` after `ticks` physics steps
pub fn compute_reachable_band(from_center: f32, ticks: u32, physics: &Physics) -> ReachableBand {
    let (mut up_y, mut up_vy) = (from_center, 0.0);
    let (mut down_y, mut down_vy) = (from_center, 0.0);

    for _ in 0..ticks {
        (up_y, up_vy) = physics.step(up_y, up_vy, true);
        if up_y < 0.0 {
            up_y = 0.0;
            up_vy = 0.0;
        }

        (down_y, down_vy) = physics.step(down_y, down_vy, false);
    }

    ReachableBand {
        min_y: up_y.min(down_y),
        max_y: down_y.max(up_y),
    }
}

/// Ticks the bird gets between two pipes spawned `delay_ms` apart
///
/// The new pipe's leading edge must travel one spawn interval minus one pipe
/// width before it reaches the previous pipe's position.
pub fn ticks_between(delay_ms: f32, config: &GameConfig) -> u32 {
    let delay_ticks = delay_ms / TICK_MS;
    let travel = (config.pipe_speed * delay_ticks - config.pipe_width) / config.pipe_speed;
    // NaN (zero speed) and negative budgets both land on 1
    travel.floor().max(1.0) as u32
}

/// Clamp an intent's gap center into the graced band reachable from `prev_center`
///
/// Returns the borrowed intent untouched when its center is already inside the
/// band; otherwise an owned copy with only `gap_center` changed.
pub fn validate_and_clamp<'a>(
    intent: &'a PipeIntent,
    prev_center: f32,
    config: &GameConfig,
    grace_factor: f32,
) -> Cow<'a, PipeIntent> {
    let delay = if intent.delay > 0.0 {
        intent.delay
    } else {
        config.pipe_spawn
    };
    let ticks = ticks_between(delay, config);

    let band = compute_reachable_band(prev_center, ticks, &config.physics)
        .bounded(0.0, config.playable_height());
    let graced = band.graced(grace_factor);

    let target = if graced.min_y >= graced.max_y {
        band.midpoint()
    } else {
        intent.gap_center.clamp(graced.min_y, graced.max_y)
    };

    if target == intent.gap_center {
        Cow::Borrowed(intent)
    } else {
        log::trace!(
            "Clamped gap center {:.1} -> {:.1} (band {:.1}..{:.1}, {} ticks)",
            intent.gap_center,
            target,
            graced.min_y,
            graced.max_y,
            ticks
        );
        Cow::Owned(intent.with_center(target))
    }
}
