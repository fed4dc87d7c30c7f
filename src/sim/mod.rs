//! Deterministic generation module
//!
//! Everything that decides where pipes go lives here. This module must be
//! pure and deterministic:
//! - Fixed timestep only
//! - One seeded RNG per director, threaded through every roll
//! - No rendering or platform dependencies

pub mod arc;
pub mod director;
pub mod patterns;
pub mod physics;
pub mod progression;
pub mod reachability;
pub mod state;

pub use arc::{ArcLengths, MovementArc};
pub use director::{DirectorError, PipeDirector, pick_weighted};
pub use patterns::{
    PATTERN_GENERATORS, PatternGenerator, PatternKind, PatternParams, PatternWeights,
    clamp_to_bounds,
};
pub use physics::Physics;
pub use progression::{ProgressionManager, ProgressionState};
pub use reachability::{ReachableBand, compute_reachable_band, ticks_between, validate_and_clamp};
pub use state::{CelebrationTier, GameEvent, PipeIntent};
