//! Flappy Director - pipe placement and difficulty progression
//!
//! Core modules:
//! - `sim`: Deterministic generation (reachability, patterns, progression, director)
//! - `tuning`: Data-driven difficulty profiles and game geometry
//! - `platform`: Browser bindings for the JS game loop
//! - `settings`: Player preferences

pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use sim::{GameEvent, PipeDirector, PipeIntent, ProgressionManager};
pub use tuning::{Difficulty, DifficultyProfile, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick in milliseconds (60 Hz)
    pub const TICK_MS: f32 = 1000.0 / 60.0;

    /// Canvas dimensions (same vertical pixel units as bird position)
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 64.0;
    /// Minimum distance between a gap edge and the ceiling/ground
    pub const PIPE_MARGIN: f32 = 40.0;
    /// Floor for jittered spawn delays (ms)
    pub const MIN_PIPE_DELAY_MS: f32 = 200.0;

    /// Pipes per phrase (inclusive)
    pub const PHRASE_MIN_PIPES: usize = 3;
    pub const PHRASE_MAX_PIPES: usize = 8;

    /// Rerolls allowed when a pick repeats the previous pattern
    pub const PATTERN_REROLLS: u32 = 3;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
