//! Tilt Catch - A tilt-controlled arcade catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, effects, collisions, session state)
//! - `game`: Frame driver that feeds the simulation and talks to collaborators
//! - `renderer`: Rendering collaborator interface
//! - `audio`: Sound cue collaborator and volume handling
//! - `leaderboard`: Score submission and ranked listing
//! - `platform`: Frame timing and focus handling

pub mod audio;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{CollaboratorError, LeaderboardError};
pub use game::{FrameOutcome, Game};
pub use leaderboard::{FileLeaderboard, Leaderboard, LeaderboardBackend, ScoreEntry, ScoreSubmission};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const SIM_DT_MS: u64 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame delta accepted before clamping (ms)
    pub const MAX_FRAME_DT_MS: f64 = 100.0;

    /// Interval between spawns
    pub const SPAWN_INTERVAL_MS: u64 = 2_000;
    /// Interval between speed growth steps
    pub const SPEED_GROWTH_INTERVAL_MS: u64 = 10_000;
    /// Added to the growth factor at each step
    pub const SPEED_GROWTH_STEP: f32 = 0.01;

    /// Enlarge/shrink duration
    pub const SIZE_EFFECT_DURATION_MS: u64 = 15_000;
    /// Random effect duration
    pub const RANDOM_EFFECT_DURATION_MS: u64 = 10_000;
    /// Magnet duration
    pub const MAGNET_DURATION_MS: u64 = 10_000;

    /// Lives at session start
    pub const STARTING_LIVES: u32 = 3;

    /// Base fall speed range in pixels per tick (upper bound exclusive)
    pub const MIN_BASE_SPEED: u32 = 6;
    pub const MAX_BASE_SPEED: u32 = 12;

    /// Basket displacement per unit of tilt
    pub const TILT_SCALE: f32 = -5.0;

    /// Basket scale factors per size state
    pub const ENLARGED_SCALE: f32 = 1.5;
    pub const SHRUNK_SCALE: f32 = 0.5;

    /// Random effect speed multipliers
    pub const SPEED_UP_FACTOR: f32 = 1.5;
    pub const SLOW_DOWN_FACTOR: f32 = 0.5;

    /// Wiggle jitter half-range in pixels
    pub const WIGGLE_AMPLITUDE: f32 = 10.0;
    /// Fraction of the horizontal gap closed by the magnet each tick
    pub const MAGNET_PULL: f32 = 0.1;
}

/// Clamp `value` into `[0, max]`, treating a negative `max` as zero.
///
/// Keeps entities on screen even when they are wider than the play field.
#[inline]
pub fn clamp_to_span(value: f32, max: f32) -> f32 {
    value.clamp(0.0, max.max(0.0))
}
