//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod basket;
pub mod collision;
pub mod effects;
pub mod rng;
pub mod state;
pub mod tick;

pub use basket::{Basket, Lean, SizeState, SizeTransition};
pub use collision::Rect;
pub use effects::{EffectKind, EffectState, RandomEffect, ScheduledEvent, TimerKind, Timers};
pub use rng::{GameRng, SPAWN_ROLL_SIDES, SPAWN_TABLE, kind_for_roll};
pub use state::{FallingObject, GameEvent, GamePhase, GameState, ObjectKind, RemovalReason};
pub use tick::{TickInput, insert_object, resolve_collision, tick};
