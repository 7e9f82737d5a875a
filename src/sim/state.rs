//! Game state and core simulation types
//!
//! A `GameState` is one play session: score, lives, the basket, every live
//! falling object, active effects and the scheduled-event table.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::basket::{Basket, Lean};
use super::collision::Rect;
use super::effects::{EffectKind, EffectState, TimerKind, Timers};
use super::rng::GameRng;
use crate::consts::*;
use crate::clamp_to_span;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game clock frozen (screen lost focus)
    Paused,
    /// Lives ran out; the session no longer changes
    GameOver,
}

/// Falling object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Positive,
    Positive2,
    Positive3,
    Positive4,
    Positive5,
    LifeBoost,
    Negative,
    Enlarge,
    Shrink,
    Random,
    Magnet,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 11] = [
        ObjectKind::Positive,
        ObjectKind::Positive2,
        ObjectKind::Positive3,
        ObjectKind::Positive4,
        ObjectKind::Positive5,
        ObjectKind::LifeBoost,
        ObjectKind::Negative,
        ObjectKind::Enlarge,
        ObjectKind::Shrink,
        ObjectKind::Random,
        ObjectKind::Magnet,
    ];

    /// Base points for a catch (before double points)
    pub fn points(self) -> u32 {
        match self {
            ObjectKind::Positive => 1,
            ObjectKind::Positive2 => 2,
            ObjectKind::Positive3 => 3,
            ObjectKind::Positive4 => 5,
            ObjectKind::Positive5 => 10,
            ObjectKind::LifeBoost
            | ObjectKind::Negative
            | ObjectKind::Enlarge
            | ObjectKind::Shrink
            | ObjectKind::Random
            | ObjectKind::Magnet => 0,
        }
    }

    /// Point tiers (the only kinds the magnet attracts)
    pub fn is_positive(self) -> bool {
        self.points() > 0
    }
}

/// A falling object entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub kind: ObjectKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length of the square sprite
    pub size: f32,
    /// Pixels per tick before multipliers, fixed at spawn
    pub base_speed: f32,
}

impl FallingObject {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }

    /// Keep the sprite horizontally on screen
    pub fn clamp_x(&mut self, screen_width: f32) {
        self.pos.x = clamp_to_span(self.pos.x, screen_width - self.size);
    }
}

/// Why an object left the play field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Fell past the bottom edge
    Missed,
    /// Touched the basket
    Caught,
}

/// Observable side effects of the simulation, drained by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObjectSpawned { id: u32, kind: ObjectKind, pos: Vec2 },
    ObjectMoved { id: u32, pos: Vec2 },
    ObjectRemoved { id: u32, reason: RemovalReason },
    /// Non-negative object caught ("collect" cue)
    Collected { kind: ObjectKind },
    /// Negative object caught ("hurt" cue)
    Hurt,
    HudChanged { score: u32, lives: u32 },
    BasketChanged { x: f32, y: f32, width: f32, height: f32, lean: Lean },
    EffectStarted(EffectKind),
    EffectEnded(EffectKind),
    /// Emitted exactly once per session
    GameOver { final_score: u32 },
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seeded RNG (the run seed is kept on it)
    pub rng: GameRng,
    /// Player lives
    pub lives: u32,
    /// Score
    pub score: u32,
    /// Game clock (advances only while playing)
    pub time_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub screen_width: f32,
    pub screen_height: f32,
    pub object_size: f32,
    pub basket: Basket,
    /// Live falling objects in spawn order
    pub objects: Vec<FallingObject>,
    pub effects: EffectState,
    pub timers: Timers,
    /// Pending events for collaborators
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed and play-field settings
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let basket = Basket::new(
            settings.basket_width,
            settings.basket_height,
            settings.screen_width,
            settings.screen_height,
            settings.basket_bottom_margin,
        );
        let mut timers = Timers::new();
        // First spawn lands on the first tick
        timers.arm(TimerKind::Spawn, 0);
        timers.arm(TimerKind::SpeedGrowth, SPEED_GROWTH_INTERVAL_MS);

        let mut state = Self {
            rng: GameRng::new(seed),
            lives: STARTING_LIVES,
            score: 0,
            time_ms: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            screen_width: settings.screen_width,
            screen_height: settings.screen_height,
            object_size: settings.object_size,
            basket,
            objects: Vec::new(),
            effects: EffectState::default(),
            timers,
            events: Vec::new(),
            next_id: 1,
        };
        state.push_hud();
        state.push_basket();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Freeze the game clock; returns whether the phase changed
    pub fn pause(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::info!("Session paused at {} ms", self.time_ms);
            true
        } else {
            false
        }
    }

    /// Unfreeze the game clock; returns whether the phase changed
    pub fn resume(&mut self) -> bool {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::info!("Session resumed at {} ms", self.time_ms);
            true
        } else {
            false
        }
    }

    /// Apply one horizontal tilt sample to the basket (ignored unless playing)
    pub fn apply_tilt(&mut self, sample: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let before = self.basket.x;
        self.basket.apply_tilt(sample);
        if self.basket.x != before {
            self.push_basket();
        }
    }

    /// Spawn one object at a random column just above the top edge
    pub fn spawn_object(&mut self) -> u32 {
        let kind = self.rng.object_kind();
        let x = self.rng.spawn_x(self.screen_width - self.object_size);
        let base_speed = self.rng.base_speed();
        let id = self.next_entity_id();
        let pos = Vec2::new(x, -self.object_size);
        self.objects.push(FallingObject {
            id,
            kind,
            pos,
            size: self.object_size,
            base_speed,
        });
        self.events.push(GameEvent::ObjectSpawned { id, kind, pos });
        log::trace!("Spawned {kind:?} #{id} at x={x} speed={base_speed}");
        id
    }

    /// Add points for a caught object, doubled under double points
    pub fn award(&mut self, kind: ObjectKind) -> u32 {
        let multiplier = if self.effects.double_points() { 2 } else { 1 };
        let points = kind.points() * multiplier;
        self.score = self.score.saturating_add(points);
        points
    }

    pub fn gain_life(&mut self) {
        self.lives = self.lives.saturating_add(1);
    }

    /// Remove one life (floor 0); returns true when lives reached zero
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Terminate the session: cancel every timer, then report the final score once
    pub fn end_session(&mut self) {
        if self.is_over() {
            return;
        }
        self.timers.cancel_all();
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks with score {}",
            self.time_ticks,
            self.score
        );
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
    }

    pub(crate) fn push_hud(&mut self) {
        self.events.push(GameEvent::HudChanged {
            score: self.score,
            lives: self.lives,
        });
    }

    pub(crate) fn push_basket(&mut self) {
        self.events.push(GameEvent::BasketChanged {
            x: self.basket.x,
            y: self.basket.y(),
            width: self.basket.width(),
            height: self.basket.height(),
            lean: self.basket.lean(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::RandomEffect;

    #[test]
    fn test_new_session() {
        let state = GameState::new(1, &Settings::default());
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.timers.deadline(TimerKind::Spawn), Some(0));
        assert_eq!(
            state.timers.deadline(TimerKind::SpeedGrowth),
            Some(SPEED_GROWTH_INTERVAL_MS)
        );
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_points_table() {
        let expected = [
            (ObjectKind::Positive, 1),
            (ObjectKind::Positive2, 2),
            (ObjectKind::Positive3, 3),
            (ObjectKind::Positive4, 5),
            (ObjectKind::Positive5, 10),
        ];
        for (kind, points) in expected {
            assert_eq!(kind.points(), points);
            assert!(kind.is_positive());
        }
        let positive_count = ObjectKind::ALL.iter().filter(|k| k.is_positive()).count();
        assert_eq!(positive_count, 5);
    }

    #[test]
    fn test_award_double_points() {
        let mut state = GameState::new(1, &Settings::default());
        assert_eq!(state.award(ObjectKind::Positive3), 3);
        state.effects.random = Some(RandomEffect::DoublePoints);
        assert_eq!(state.award(ObjectKind::Positive3), 6);
        assert_eq!(state.score, 9);
    }

    #[test]
    fn test_spawn_object_placement() {
        let settings = Settings::default();
        let mut state = GameState::new(5, &settings);
        state.drain_events();
        for _ in 0..100 {
            state.spawn_object();
        }
        for obj in &state.objects {
            assert_eq!(obj.pos.y, -settings.object_size);
            assert!(obj.pos.x >= 0.0);
            assert!(obj.pos.x <= settings.screen_width - settings.object_size);
            assert!((6.0..12.0).contains(&obj.base_speed));
        }
        let ids: Vec<_> = state.objects.iter().map(|o| o.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(state.drain_events().len(), 100);
    }

    #[test]
    fn test_lives_floor() {
        let mut state = GameState::new(1, &Settings::default());
        state.lives = 1;
        assert!(state.lose_life());
        assert!(state.lose_life());
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_end_session_once() {
        let mut state = GameState::new(1, &Settings::default());
        state.drain_events();
        state.score = 17;
        state.end_session();
        state.end_session();
        let overs: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs, vec![GameEvent::GameOver { final_score: 17 }]);
        assert!(state.timers.is_empty());
        assert!(!state.pause());
        assert!(!state.resume());
    }

    #[test]
    fn test_pause_resume_and_tilt() {
        let mut state = GameState::new(1, &Settings::default());
        let x = state.basket.x;
        assert!(state.pause());
        state.apply_tilt(3.0);
        assert_eq!(state.basket.x, x);
        assert!(state.resume());
        state.apply_tilt(3.0);
        assert_eq!(state.basket.x, x - 15.0);
    }
}
