//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically, one 16 ms step
//! at a time.

use glam::Vec2;

use super::basket::{SizeState, SizeTransition};
use super::effects::{EffectKind, TimerKind};
use super::state::{FallingObject, GameEvent, GamePhase, GameState, ObjectKind, RemovalReason};
use crate::consts::*;

/// Largest tilt sample the demo autopilot produces (one g)
const AUTOPILOT_MAX_TILT: f32 = 9.81;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tilt sample delivered since the previous tick
    pub tilt: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot steers the basket
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.pause();
                return;
            }
            GamePhase::Paused => {
                state.resume();
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    let tilt = if input.idle_mode {
        autopilot_tilt(state)
    } else {
        input.tilt
    };
    if let Some(sample) = tilt {
        state.apply_tilt(sample);
    }

    state.time_ticks += 1;
    state.time_ms += SIM_DT_MS;

    fire_due_timers(state);
    advance_objects(state);
}

/// Run every scheduled event whose deadline has passed
fn fire_due_timers(state: &mut GameState) {
    while let Some(event) = state.timers.pop_due(state.time_ms) {
        match event.kind {
            TimerKind::Spawn => {
                state.spawn_object();
                state
                    .timers
                    .arm(TimerKind::Spawn, event.deadline_ms + SPAWN_INTERVAL_MS);
            }
            TimerKind::SpeedGrowth => {
                state.effects.grow();
                log::debug!("Speed growth factor now {:.2}", state.effects.growth_factor);
                state.timers.arm(
                    TimerKind::SpeedGrowth,
                    event.deadline_ms + SPEED_GROWTH_INTERVAL_MS,
                );
            }
            TimerKind::SizeRevert => {
                if let Some(previous) = state.basket.revert() {
                    end_size_effect(state, previous);
                }
            }
            TimerKind::RandomRevert => {
                if let Some(effect) = state.effects.clear_random() {
                    log::debug!("Random effect {effect:?} expired");
                    state
                        .events
                        .push(GameEvent::EffectEnded(EffectKind::Random(effect)));
                }
            }
            TimerKind::MagnetRevert => {
                if state.effects.magnet {
                    state.effects.magnet = false;
                    log::debug!("Magnet expired");
                    state.events.push(GameEvent::EffectEnded(EffectKind::Magnet));
                }
            }
        }
    }
}

/// Move, filter and collide every live object
///
/// Survivors are rebuilt into a fresh vector. If the session ends mid-pass the
/// remaining objects are kept untouched.
fn advance_objects(state: &mut GameState) {
    let mut pending = std::mem::take(&mut state.objects).into_iter();
    let mut survivors = Vec::with_capacity(pending.len());

    while let Some(mut obj) = pending.next() {
        // Effects can change mid-pass (a catch earlier in the list), so read them per object
        obj.pos.y += obj.base_speed * state.effects.fall_multiplier();

        if state.effects.wiggle_active() {
            obj.pos.x += state.rng.wiggle();
            obj.clamp_x(state.screen_width);
        }

        if state.effects.magnet && obj.kind.is_positive() {
            let gap = state.basket.center_x() - obj.center_x();
            obj.pos.x += gap * MAGNET_PULL;
            obj.clamp_x(state.screen_width);
        }

        if obj.pos.y > state.screen_height {
            state.events.push(GameEvent::ObjectRemoved {
                id: obj.id,
                reason: RemovalReason::Missed,
            });
            continue;
        }

        if obj.rect().overlaps(&state.basket.rect()) {
            state.events.push(GameEvent::ObjectRemoved {
                id: obj.id,
                reason: RemovalReason::Caught,
            });
            resolve_collision(state, obj.kind);
            if state.is_over() {
                survivors.extend(pending.by_ref());
                break;
            }
            continue;
        }

        state.events.push(GameEvent::ObjectMoved {
            id: obj.id,
            pos: obj.pos,
        });
        survivors.push(obj);
    }

    state.objects = survivors;
}

/// Apply the effect of catching an object of `kind`
pub fn resolve_collision(state: &mut GameState, kind: ObjectKind) {
    match kind {
        ObjectKind::Negative => {
            state.events.push(GameEvent::Hurt);
            let out_of_lives = state.lose_life();
            state.push_hud();
            if out_of_lives {
                state.end_session();
            }
            return;
        }
        ObjectKind::Positive
        | ObjectKind::Positive2
        | ObjectKind::Positive3
        | ObjectKind::Positive4
        | ObjectKind::Positive5 => {
            state.award(kind);
        }
        ObjectKind::LifeBoost => state.gain_life(),
        ObjectKind::Enlarge => {
            let transition = state.basket.enlarge();
            apply_size_transition(state, transition, SizeState::Enlarged);
        }
        ObjectKind::Shrink => {
            let transition = state.basket.shrink();
            apply_size_transition(state, transition, SizeState::Shrunk);
        }
        ObjectKind::Random => start_random_effect(state),
        ObjectKind::Magnet => start_magnet(state),
    }
    state.events.push(GameEvent::Collected { kind });
    state.push_hud();
}

fn size_effect(size: SizeState) -> Option<EffectKind> {
    match size {
        SizeState::Normal => None,
        SizeState::Enlarged => Some(EffectKind::Enlarged),
        SizeState::Shrunk => Some(EffectKind::Shrunk),
    }
}

fn apply_size_transition(state: &mut GameState, transition: SizeTransition, target: SizeState) {
    match transition {
        SizeTransition::Reverted => {
            state.timers.cancel(TimerKind::SizeRevert);
            let opposite = match target {
                SizeState::Enlarged => SizeState::Shrunk,
                _ => SizeState::Enlarged,
            };
            end_size_effect(state, opposite);
        }
        SizeTransition::Entered | SizeTransition::Refreshed => {
            state.timers.arm_after(
                TimerKind::SizeRevert,
                state.time_ms,
                SIZE_EFFECT_DURATION_MS,
            );
            if let Some(effect) = size_effect(target) {
                state.events.push(GameEvent::EffectStarted(effect));
            }
            if transition == SizeTransition::Entered {
                log::debug!("Basket {target:?}");
                state.push_basket();
            }
        }
    }
}

fn end_size_effect(state: &mut GameState, previous: SizeState) {
    log::debug!("Basket back to normal from {previous:?}");
    if let Some(effect) = size_effect(previous) {
        state.events.push(GameEvent::EffectEnded(effect));
    }
    state.push_basket();
}

fn start_random_effect(state: &mut GameState) {
    if let Some(previous) = state.effects.clear_random() {
        state.timers.cancel(TimerKind::RandomRevert);
        state
            .events
            .push(GameEvent::EffectEnded(EffectKind::Random(previous)));
    }
    let effect = state.rng.random_effect();
    state.effects.random = Some(effect);
    state.timers.arm_after(
        TimerKind::RandomRevert,
        state.time_ms,
        RANDOM_EFFECT_DURATION_MS,
    );
    log::debug!("Random effect {effect:?} started");
    state
        .events
        .push(GameEvent::EffectStarted(EffectKind::Random(effect)));
}

fn start_magnet(state: &mut GameState) {
    state.effects.magnet = true;
    state
        .timers
        .arm_after(TimerKind::MagnetRevert, state.time_ms, MAGNET_DURATION_MS);
    log::debug!("Magnet active");
    state.events.push(GameEvent::EffectStarted(EffectKind::Magnet));
}

/// Demo autopilot: chase the lowest catchable object, dodge negatives otherwise
fn autopilot_tilt(state: &GameState) -> Option<f32> {
    let basket_top = state.basket.y();
    let above_basket = |o: &&FallingObject| o.pos.y < basket_top;
    let lowest = |a: &&FallingObject, b: &&FallingObject| {
        a.pos
            .y
            .partial_cmp(&b.pos.y)
            .unwrap_or(std::cmp::Ordering::Equal)
    };

    let chase = state
        .objects
        .iter()
        .filter(above_basket)
        .filter(|o| o.kind != ObjectKind::Negative)
        .max_by(lowest)
        .map(FallingObject::center_x);

    let target = chase.or_else(|| {
        // Step aside from a negative falling into the basket's column
        let basket = state.basket.rect();
        state
            .objects
            .iter()
            .filter(above_basket)
            .filter(|o| o.kind == ObjectKind::Negative)
            .filter(|o| o.pos.x < basket.max.x && basket.min.x < o.pos.x + o.size)
            .max_by(lowest)
            .map(|threat| {
                if threat.center_x() < state.screen_width / 2.0 {
                    state.screen_width
                } else {
                    0.0
                }
            })
    })?;

    let dx = target - state.basket.center_x();
    Some((dx / TILT_SCALE).clamp(-AUTOPILOT_MAX_TILT, AUTOPILOT_MAX_TILT))
}

/// Place an object at `pos` (tests and replays)
pub fn insert_object(state: &mut GameState, kind: ObjectKind, pos: Vec2, base_speed: f32) -> u32 {
    let id = state.next_entity_id();
    state.objects.push(FallingObject {
        id,
        kind,
        pos,
        size: state.object_size,
        base_speed,
    });
    state.events.push(GameEvent::ObjectSpawned { id, kind, pos });
    id
}
