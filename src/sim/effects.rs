//! Time-limited status effects and the scheduled-event table
//!
//! Every delayed action in a session (spawning, speed growth, effect reverts)
//! is a `{kind, deadline}` entry checked against the game clock each tick.
//! Arming a kind overwrites its existing entry, so a re-trigger never leaves a
//! stale revert behind.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Sub-effect picked by a RANDOM pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RandomEffect {
    /// Objects jitter horizontally
    Wiggle,
    /// Objects fall 1.5x faster
    SpeedUp,
    /// Objects fall at half speed
    SlowDown,
    /// Positive pickups score double
    DoublePoints,
}

impl RandomEffect {
    /// Uniform draw order
    pub const ALL: [RandomEffect; 4] = [
        RandomEffect::Wiggle,
        RandomEffect::SpeedUp,
        RandomEffect::SlowDown,
        RandomEffect::DoublePoints,
    ];

    /// Fall speed multiplier while this effect is active
    pub fn speed_factor(self) -> f32 {
        match self {
            RandomEffect::SpeedUp => SPEED_UP_FACTOR,
            RandomEffect::SlowDown => SLOW_DOWN_FACTOR,
            RandomEffect::Wiggle | RandomEffect::DoublePoints => 1.0,
        }
    }
}

/// Effect identity reported in start/end events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Enlarged,
    Shrunk,
    Random(RandomEffect),
    Magnet,
}

/// Active non-size effects (basket size lives on the basket)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectState {
    /// Current random effect, if any
    pub random: Option<RandomEffect>,
    /// Magnet pulls positive objects toward the basket
    pub magnet: bool,
    /// Session-long speed multiplier, only ever grows
    pub growth_factor: f32,
}

impl Default for EffectState {
    fn default() -> Self {
        Self {
            random: None,
            magnet: false,
            growth_factor: 1.0,
        }
    }
}

impl EffectState {
    /// Speed multiplier from the random effect (1.0 when none)
    pub fn speed_factor(&self) -> f32 {
        self.random.map_or(1.0, RandomEffect::speed_factor)
    }

    /// Combined multiplier applied to every object's base speed
    pub fn fall_multiplier(&self) -> f32 {
        self.speed_factor() * self.growth_factor
    }

    pub fn wiggle_active(&self) -> bool {
        self.random == Some(RandomEffect::Wiggle)
    }

    pub fn double_points(&self) -> bool {
        self.random == Some(RandomEffect::DoublePoints)
    }

    /// Advance the growth factor by one step
    pub fn grow(&mut self) {
        self.growth_factor += SPEED_GROWTH_STEP;
    }

    /// Clear every random-effect flag, returning what was active
    pub fn clear_random(&mut self) -> Option<RandomEffect> {
        self.random.take()
    }
}

/// Kinds of scheduled events, ordered for tie-breaking equal deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    Spawn,
    SpeedGrowth,
    SizeRevert,
    RandomRevert,
    MagnetRevert,
}

/// A pending deadline on the game clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub kind: TimerKind,
    pub deadline_ms: u64,
}

/// Scheduled-event table, at most one entry per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timers {
    entries: Vec<ScheduledEvent>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind` at an absolute deadline, replacing any existing entry
    pub fn arm(&mut self, kind: TimerKind, deadline_ms: u64) {
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(entry) => entry.deadline_ms = deadline_ms,
            None => self.entries.push(ScheduledEvent { kind, deadline_ms }),
        }
    }

    /// Arm `kind` to fire `delay_ms` after `now_ms`
    pub fn arm_after(&mut self, kind: TimerKind, now_ms: u64, delay_ms: u64) {
        self.arm(kind, now_ms.saturating_add(delay_ms));
    }

    /// Remove the entry for `kind`; returns whether one existed
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.deadline_ms)
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadline(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return the earliest entry due at `now_ms`
    ///
    /// Equal deadlines fire in `TimerKind` order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledEvent> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline_ms <= now_ms)
            .min_by_key(|(_, e)| (e.deadline_ms, e.kind))
            .map(|(i, _)| i)?;
        Some(self.entries.swap_remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_factor() {
        let mut effects = EffectState::default();
        assert_eq!(effects.speed_factor(), 1.0);
        effects.random = Some(RandomEffect::SpeedUp);
        assert_eq!(effects.speed_factor(), 1.5);
        effects.random = Some(RandomEffect::SlowDown);
        assert_eq!(effects.speed_factor(), 0.5);
        effects.random = Some(RandomEffect::Wiggle);
        assert_eq!(effects.speed_factor(), 1.0);
        assert!(effects.wiggle_active());
        assert!(!effects.double_points());
    }

    #[test]
    fn test_growth_multiplies_fall_speed() {
        let mut effects = EffectState::default();
        effects.grow();
        effects.grow();
        effects.random = Some(RandomEffect::SpeedUp);
        assert!((effects.fall_multiplier() - 1.5 * 1.02).abs() < 1e-6);
    }

    #[test]
    fn test_clear_random() {
        let mut effects = EffectState {
            random: Some(RandomEffect::DoublePoints),
            ..Default::default()
        };
        assert_eq!(effects.clear_random(), Some(RandomEffect::DoublePoints));
        assert_eq!(effects.clear_random(), None);
        assert_eq!(effects.speed_factor(), 1.0);
    }

    #[test]
    fn test_rearm_overwrites() {
        let mut timers = Timers::new();
        timers.arm(TimerKind::MagnetRevert, 10_000);
        timers.arm(TimerKind::MagnetRevert, 12_000);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.deadline(TimerKind::MagnetRevert), Some(12_000));
        assert!(timers.pop_due(11_000).is_none());
        assert_eq!(
            timers.pop_due(12_000),
            Some(ScheduledEvent {
                kind: TimerKind::MagnetRevert,
                deadline_ms: 12_000
            })
        );
        assert!(timers.is_empty());
    }

    #[test]
    fn test_pop_due_order() {
        let mut timers = Timers::new();
        timers.arm(TimerKind::RandomRevert, 500);
        timers.arm(TimerKind::Spawn, 500);
        timers.arm(TimerKind::SpeedGrowth, 100);
        timers.arm(TimerKind::MagnetRevert, 900);

        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(600))
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            fired,
            vec![TimerKind::SpeedGrowth, TimerKind::Spawn, TimerKind::RandomRevert]
        );
        assert!(timers.is_armed(TimerKind::MagnetRevert));
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        timers.arm_after(TimerKind::SizeRevert, 1_000, 15_000);
        assert_eq!(timers.deadline(TimerKind::SizeRevert), Some(16_000));
        assert!(timers.cancel(TimerKind::SizeRevert));
        assert!(!timers.cancel(TimerKind::SizeRevert));
        timers.arm(TimerKind::Spawn, 0);
        timers.arm(TimerKind::SpeedGrowth, 0);
        timers.cancel_all();
        assert!(timers.pop_due(u64::MAX).is_none());
    }

    proptest! {
        #[test]
        fn prop_fires_in_deadline_order(deadlines in proptest::collection::vec(0u64..50_000, 5)) {
            let kinds = [
                TimerKind::Spawn,
                TimerKind::SpeedGrowth,
                TimerKind::SizeRevert,
                TimerKind::RandomRevert,
                TimerKind::MagnetRevert,
            ];
            let mut timers = Timers::new();
            for (kind, deadline) in kinds.iter().zip(&deadlines) {
                timers.arm(*kind, *deadline);
            }
            let mut last = 0;
            let mut count = 0;
            while let Some(event) = timers.pop_due(u64::MAX) {
                prop_assert!(event.deadline_ms >= last);
                last = event.deadline_ms;
                count += 1;
            }
            prop_assert_eq!(count, 5);
        }
    }
}
