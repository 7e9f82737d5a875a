//! Seeded random draws for the simulation
//!
//! All randomness in a session goes through one PCG32 stream so a seed fully
//! determines spawns, speeds, wiggle jitter and random effects.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::RandomEffect;
use super::state::ObjectKind;
use crate::consts::*;

/// Number of equally likely spawn outcomes
pub const SPAWN_ROLL_SIDES: u32 = 200;

/// Spawn weights out of `SPAWN_ROLL_SIDES`, in cumulative-table order
///
/// Rolls 1-2 are LIFE_BOOST, 3-7 ENLARGE, ... 176-200 POSITIVE5.
pub const SPAWN_TABLE: [(ObjectKind, u32); 11] = [
    (ObjectKind::LifeBoost, 2),
    (ObjectKind::Enlarge, 5),
    (ObjectKind::Shrink, 5),
    (ObjectKind::Magnet, 5),
    (ObjectKind::Random, 10),
    (ObjectKind::Negative, 50),
    (ObjectKind::Positive, 25),
    (ObjectKind::Positive2, 25),
    (ObjectKind::Positive3, 24),
    (ObjectKind::Positive4, 24),
    (ObjectKind::Positive5, 25),
];

/// Map a roll in `1..=SPAWN_ROLL_SIDES` to an object kind
pub fn kind_for_roll(roll: u32) -> ObjectKind {
    let mut upper = 0;
    for (kind, weight) in SPAWN_TABLE {
        upper += weight;
        if roll <= upper {
            return kind;
        }
    }
    ObjectKind::Positive5
}

/// Session RNG
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll in `1..=SPAWN_ROLL_SIDES`
    pub fn spawn_roll(&mut self) -> u32 {
        self.inner.random_range(1..=SPAWN_ROLL_SIDES)
    }

    /// Weighted object kind draw
    pub fn object_kind(&mut self) -> ObjectKind {
        kind_for_roll(self.spawn_roll())
    }

    /// Whole-pixel spawn column in `[0, max_x]`
    pub fn spawn_x(&mut self, max_x: f32) -> f32 {
        let max = max_x.max(0.0) as u32;
        self.inner.random_range(0..=max) as f32
    }

    /// Whole-pixel fall speed in `[MIN_BASE_SPEED, MAX_BASE_SPEED)`
    pub fn base_speed(&mut self) -> f32 {
        self.inner.random_range(MIN_BASE_SPEED..MAX_BASE_SPEED) as f32
    }

    /// Horizontal jitter in `[-WIGGLE_AMPLITUDE, WIGGLE_AMPLITUDE)`
    pub fn wiggle(&mut self) -> f32 {
        self.inner.random::<f32>() * 2.0 * WIGGLE_AMPLITUDE - WIGGLE_AMPLITUDE
    }

    /// Uniform pick among the four random sub-effects
    pub fn random_effect(&mut self) -> RandomEffect {
        RandomEffect::ALL[self.inner.random_range(0..RandomEffect::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_all_sides() {
        let total: u32 = SPAWN_TABLE.iter().map(|(_, w)| w).sum();
        assert_eq!(total, SPAWN_ROLL_SIDES);
    }

    #[test]
    fn test_cumulative_boundaries() {
        let cases = [
            (1, ObjectKind::LifeBoost),
            (2, ObjectKind::LifeBoost),
            (3, ObjectKind::Enlarge),
            (7, ObjectKind::Enlarge),
            (8, ObjectKind::Shrink),
            (12, ObjectKind::Shrink),
            (13, ObjectKind::Magnet),
            (17, ObjectKind::Magnet),
            (18, ObjectKind::Random),
            (27, ObjectKind::Random),
            (28, ObjectKind::Negative),
            (77, ObjectKind::Negative),
            (78, ObjectKind::Positive),
            (102, ObjectKind::Positive),
            (103, ObjectKind::Positive2),
            (127, ObjectKind::Positive2),
            (128, ObjectKind::Positive3),
            (151, ObjectKind::Positive3),
            (152, ObjectKind::Positive4),
            (175, ObjectKind::Positive4),
            (176, ObjectKind::Positive5),
            (200, ObjectKind::Positive5),
        ];
        for (roll, kind) in cases {
            assert_eq!(kind_for_roll(roll), kind, "roll {roll}");
        }
    }

    #[test]
    fn test_distribution_matches_weights() {
        let mut rng = GameRng::new(7);
        let draws = 10_000;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..draws {
            *counts.entry(rng.object_kind()).or_insert(0u32) += 1;
        }
        for (kind, weight) in SPAWN_TABLE {
            let expected = weight as f64 / SPAWN_ROLL_SIDES as f64;
            let observed = *counts.get(&kind).unwrap_or(&0) as f64 / draws as f64;
            // Generous bound: ~5 standard deviations for the largest bucket
            assert!(
                (observed - expected).abs() < 0.025,
                "{kind:?}: expected {expected}, observed {observed}"
            );
        }
        let negative = *counts.get(&ObjectKind::Negative).unwrap() as f64 / draws as f64;
        assert!((negative - 0.25).abs() < 0.025);
    }

    #[test]
    fn test_ranges() {
        let mut rng = GameRng::new(42);
        for _ in 0..2_000 {
            let speed = rng.base_speed();
            assert!((6.0..12.0).contains(&speed));
            assert_eq!(speed.fract(), 0.0);

            let x = rng.spawn_x(980.0);
            assert!((0.0..=980.0).contains(&x));

            let jitter = rng.wiggle();
            assert!((-10.0..10.0).contains(&jitter));

            let roll = rng.spawn_roll();
            assert!((1..=200).contains(&roll));
        }
    }

    #[test]
    fn test_spawn_x_degenerate_width() {
        let mut rng = GameRng::new(1);
        assert_eq!(rng.spawn_x(-50.0), 0.0);
        assert_eq!(rng.spawn_x(0.0), 0.0);
    }

    #[test]
    fn test_every_random_effect_reachable() {
        let mut rng = GameRng::new(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let effect = rng.random_effect();
            let idx = RandomEffect::ALL.iter().position(|e| *e == effect).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = GameRng::new(99);
        let mut b = GameRng::new(99);
        for _ in 0..50 {
            assert_eq!(a.object_kind(), b.object_kind());
            assert_eq!(a.base_speed(), b.base_speed());
        }
        assert_eq!(a.seed(), 99);
    }
}
