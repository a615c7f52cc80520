//! Shared combat math.
//!
//! These pure functions calculate combat outcomes without side effects.

use super::constants::{ARMOR_MITIGATION_FACTOR, MIN_HIT_DAMAGE};
use rand::Rng;

/// Fraction of damage blocked by `armor`.
///
/// `0.06·a / (1 + 0.06·a)`: 0 at zero armor, approaching but never
/// reaching 1 as armor grows.
pub fn armor_reduction(armor: f64) -> f64 {
    let a = ARMOR_MITIGATION_FACTOR * armor;
    a / (1.0 + a)
}

/// Fraction of incoming damage that gets through `armor`.
pub fn armor_multiplier(armor: f64) -> f64 {
    1.0 - armor_reduction(armor)
}

/// Damage after armor, never below one.
pub fn mitigated_damage(raw: f64, armor: f64) -> f64 {
    (raw * armor_multiplier(armor)).max(MIN_HIT_DAMAGE)
}

/// Combines independent evasion chances: `1 − Π(1 − e)`.
pub fn stack_evasion(sources: &[f64]) -> f64 {
    1.0 - sources.iter().fold(1.0, |acc, e| acc * (1.0 - e))
}

/// Rolls a probability in `[0, 1]`.
pub fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    chance > 0.0 && rng.gen::<f64>() < chance
}

/// Rolls whether an incoming attack misses. True strike always hits.
pub fn roll_evasion(evasion: f64, true_strike: bool, rng: &mut impl Rng) -> bool {
    !true_strike && roll_chance(evasion, rng)
}

/// Returns the crit multiplier for one hit, or None on a normal hit.
pub fn roll_crit(crit_chance: f64, crit_damage: f64, rng: &mut impl Rng) -> Option<f64> {
    roll_chance(crit_chance, rng).then_some(crit_damage)
}

pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    (ax - bx).hypot(ay - by)
}
