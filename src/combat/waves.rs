//! Wave rosters.
//!
//! Every 10th wave is a bonus round, every other 5th wave a boss, and the
//! rest are swarms whose size and stats scale with the wave number.

use super::types::{Enemy, EnemyId, EnemyKind};
use crate::core::constants::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    Swarm,
    Boss,
    Bonus,
}

pub fn wave_kind(wave: u32) -> WaveKind {
    if wave % WAVE_BONUS_INTERVAL == 0 {
        WaveKind::Bonus
    } else if wave % WAVE_BOSS_INTERVAL == 0 {
        WaveKind::Boss
    } else {
        WaveKind::Swarm
    }
}

/// Armor every non-boss enemy of `wave` starts with.
pub fn base_armor(wave: u32) -> f64 {
    (wave.saturating_sub(1) as f64 * WAVE_ARMOR_PER_WAVE).floor()
}

/// Number of enemies in a swarm wave.
pub fn swarm_size(wave: u32) -> u32 {
    if wave > SWARM_LATE_WAVE {
        let extra = (wave - SWARM_LATE_WAVE) as f64 * SWARM_LATE_COUNT_PER_WAVE;
        let late = SWARM_LATE_BASE_COUNT + extra.floor();
        (late as u32).min(SWARM_MAX_COUNT)
    } else {
        (SWARM_BASE_COUNT + wave / 2).min(SWARM_MAX_COUNT)
    }
}

/// Boss stat multiplier; grows linearly, then superlinearly past wave 30.
pub fn boss_scaling(wave: u32) -> f64 {
    let w = wave as f64;
    let late = if wave > BOSS_LATE_WAVE {
        ((wave - BOSS_LATE_WAVE) as f64).powf(BOSS_LATE_EXPONENT) * BOSS_LATE_FACTOR
    } else {
        0.0
    };
    1.0 + w * BOSS_SCALING_PER_WAVE + late
}

/// Builds the roster for `wave`, numbering enemies from `first_id`.
///
/// Only swarm waves consume randomness (type, position and attack jitter),
/// so a given wave number and RNG seed always yield the same roster.
pub fn generate_wave(wave: u32, first_id: u64, now_ms: u64, rng: &mut impl Rng) -> Vec<Enemy> {
    match wave_kind(wave) {
        WaveKind::Bonus => vec![bonus_target(wave, first_id, now_ms)],
        WaveKind::Boss => vec![boss(wave, first_id, now_ms)],
        WaveKind::Swarm => (0..swarm_size(wave) as u64)
            .map(|i| swarm_enemy(wave, first_id + i, now_ms, rng))
            .collect(),
    }
}

fn bonus_target(_wave: u32, id: u64, now_ms: u64) -> Enemy {
    Enemy {
        id: EnemyId(id),
        kind: EnemyKind::Bonus,
        hp: BONUS_TARGET_HP,
        max_hp: BONUS_TARGET_HP,
        mana: 0.0,
        max_mana: 0.0,
        damage: 0.0,
        armor: 0.0,
        attack_speed: 1.0,
        xp_reward: 0,
        gold_reward: 0,
        range: 0.0,
        x: 70.0,
        y: 50.0,
        last_attack_ms: now_ms,
        stunned_until_ms: 0,
    }
}

fn boss(wave: u32, id: u64, now_ms: u64) -> Enemy {
    let scaling = boss_scaling(wave);
    let hp = (BOSS_BASE_HP * BOSS_HP_GROWTH.powf(wave as f64 / WAVE_BOSS_INTERVAL as f64)).floor();
    let veteran = if wave > BOSS_VETERAN_WAVE {
        BOSS_VETERAN_ARMOR
    } else {
        0.0
    };
    let reward = (BOSS_BASE_REWARD * scaling).floor() as u64;

    Enemy {
        id: EnemyId(id),
        kind: EnemyKind::Boss,
        hp,
        max_hp: hp,
        mana: BOSS_MANA,
        max_mana: BOSS_MANA,
        damage: (BOSS_BASE_DAMAGE * scaling).floor(),
        armor: base_armor(wave) + BOSS_ARMOR_BONUS + veteran,
        attack_speed: BOSS_ATTACK_SPEED,
        xp_reward: reward,
        gold_reward: reward,
        range: 15.0,
        x: 70.0,
        y: 40.0,
        last_attack_ms: now_ms + BOSS_FIRST_ATTACK_DELAY_MS,
        stunned_until_ms: 0,
    }
}

fn swarm_enemy(wave: u32, id: u64, now_ms: u64, rng: &mut impl Rng) -> Enemy {
    let w = wave as f64;
    let roll = rng.gen::<f64>();
    let kind = if roll > SWARM_RANGED_ROLL_MAX {
        EnemyKind::Healer
    } else if roll > SWARM_MELEE_ROLL_MAX {
        EnemyKind::Ranged
    } else {
        EnemyKind::Melee
    };
    let (base_hp, base_mana, base_damage, range) = match kind {
        EnemyKind::Ranged => (200.0, 300.0, 35.0, 45.0),
        EnemyKind::Healer => (240.0, 400.0, 20.0, 35.0),
        _ => (280.0, 100.0, 25.0, 10.0),
    };

    let hp = (base_hp * (1.0 + w * SWARM_HP_FACTOR)).floor();
    let x = 60.0 + rng.gen::<f64>() * 30.0;
    let y = 15.0 + rng.gen::<f64>() * 70.0;
    let jitter = (rng.gen::<f64>() * SWARM_ATTACK_JITTER_MS) as u64;

    Enemy {
        id: EnemyId(id),
        kind,
        hp,
        max_hp: hp,
        mana: base_mana,
        max_mana: base_mana,
        damage: (base_damage * (1.0 + w * SWARM_DAMAGE_FACTOR)).floor(),
        armor: base_armor(wave),
        attack_speed: SWARM_BASE_ATTACK_SPEED + w * SWARM_ATTACK_SPEED_PER_WAVE,
        xp_reward: (SWARM_BASE_XP * (1.0 + w * SWARM_XP_FACTOR)).floor() as u64,
        gold_reward: (SWARM_BASE_GOLD * (1.0 + w * SWARM_GOLD_FACTOR)).floor() as u64,
        range,
        x,
        y,
        last_attack_ms: now_ms + jitter,
        stunned_until_ms: 0,
    }
}
