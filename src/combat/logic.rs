//! Per-hit combat resolution and skill effects.
//!
//! These functions mutate enemies and illusions in place and report what
//! happened; the engine decides what to log and when.

use super::types::{Enemy, EnemyId, Illusion};
use crate::catalog::{level_param, MANA_VOID_DAMAGE_PER_MISSING_MANA, MANA_VOID_STUN_SECS};
use crate::character::Stats;
use crate::core::combat_math::{armor_multiplier, distance, roll_chance, roll_crit};
use crate::core::constants::*;
use rand::Rng;

/// Result of one hero attack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroHit {
    pub target: Option<EnemyId>,
    /// Damage dealt to the primary target
    pub damage: f64,
    pub was_crit: bool,
    pub mana_burned: f64,
    pub healed: f64,
    pub cleave_damage: f64,
    pub cleaved: usize,
    /// Enemies struck by Chain Lightning, primary target first
    pub chained: Vec<EnemyId>,
    pub chain_damage: f64,
}

impl HeroHit {
    /// All damage this attack dealt.
    pub fn total_damage(&self) -> f64 {
        self.damage
            + self.cleave_damage * self.cleaved as f64
            + self.chain_damage * self.chained.len() as f64
    }
}

/// Who an enemy swings at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyTarget {
    Hero,
    Illusion(usize),
}

/// Index of the living enemy nearest to `(x, y)`.
///
/// There is no range check: the nearest enemy is always in reach.
pub fn nearest_enemy(enemies: &[Enemy], x: f64, y: f64) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive())
        .min_by(|(_, a), (_, b)| distance(a.x, a.y, x, y).total_cmp(&distance(b.x, b.y, x, y)))
        .map(|(i, _)| i)
}

/// Resolves one hero attack against `enemies[target]`.
///
/// Order: crit, mana break, lifesteal, damage, cleave, chain lightning.
/// Enemy armor does not reduce hero damage.
pub fn hero_strike(
    stats: &Stats,
    enemies: &mut [Enemy],
    target: usize,
    rng: &mut impl Rng,
) -> HeroHit {
    let mut hit = HeroHit::default();
    let mut damage = stats.damage;

    if let Some(mult) = roll_crit(stats.crit_chance, stats.crit_damage, rng) {
        damage *= mult;
        hit.was_crit = true;
    }

    let primary = &mut enemies[target];
    let burn = primary.mana.min(MANA_BREAK_BURN_CAP * stats.mana_burn_mult).max(0.0);
    primary.mana -= burn;
    damage += burn * MANA_BREAK_DAMAGE_RATIO;
    hit.mana_burned = burn;

    if stats.lifesteal > 0.0 {
        hit.healed = damage * stats.lifesteal;
    }

    primary.take_damage(damage);
    hit.damage = damage;
    hit.target = Some(primary.id);
    let (tx, ty, tid) = (primary.x, primary.y, primary.id);

    if stats.cleave_pct > 0.0 {
        let cleave = (damage * stats.cleave_pct).floor();
        for e in enemies.iter_mut() {
            if e.id != tid && (e.x - tx).abs() < CLEAVE_RADIUS && (e.y - ty).abs() < CLEAVE_RADIUS {
                e.take_damage(cleave);
                hit.cleaved += 1;
            }
        }
        hit.cleave_damage = cleave;
    }

    if let Some(chain) = stats.chain_lightning {
        if roll_chance(chain.chance, rng) {
            let mut others: Vec<usize> = (0..enemies.len())
                .filter(|&i| i != target && enemies[i].is_alive())
                .collect();
            others.sort_by(|&a, &b| {
                distance(enemies[a].x, enemies[a].y, tx, ty)
                    .total_cmp(&distance(enemies[b].x, enemies[b].y, tx, ty))
            });
            others.truncate(CHAIN_LIGHTNING_EXTRA_TARGETS);

            for i in std::iter::once(target).chain(others) {
                enemies[i].take_damage(chain.damage);
                hit.chained.push(enemies[i].id);
            }
            hit.chain_damage = chain.damage;
        }
    }

    hit
}

/// Nearest of the hero and living illusions to `enemy`. Ties go to the hero.
pub fn enemy_target(
    enemy: &Enemy,
    hero_x: f64,
    hero_y: f64,
    illusions: &[Illusion],
    now_ms: u64,
) -> EnemyTarget {
    let mut best = EnemyTarget::Hero;
    let mut best_dist = distance(enemy.x, enemy.y, hero_x, hero_y);
    for (i, ill) in illusions.iter().enumerate() {
        if !ill.is_alive(now_ms) {
            continue;
        }
        let d = distance(enemy.x, enemy.y, ill.x, ill.y);
        if d < best_dist {
            best_dist = d;
            best = EnemyTarget::Illusion(i);
        }
    }
    best
}

/// Damage an illusion takes from a raw hit, using the hero's armor.
pub fn illusion_damage_taken(raw: f64, hero_armor: f64, incoming_mult: f64) -> f64 {
    (raw * armor_multiplier(hero_armor) * incoming_mult).max(MIN_HIT_DAMAGE)
}

/// Living enemy with the largest mana deficit; the first one wins ties.
pub fn mana_void_target(enemies: &[Enemy]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, e) in enemies.iter().enumerate() {
        if !e.is_alive() {
            continue;
        }
        let missing = e.missing_mana();
        if best.map_or(true, |(_, m)| missing > m) {
            best = Some((i, missing));
        }
    }
    best.map(|(i, _)| i)
}

/// Hits `enemy` with Mana Void at `level`. Returns the damage dealt.
pub fn apply_mana_void(enemy: &mut Enemy, level: u32, now_ms: u64) -> f64 {
    let per_mana = level_param(&MANA_VOID_DAMAGE_PER_MISSING_MANA, level);
    let damage = (enemy.missing_mana() * per_mana).max(MANA_VOID_MIN_DAMAGE);
    enemy.take_damage(damage);
    let stun_ms = (level_param(&MANA_VOID_STUN_SECS, level) * 1000.0) as u64;
    enemy.stunned_until_ms = enemy.stunned_until_ms.max(now_ms + stun_ms);
    damage
}

/// Burns mana from every enemy within the Counterspell radius of the hero.
/// Returns how many enemies were affected.
pub fn apply_counterspell(enemies: &mut [Enemy], hero_x: f64, hero_y: f64) -> usize {
    let mut affected = 0;
    for e in enemies.iter_mut() {
        if distance(e.x, e.y, hero_x, hero_y) < COUNTERSPELL_RADIUS {
            e.mana = (e.mana - COUNTERSPELL_MANA_BURN).max(0.0);
            affected += 1;
        }
    }
    affected
}

/// Manta Style illusions around the hero.
pub fn spawn_illusions(
    hero_x: f64,
    hero_y: f64,
    hero_hp: f64,
    stats: &Stats,
    first_id: u64,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Vec<Illusion> {
    let damage = (stats.damage * ILLUSION_DAMAGE_RATIO * stats.illusion_damage_mult).floor();
    let duration_ms = (MANTA_ILLUSION_DURATION_MS * stats.illusion_duration_mult) as u64;

    (0..MANTA_ILLUSION_COUNT as u64)
        .map(|i| {
            let jitter_x = rng.gen::<f64>() * 2.0 * MANTA_ILLUSION_JITTER - MANTA_ILLUSION_JITTER;
            let jitter_y = rng.gen::<f64>() * 2.0 * MANTA_ILLUSION_JITTER - MANTA_ILLUSION_JITTER;
            Illusion {
                id: first_id + i,
                x: hero_x + jitter_x,
                y: hero_y + jitter_y,
                hp: hero_hp,
                max_hp: stats.hp_max,
                damage,
                attack_speed: stats.attack_speed,
                last_attack_ms: 0,
                spawn_ms: now_ms,
                duration_ms,
                incoming_damage_mult: ILLUSION_INCOMING_DAMAGE_MULT,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ChainLightning;
    use crate::character::compute_stats;
    use crate::combat::types::EnemyKind;
    use crate::core::game_state::HeroState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn enemy(id: u64, x: f64, y: f64) -> Enemy {
        Enemy {
            id: EnemyId(id),
            kind: EnemyKind::Melee,
            hp: 1_000.0,
            max_hp: 1_000.0,
            mana: 100.0,
            max_mana: 100.0,
            damage: 25.0,
            armor: 0.0,
            attack_speed: 0.6,
            xp_reward: 10,
            gold_reward: 10,
            range: 10.0,
            x,
            y,
            last_attack_ms: 0,
            stunned_until_ms: 0,
        }
    }

    fn base_stats() -> Stats {
        compute_stats(&HeroState::new(), 0)
    }

    #[test]
    fn test_nearest_skips_dead() {
        let mut enemies = vec![enemy(1, 25.0, 50.0), enemy(2, 60.0, 50.0)];
        assert_eq!(nearest_enemy(&enemies, 20.0, 50.0), Some(0));
        enemies[0].hp = 0.0;
        assert_eq!(nearest_enemy(&enemies, 20.0, 50.0), Some(1));
        enemies[1].hp = 0.0;
        assert_eq!(nearest_enemy(&enemies, 20.0, 50.0), None);
    }

    #[test]
    fn test_mana_break_adds_damage() {
        let stats = base_stats();
        let mut enemies = vec![enemy(1, 60.0, 50.0)];
        let hit = hero_strike(&stats, &mut enemies, 0, &mut test_rng());
        assert_eq!(hit.mana_burned, 60.0);
        assert_eq!(hit.damage, stats.damage + 48.0);
        assert_eq!(enemies[0].mana, 40.0);
        assert_eq!(enemies[0].hp, 1_000.0 - hit.damage);
    }

    #[test]
    fn test_crit_multiplies_before_mana_break() {
        let mut stats = base_stats();
        stats.crit_chance = 1.0;
        stats.crit_damage = 1.6;
        let mut enemies = vec![enemy(1, 60.0, 50.0)];
        let hit = hero_strike(&stats, &mut enemies, 0, &mut test_rng());
        assert!(hit.was_crit);
        assert_eq!(hit.damage, stats.damage * 1.6 + 48.0);
    }

    #[test]
    fn test_no_crit_without_chance() {
        let mut stats = base_stats();
        stats.crit_damage = 3.0;
        let mut enemies = vec![enemy(1, 60.0, 50.0)];
        for _ in 0..50 {
            let hit = hero_strike(&stats, &mut enemies, 0, &mut test_rng());
            assert!(!hit.was_crit);
        }
    }

    #[test]
    fn test_lifesteal_heals_from_full_hit() {
        let mut stats = base_stats();
        stats.lifesteal = 0.1;
        let mut enemies = vec![enemy(1, 60.0, 50.0)];
        let hit = hero_strike(&stats, &mut enemies, 0, &mut test_rng());
        assert_eq!(hit.healed, hit.damage * 0.1);
        assert!(hit.healed > 0.0);

        stats.lifesteal = 0.0;
        let hit = hero_strike(&stats, &mut enemies, 0, &mut test_rng());
        assert_eq!(hit.healed, 0.0);
    }

    #[test]
    fn test_chain_lightning_hits_up_to_four() {
        let mut stats = base_stats();
        stats.chain_lightning = Some(ChainLightning {
            chance: 1.0,
            damage: 100.0,
        });
        let mut enemies: Vec<Enemy> = (0..6).map(|i| enemy(i, 60.0 + i as f64, 50.0)).collect();
        let hit = hero_strike(&stats, &mut enemies, 0, &mut test_rng());
        let ids: Vec<u64> = hit.chained.iter().map(|id| id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(enemies[4].hp, 1_000.0);
        assert_eq!(enemies[1].hp, 900.0);
    }

    #[test]
    fn test_cleave_uses_square_radius() {
        let mut stats = base_stats();
        stats.cleave_pct = 0.5;
        let mut enemies = vec![enemy(1, 60.0, 50.0), enemy(2, 79.0, 69.0), enemy(3, 81.0, 50.0)];
        let hit = hero_strike(&stats, &mut enemies, 0, &mut test_rng());
        assert_eq!(hit.cleaved, 1);
        assert_eq!(enemies[1].hp, 1_000.0 - (hit.damage * 0.5).floor());
        assert_eq!(enemies[2].hp, 1_000.0);
    }

    #[test]
    fn test_mana_void_picks_largest_deficit() {
        let mut enemies = vec![enemy(1, 60.0, 50.0), enemy(2, 70.0, 50.0)];
        enemies[1].max_mana = 400.0;
        let idx = mana_void_target(&enemies).unwrap();
        assert_eq!(idx, 1);
        let damage = apply_mana_void(&mut enemies[idx], 1, 1_000);
        assert_eq!(damage, 300.0 * 0.8);
        assert_eq!(enemies[1].stunned_until_ms, 2_300);
    }

    #[test]
    fn test_mana_void_minimum_damage() {
        let mut target = enemy(1, 60.0, 50.0);
        assert_eq!(apply_mana_void(&mut target, 3, 0), 50.0);
    }

    #[test]
    fn test_counterspell_radius_and_clamp() {
        let mut enemies = vec![enemy(1, 40.0, 50.0), enemy(2, 90.0, 50.0)];
        assert_eq!(apply_counterspell(&mut enemies, 20.0, 50.0), 1);
        assert_eq!(enemies[0].mana, 0.0);
        assert_eq!(enemies[1].mana, 100.0);
    }

    #[test]
    fn test_enemies_target_nearest_of_hero_and_illusions() {
        let stats = base_stats();
        let attacker = enemy(1, 60.0, 50.0);
        let illusions = spawn_illusions(55.0, 50.0, 500.0, &stats, 1, 0, &mut test_rng());
        assert!(matches!(
            enemy_target(&attacker, 20.0, 50.0, &illusions, 0),
            EnemyTarget::Illusion(_)
        ));
        // Expired illusions are ignored
        assert_eq!(enemy_target(&attacker, 20.0, 50.0, &illusions, 20_000), EnemyTarget::Hero);
    }

    #[test]
    fn test_illusions_take_triple_damage() {
        assert_eq!(illusion_damage_taken(100.0, 0.0, 3.0), 300.0);
        assert_eq!(illusion_damage_taken(0.1, 0.0, 3.0), 1.0);
    }

    #[test]
    fn test_manta_illusion_stats() {
        let stats = base_stats();
        let illusions = spawn_illusions(20.0, 50.0, 321.0, &stats, 5, 100, &mut test_rng());
        assert_eq!(illusions.len(), 2);
        for ill in &illusions {
            assert_eq!(ill.hp, 321.0);
            assert_eq!(ill.max_hp, stats.hp_max);
            assert_eq!(ill.damage, (stats.damage * 0.33).floor());
            assert_eq!(ill.duration_ms, 20_000);
            assert!((ill.x - 20.0).abs() <= 10.0);
        }
        assert_eq!(illusions[1].id, 6);
    }
}
