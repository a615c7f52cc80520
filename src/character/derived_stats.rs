use crate::catalog::{
    catalog, level_param, BonusTotals, ChainLightning, SkillId, COUNTERSPELL_PASSIVE_EVASION,
};
use crate::core::combat_math::stack_evasion;
use crate::core::constants::*;
use crate::core::game_state::HeroState;

/// Effective hero stats after every bonus source is folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
    pub damage: f64,
    pub armor: f64,
    pub attack_speed: f64,
    pub hp_max: f64,
    pub hp_regen: f64,
    pub mana_max: f64,
    pub mana_regen: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    /// Combined chance in `[0, 1)`
    pub evasion: f64,
    pub cleave_pct: f64,
    /// Reported only; hero attacks ignore enemy armor
    pub armor_corruption: f64,
    pub true_strike: bool,
    pub chain_lightning: Option<ChainLightning>,
    pub hp_regen_pct: f64,
    pub lifesteal: f64,
    pub gold_gain_pct: f64,
    pub xp_gain_pct: f64,
    pub shop_discount_pct: f64,
    pub illusion_damage_mult: f64,
    pub illusion_duration_mult: f64,
    pub mana_burn_mult: f64,
}

impl Stats {
    /// Attack interval in milliseconds.
    pub fn attack_interval_ms(&self) -> f64 {
        if self.attack_speed <= 0.0 {
            return f64::INFINITY;
        }
        1000.0 / self.attack_speed
    }
}

/// Computes effective stats for `hero` at engine time `now_ms`.
///
/// Pure: the same hero and timestamp always give the same result. Sources
/// are folded in a fixed order (inventory, talents, prestige nodes,
/// passive skills) using the rules in [`crate::catalog::bonus`]. The
/// backpack contributes nothing.
pub fn compute_stats(hero: &HeroState, now_ms: u64) -> Stats {
    let cat = catalog();
    let level_steps = hero.level.saturating_sub(1) as f64;
    let tomes = &hero.consumed_tomes;

    let base_str = BASE_STRENGTH + level_steps * STRENGTH_PER_LEVEL + tomes.strength as f64;
    let base_agi = BASE_AGILITY + level_steps * AGILITY_PER_LEVEL + tomes.agility as f64;
    let base_int =
        BASE_INTELLIGENCE + level_steps * INTELLIGENCE_PER_LEVEL + tomes.intelligence as f64;

    let mut totals = BonusTotals::new();

    for &item in &hero.inventory {
        totals.fold(&cat.item(item).stats);
    }
    for &talent in hero.talents.values() {
        totals.fold(&cat.talent(talent).stats);
    }
    for &node in &hero.prestige.unlocked_nodes {
        totals.fold(&cat.node(node).stats);
    }

    let counterspell = hero.skill_level(SkillId::Counterspell);
    if counterspell > 0 {
        totals.push_evasion(level_param(&COUNTERSPELL_PASSIVE_EVASION, counterspell));
    }

    let extra = &totals.total;
    let evasion = stack_evasion(&totals.evasion_sources);

    let buffs = &hero.buffs;
    let mut buff_attack_speed = 0.0;
    if now_ms < buffs.blink_until {
        buff_attack_speed += BUFF_ATTACK_SPEED_BONUS;
    }
    if now_ms < buffs.haste_until {
        buff_attack_speed += BUFF_ATTACK_SPEED_BONUS;
    }
    let buff_damage_mult = if now_ms < buffs.dd_until {
        BUFF_DAMAGE_MULTIPLIER
    } else {
        1.0
    };
    let regen_active = now_ms < buffs.regen_until;

    let strength = (base_str + extra.strength).floor();
    let agility = (base_agi + extra.agility).floor();
    let intelligence = (base_int + extra.intelligence).floor();

    let hp_max = (HP_BASE + strength * HP_PER_STRENGTH + extra.hp_max).floor();
    // Mana max bonuses from sources are not applied
    let mana_max = (MANA_BASE + intelligence * MANA_PER_INTELLIGENCE).floor();

    let mut hp_regen = BASE_HP_REGEN
        + strength * HP_REGEN_PER_STRENGTH
        + extra.hp_regen
        + extra.hp_regen_pct * hp_max;
    let mut mana_regen =
        BASE_MANA_REGEN + intelligence * MANA_REGEN_PER_INTELLIGENCE + extra.mana_regen;
    if regen_active {
        hp_regen += BUFF_REGEN_HP_PER_SEC;
        mana_regen += BUFF_REGEN_MANA_PER_SEC;
    }

    Stats {
        strength,
        agility,
        intelligence,
        damage: ((BASE_DAMAGE + agility + extra.damage) * buff_damage_mult).floor(),
        armor: (BASE_ARMOR + agility * ARMOR_PER_AGILITY + extra.armor).floor(),
        attack_speed: BASE_ATTACK_SPEED
            + agility * ATTACK_SPEED_PER_AGILITY
            + extra.attack_speed
            + buff_attack_speed,
        hp_max,
        hp_regen,
        mana_max,
        mana_regen,
        crit_chance: extra.crit_chance,
        crit_damage: extra.crit_damage.max(BASE_CRIT_DAMAGE),
        evasion,
        cleave_pct: extra.cleave_pct,
        armor_corruption: extra.armor_corruption,
        true_strike: extra.true_strike,
        chain_lightning: extra.chain_lightning,
        hp_regen_pct: extra.hp_regen_pct,
        lifesteal: extra.lifesteal,
        gold_gain_pct: extra.gold_gain_pct,
        xp_gain_pct: extra.xp_gain_pct,
        shop_discount_pct: extra.shop_discount_pct,
        illusion_damage_mult: 1.0 + extra.illusion_damage_mult,
        illusion_duration_mult: 1.0 + extra.illusion_duration_mult,
        mana_burn_mult: 1.0 + extra.mana_burn_mult,
    }
}

/// Effective cooldown of `skill` in milliseconds.
///
/// Flat modifiers from chosen talents and unlocked nodes are summed onto
/// the base cooldown and clamped at zero; the Archmage multiplier applies
/// after. Free-cast mode makes every cooldown zero.
pub fn skill_cooldown_ms(hero: &HeroState, skill: SkillId) -> u64 {
    if hero.wtf_mode {
        return 0;
    }
    let cat = catalog();
    let mut secs = cat.skill(skill).cooldown_secs;

    let talent_mods = hero.talents.values().filter_map(|&t| cat.talent(t).cooldown_mod);
    let node_mods = hero
        .prestige
        .unlocked_nodes
        .iter()
        .filter_map(|&n| cat.node(n).cooldown_mod);
    for m in talent_mods.chain(node_mods) {
        if m.skill == skill {
            secs += m.delta_secs;
        }
    }
    secs = secs.max(0.0);

    for &node in &hero.prestige.unlocked_nodes {
        if let Some(mult) = cat.node(node).cooldown_multiplier {
            secs *= mult;
        }
    }

    (secs * 1000.0).round() as u64
}

/// Mana cost of `skill`; zero in free-cast mode.
pub fn skill_mana_cost(hero: &HeroState, skill: SkillId) -> f64 {
    if hero.wtf_mode {
        0.0
    } else {
        catalog().skill(skill).mana_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemId, NodeId, TalentId};

    #[test]
    fn test_level_one_base_stats() {
        let hero = HeroState::new();
        let stats = compute_stats(&hero, 0);
        assert_eq!(stats.strength, 23.0);
        assert_eq!(stats.agility, 26.0);
        assert_eq!(stats.intelligence, 15.0);
        assert_eq!(stats.hp_max, 200.0 + 23.0 * 22.0);
        assert_eq!(stats.mana_max, 75.0 + 15.0 * 12.0);
        assert_eq!(stats.damage, 49.0 + 26.0);
        // 3 + 26 * 0.16 = 7.16
        assert_eq!(stats.armor, 7.0);
        assert!((stats.attack_speed - 1.11).abs() < 1e-9);
        assert_eq!(stats.evasion, 0.0);
        assert_eq!(stats.crit_damage, 1.0);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let mut hero = HeroState::new();
        hero.level = 12;
        hero.inventory = vec![ItemId::Butterfly, ItemId::Daedalus];
        hero.prestige.unlocked_nodes.insert(NodeId::Surv3B);
        assert_eq!(compute_stats(&hero, 1_000), compute_stats(&hero, 1_000));
    }

    #[test]
    fn test_backpack_contributes_nothing() {
        let mut hero = HeroState::new();
        let before = compute_stats(&hero, 0);
        hero.backpack.push(ItemId::DemonEdge);
        assert_eq!(compute_stats(&hero, 0), before);
    }

    #[test]
    fn test_evasion_sources_stack_multiplicatively() {
        let mut hero = HeroState::new();
        hero.talents.insert(25, TalentId::T25Right);
        hero.inventory.push(ItemId::Butterfly);
        let stats = compute_stats(&hero, 0);
        // 1 - 0.8 * 0.65
        assert!((stats.evasion - 0.48).abs() < 1e-9);
    }

    #[test]
    fn test_counterspell_passive_evasion() {
        let mut hero = HeroState::new();
        hero.skill_mut(SkillId::Counterspell).unwrap().level = 1;
        assert!((compute_stats(&hero, 0).evasion - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_buffs_respect_expiry() {
        let mut hero = HeroState::new();
        hero.buffs.dd_until = 10_000;
        hero.buffs.haste_until = 10_000;
        let active = compute_stats(&hero, 9_999);
        let expired = compute_stats(&hero, 10_000);
        assert_eq!(active.damage, expired.damage * 2.0);
        assert!((active.attack_speed - expired.attack_speed - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_regen_includes_percent_of_max_hp() {
        let mut hero = HeroState::new();
        hero.inventory.push(ItemId::Heart);
        let stats = compute_stats(&hero, 0);
        let expected = 1.5 + stats.strength * 0.1 + 0.016 * stats.hp_max;
        assert!((stats.hp_regen - expected).abs() < 1e-9);
    }

    #[test]
    fn test_crit_damage_takes_best_source() {
        let mut hero = HeroState::new();
        hero.inventory = vec![ItemId::Crystalys, ItemId::Daedalus];
        let stats = compute_stats(&hero, 0);
        assert_eq!(stats.crit_damage, 2.25);
        assert_eq!(stats.crit_chance, 0.30);
    }

    #[test]
    fn test_mana_void_cooldown_modifiers() {
        let mut hero = HeroState::new();
        assert_eq!(skill_cooldown_ms(&hero, SkillId::ManaVoid), 70_000);

        hero.talents.insert(25, TalentId::T25Left);
        assert_eq!(skill_cooldown_ms(&hero, SkillId::ManaVoid), 20_000);

        hero.prestige.unlocked_nodes.insert(NodeId::Abil3A);
        // 70 - 50 - 30 clamps at zero
        assert_eq!(skill_cooldown_ms(&hero, SkillId::ManaVoid), 0);

        hero.talents.clear();
        hero.prestige.unlocked_nodes.insert(NodeId::AbilCap);
        assert_eq!(skill_cooldown_ms(&hero, SkillId::ManaVoid), 30_000);
    }

    #[test]
    fn test_wtf_mode_is_free() {
        let mut hero = HeroState::new();
        hero.wtf_mode = true;
        assert_eq!(skill_cooldown_ms(&hero, SkillId::Counterspell), 0);
        assert_eq!(skill_mana_cost(&hero, SkillId::ManaVoid), 0.0);
    }
}
