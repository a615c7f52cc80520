//! Partial stat records and the rules for folding them together.
//!
//! Every bonus source (equipped items, chosen talents, unlocked prestige
//! nodes) contributes a [`StatBonus`]. Sources are folded into a running
//! total with a fixed rule per field:
//!
//! | Field                                   | Rule                          |
//! |-----------------------------------------|-------------------------------|
//! | attributes, damage, armor, attack speed | additive                      |
//! | hp/mana max and regen, armor corruption | additive                      |
//! | lifesteal, gold/xp gain, shop discount  | additive                      |
//! | illusion multipliers, mana burn mult    | additive                      |
//! | cleave, crit chance, crit damage        | maximum                       |
//! | hp regen percent                        | maximum                       |
//! | true strike                             | logical OR                    |
//! | chain lightning                         | last source wins              |
//! | evasion                                 | collected, stacked 1 − Π(1−e) |

/// Chain Lightning proc: chance per hit and damage per target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainLightning {
    pub chance: f64,
    pub damage: f64,
}

/// A partial set of stats granted by one source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatBonus {
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
    pub armor_corruption: f64,
    pub lifesteal: f64,
    pub gold_gain_pct: f64,
    pub xp_gain_pct: f64,
    pub shop_discount_pct: f64,
    pub illusion_damage_mult: f64,
    pub illusion_duration_mult: f64,
    pub mana_burn_mult: f64,
    pub cleave_pct: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub hp_regen_pct: f64,
    pub evasion: f64,
    pub true_strike: bool,
    pub chain_lightning: Option<ChainLightning>,
}

impl StatBonus {
    pub const NONE: StatBonus = StatBonus {
        strength: 0.0,
        agility: 0.0,
        intelligence: 0.0,
        damage: 0.0,
        armor: 0.0,
        attack_speed: 0.0,
        hp_max: 0.0,
        hp_regen: 0.0,
        mana_max: 0.0,
        mana_regen: 0.0,
        armor_corruption: 0.0,
        lifesteal: 0.0,
        gold_gain_pct: 0.0,
        xp_gain_pct: 0.0,
        shop_discount_pct: 0.0,
        illusion_damage_mult: 0.0,
        illusion_duration_mult: 0.0,
        mana_burn_mult: 0.0,
        cleave_pct: 0.0,
        crit_chance: 0.0,
        crit_damage: 0.0,
        hp_regen_pct: 0.0,
        evasion: 0.0,
        true_strike: false,
        chain_lightning: None,
    };
}

impl Default for StatBonus {
    fn default() -> Self {
        Self::NONE
    }
}

/// Running total of all bonus sources.
#[derive(Debug, Clone, Default)]
pub struct BonusTotals {
    pub total: StatBonus,
    pub evasion_sources: Vec<f64>,
}

impl BonusTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one source into the total using the per-field rules above.
    pub fn fold(&mut self, bonus: &StatBonus) {
        let t = &mut self.total;

        t.strength += bonus.strength;
        t.agility += bonus.agility;
        t.intelligence += bonus.intelligence;
        t.damage += bonus.damage;
        t.armor += bonus.armor;
        t.attack_speed += bonus.attack_speed;
        t.hp_max += bonus.hp_max;
        t.hp_regen += bonus.hp_regen;
        t.mana_max += bonus.mana_max;
        t.mana_regen += bonus.mana_regen;
        t.armor_corruption += bonus.armor_corruption;
        t.lifesteal += bonus.lifesteal;
        t.gold_gain_pct += bonus.gold_gain_pct;
        t.xp_gain_pct += bonus.xp_gain_pct;
        t.shop_discount_pct += bonus.shop_discount_pct;
        t.illusion_damage_mult += bonus.illusion_damage_mult;
        t.illusion_duration_mult += bonus.illusion_duration_mult;
        t.mana_burn_mult += bonus.mana_burn_mult;

        t.cleave_pct = t.cleave_pct.max(bonus.cleave_pct);
        t.crit_chance = t.crit_chance.max(bonus.crit_chance);
        t.crit_damage = t.crit_damage.max(bonus.crit_damage);
        t.hp_regen_pct = t.hp_regen_pct.max(bonus.hp_regen_pct);

        t.true_strike |= bonus.true_strike;

        if bonus.chain_lightning.is_some() {
            t.chain_lightning = bonus.chain_lightning;
        }

        if bonus.evasion > 0.0 {
            self.evasion_sources.push(bonus.evasion);
        }
    }

    /// Adds an evasion source that does not come from a [`StatBonus`].
    pub fn push_evasion(&mut self, evasion: f64) {
        if evasion > 0.0 {
            self.evasion_sources.push(evasion);
        }
    }
}
