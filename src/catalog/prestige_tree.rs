//! Permanent prestige tree, bought with Ascension Points across rebirths.

use super::bonus::StatBonus;
use super::skills::SkillId;
use super::talents::CooldownMod;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeId {
    #[serde(rename = "root")]
    Root,
    #[serde(rename = "off_1")]
    Off1,
    #[serde(rename = "off_2")]
    Off2,
    #[serde(rename = "off_3_a")]
    Off3A,
    #[serde(rename = "off_3_b")]
    Off3B,
    #[serde(rename = "off_cap")]
    OffCap,
    #[serde(rename = "eco_1")]
    Eco1,
    #[serde(rename = "eco_2")]
    Eco2,
    #[serde(rename = "eco_3_a")]
    Eco3A,
    #[serde(rename = "eco_3_b")]
    Eco3B,
    #[serde(rename = "eco_cap")]
    EcoCap,
    #[serde(rename = "surv_1")]
    Surv1,
    #[serde(rename = "surv_2")]
    Surv2,
    #[serde(rename = "surv_3_a")]
    Surv3A,
    #[serde(rename = "surv_3_b")]
    Surv3B,
    #[serde(rename = "surv_cap")]
    SurvCap,
    #[serde(rename = "abil_1")]
    Abil1,
    #[serde(rename = "abil_2")]
    Abil2,
    #[serde(rename = "abil_3_a")]
    Abil3A,
    #[serde(rename = "abil_3_b")]
    Abil3B,
    #[serde(rename = "abil_cap")]
    AbilCap,
}

impl NodeId {
    pub const COUNT: usize = 21;

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
pub struct PrestigeNodeDef {
    pub id: NodeId,
    pub name: &'static str,
    pub cost: u32,
    /// Any one of these unlocks the node. Empty for the root.
    pub requires: &'static [NodeId],
    /// Mutually exclusive sibling.
    pub excludes: Option<NodeId>,
    pub stats: StatBonus,
    pub cooldown_mod: Option<CooldownMod>,
    /// Multiplier applied to every skill cooldown once unlocked.
    pub cooldown_multiplier: Option<f64>,
}

impl PrestigeNodeDef {
    fn new(
        id: NodeId,
        name: &'static str,
        cost: u32,
        requires: &'static [NodeId],
        stats: StatBonus,
    ) -> Self {
        Self {
            id,
            name,
            cost,
            requires,
            excludes: None,
            stats,
            cooldown_mod: None,
            cooldown_multiplier: None,
        }
    }

    fn excluding(mut self, sibling: NodeId) -> Self {
        self.excludes = Some(sibling);
        self
    }

    /// Direct children of the root may be bought without it.
    pub fn requires_only_root(&self) -> bool {
        self.requires == [NodeId::Root]
    }
}

pub(super) fn node_table() -> Vec<PrestigeNodeDef> {
    use NodeId::*;

    vec![
        PrestigeNodeDef::new(
            Root,
            "Awakening",
            1,
            &[],
            StatBonus { strength: 3.0, agility: 3.0, intelligence: 3.0, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Off1,
            "Sharpness",
            2,
            &[Root],
            StatBonus { damage: 12.0, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Off2,
            "Alacrity",
            3,
            &[Off1],
            StatBonus { attack_speed: 0.15, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Off3A,
            "Lethality",
            5,
            &[Off2],
            StatBonus { crit_chance: 0.10, crit_damage: 1.25, ..StatBonus::NONE },
        )
        .excluding(Off3B),
        PrestigeNodeDef::new(
            Off3B,
            "Brute Force",
            5,
            &[Off2],
            StatBonus { damage: 30.0, strength: 5.0, ..StatBonus::NONE },
        )
        .excluding(Off3A),
        PrestigeNodeDef::new(
            OffCap,
            "God Slayer",
            15,
            &[Off3A, Off3B],
            StatBonus { damage: 150.0, true_strike: true, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Eco1,
            "Greed",
            2,
            &[Root],
            StatBonus { gold_gain_pct: 0.10, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Eco2,
            "Wisdom",
            3,
            &[Eco1],
            StatBonus { xp_gain_pct: 0.15, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Eco3A,
            "Hand of Midas",
            5,
            &[Eco2],
            StatBonus { gold_gain_pct: 0.25, ..StatBonus::NONE },
        )
        .excluding(Eco3B),
        PrestigeNodeDef::new(
            Eco3B,
            "Haggling",
            5,
            &[Eco2],
            StatBonus { shop_discount_pct: 0.10, ..StatBonus::NONE },
        )
        .excluding(Eco3A),
        PrestigeNodeDef::new(
            EcoCap,
            "Tycoon",
            15,
            &[Eco3A, Eco3B],
            StatBonus { shop_discount_pct: 0.15, gold_gain_pct: 0.20, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Surv1,
            "Thick Skin",
            2,
            &[Root],
            StatBonus { armor: 3.0, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Surv2,
            "Vitality",
            3,
            &[Surv1],
            StatBonus { hp_max: 300.0, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Surv3A,
            "Vampirism",
            5,
            &[Surv2],
            StatBonus { lifesteal: 0.08, ..StatBonus::NONE },
        )
        .excluding(Surv3B),
        PrestigeNodeDef::new(
            Surv3B,
            "Blur",
            5,
            &[Surv2],
            StatBonus { evasion: 0.10, ..StatBonus::NONE },
        )
            .excluding(Surv3A),
        PrestigeNodeDef::new(
            SurvCap,
            "Immortality",
            15,
            &[Surv3A, Surv3B],
            StatBonus { hp_regen_pct: 0.025, ..StatBonus::NONE },
        ),
        PrestigeNodeDef::new(
            Abil1,
            "Focus",
            2,
            &[Root],
            StatBonus { intelligence: 10.0, ..StatBonus::NONE },
        ),
        // Advertised as -10% cooldowns but grants nothing
        PrestigeNodeDef::new(
            Abil2,
            "Mystic",
            3,
            &[Abil1],
            StatBonus::NONE,
        ),
        PrestigeNodeDef {
            cooldown_mod: Some(CooldownMod {
                skill: SkillId::ManaVoid,
                delta_secs: -30.0,
            }),
            ..PrestigeNodeDef::new(
                Abil3A,
                "Void Mastery",
                5,
                &[Abil2],
                StatBonus::NONE,
            )
            .excluding(Abil3B)
        },
        PrestigeNodeDef {
            cooldown_mod: Some(CooldownMod {
                skill: SkillId::Blink,
                delta_secs: -2.0,
            }),
            ..PrestigeNodeDef::new(
                Abil3B,
                "Blink Mastery",
                5,
                &[Abil2],
                StatBonus::NONE,
            )
            .excluding(Abil3A)
        },
        PrestigeNodeDef {
            cooldown_multiplier: Some(crate::core::constants::ARCHMAGE_COOLDOWN_MULTIPLIER),
            ..PrestigeNodeDef::new(
                AbilCap,
                "Archmage",
                15,
                &[Abil3A, Abil3B],
                StatBonus::NONE,
            )
        },
    ]
}
