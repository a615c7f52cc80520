//! Shop items and crafting recipes.

use super::bonus::{ChainLightning, StatBonus};
use serde::{Deserialize, Serialize};

/// Stable item identifier. Serialized as snake_case so saves stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemId {
    // Basic components
    MithrilHammer,
    BlightStone,
    Claymore,
    TalismanEvasion,
    Eaglesong,
    BeltStrength,
    BandElvenskin,
    OgreAxe,
    BladeAlacrity,
    UltimateOrb,
    RecipeSange,
    RecipeYasha,
    RecipeManta,
    Broadsword,
    BladesAttack,
    RecipeCrystalys,
    DemonEdge,
    RecipeDaedalus,
    BootsSpeed,
    GlovesHaste,
    Javelin,
    Hyperstone,
    VitalityBooster,
    Reaver,
    RecipeMjollnir,
    RecipeMkb,
    RecipeHeart,
    // Consumables
    TomeStr,
    TomeAgi,
    TomeInt,
    // Crafted
    Sange,
    Yasha,
    Crystalys,
    Maelstrom,
    PowerTreads,
    Desolator,
    Butterfly,
    SangeYasha,
    Manta,
    Daedalus,
    Mjollnir,
    Mkb,
    Heart,
}

impl ItemId {
    pub const COUNT: usize = 43;

    /// Arena index of this item.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Active effect an equipped item triggers on its own cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemActive {
    /// Spawns illusions of the hero
    Illusions,
}

#[derive(Debug, Clone)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: &'static str,
    /// Own price. Zero for items that only come from crafting.
    pub cost: u64,
    pub stats: StatBonus,
    pub is_recipe: bool,
    pub is_consumable: bool,
    pub components: &'static [ItemId],
    pub active: Option<(ItemActive, u64)>,
}

impl ItemDef {
    fn basic(id: ItemId, name: &'static str, cost: u64, stats: StatBonus) -> Self {
        Self {
            id,
            name,
            cost,
            stats,
            is_recipe: false,
            is_consumable: false,
            components: &[],
            active: None,
        }
    }

    fn recipe(id: ItemId, name: &'static str, cost: u64) -> Self {
        Self {
            is_recipe: true,
            ..Self::basic(id, name, cost, StatBonus::NONE)
        }
    }

    fn tome(id: ItemId, name: &'static str, stats: StatBonus) -> Self {
        Self {
            is_consumable: true,
            ..Self::basic(id, name, 10_000, stats)
        }
    }

    fn crafted(
        id: ItemId,
        name: &'static str,
        stats: StatBonus,
        components: &'static [ItemId],
    ) -> Self {
        Self {
            components,
            ..Self::basic(id, name, 0, stats)
        }
    }

    pub fn is_craftable(&self) -> bool {
        !self.components.is_empty()
    }
}

/// Builds the item arena in [`ItemId`] order.
pub(super) fn item_table() -> Vec<ItemDef> {
    use ItemId::*;

    vec![
        ItemDef::basic(
            MithrilHammer,
            "Mithril Hammer",
            1600,
            StatBonus { damage: 24.0, ..StatBonus::NONE },
        ),
        ItemDef::basic(
            BlightStone,
            "Blight Stone",
            300,
            StatBonus { armor_corruption: 2.0, ..StatBonus::NONE },
        ),
        ItemDef::basic(Claymore, "Claymore", 1350, StatBonus { damage: 20.0, ..StatBonus::NONE }),
        ItemDef::basic(
            TalismanEvasion,
            "Talisman of Evasion",
            1300,
            StatBonus { evasion: 0.15, ..StatBonus::NONE },
        ),
        ItemDef::basic(
            Eaglesong,
            "Eaglesong",
            2800,
            StatBonus { agility: 25.0, ..StatBonus::NONE },
        ),
        ItemDef::basic(
            BeltStrength,
            "Belt of Strength",
            450,
            StatBonus { strength: 6.0, ..StatBonus::NONE },
        ),
        ItemDef::basic(
            BandElvenskin,
            "Band of Elvenskin",
            450,
            StatBonus { agility: 6.0, ..StatBonus::NONE },
        ),
        ItemDef::basic(OgreAxe, "Ogre Axe", 1000, StatBonus { strength: 10.0, ..StatBonus::NONE }),
        ItemDef::basic(
            BladeAlacrity,
            "Blade of Alacrity",
            1000,
            StatBonus { agility: 10.0, ..StatBonus::NONE },
        ),
        ItemDef::basic(
            UltimateOrb,
            "Ultimate Orb",
            2100,
            StatBonus { strength: 10.0, agility: 10.0, intelligence: 10.0, ..StatBonus::NONE },
        ),
        ItemDef::recipe(RecipeSange, "Recipe: Sange", 550),
        ItemDef::recipe(RecipeYasha, "Recipe: Yasha", 550),
        ItemDef::recipe(RecipeManta, "Recipe: Manta", 500),
        ItemDef::basic(
            Broadsword,
            "Broadsword",
            1000,
            StatBonus { damage: 15.0, ..StatBonus::NONE },
        ),
        ItemDef::basic(
            BladesAttack,
            "Blades of Attack",
            450,
            StatBonus { damage: 9.0, ..StatBonus::NONE },
        ),
        ItemDef::recipe(RecipeCrystalys, "Recipe: Crystalys", 500),
        ItemDef::basic(
            DemonEdge,
            "Demon Edge",
            2200,
            StatBonus { damage: 40.0, ..StatBonus::NONE },
        ),
        ItemDef::recipe(RecipeDaedalus, "Recipe: Daedalus", 1000),
        ItemDef::basic(BootsSpeed, "Boots of Speed", 500, StatBonus::NONE),
        ItemDef::basic(
            GlovesHaste,
            "Gloves of Haste",
            450,
            StatBonus { attack_speed: 0.20, ..StatBonus::NONE },
        ),
        ItemDef::basic(Javelin, "Javelin", 1100, StatBonus { damage: 10.0, ..StatBonus::NONE }),
        ItemDef::basic(
            Hyperstone,
            "Hyperstone",
            2000,
            StatBonus { attack_speed: 0.6, ..StatBonus::NONE },
        ),
        ItemDef::basic(
            VitalityBooster,
            "Vitality Booster",
            1000,
            StatBonus { hp_max: 250.0, ..StatBonus::NONE },
        ),
        ItemDef::basic(Reaver, "Reaver", 2800, StatBonus { strength: 25.0, ..StatBonus::NONE }),
        ItemDef::recipe(RecipeMjollnir, "Recipe: Mjollnir", 900),
        ItemDef::recipe(RecipeMkb, "Recipe: MKB", 675),
        ItemDef::recipe(RecipeHeart, "Recipe: Heart", 1200),
        ItemDef::tome(
            TomeStr,
            "Tome of Strength",
            StatBonus { strength: 5.0, ..StatBonus::NONE },
        ),
        ItemDef::tome(
            TomeAgi,
            "Tome of Agility",
            StatBonus { agility: 5.0, ..StatBonus::NONE },
        ),
        ItemDef::tome(
            TomeInt,
            "Tome of Intelligence",
            StatBonus { intelligence: 5.0, ..StatBonus::NONE },
        ),
        ItemDef::crafted(
            Sange,
            "Sange",
            StatBonus { strength: 16.0, hp_regen: 4.0, ..StatBonus::NONE },
            &[BeltStrength, OgreAxe, RecipeSange],
        ),
        ItemDef::crafted(
            Yasha,
            "Yasha",
            StatBonus { agility: 16.0, attack_speed: 0.12, ..StatBonus::NONE },
            &[BandElvenskin, BladeAlacrity, RecipeYasha],
        ),
        ItemDef::crafted(
            Crystalys,
            "Crystalys",
            StatBonus { damage: 32.0, crit_chance: 0.30, crit_damage: 1.6, ..StatBonus::NONE },
            &[Broadsword, BladesAttack, RecipeCrystalys],
        ),
        ItemDef::crafted(
            Maelstrom,
            "Maelstrom",
            StatBonus {
                damage: 24.0,
                attack_speed: 0.15,
                chain_lightning: Some(ChainLightning { chance: 0.3, damage: 140.0 }),
                ..StatBonus::NONE
            },
            &[MithrilHammer, Javelin],
        ),
        ItemDef::crafted(
            PowerTreads,
            "Power Treads",
            StatBonus { strength: 10.0, attack_speed: 0.25, ..StatBonus::NONE },
            &[BootsSpeed, GlovesHaste, BeltStrength],
        ),
        ItemDef::crafted(
            Desolator,
            "Desolator",
            StatBonus { damage: 50.0, armor_corruption: 6.0, ..StatBonus::NONE },
            &[MithrilHammer, MithrilHammer, BlightStone],
        ),
        ItemDef::crafted(
            Butterfly,
            "Butterfly",
            StatBonus {
                agility: 35.0,
                damage: 25.0,
                attack_speed: 0.30,
                evasion: 0.35,
                ..StatBonus::NONE
            },
            &[Eaglesong, TalismanEvasion, Claymore],
        ),
        ItemDef::crafted(
            SangeYasha,
            "Sange and Yasha",
            StatBonus {
                strength: 16.0,
                agility: 16.0,
                attack_speed: 0.20,
                damage: 16.0,
                hp_regen: 6.0,
                ..StatBonus::NONE
            },
            &[Sange, Yasha],
        ),
        ItemDef {
            active: Some((ItemActive::Illusions, 30_000)),
            ..ItemDef::crafted(
                Manta,
                "Manta Style",
                StatBonus {
                    strength: 10.0,
                    agility: 26.0,
                    intelligence: 10.0,
                    attack_speed: 0.12,
                    ..StatBonus::NONE
                },
                &[Yasha, UltimateOrb, RecipeManta],
            )
        },
        ItemDef::crafted(
            Daedalus,
            "Daedalus",
            StatBonus { damage: 88.0, crit_chance: 0.30, crit_damage: 2.25, ..StatBonus::NONE },
            &[Crystalys, DemonEdge, RecipeDaedalus],
        ),
        ItemDef::crafted(
            Mjollnir,
            "Mjollnir",
            StatBonus {
                damage: 24.0,
                attack_speed: 0.70,
                chain_lightning: Some(ChainLightning { chance: 0.3, damage: 200.0 }),
                ..StatBonus::NONE
            },
            &[Maelstrom, Hyperstone, RecipeMjollnir],
        ),
        ItemDef::crafted(
            Mkb,
            "Monkey King Bar",
            StatBonus { damage: 45.0, attack_speed: 0.45, true_strike: true, ..StatBonus::NONE },
            &[DemonEdge, Javelin, RecipeMkb],
        ),
        ItemDef::crafted(
            Heart,
            "Heart of Tarrasque",
            StatBonus { strength: 45.0, hp_max: 250.0, hp_regen_pct: 0.016, ..StatBonus::NONE },
            &[Reaver, VitalityBooster, RecipeHeart],
        ),
    ]
}
