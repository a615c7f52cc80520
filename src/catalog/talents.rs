//! In-run talents, one choice per milestone level.

use super::bonus::StatBonus;
use super::skills::SkillId;
use serde::{Deserialize, Serialize};

/// Levels at which a talent choice opens up.
pub const TALENT_MILESTONES: [u32; 4] = [10, 15, 20, 25];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentId {
    T10Left,
    T10Right,
    T15Left,
    T15Right,
    T20Left,
    T20Right,
    T25Left,
    T25Right,
}

/// Flat change to a skill's cooldown, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownMod {
    pub skill: SkillId,
    pub delta_secs: f64,
}

#[derive(Debug, Clone)]
pub struct TalentDef {
    pub id: TalentId,
    pub milestone: u32,
    pub name: &'static str,
    pub stats: StatBonus,
    pub cooldown_mod: Option<CooldownMod>,
}

pub(super) fn talent_table() -> Vec<TalentDef> {
    use TalentId::*;

    let talent = |id, milestone, name, stats| TalentDef {
        id,
        milestone,
        name,
        stats,
        cooldown_mod: None,
    };

    vec![
        talent(T10Left, 10, "+9 Strength", StatBonus { strength: 9.0, ..StatBonus::NONE }),
        talent(T10Right, 10, "+250 Mana", StatBonus { mana_max: 250.0, ..StatBonus::NONE }),
        // Blink is locked, so the stun talent has nothing to modify
        talent(T15Left, 15, "+0.5s Blink Stun", StatBonus::NONE),
        talent(T15Right, 15, "+15 Agility", StatBonus { agility: 15.0, ..StatBonus::NONE }),
        talent(T20Left, 20, "+150 Mana Void Radius", StatBonus::NONE),
        TalentDef {
            cooldown_mod: Some(CooldownMod {
                skill: SkillId::Blink,
                delta_secs: -1.0,
            }),
            ..talent(T20Right, 20, "-1s Blink Cooldown", StatBonus::NONE)
        },
        TalentDef {
            cooldown_mod: Some(CooldownMod {
                skill: SkillId::ManaVoid,
                delta_secs: -50.0,
            }),
            ..talent(T25Left, 25, "-50s Mana Void Cooldown", StatBonus::NONE)
        },
        talent(
            T25Right,
            25,
            "+20% Counterspell Evasion",
            StatBonus { evasion: 0.2, ..StatBonus::NONE },
        ),
    ]
}
