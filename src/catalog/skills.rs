//! Hero skills.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    ManaBreak,
    Blink,
    Counterspell,
    ManaVoid,
}

impl SkillId {
    /// Catalog order; also the order auto-cast tries active skills in.
    pub const ALL: [SkillId; 4] = [
        SkillId::ManaBreak,
        SkillId::Blink,
        SkillId::Counterspell,
        SkillId::ManaVoid,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    Passive,
    Active,
    /// Kept in the catalog (talents and prestige nodes still reference it)
    /// but can never be leveled or cast.
    Locked,
}

#[derive(Debug, Clone)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: &'static str,
    pub kind: SkillKind,
    pub max_level: u32,
    pub cooldown_secs: f64,
    pub mana_cost: f64,
}

// Per-level parameters, indexed by level - 1
pub const COUNTERSPELL_PASSIVE_EVASION: [f64; 4] = [0.15, 0.25, 0.35, 0.45];
pub const MANA_VOID_DAMAGE_PER_MISSING_MANA: [f64; 3] = [0.8, 0.95, 1.1];
pub const MANA_VOID_STUN_SECS: [f64; 3] = [1.3, 1.5, 1.8];

/// Looks up a per-level parameter, clamping to the last entry.
pub fn level_param(table: &[f64], level: u32) -> f64 {
    if table.is_empty() || level == 0 {
        return 0.0;
    }
    let idx = ((level - 1) as usize).min(table.len() - 1);
    table[idx]
}

pub(super) fn skill_table() -> Vec<SkillDef> {
    vec![
        SkillDef {
            id: SkillId::ManaBreak,
            name: "Mana Break",
            kind: SkillKind::Passive,
            max_level: 4,
            cooldown_secs: 0.0,
            mana_cost: 0.0,
        },
        SkillDef {
            id: SkillId::Blink,
            name: "Blink",
            kind: SkillKind::Locked,
            max_level: 4,
            cooldown_secs: 9999.0,
            mana_cost: 0.0,
        },
        SkillDef {
            id: SkillId::Counterspell,
            name: "Counterspell",
            kind: SkillKind::Active,
            max_level: 4,
            cooldown_secs: 15.0,
            mana_cost: 45.0,
        },
        SkillDef {
            id: SkillId::ManaVoid,
            name: "Mana Void",
            kind: SkillKind::Active,
            max_level: 3,
            cooldown_secs: 70.0,
            mana_cost: 150.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_param_clamps() {
        assert_eq!(level_param(&COUNTERSPELL_PASSIVE_EVASION, 0), 0.0);
        assert_eq!(level_param(&COUNTERSPELL_PASSIVE_EVASION, 1), 0.15);
        assert_eq!(level_param(&COUNTERSPELL_PASSIVE_EVASION, 4), 0.45);
        assert_eq!(level_param(&COUNTERSPELL_PASSIVE_EVASION, 9), 0.45);
        assert_eq!(level_param(&MANA_VOID_STUN_SECS, 3), 1.8);
    }

    #[test]
    fn test_table_matches_id_order() {
        let table = skill_table();
        assert_eq!(table.len(), SkillId::ALL.len());
        for (def, id) in table.iter().zip(SkillId::ALL) {
            assert_eq!(def.id, id);
        }
    }
}
