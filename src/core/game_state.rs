//! The persisted hero aggregate.
//!
//! Every struct here carries `#[serde(default)]`, so a save missing any
//! field (or a whole sub-record) decodes with that part reset to the
//! fresh-hero value while the rest of the record is kept.

use super::constants::*;
use crate::catalog::{catalog, ItemId, NodeId, SkillId, TalentId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Level and last cast of one hero skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillState {
    pub id: SkillId,
    pub level: u32,
    /// Engine clock of the last cast, None if never cast
    pub last_cast_ms: Option<u64>,
}

impl Default for SkillState {
    fn default() -> Self {
        Self {
            id: SkillId::ManaBreak,
            level: 0,
            last_cast_ms: None,
        }
    }
}

/// Expiry timestamps of timed buffs. Zero means never applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Buffs {
    pub blink_until: u64,
    pub haste_until: u64,
    pub dd_until: u64,
    pub regen_until: u64,
}

impl Buffs {
    /// Earliest expiry still in the future, if any.
    pub fn next_expiry(&self, now_ms: u64) -> Option<u64> {
        [self.blink_until, self.haste_until, self.dd_until, self.regen_until]
            .into_iter()
            .filter(|&t| t > now_ms)
            .min()
    }
}

/// Attribute points gained from consumed tomes. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumedTomes {
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
}

/// Meta-progression that survives rebirth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrestigeData {
    pub points: u32,
    pub total_points_earned: u32,
    pub rebirth_count: u32,
    pub unlocked_nodes: BTreeSet<NodeId>,
}

impl PrestigeData {
    pub fn is_unlocked(&self, node: NodeId) -> bool {
        self.unlocked_nodes.contains(&node)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroState {
    pub level: u32,
    pub xp: u64,
    pub gold: u64,
    pub hp: f64,
    pub mana: f64,
    pub skill_points: u32,
    pub skills: Vec<SkillState>,
    /// Active equipment, at most [`INVENTORY_SLOTS`]
    pub inventory: Vec<ItemId>,
    /// Inactive storage, at most [`BACKPACK_SLOTS`]
    pub backpack: Vec<ItemId>,
    /// Item id to last proc timestamp
    pub item_cooldowns: BTreeMap<ItemId, u64>,
    pub is_dead: bool,
    pub respawn_timer_secs: f64,
    pub last_attack_ms: u64,
    pub buffs: Buffs,
    pub x: f64,
    pub y: f64,
    /// Milestone level to chosen talent
    pub talents: BTreeMap<u32, TalentId>,
    pub prestige: PrestigeData,
    pub auto_cast: bool,
    pub auto_progress: bool,
    pub highest_wave: u32,
    pub god_mode: bool,
    pub wtf_mode: bool,
    pub consumed_tomes: ConsumedTomes,
}

impl Default for HeroState {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            gold: STARTING_GOLD,
            hp: STARTING_HP,
            mana: STARTING_MANA,
            skill_points: STARTING_SKILL_POINTS,
            skills: fresh_skills(),
            inventory: Vec::new(),
            backpack: Vec::new(),
            item_cooldowns: BTreeMap::new(),
            is_dead: false,
            respawn_timer_secs: 0.0,
            last_attack_ms: 0,
            buffs: Buffs::default(),
            x: HERO_SPAWN_X,
            y: HERO_SPAWN_Y,
            talents: BTreeMap::new(),
            prestige: PrestigeData::default(),
            auto_cast: false,
            auto_progress: true,
            highest_wave: 1,
            god_mode: false,
            wtf_mode: false,
            consumed_tomes: ConsumedTomes::default(),
        }
    }
}

/// One unlearned entry per catalog skill, in catalog order.
pub fn fresh_skills() -> Vec<SkillState> {
    catalog()
        .skills()
        .iter()
        .map(|def| SkillState {
            id: def.id,
            level: 0,
            last_cast_ms: None,
        })
        .collect()
}

impl HeroState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skill(&self, id: SkillId) -> Option<&SkillState> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn skill_mut(&mut self, id: SkillId) -> Option<&mut SkillState> {
        self.skills.iter_mut().find(|s| s.id == id)
    }

    pub fn skill_level(&self, id: SkillId) -> u32 {
        self.skill(id).map_or(0, |s| s.level)
    }

    /// Drops items beyond the inventory and backpack capacity.
    /// Returns how many were dropped.
    pub fn enforce_capacity(&mut self) -> usize {
        let overflow = self.inventory.len().saturating_sub(INVENTORY_SLOTS)
            + self.backpack.len().saturating_sub(BACKPACK_SLOTS);
        self.inventory.truncate(INVENTORY_SLOTS);
        self.backpack.truncate(BACKPACK_SLOTS);
        overflow
    }

    /// Clamps hp and mana into `[0, max]`.
    pub fn clamp_resources(&mut self, hp_max: f64, mana_max: f64) {
        self.hp = self.hp.clamp(0.0, hp_max.max(0.0));
        self.mana = self.mana.clamp(0.0, mana_max.max(0.0));
    }

    pub fn move_to_spawn(&mut self) {
        self.x = HERO_SPAWN_X;
        self.y = HERO_SPAWN_Y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_hero_defaults() {
        let hero = HeroState::new();
        assert_eq!(hero.level, 1);
        assert_eq!(hero.gold, 600);
        assert_eq!(hero.skill_points, 1);
        assert_eq!(hero.skills.len(), 4);
        assert!(hero.skills.iter().all(|s| s.level == 0));
        assert!(hero.auto_progress);
    }

    #[test]
    fn test_enforce_capacity_keeps_first_items() {
        let mut hero = HeroState {
            inventory: vec![ItemId::Claymore; 8],
            backpack: vec![ItemId::Javelin; 4],
            ..HeroState::new()
        };
        assert_eq!(hero.enforce_capacity(), 3);
        assert_eq!(hero.inventory.len(), INVENTORY_SLOTS);
        assert_eq!(hero.backpack.len(), BACKPACK_SLOTS);
        assert_eq!(hero.enforce_capacity(), 0);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let hero: HeroState = serde_json::from_str(r#"{"level": 7, "gold": 42}"#).unwrap();
        assert_eq!(hero.level, 7);
        assert_eq!(hero.gold, 42);
        assert_eq!(hero.prestige, PrestigeData::default());
        assert_eq!(hero.skills.len(), 4);
    }

    #[test]
    fn test_next_buff_expiry() {
        let buffs = Buffs {
            dd_until: 5_000,
            regen_until: 2_000,
            ..Default::default()
        };
        assert_eq!(buffs.next_expiry(1_000), Some(2_000));
        assert_eq!(buffs.next_expiry(2_000), Some(5_000));
        assert_eq!(buffs.next_expiry(5_000), None);
    }

    #[test]
    fn test_talents_roundtrip_with_integer_keys() {
        let mut hero = HeroState::new();
        hero.talents.insert(10, TalentId::T10Left);
        let json = serde_json::to_string(&hero).unwrap();
        let back: HeroState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.talents.get(&10), Some(&TalentId::T10Left));
    }
}
