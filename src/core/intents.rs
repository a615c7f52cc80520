//! Player intents and how the engine applies them.
//!
//! Casts and manual attacks go to their own queues and resolve during the
//! combat steps of a tick. Everything else is applied at the start of the
//! next tick, in submission order. A rejected intent changes nothing and
//! leaves a line in the combat log.

use super::constants::*;
use super::engine::Engine;
use super::feedback::{LogKind, TextKind};
use super::tick::{TickEvent, TickResult};
use crate::catalog::{catalog, ItemId, NodeId, SkillId, TalentId};
use crate::character::{level_up_skill, rebirth, select_talent, unlock_node};
use crate::combat::{EnemyId, RuneKind};
use crate::error::{ActionError, ActionResult};
use crate::items::{buy_item, sell_item, swap_items, Container};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveDirection {
    Previous,
    Next,
}

/// Admin panel actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    GrantGold,
    GrantLevel,
    FullHeal,
    KillWave,
    ToggleGodMode,
    ToggleWtfMode,
    GrantPrestigePoints,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    BuyItem(ItemId),
    SellItem {
        index: usize,
        container: Container,
    },
    SwapItem {
        from_index: usize,
        from: Container,
        to_index: usize,
        to: Container,
    },
    LevelUpSkill(SkillId),
    CastSkill(SkillId),
    ManualAttack(EnemyId),
    SelectTalent {
        milestone: u32,
        talent: TalentId,
    },
    UnlockPrestigeNode(NodeId),
    Rebirth,
    ChangeWave(WaveDirection),
    ToggleAutoCast,
    ToggleAutoProgress,
    PickupRune(u64),
    Debug(DebugAction),
}

impl Engine {
    /// Step 0: applies queued controller intents.
    pub(super) fn apply_intents(&mut self, result: &mut TickResult) {
        while let Some(intent) = self.intents.pop_front() {
            if let Err(error) = self.apply_intent(intent, result) {
                self.reject(error, result);
            }
        }
    }

    pub(super) fn reject(&mut self, error: ActionError, result: &mut TickResult) {
        let message = error.to_string();
        self.log(message.clone(), LogKind::Rejected);
        result.events.push(TickEvent::ActionRejected { error, message });
    }

    fn apply_intent(&mut self, intent: Intent, result: &mut TickResult) -> ActionResult<()> {
        match intent {
            Intent::BuyItem(item) => {
                let purchase = buy_item(&mut self.hero, item, self.stats.shop_discount_pct)?;
                let name = catalog().item(item).name;
                let message = if purchase.consumed {
                    format!("Used {name}")
                } else {
                    format!("Bought {name}")
                };
                if purchase.consumed {
                    self.float("STATS UP!", self.hero.x, self.hero.y - 40.0, TextKind::LevelUp);
                }
                self.log(message.clone(), LogKind::Reward);
                result.events.push(TickEvent::ItemBought {
                    item,
                    price: purchase.price,
                    message,
                });
                for crafted in purchase.crafted {
                    let message = format!("Crafted {}", catalog().item(crafted).name);
                    self.log(message.clone(), LogKind::Reward);
                    result.events.push(TickEvent::ItemCrafted { item: crafted, message });
                }
                self.mark_stats_dirty();
            }
            Intent::SellItem { index, container } => {
                let (item, refund) = sell_item(&mut self.hero, index, container)?;
                let message = format!("Sold {} for {refund}g", catalog().item(item).name);
                self.log(message.clone(), LogKind::Info);
                result.events.push(TickEvent::ItemSold { item, refund, message });
                self.mark_stats_dirty();
            }
            Intent::SwapItem {
                from_index,
                from,
                to_index,
                to,
            } => {
                swap_items(&mut self.hero, from_index, from, to_index, to)?;
                self.mark_stats_dirty();
            }
            Intent::LevelUpSkill(skill) => {
                let level = level_up_skill(&mut self.hero, skill)?;
                result.events.push(TickEvent::SkillLeveled { skill, level });
                self.mark_stats_dirty();
            }
            Intent::SelectTalent { milestone, talent } => {
                select_talent(&mut self.hero, milestone, talent)?;
                let message = format!("Talent Selected: {}", catalog().talent(talent).name);
                self.log(message.clone(), LogKind::Info);
                result.events.push(TickEvent::TalentSelected { talent, message });
                self.mark_stats_dirty();
            }
            Intent::UnlockPrestigeNode(node) => {
                unlock_node(&mut self.hero, node)?;
                let message = format!("Unlocked: {}", catalog().node(node).name);
                self.log(message.clone(), LogKind::Info);
                result.events.push(TickEvent::NodeUnlocked { node, message });
                self.mark_stats_dirty();
            }
            Intent::Rebirth => self.apply_rebirth(result)?,
            Intent::ChangeWave(direction) => self.change_wave(direction, result)?,
            Intent::ToggleAutoCast => {
                self.hero.auto_cast = !self.hero.auto_cast;
            }
            Intent::ToggleAutoProgress => {
                self.hero.auto_progress = !self.hero.auto_progress;
                if self.hero.auto_progress {
                    self.held = false;
                }
            }
            Intent::PickupRune(id) => self.pickup_rune(id, result)?,
            Intent::Debug(action) => self.apply_debug(action),
            // Routed to their own queues by `submit`
            Intent::CastSkill(skill) => self.cast_queue.push_back(skill),
            Intent::ManualAttack(enemy) => self.attack_queue.push_back(enemy),
        }
        Ok(())
    }

    fn apply_rebirth(&mut self, result: &mut TickResult) -> ActionResult<()> {
        let points = rebirth(&mut self.hero)?;

        self.reset_wave_cycle();
        self.wave = 1;
        self.illusions.clear();
        self.runes.clear();
        self.cast_queue.clear();
        self.attack_queue.clear();
        self.feedback.clear();
        self.mark_stats_dirty();
        self.refresh_stats();
        self.hero.hp = self.stats.hp_max;
        self.hero.mana = self.stats.mana_max;

        info!(
            points,
            rebirths = self.hero.prestige.rebirth_count,
            "hero reborn"
        );
        let message = format!("REBIRTH! Gained {points} Ascension Points");
        self.log(message.clone(), LogKind::Reward);
        result.events.push(TickEvent::Reborn { points, message });
        result.force_save = true;
        Ok(())
    }

    fn change_wave(
        &mut self,
        direction: WaveDirection,
        result: &mut TickResult,
    ) -> ActionResult<()> {
        if self.has_bonus_target() {
            return Err(ActionError::BonusRoundActive);
        }
        let target = match direction {
            WaveDirection::Previous => self.wave.saturating_sub(1),
            WaveDirection::Next => self.wave + 1,
        };
        if target < 1 || target > self.hero.highest_wave + 1 {
            return Err(ActionError::WaveLocked { wave: target });
        }

        self.wave = target;
        self.reset_wave_cycle();
        result.events.push(TickEvent::WaveChanged { wave: target });
        Ok(())
    }

    fn pickup_rune(&mut self, id: u64, result: &mut TickResult) -> ActionResult<()> {
        let idx = self
            .runes
            .iter()
            .position(|r| r.id == id)
            .ok_or(ActionError::NoTarget)?;
        let rune = self.runes.remove(idx);
        let now = self.now_ms;

        let buffs = &mut self.hero.buffs;
        match rune.kind {
            RuneKind::DoubleDamage => buffs.dd_until = now + RUNE_DD_DURATION_MS,
            RuneKind::Haste => buffs.haste_until = now + RUNE_HASTE_DURATION_MS,
            RuneKind::Regeneration => buffs.regen_until = now + RUNE_REGEN_DURATION_MS,
        }
        self.mark_stats_dirty();

        let message = format!("Picked up {} rune", rune.kind.label());
        self.float(rune.kind.label().to_uppercase(), rune.x, rune.y, TextKind::Skill);
        self.log(message.clone(), LogKind::Info);
        result.events.push(TickEvent::RunePickedUp {
            kind: rune.kind,
            message,
        });
        Ok(())
    }

    fn apply_debug(&mut self, action: DebugAction) {
        let (x, y) = (self.hero.x, self.hero.y);
        match action {
            DebugAction::GrantGold => {
                self.hero.gold += DEBUG_GOLD_GRANT;
                self.float(format!("+{DEBUG_GOLD_GRANT}g"), x, y, TextKind::Gold);
            }
            DebugAction::GrantLevel => {
                if self.hero.level < MAX_LEVEL {
                    self.hero.level += 1;
                    self.hero.skill_points += 1;
                    self.hero.xp = 0;
                    self.mark_stats_dirty();
                    self.float("LEVEL UP!", x, y, TextKind::LevelUp);
                }
            }
            DebugAction::FullHeal => {
                self.refresh_stats();
                self.hero.hp = self.stats.hp_max;
                self.hero.mana = self.stats.mana_max;
                self.hero.is_dead = false;
                self.hero.respawn_timer_secs = 0.0;
                self.float("FULL HEAL", x, y, TextKind::Heal);
            }
            DebugAction::KillWave => {
                for enemy in &mut self.enemies {
                    enemy.hp = 0.0;
                }
                self.log("ADMIN: Wave Killed", LogKind::Warning);
            }
            DebugAction::ToggleGodMode => {
                self.hero.god_mode = !self.hero.god_mode;
                let state = if self.hero.god_mode { "ON" } else { "OFF" };
                self.log(format!("God Mode: {state}"), LogKind::Warning);
            }
            DebugAction::ToggleWtfMode => {
                self.hero.wtf_mode = !self.hero.wtf_mode;
                let state = if self.hero.wtf_mode { "ON" } else { "OFF" };
                self.log(format!("WTF Mode: {state}"), LogKind::Warning);
            }
            DebugAction::GrantPrestigePoints => {
                self.hero.prestige.points += DEBUG_PRESTIGE_POINT_GRANT;
                self.log(
                    format!("Added {DEBUG_PRESTIGE_POINT_GRANT} Talent Points"),
                    LogKind::Warning,
                );
            }
        }
    }
}
