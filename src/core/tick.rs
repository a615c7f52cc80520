//! The per-tick simulation step.
//!
//! [`Engine::tick`] advances the clock by one frame and runs a fixed
//! sequence of steps. It returns a [`TickResult`] describing what happened
//! so the presentation layer can react without the engine knowing about
//! any UI types.

use super::combat_math::{mitigated_damage, roll_evasion};
use super::constants::*;
use super::engine::{Engine, WavePhase};
use super::feedback::{LogKind, TextKind};
use crate::catalog::{catalog, ItemActive, ItemId, NodeId, SkillId, SkillKind, TalentId};
use crate::character::{apply_xp, skill_cooldown_ms, skill_mana_cost};
use crate::combat::{
    apply_counterspell, apply_mana_void, enemy_target, generate_wave, hero_strike,
    illusion_damage_taken, mana_void_target, nearest_enemy, spawn_illusions, wave_kind, EnemyId,
    EnemyKind, EnemyTarget, Rune, RuneKind, WaveKind,
};
use crate::error::{ActionError, ActionResult};
use rand::Rng;
use tracing::{debug, info};

/// A single event produced by a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Combat ──────────────────────────────────────────────────
    /// Hero's timed attack landed.
    HeroAttack {
        target: EnemyId,
        damage: f64,
        was_crit: bool,
    },

    /// Player clicked an enemy.
    ManualAttack { target: EnemyId, damage: f64 },

    /// Chain Lightning proc from the hero's attack.
    ChainLightning { targets: Vec<EnemyId>, damage: f64 },

    IllusionAttack {
        illusion: u64,
        target: EnemyId,
        damage: f64,
    },

    /// Enemy hit the hero, after armor.
    EnemyAttack { enemy: EnemyId, damage: f64 },

    /// Hero evaded an enemy attack.
    EnemyMissed { enemy: EnemyId },

    IllusionHit { illusion: u64, damage: f64 },

    EnemyDefeated {
        enemy: EnemyId,
        kind: EnemyKind,
        gold: u64,
        xp: u64,
    },

    HeroDied { respawn_secs: f64, message: String },

    HeroRespawned { message: String },

    LeveledUp { level: u32, message: String },

    // ── Skills and items ────────────────────────────────────────
    SkillCast { skill: SkillId, message: String },

    IllusionsSpawned { count: usize, message: String },

    RuneSpawned { rune: u64, kind: RuneKind },

    RunePickedUp { kind: RuneKind, message: String },

    // ── Waves ───────────────────────────────────────────────────
    WaveStarted {
        wave: u32,
        kind: WaveKind,
        message: String,
    },

    WaveCleared { wave: u32 },

    /// Bonus round timer ran out and the damage reward was paid.
    BonusRoundOver { reward: u64, message: String },

    /// Wave was changed by hand.
    WaveChanged { wave: u32 },

    // ── Shop and progression ────────────────────────────────────
    ItemBought {
        item: ItemId,
        price: u64,
        message: String,
    },

    ItemCrafted { item: ItemId, message: String },

    ItemSold {
        item: ItemId,
        refund: u64,
        message: String,
    },

    SkillLeveled { skill: SkillId, level: u32 },

    TalentSelected { talent: TalentId, message: String },

    NodeUnlocked { node: NodeId, message: String },

    Reborn { points: u32, message: String },

    /// An intent was rejected; nothing changed.
    ActionRejected { error: ActionError, message: String },
}

/// Everything a tick produced.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events in the order they happened.
    pub events: Vec<TickEvent>,

    /// True on render ticks, when floating texts and the log were flushed.
    pub rendered: bool,

    /// True when the autosave interval has elapsed.
    pub save_due: bool,

    /// True when the hero must be saved right away (after rebirth).
    pub force_save: bool,
}

impl Engine {
    /// Advances the simulation by `dt_ms`.
    ///
    /// A frame longer than the configured gap advances the clock but
    /// simulates nothing, so a backgrounded host never bursts to catch up.
    pub fn tick(&mut self, dt_ms: u64, rng: &mut impl Rng) -> TickResult {
        let mut result = TickResult::default();
        self.now_ms += dt_ms;

        if dt_ms > self.config.max_frame_gap_ms {
            debug!(dt_ms, "frame gap too large, dropping delta");
            return result;
        }
        self.tick_count += 1;
        let dt_secs = dt_ms as f64 / 1000.0;

        // ── 0. Controller intents ───────────────────────────────
        self.apply_intents(&mut result);
        self.refresh_stats();

        if self.hero.is_dead {
            // ── 1. Respawn countdown ────────────────────────────
            self.cast_queue.clear();
            self.attack_queue.clear();
            self.tick_respawn(dt_secs, &mut result);
        } else {
            // ── 2. Bonus round deadline ─────────────────────────
            self.tick_bonus_deadline(&mut result);

            // ── 3. Wave state machine ───────────────────────────
            self.tick_wave_state(rng, &mut result);

            // ── 4. Manual attacks ───────────────────────────────
            self.tick_manual_attacks(&mut result);

            // ── 5. Skill casts, then auto-cast ──────────────────
            self.tick_skills(&mut result);

            // ── 6. Item actives ─────────────────────────────────
            self.tick_item_actives(rng, &mut result);

            // ── 7. Runes ────────────────────────────────────────
            self.tick_runes(rng, &mut result);

            // ── 8. Regeneration ─────────────────────────────────
            self.tick_regen(dt_secs);

            // ── 9. Hero and illusion attacks ────────────────────
            self.tick_hero_attacks(rng, &mut result);

            // ── 10. Enemy attacks ───────────────────────────────
            self.tick_enemy_attacks(rng, &mut result);

            // ── 11. Kills, rewards and level-ups ────────────────
            self.tick_rewards(&mut result);

            // ── 12. Hero death ──────────────────────────────────
            self.tick_death(&mut result);
        }

        // ── 13. Emit ────────────────────────────────────────────
        self.dps.update(self.now_ms);
        if self.tick_count % self.config.render_every_n_ticks.max(1) == 0 {
            self.feedback.flush(self.now_ms);
            result.rendered = true;
        }
        if self.now_ms.saturating_sub(self.last_save_ms) >= self.config.autosave_interval_ms {
            self.last_save_ms = self.now_ms;
            result.save_due = true;
        }

        result
    }

    fn tick_respawn(&mut self, dt_secs: f64, result: &mut TickResult) {
        self.hero.respawn_timer_secs -= dt_secs;
        if self.hero.respawn_timer_secs > 0.0 {
            return;
        }

        self.refresh_stats();
        self.hero.is_dead = false;
        self.hero.respawn_timer_secs = 0.0;
        self.hero.hp = self.stats.hp_max;
        self.hero.mana = self.stats.mana_max;
        self.hero.move_to_spawn();

        let message = "Hero has respawned".to_string();
        self.log(message.clone(), LogKind::Info);
        result.events.push(TickEvent::HeroRespawned { message });
    }

    fn tick_bonus_deadline(&mut self, result: &mut TickResult) {
        let Some(deadline) = self.bonus_deadline_ms else {
            return;
        };
        if self.now_ms < deadline {
            return;
        }
        let Some(target) = self.enemies.iter().find(|e| e.is_bonus()) else {
            return;
        };

        let damage_dealt = target.max_hp - target.hp;
        let ratio = BONUS_REWARD_RATIO * (1.0 + self.wave as f64 * BONUS_REWARD_PER_WAVE);
        let reward = (damage_dealt * ratio).floor().max(0.0) as u64;
        let (x, y) = (target.x, target.y);

        self.hero.gold += reward;
        self.float(format!("+{reward}g"), x, y, TextKind::Gold);
        let message = "BONUS ROUND OVER!".to_string();
        self.log(message.clone(), LogKind::Reward);
        debug!(wave = self.wave, reward, "bonus round over");
        result.events.push(TickEvent::BonusRoundOver { reward, message });

        self.finish_wave();
    }

    fn tick_wave_state(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        match self.phase {
            WavePhase::Waiting => {
                if !self.enemies.is_empty() {
                    self.phase = WavePhase::Fighting;
                } else if !self.held {
                    self.phase = WavePhase::Spawning;
                    self.spawn_at_ms = self.now_ms + self.config.spawn_delay_ms;
                }
            }
            WavePhase::Spawning => {
                if self.now_ms >= self.spawn_at_ms {
                    self.spawn_wave(rng, result);
                }
            }
            WavePhase::Fighting => {}
        }
    }

    fn spawn_wave(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        let wave = self.wave;
        let enemies = generate_wave(wave, self.next_enemy_id, self.now_ms, rng);
        self.next_enemy_id += enemies.len() as u64;
        self.enemies = enemies;
        self.phase = WavePhase::Fighting;

        let kind = wave_kind(wave);
        let message = match kind {
            WaveKind::Bonus => {
                self.bonus_deadline_ms = Some(self.now_ms + self.config.bonus_round_ms);
                "BONUS ROUND! Hit the Courier!".to_string()
            }
            WaveKind::Boss => format!("BOSS WAVE {wave} STARTED!"),
            WaveKind::Swarm => format!("Wave {wave} Spawned!"),
        };
        debug!(wave, count = self.enemies.len(), "wave spawned");
        self.log(message.clone(), LogKind::Info);
        result.events.push(TickEvent::WaveStarted { wave, kind, message });
    }

    fn tick_manual_attacks(&mut self, result: &mut TickResult) {
        while let Some(id) = self.attack_queue.pop_front() {
            let damage = self.stats.damage;
            let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == id && e.is_alive()) else {
                continue;
            };
            enemy.take_damage(damage);
            let (x, y) = (enemy.x, enemy.y);

            self.dps.record(self.now_ms, damage);
            self.float(format!("{}", damage as u64), x, y - 5.0, TextKind::Damage);
            result.events.push(TickEvent::ManualAttack { target: id, damage });
        }
    }

    fn tick_skills(&mut self, result: &mut TickResult) {
        while let Some(skill) = self.cast_queue.pop_front() {
            if let Err(error) = self.cast_skill(skill, result) {
                self.reject(error, result);
            }
        }

        if self.hero.auto_cast && !self.enemies.is_empty() {
            for skill in [SkillId::Blink, SkillId::ManaVoid, SkillId::Counterspell] {
                // Auto-cast skips quietly when a skill is not ready
                let _ = self.cast_skill(skill, result);
            }
        }
    }

    fn cast_skill(&mut self, skill: SkillId, result: &mut TickResult) -> ActionResult<()> {
        let def = catalog().skill(skill);
        match def.kind {
            SkillKind::Active => {}
            SkillKind::Passive => return Err(ActionError::SkillPassive),
            SkillKind::Locked => return Err(ActionError::SkillLocked),
        }
        let level = self.hero.skill_level(skill);
        if level == 0 {
            return Err(ActionError::SkillNotLearned);
        }
        let mana_cost = skill_mana_cost(&self.hero, skill);
        if self.hero.mana < mana_cost {
            return Err(ActionError::NotEnoughMana);
        }
        let cooldown = skill_cooldown_ms(&self.hero, skill);
        let last_cast = self.hero.skill(skill).and_then(|s| s.last_cast_ms);
        if last_cast.is_some_and(|t| self.now_ms.saturating_sub(t) < cooldown) {
            return Err(ActionError::OnCooldown);
        }

        let (hx, hy) = (self.hero.x, self.hero.y);
        match skill {
            SkillId::ManaVoid => {
                let idx = mana_void_target(&self.enemies).ok_or(ActionError::NoTarget)?;
                let damage = apply_mana_void(&mut self.enemies[idx], level, self.now_ms);
                let (x, y) = (self.enemies[idx].x, self.enemies[idx].y);
                self.dps.record(self.now_ms, damage);
                self.float(format!("{} VOID!", damage as u64), x, y - 20.0, TextKind::Skill);
            }
            SkillId::Counterspell => {
                apply_counterspell(&mut self.enemies, hx, hy);
                self.float("COUNTERSPELL!", hx, hy - 30.0, TextKind::Skill);
            }
            SkillId::Blink | SkillId::ManaBreak => return Err(ActionError::SkillLocked),
        }

        self.hero.mana -= mana_cost;
        if let Some(state) = self.hero.skill_mut(skill) {
            state.last_cast_ms = Some(self.now_ms);
        }
        result.events.push(TickEvent::SkillCast {
            skill,
            message: format!("Cast {}", def.name),
        });
        Ok(())
    }

    fn tick_item_actives(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        if self.enemies.is_empty() {
            return;
        }
        let actives: Vec<(ItemId, ItemActive, u64)> = self
            .hero
            .inventory
            .iter()
            .filter_map(|&id| catalog().item(id).active.map(|(kind, cd)| (id, kind, cd)))
            .collect();

        for (item, kind, cooldown) in actives {
            let last = self.hero.item_cooldowns.get(&item).copied();
            if last.is_some_and(|t| self.now_ms.saturating_sub(t) < cooldown) {
                continue;
            }
            match kind {
                ItemActive::Illusions => {
                    let first_id = self.next_entity_id + 1;
                    let spawned = spawn_illusions(
                        self.hero.x,
                        self.hero.y,
                        self.hero.hp,
                        &self.stats,
                        first_id,
                        self.now_ms,
                        rng,
                    );
                    self.next_entity_id += spawned.len() as u64;
                    let count = spawned.len();
                    self.illusions.extend(spawned);

                    self.float("MANTA!", self.hero.x, self.hero.y - 30.0, TextKind::Skill);
                    result.events.push(TickEvent::IllusionsSpawned {
                        count,
                        message: format!("{} activated", catalog().item(item).name),
                    });
                }
            }
            self.hero.item_cooldowns.insert(item, self.now_ms);
        }
    }

    fn tick_runes(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        let now = self.now_ms;
        if now >= self.next_rune_ms {
            if self.runes.len() < MAX_ACTIVE_RUNES {
                let kind = RuneKind::ALL[rng.gen_range(0..RuneKind::ALL.len())];
                let id = self.next_entity_id();
                self.runes.push(Rune {
                    id,
                    kind,
                    x: 30.0 + rng.gen::<f64>() * 40.0,
                    y: 30.0 + rng.gen::<f64>() * 40.0,
                    spawn_ms: now,
                    expires_at_ms: now + RUNE_LIFETIME_MS,
                });
                debug!(?kind, "rune spawned");
                result.events.push(TickEvent::RuneSpawned { rune: id, kind });
            }
            self.next_rune_ms = now + self.config.rune_interval_ms;
        }
        self.runes.retain(|r| r.expires_at_ms > now);
    }

    fn tick_regen(&mut self, dt_secs: f64) {
        self.hero.hp += self.stats.hp_regen * dt_secs;
        self.hero.mana += self.stats.mana_regen * dt_secs;
        self.hero.clamp_resources(self.stats.hp_max, self.stats.mana_max);

        let now = self.now_ms;
        self.illusions.retain(|i| i.is_alive(now));
    }

    fn tick_hero_attacks(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        let now = self.now_ms;

        let hero_ready =
            now.saturating_sub(self.hero.last_attack_ms) as f64 >= self.stats.attack_interval_ms();
        if hero_ready {
            if let Some(target) = nearest_enemy(&self.enemies, self.hero.x, self.hero.y) {
                let hit = hero_strike(&self.stats, &mut self.enemies, target, rng);
                self.hero.hp = (self.hero.hp + hit.healed).min(self.stats.hp_max);
                self.hero.last_attack_ms = now;
                self.dps.record(now, hit.total_damage());

                let (x, y) = (self.enemies[target].x, self.enemies[target].y);
                let kind = if hit.was_crit { TextKind::Crit } else { TextKind::Damage };
                self.float(format!("{}", hit.damage as u64), x, y - 10.0, kind);

                if let Some(id) = hit.target {
                    result.events.push(TickEvent::HeroAttack {
                        target: id,
                        damage: hit.damage,
                        was_crit: hit.was_crit,
                    });
                }
                if !hit.chained.is_empty() {
                    result.events.push(TickEvent::ChainLightning {
                        targets: hit.chained,
                        damage: hit.chain_damage,
                    });
                }
            }
        }

        for i in 0..self.illusions.len() {
            let ill = &self.illusions[i];
            let interval_ms = 1000.0 / ill.attack_speed.max(f64::EPSILON);
            if (now.saturating_sub(ill.last_attack_ms) as f64) < interval_ms {
                continue;
            }
            let Some(target) = nearest_enemy(&self.enemies, ill.x, ill.y) else {
                break;
            };
            let (illusion, damage) = (ill.id, ill.damage);
            self.enemies[target].take_damage(damage);
            self.illusions[i].last_attack_ms = now;
            self.dps.record(now, damage);
            result.events.push(TickEvent::IllusionAttack {
                illusion,
                target: self.enemies[target].id,
                damage,
            });
        }
    }

    fn tick_enemy_attacks(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        let now = self.now_ms;

        for i in 0..self.enemies.len() {
            let enemy = &self.enemies[i];
            if !enemy.is_alive() || enemy.is_bonus() || enemy.is_stunned(now) {
                continue;
            }
            if (now.saturating_sub(enemy.last_attack_ms) as f64) < enemy.attack_interval_ms() {
                continue;
            }

            let (id, raw) = (enemy.id, enemy.damage);
            let target = enemy_target(enemy, self.hero.x, self.hero.y, &self.illusions, now);
            self.enemies[i].last_attack_ms = now;

            match target {
                EnemyTarget::Hero => {
                    if roll_evasion(self.stats.evasion, self.stats.true_strike, rng) {
                        self.float("MISS", self.hero.x, self.hero.y, TextKind::Miss);
                        result.events.push(TickEvent::EnemyMissed { enemy: id });
                        continue;
                    }
                    if self.hero.god_mode {
                        continue;
                    }
                    let damage = mitigated_damage(raw, self.stats.armor);
                    self.hero.hp = (self.hero.hp - damage).max(0.0);
                    result.events.push(TickEvent::EnemyAttack { enemy: id, damage });
                }
                EnemyTarget::Illusion(idx) => {
                    let ill = &mut self.illusions[idx];
                    let damage =
                        illusion_damage_taken(raw, self.stats.armor, ill.incoming_damage_mult);
                    ill.hp -= damage;
                    result.events.push(TickEvent::IllusionHit {
                        illusion: ill.id,
                        damage,
                    });
                }
            }
        }

        self.illusions.retain(|i| i.is_alive(now));
    }

    fn tick_rewards(&mut self, result: &mut TickResult) {
        if self.enemies.is_empty() {
            return;
        }

        let (dead, survivors): (Vec<_>, Vec<_>) = std::mem::take(&mut self.enemies)
            .into_iter()
            .partition(|e| !e.is_alive() && !e.is_bonus());
        self.enemies = survivors;

        let mut levels_gained = 0;
        for enemy in dead {
            let gold = (enemy.gold_reward as f64 * (1.0 + self.stats.gold_gain_pct)).floor() as u64;
            let xp = (enemy.xp_reward as f64 * (1.0 + self.stats.xp_gain_pct)).floor() as u64;
            self.hero.gold += gold;
            levels_gained += apply_xp(&mut self.hero, xp);

            if gold > 0 {
                self.float(format!("+{gold}g"), enemy.x, enemy.y, TextKind::Gold);
            }
            result.events.push(TickEvent::EnemyDefeated {
                enemy: enemy.id,
                kind: enemy.kind,
                gold,
                xp,
            });
        }

        if levels_gained > 0 {
            let level = self.hero.level;
            info!(level, "hero leveled up");
            self.mark_stats_dirty();
            self.refresh_stats();
            self.float("LEVEL UP!", self.hero.x, self.hero.y, TextKind::LevelUp);
            let message = format!("Level Up! Now level {level}");
            self.log(message.clone(), LogKind::Reward);
            result.events.push(TickEvent::LeveledUp { level, message });
        }

        if self.enemies.is_empty() {
            let wave = self.wave;
            debug!(wave, "wave cleared");
            result.events.push(TickEvent::WaveCleared { wave });
            self.finish_wave();
        }
    }

    fn tick_death(&mut self, result: &mut TickResult) {
        if self.hero.hp > 0.0 || self.hero.god_mode || self.hero.is_dead {
            return;
        }

        let respawn_secs =
            RESPAWN_BASE_SECONDS + self.hero.level as f64 * RESPAWN_SECONDS_PER_LEVEL;
        self.hero.hp = 0.0;
        self.hero.is_dead = true;
        self.hero.respawn_timer_secs = respawn_secs;

        info!(level = self.hero.level, wave = self.wave, "hero died");
        let message = format!("You died! Respawning in {respawn_secs}s");
        self.log(message.clone(), LogKind::Warning);
        result.events.push(TickEvent::HeroDied { respawn_secs, message });
    }
}
