//! The simulation context.
//!
//! [`Engine`] owns everything that changes while the game runs: the hero,
//! the enemy roster, illusions, runes, wave state and the presentation
//! feeds. Callers submit [`Intent`]s and drive it with
//! [`Engine::tick`](super::tick); no intent touches state outside a tick.

use super::config::EngineConfig;
use super::feedback::{DpsMeter, Feedback, FloatingText, LogEntry, LogKind, TextKind};
use super::game_state::HeroState;
use super::intents::Intent;
use crate::catalog::SkillId;
use crate::character::{compute_stats, xp_for_next_level, Stats};
use crate::combat::{Enemy, EnemyId, Illusion, Rune};
use std::collections::VecDeque;

/// Wave lifecycle: `Waiting → Spawning → Fighting → Waiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePhase {
    Waiting,
    Spawning,
    Fighting,
}

/// Read-only view of the engine for the presentation layer.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub hero: &'a HeroState,
    pub stats: &'a Stats,
    pub enemies: &'a [Enemy],
    pub illusions: &'a [Illusion],
    pub runes: &'a [Rune],
    pub wave: u32,
    pub phase: WavePhase,
    pub floating_texts: &'a [FloatingText],
    pub combat_log: &'a VecDeque<LogEntry>,
    pub dps: f64,
    /// None outside bonus rounds
    pub bonus_ms_remaining: Option<u64>,
    pub xp_required: u64,
}

#[derive(Debug)]
pub struct Engine {
    pub(super) config: EngineConfig,
    pub(super) hero: HeroState,
    pub(super) stats: Stats,
    pub(super) stats_dirty: bool,
    /// Earliest buff expiry the cached stats depend on
    pub(super) stats_valid_until: Option<u64>,
    pub(super) enemies: Vec<Enemy>,
    pub(super) illusions: Vec<Illusion>,
    pub(super) runes: Vec<Rune>,
    pub(super) wave: u32,
    pub(super) phase: WavePhase,
    /// Set when a wave clears without auto-progress
    pub(super) held: bool,
    pub(super) spawn_at_ms: u64,
    pub(super) bonus_deadline_ms: Option<u64>,
    pub(super) now_ms: u64,
    pub(super) tick_count: u64,
    pub(super) next_rune_ms: u64,
    pub(super) last_save_ms: u64,
    pub(super) next_enemy_id: u64,
    pub(super) next_entity_id: u64,
    pub(super) intents: VecDeque<Intent>,
    pub(super) cast_queue: VecDeque<SkillId>,
    pub(super) attack_queue: VecDeque<EnemyId>,
    pub(super) feedback: Feedback,
    pub(super) dps: DpsMeter,
}

impl Engine {
    /// Creates an engine for `hero` with its clock starting at `now_ms`.
    ///
    /// hp and mana are clamped to the hero's computed maximums.
    pub fn new(mut hero: HeroState, config: EngineConfig, now_ms: u64) -> Self {
        let stats = compute_stats(&hero, now_ms);
        hero.clamp_resources(stats.hp_max, stats.mana_max);
        let stats_valid_until = hero.buffs.next_expiry(now_ms);
        let next_rune_ms = now_ms + config.first_rune_delay_ms;

        Self {
            config,
            hero,
            stats,
            stats_dirty: false,
            stats_valid_until,
            enemies: Vec::new(),
            illusions: Vec::new(),
            runes: Vec::new(),
            wave: 1,
            phase: WavePhase::Waiting,
            held: false,
            spawn_at_ms: now_ms,
            bonus_deadline_ms: None,
            now_ms,
            tick_count: 0,
            next_rune_ms,
            last_save_ms: now_ms,
            next_enemy_id: 0,
            next_entity_id: 0,
            intents: VecDeque::new(),
            cast_queue: VecDeque::new(),
            attack_queue: VecDeque::new(),
            feedback: Feedback::new(),
            dps: DpsMeter::default(),
        }
    }

    /// Queues an intent for the next tick.
    pub fn submit(&mut self, intent: Intent) {
        match intent {
            Intent::CastSkill(skill) => self.cast_queue.push_back(skill),
            Intent::ManualAttack(enemy) => self.attack_queue.push_back(enemy),
            other => self.intents.push_back(other),
        }
    }

    pub fn hero(&self) -> &HeroState {
        &self.hero
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn illusions(&self) -> &[Illusion] {
        &self.illusions
    }

    pub fn runes(&self) -> &[Rune] {
        &self.runes
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            hero: &self.hero,
            stats: &self.stats,
            enemies: &self.enemies,
            illusions: &self.illusions,
            runes: &self.runes,
            wave: self.wave,
            phase: self.phase,
            floating_texts: self.feedback.texts(),
            combat_log: self.feedback.log_entries(),
            dps: self.dps.value(),
            bonus_ms_remaining: self.bonus_ms_remaining(),
            xp_required: xp_for_next_level(self.hero.level),
        }
    }

    pub fn bonus_ms_remaining(&self) -> Option<u64> {
        let deadline = self.bonus_deadline_ms?;
        self.enemies
            .iter()
            .any(Enemy::is_bonus)
            .then(|| deadline.saturating_sub(self.now_ms))
    }

    pub(super) fn has_bonus_target(&self) -> bool {
        self.enemies.iter().any(Enemy::is_bonus)
    }

    pub(super) fn mark_stats_dirty(&mut self) {
        self.stats_dirty = true;
    }

    /// Recomputes cached stats if the hero changed or a buff expired.
    pub(super) fn refresh_stats(&mut self) {
        let expired = self.stats_valid_until.is_some_and(|t| self.now_ms >= t);
        if self.stats_dirty || expired {
            self.stats = compute_stats(&self.hero, self.now_ms);
            self.stats_valid_until = self.hero.buffs.next_expiry(self.now_ms);
            self.stats_dirty = false;
        }
    }

    pub(super) fn next_entity_id(&mut self) -> u64 {
        self.next_entity_id += 1;
        self.next_entity_id
    }

    pub(super) fn log(&mut self, message: impl Into<String>, kind: LogKind) {
        self.feedback.log(message, kind);
    }

    pub(super) fn float(&mut self, text: impl Into<String>, x: f64, y: f64, kind: TextKind) {
        self.feedback.float(text, x, y, kind, self.now_ms);
    }

    /// Drops the current roster and restarts the wave cycle.
    pub(super) fn reset_wave_cycle(&mut self) {
        self.enemies.clear();
        self.bonus_deadline_ms = None;
        self.phase = WavePhase::Waiting;
        self.held = false;
    }

    /// Handles an emptied roster: advance under auto-progress, else hold.
    pub(super) fn finish_wave(&mut self) {
        self.enemies.clear();
        self.bonus_deadline_ms = None;
        self.phase = WavePhase::Waiting;
        if self.hero.auto_progress {
            self.wave += 1;
            self.hero.highest_wave = self.hero.highest_wave.max(self.wave);
            self.held = false;
        } else {
            self.held = true;
        }
    }
}
