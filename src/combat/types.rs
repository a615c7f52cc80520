use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Melee,
    Ranged,
    Healer,
    Boss,
    /// Golden Courier: damage sponge of the bonus round
    Bonus,
}

impl EnemyKind {
    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Melee => "Satyr",
            EnemyKind::Ranged => "Banisher",
            EnemyKind::Healer => "Tormenter",
            EnemyKind::Boss => "Roshan",
            EnemyKind::Bonus => "Golden Courier",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub hp: f64,
    pub max_hp: f64,
    pub mana: f64,
    pub max_mana: f64,
    pub damage: f64,
    pub armor: f64,
    pub attack_speed: f64,
    pub xp_reward: u64,
    pub gold_reward: u64,
    pub range: f64,
    pub x: f64,
    pub y: f64,
    pub last_attack_ms: u64,
    pub stunned_until_ms: u64,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn is_bonus(&self) -> bool {
        self.kind == EnemyKind::Bonus
    }

    pub fn is_stunned(&self, now_ms: u64) -> bool {
        now_ms < self.stunned_until_ms
    }

    pub fn missing_mana(&self) -> f64 {
        (self.max_mana - self.mana).max(0.0)
    }

    pub fn attack_interval_ms(&self) -> f64 {
        if self.attack_speed <= 0.0 {
            return f64::INFINITY;
        }
        1000.0 / self.attack_speed
    }

    pub fn take_damage(&mut self, amount: f64) {
        self.hp = (self.hp - amount).max(0.0);
    }
}

/// Temporary hero clone that fights on its own attack timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Illusion {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub damage: f64,
    pub attack_speed: f64,
    pub last_attack_ms: u64,
    pub spawn_ms: u64,
    pub duration_ms: u64,
    pub incoming_damage_mult: f64,
}

impl Illusion {
    pub fn is_alive(&self, now_ms: u64) -> bool {
        self.hp > 0.0 && now_ms < self.spawn_ms + self.duration_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuneKind {
    DoubleDamage,
    Haste,
    Regeneration,
}

impl RuneKind {
    pub const ALL: [RuneKind; 3] = [
        RuneKind::DoubleDamage,
        RuneKind::Haste,
        RuneKind::Regeneration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RuneKind::DoubleDamage => "Double Damage",
            RuneKind::Haste => "Haste",
            RuneKind::Regeneration => "Regeneration",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rune {
    pub id: u64,
    pub kind: RuneKind,
    pub x: f64,
    pub y: f64,
    pub spawn_ms: u64,
    pub expires_at_ms: u64,
}
