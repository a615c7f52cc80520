//! Error types for rejected intents and persistence.

use thiserror::Error;

/// Why a player intent was rejected. The `Display` text is the line shown
/// in the combat log; the hero is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    // Insufficient resource
    #[error("Not enough gold ({needed} needed)")]
    NotEnoughGold { needed: u64 },

    #[error("Not enough mana")]
    NotEnoughMana,

    #[error("Not enough Ascension Points ({needed} needed)")]
    NotEnoughPoints { needed: u32 },

    #[error("No skill points available")]
    NoSkillPoints,

    #[error("Inventory full")]
    InventoryFull,

    #[error("Reach wave {needed} to earn Ascension Points")]
    NotEnoughWaves { needed: u32 },

    // Invalid transition
    #[error("That slot is empty")]
    EmptySlot,

    #[error("This skill is disabled")]
    SkillLocked,

    #[error("Passive skills cannot be cast")]
    SkillPassive,

    #[error("Skill is already at max level")]
    SkillMaxed,

    #[error("Skill not learned")]
    SkillNotLearned,

    #[error("Skill is on cooldown")]
    OnCooldown,

    #[error("No target")]
    NoTarget,

    #[error("Talent already chosen at level {milestone}")]
    TalentAlreadyChosen { milestone: u32 },

    #[error("Talent not available")]
    TalentUnavailable,

    #[error("Node already unlocked")]
    NodeAlreadyUnlocked,

    #[error("Requires a previous node")]
    NodeLocked,

    #[error("Path already chosen")]
    NodeExcluded,

    #[error("Wave {wave} not reached yet")]
    WaveLocked { wave: u32 },

    #[error("Cannot change wave during the bonus round")]
    BonusRoundActive,

    #[error("Invalid swap")]
    InvalidSwap,
}

/// Errors surfaced by save stores.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not determine save directory")]
    NoSaveDirectory,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ActionResult<T> = std::result::Result<T, ActionError>;
