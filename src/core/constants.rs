// Tick and timing
pub const TICK_RATE_HZ: u32 = 60;
pub const RENDER_EVERY_N_TICKS: u64 = 3;
pub const MAX_FRAME_GAP_MS: u64 = 200;
pub const AUTOSAVE_INTERVAL_MS: u64 = 5_000;
pub const WAVE_SPAWN_DELAY_MS: u64 = 500;
pub const BONUS_ROUND_DURATION_MS: u64 = 30_000;
pub const RUNE_INTERVAL_MS: u64 = 60_000;
pub const FIRST_RUNE_DELAY_MS: u64 = 30_000;

// Hero base stats (level 1, no equipment)
pub const BASE_STRENGTH: f64 = 23.0;
pub const BASE_AGILITY: f64 = 26.0;
pub const BASE_INTELLIGENCE: f64 = 15.0;
pub const BASE_DAMAGE: f64 = 49.0;
pub const BASE_ARMOR: f64 = 3.0;
pub const BASE_ATTACK_SPEED: f64 = 0.85;
pub const BASE_HP_REGEN: f64 = 1.5;
pub const BASE_MANA_REGEN: f64 = 0.5;
pub const BASE_CRIT_DAMAGE: f64 = 1.0;

// Per-level attribute growth
pub const STRENGTH_PER_LEVEL: f64 = 2.2;
pub const AGILITY_PER_LEVEL: f64 = 3.2;
pub const INTELLIGENCE_PER_LEVEL: f64 = 1.8;

// Derived stat formulas
pub const HP_BASE: f64 = 200.0;
pub const HP_PER_STRENGTH: f64 = 22.0;
pub const MANA_BASE: f64 = 75.0;
pub const MANA_PER_INTELLIGENCE: f64 = 12.0;
pub const ARMOR_PER_AGILITY: f64 = 0.16;
pub const ATTACK_SPEED_PER_AGILITY: f64 = 0.01;
pub const HP_REGEN_PER_STRENGTH: f64 = 0.1;
pub const MANA_REGEN_PER_INTELLIGENCE: f64 = 0.05;
pub const ARMOR_MITIGATION_FACTOR: f64 = 0.06;
pub const MIN_HIT_DAMAGE: f64 = 1.0;

// Buffs
pub const BUFF_ATTACK_SPEED_BONUS: f64 = 0.5;
pub const BUFF_DAMAGE_MULTIPLIER: f64 = 2.0;
pub const BUFF_REGEN_HP_PER_SEC: f64 = 50.0;
pub const BUFF_REGEN_MANA_PER_SEC: f64 = 30.0;
pub const RUNE_DD_DURATION_MS: u64 = 30_000;
pub const RUNE_HASTE_DURATION_MS: u64 = 30_000;
pub const RUNE_REGEN_DURATION_MS: u64 = 5_000;
pub const RUNE_LIFETIME_MS: u64 = 30_000;
pub const MAX_ACTIVE_RUNES: usize = 3;

// Leveling
pub const MAX_LEVEL: u32 = 30;
pub const XP_CURVE_BASE: f64 = 150.0;
pub const XP_CURVE_EXPONENT: f64 = 1.35;
pub const STARTING_SKILL_POINTS: u32 = 1;
pub const RESPAWN_BASE_SECONDS: f64 = 10.0;
pub const RESPAWN_SECONDS_PER_LEVEL: f64 = 2.0;

// Fresh hero
pub const STARTING_GOLD: u64 = 600;
pub const STARTING_HP: f64 = 500.0;
pub const STARTING_MANA: f64 = 200.0;
pub const HERO_SPAWN_X: f64 = 20.0;
pub const HERO_SPAWN_Y: f64 = 50.0;

// Containers
pub const INVENTORY_SLOTS: usize = 6;
pub const BACKPACK_SLOTS: usize = 3;

// Combat
pub const MANA_BREAK_BURN_CAP: f64 = 60.0;
pub const MANA_BREAK_DAMAGE_RATIO: f64 = 0.8;
pub const CLEAVE_RADIUS: f64 = 20.0;
pub const CHAIN_LIGHTNING_EXTRA_TARGETS: usize = 3;
pub const COUNTERSPELL_MANA_BURN: f64 = 200.0;
pub const COUNTERSPELL_RADIUS: f64 = 50.0;
pub const MANA_VOID_MIN_DAMAGE: f64 = 50.0;
pub const ARCHMAGE_COOLDOWN_MULTIPLIER: f64 = 0.75;

// Illusions
pub const ILLUSION_DAMAGE_RATIO: f64 = 0.33;
pub const ILLUSION_INCOMING_DAMAGE_MULT: f64 = 3.0;
pub const MANTA_ILLUSION_COUNT: usize = 2;
pub const MANTA_ILLUSION_DURATION_MS: f64 = 20_000.0;
pub const MANTA_ILLUSION_JITTER: f64 = 10.0;

// Wave generation
pub const WAVE_BONUS_INTERVAL: u32 = 10;
pub const WAVE_BOSS_INTERVAL: u32 = 5;
pub const WAVE_ARMOR_PER_WAVE: f64 = 0.3;
pub const SWARM_BASE_COUNT: u32 = 3;
pub const SWARM_MAX_COUNT: u32 = 60;
pub const SWARM_LATE_WAVE: u32 = 40;
pub const SWARM_LATE_BASE_COUNT: f64 = 20.0;
pub const SWARM_LATE_COUNT_PER_WAVE: f64 = 1.5;
pub const SWARM_MELEE_ROLL_MAX: f64 = 0.65;
pub const SWARM_RANGED_ROLL_MAX: f64 = 0.85;
pub const SWARM_HP_FACTOR: f64 = 0.12;
pub const SWARM_DAMAGE_FACTOR: f64 = 0.10;
pub const SWARM_XP_FACTOR: f64 = 0.15;
pub const SWARM_GOLD_FACTOR: f64 = 0.12;
pub const SWARM_BASE_XP: f64 = 90.0;
pub const SWARM_BASE_GOLD: f64 = 65.0;
pub const SWARM_BASE_ATTACK_SPEED: f64 = 0.6;
pub const SWARM_ATTACK_SPEED_PER_WAVE: f64 = 0.01;
pub const SWARM_ATTACK_JITTER_MS: f64 = 1_500.0;
pub const BOSS_BASE_HP: f64 = 2_500.0;
pub const BOSS_HP_GROWTH: f64 = 1.35;
pub const BOSS_BASE_DAMAGE: f64 = 120.0;
pub const BOSS_BASE_REWARD: f64 = 1_500.0;
pub const BOSS_SCALING_PER_WAVE: f64 = 0.15;
pub const BOSS_LATE_WAVE: u32 = 30;
pub const BOSS_LATE_EXPONENT: f64 = 1.5;
pub const BOSS_LATE_FACTOR: f64 = 0.05;
pub const BOSS_MANA: f64 = 2_000.0;
pub const BOSS_ARMOR_BONUS: f64 = 5.0;
pub const BOSS_VETERAN_WAVE: u32 = 20;
pub const BOSS_VETERAN_ARMOR: f64 = 10.0;
pub const BOSS_ATTACK_SPEED: f64 = 0.6;
pub const BOSS_FIRST_ATTACK_DELAY_MS: u64 = 1_000;
pub const BONUS_TARGET_HP: f64 = 1_000_000_000.0;
pub const BONUS_REWARD_RATIO: f64 = 0.5;
pub const BONUS_REWARD_PER_WAVE: f64 = 0.1;

// Prestige
pub const WAVES_PER_PRESTIGE_POINT: u32 = 10;

// Presentation buffers
pub const FLOATING_TEXT_BUFFER_CAP: usize = 50;
pub const FLOATING_TEXT_CAP: usize = 20;
pub const FLOATING_TEXT_LIFETIME_MS: u64 = 1_000;
pub const COMBAT_LOG_CAP: usize = 50;
pub const DPS_WINDOW_MS: u64 = 1_000;
pub const DPS_SAMPLE_INTERVAL_MS: u64 = 500;

// Debug intents
pub const DEBUG_GOLD_GRANT: u64 = 9_999;
pub const DEBUG_PRESTIGE_POINT_GRANT: u32 = 100;

// Save format
pub const SAVE_VERSION: u32 = 1;
pub const SAVE_FILE_NAME: &str = "hero.json";
