//! Engine configuration.

use super::constants::*;
use serde::Deserialize;

/// Timing knobs for the simulation loop.
///
/// Balance numbers live in [`crate::core::constants`]; this struct only
/// carries the values a host may reasonably want to change at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed-step rate used by [`crate::core::session::Session::run_for`]
    pub tick_rate_hz: u32,

    /// Floating texts and the combat log are flushed every Nth tick
    pub render_every_n_ticks: u64,

    /// Frames longer than this are dropped instead of simulated
    pub max_frame_gap_ms: u64,

    /// Simulated time between autosaves
    pub autosave_interval_ms: u64,

    /// Delay between a wave clearing and the next one spawning
    pub spawn_delay_ms: u64,

    pub rune_interval_ms: u64,
    pub first_rune_delay_ms: u64,
    pub bonus_round_ms: u64,

    /// Random seed for reproducibility (None = entropy)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            render_every_n_ticks: RENDER_EVERY_N_TICKS,
            max_frame_gap_ms: MAX_FRAME_GAP_MS,
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
            spawn_delay_ms: WAVE_SPAWN_DELAY_MS,
            rune_interval_ms: RUNE_INTERVAL_MS,
            first_rune_delay_ms: FIRST_RUNE_DELAY_MS,
            bonus_round_ms: BONUS_ROUND_DURATION_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Deterministic config for tests and offline balance runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parses a JSON config; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Milliseconds per fixed step.
    pub fn step_ms(&self) -> u64 {
        (1000 / self.tick_rate_hz.max(1)) as u64
    }
}
