//! Fixed-step driver that ties the engine to a save store.

use super::config::EngineConfig;
use super::engine::Engine;
use super::game_state::HeroState;
use super::intents::Intent;
use super::tick::TickResult;
use crate::error::PersistenceError;
use crate::save_manager::{load_hero, save_hero, SaveStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

/// Owns an [`Engine`], its RNG and the store the hero is saved to.
pub struct Session<S: SaveStore> {
    engine: Engine,
    store: S,
    rng: StdRng,
}

impl<S: SaveStore> Session<S> {
    /// Loads the hero from `store` and starts the clock at the current wall time.
    pub fn new(store: S, config: EngineConfig) -> Self {
        let origin = chrono::Utc::now().timestamp_millis().max(0) as u64;
        Self::with_origin(store, config, origin)
    }

    /// Like [`Session::new`] with an explicit clock origin.
    pub fn with_origin(store: S, config: EngineConfig, origin_ms: u64) -> Self {
        let hero = load_hero(&store);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(level = hero.level, wave = hero.highest_wave, "session started");

        Self {
            engine: Engine::new(hero, config, origin_ms),
            store,
            rng,
        }
    }

    /// Runs one tick and saves the hero if the tick asks for it.
    pub fn tick(&mut self, dt_ms: u64) -> TickResult {
        let result = self.engine.tick(dt_ms, &mut self.rng);
        if result.save_due || result.force_save {
            self.save();
        }
        result
    }

    /// Advances `duration_ms` of simulated time in fixed steps.
    pub fn run_for(&mut self, duration_ms: u64) -> Vec<TickResult> {
        let step = self.engine.config().step_ms().max(1);
        let mut results = Vec::with_capacity((duration_ms / step) as usize + 1);
        let mut elapsed = 0;
        while elapsed < duration_ms {
            let dt = step.min(duration_ms - elapsed);
            results.push(self.tick(dt));
            elapsed += dt;
        }
        results
    }

    pub fn submit(&mut self, intent: Intent) {
        self.engine.submit(intent);
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Best-effort save; failures are logged and dropped.
    pub fn save(&self) {
        if let Err(e) = save_hero(&self.store, self.engine.hero()) {
            warn!(error = %e, "autosave failed");
        }
    }

    /// Deletes the stored save and restarts from a fresh hero.
    pub fn reset_save(&mut self) -> Result<(), PersistenceError> {
        self.store.delete()?;
        let config = self.engine.config().clone();
        let now = self.engine.now_ms();
        self.engine = Engine::new(HeroState::default(), config, now);
        info!("save reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemId;
    use crate::save_manager::{decode_hero, MemoryStore};

    fn session() -> Session<MemoryStore> {
        Session::with_origin(MemoryStore::new(), EngineConfig::seeded(7), 0)
    }

    #[test]
    fn test_autosave_after_interval() {
        let mut session = session();
        session.run_for(4_900);
        assert!(session.store().contents().is_none());
        session.run_for(200);
        assert!(session.store().contents().is_some());
    }

    #[test]
    fn test_saved_state_reflects_purchases() {
        let mut session = session();
        session.submit(Intent::BuyItem(ItemId::BandElvenskin));
        session.run_for(5_100);
        let saved = decode_hero(&session.store().contents().unwrap());
        assert_eq!(saved.inventory, vec![ItemId::BandElvenskin]);
    }

    #[test]
    fn test_reset_save_starts_fresh() {
        let mut session = session();
        session.run_for(5_100);
        session.reset_save().unwrap();
        assert!(session.store().contents().is_none());
        assert_eq!(session.engine().hero().gold, HeroState::default().gold);
    }

    #[test]
    fn test_loads_existing_save() {
        let mut hero = HeroState::new();
        hero.gold = 12_345;
        let store = MemoryStore::new();
        save_hero(&store, &hero).unwrap();

        let session = Session::with_origin(store, EngineConfig::seeded(1), 0);
        assert_eq!(session.engine().hero().gold, 12_345);
    }
}
