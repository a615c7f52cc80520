//! Integration test: wave generation and the wave state machine

use manaburn::combat::{generate_wave, wave_kind, EnemyKind, WaveKind};
use manaburn::core::{Engine, EngineConfig, HeroState, Intent, TickEvent, WaveDirection, WavePhase};
use manaburn::error::ActionError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const STEP_MS: u64 = 16;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn tick_for(engine: &mut Engine, rng: &mut ChaCha8Rng, ms: u64) -> Vec<TickEvent> {
    let mut events = Vec::new();
    for _ in 0..ms / STEP_MS {
        events.extend(engine.tick(STEP_MS, rng).events);
    }
    events
}

fn rejected(events: &[TickEvent]) -> Vec<ActionError> {
    events
        .iter()
        .filter_map(|e| match e {
            TickEvent::ActionRejected { error, .. } => Some(error.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_wave_generation_is_deterministic() {
    for wave in [1, 7, 23, 41, 77] {
        let a = generate_wave(wave, 0, 0, &mut ChaCha8Rng::seed_from_u64(9));
        let b = generate_wave(wave, 0, 0, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b, "wave {wave}");
    }
}

#[test]
fn test_boss_and_bonus_schedule() {
    for wave in 1..=100 {
        let expected = if wave % 10 == 0 {
            WaveKind::Bonus
        } else if wave % 5 == 0 {
            WaveKind::Boss
        } else {
            WaveKind::Swarm
        };
        assert_eq!(wave_kind(wave), expected, "wave {wave}");
    }

    let boss = generate_wave(15, 0, 0, &mut test_rng());
    assert_eq!(boss.len(), 1);
    assert_eq!(boss[0].kind, EnemyKind::Boss);

    let bonus = generate_wave(20, 0, 0, &mut test_rng());
    assert_eq!(bonus.len(), 1);
    assert_eq!(bonus[0].kind, EnemyKind::Bonus);
    assert_eq!(bonus[0].damage, 0.0);
}

#[test]
fn test_swarm_size_caps_at_sixty() {
    assert_eq!(generate_wave(3, 0, 0, &mut test_rng()).len(), 4);
    assert_eq!(generate_wave(41, 0, 0, &mut test_rng()).len(), 21);
    assert_eq!(generate_wave(99, 0, 0, &mut test_rng()).len(), 60);
}

#[test]
fn test_cleared_wave_holds_without_auto_progress() {
    let hero = HeroState {
        god_mode: true,
        auto_progress: false,
        ..HeroState::new()
    };
    let mut engine = Engine::new(hero, EngineConfig::seeded(2), 0);
    let mut rng = test_rng();

    let mut cleared = false;
    for _ in 0..10_000 {
        let result = engine.tick(STEP_MS, &mut rng);
        if result.events.iter().any(|e| matches!(e, TickEvent::WaveCleared { wave: 1 })) {
            cleared = true;
            break;
        }
    }
    assert!(cleared);

    let events = tick_for(&mut engine, &mut rng, 3_000);
    assert!(!events.iter().any(|e| matches!(e, TickEvent::WaveStarted { .. })));
    assert_eq!(engine.wave(), 1);
    assert_eq!(engine.phase(), WavePhase::Waiting);
    assert!(engine.enemies().is_empty());

    engine.submit(Intent::ChangeWave(WaveDirection::Next));
    let events = tick_for(&mut engine, &mut rng, 1_000);
    assert!(events.iter().any(|e| matches!(e, TickEvent::WaveChanged { wave: 2 })));
    assert!(events.iter().any(|e| matches!(e, TickEvent::WaveStarted { wave: 2, .. })));
}

#[test]
fn test_manual_wave_bounds() {
    let mut engine = Engine::new(HeroState::new(), EngineConfig::seeded(2), 0);
    let mut rng = test_rng();

    engine.submit(Intent::ChangeWave(WaveDirection::Previous));
    engine.submit(Intent::ChangeWave(WaveDirection::Next));
    engine.submit(Intent::ChangeWave(WaveDirection::Next));
    let events = engine.tick(STEP_MS, &mut rng).events;

    assert_eq!(
        rejected(&events),
        vec![ActionError::WaveLocked { wave: 0 }, ActionError::WaveLocked { wave: 3 }]
    );
    assert_eq!(engine.wave(), 2);
}

#[test]
fn test_bonus_round_pays_for_damage_dealt() {
    let hero = HeroState {
        god_mode: true,
        highest_wave: 10,
        ..HeroState::new()
    };
    let mut engine = Engine::new(hero, EngineConfig::seeded(4), 0);
    let mut rng = test_rng();

    for _ in 0..9 {
        engine.submit(Intent::ChangeWave(WaveDirection::Next));
    }
    let events = tick_for(&mut engine, &mut rng, 1_000);
    assert!(events
        .iter()
        .any(|e| matches!(e, TickEvent::WaveStarted { wave: 10, kind: WaveKind::Bonus, .. })));
    assert!(engine.bonus_ms_remaining().is_some());
    let gold_before = engine.hero().gold;

    // Wave changes are refused while the courier is up
    engine.submit(Intent::ChangeWave(WaveDirection::Previous));
    let events = engine.tick(STEP_MS, &mut rng).events;
    assert_eq!(rejected(&events), vec![ActionError::BonusRoundActive]);

    let mut reward = None;
    for _ in 0..3_000 {
        let result = engine.tick(STEP_MS, &mut rng);
        if let Some(r) = result.events.iter().find_map(|e| match e {
            TickEvent::BonusRoundOver { reward, .. } => Some(*reward),
            _ => None,
        }) {
            reward = Some(r);
            break;
        }
    }
    let reward = reward.expect("bonus round should end on its timer");
    assert!(reward > 0);
    assert_eq!(engine.hero().gold - gold_before, reward);
    assert_eq!(engine.wave(), 11);
    assert!(engine.bonus_ms_remaining().is_none());
}
