//! Experience curve and level-ups.

use crate::core::constants::{MAX_LEVEL, XP_CURVE_BASE, XP_CURVE_EXPONENT};
use crate::core::game_state::HeroState;

/// XP needed to advance from `level` to the next one.
pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * (level as f64).powf(XP_CURVE_EXPONENT)).floor() as u64
}

/// Adds XP and applies every level-up it pays for, stopping at the cap.
/// Each level grants one skill point. Returns the number of levels gained.
pub fn apply_xp(hero: &mut HeroState, xp: u64) -> u32 {
    hero.xp += xp;
    let mut gained = 0;

    while hero.level < MAX_LEVEL {
        let needed = xp_for_next_level(hero.level);
        if hero.xp < needed {
            break;
        }
        hero.xp -= needed;
        hero.level += 1;
        hero.skill_points += 1;
        gained += 1;
    }

    gained
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_curve() {
        assert_eq!(xp_for_next_level(1), 150);
        // 150 * 2^1.35 = 382.4
        assert_eq!(xp_for_next_level(2), 382);
        assert!(xp_for_next_level(20) > xp_for_next_level(19));
    }

    #[test]
    fn test_multiple_level_ups_in_one_grant() {
        let mut hero = HeroState::new();
        let gained = apply_xp(&mut hero, 150 + 382 + 10);
        assert_eq!(gained, 2);
        assert_eq!(hero.level, 3);
        assert_eq!(hero.xp, 10);
        assert_eq!(hero.skill_points, 3);
    }

    #[test]
    fn test_level_cap() {
        let mut hero = HeroState::new();
        hero.level = MAX_LEVEL;
        assert_eq!(apply_xp(&mut hero, 1_000_000), 0);
        assert_eq!(hero.level, MAX_LEVEL);
        assert_eq!(hero.xp, 1_000_000);
    }
}
