//! Skill points, talents, the prestige tree and rebirth.

use crate::catalog::{catalog, NodeId, SkillId, SkillKind, TalentId, TALENT_MILESTONES};
use crate::core::constants::WAVES_PER_PRESTIGE_POINT;
use crate::core::game_state::HeroState;
use crate::error::{ActionError, ActionResult};

/// Ascension Points a rebirth right now would earn.
pub fn rebirth_points(hero: &HeroState) -> u32 {
    hero.highest_wave / WAVES_PER_PRESTIGE_POINT
}

/// Resets the run in exchange for Ascension Points.
///
/// Everything except prestige data and the god/free-cast flags goes back
/// to fresh-hero defaults.
///
/// Rejected whenever the run would earn zero points, whether or not the
/// hero has been reborn before. A second rebirth before reaching wave 10
/// again always fails.
pub fn rebirth(hero: &mut HeroState) -> ActionResult<u32> {
    let earned = rebirth_points(hero);
    if earned == 0 {
        return Err(ActionError::NotEnoughWaves {
            needed: WAVES_PER_PRESTIGE_POINT,
        });
    }

    let mut prestige = std::mem::take(&mut hero.prestige);
    prestige.points += earned;
    prestige.total_points_earned += earned;
    prestige.rebirth_count += 1;

    *hero = HeroState {
        prestige,
        god_mode: hero.god_mode,
        wtf_mode: hero.wtf_mode,
        ..HeroState::default()
    };

    Ok(earned)
}

/// Buys a prestige node.
///
/// A node needs any one of its prerequisites unlocked, except the root's
/// direct children which are open from the start. Its exclusive sibling
/// must not be unlocked.
pub fn unlock_node(hero: &mut HeroState, node: NodeId) -> ActionResult<()> {
    let def = catalog().node(node);
    let prestige = &hero.prestige;

    if prestige.is_unlocked(node) {
        return Err(ActionError::NodeAlreadyUnlocked);
    }
    if prestige.points < def.cost {
        return Err(ActionError::NotEnoughPoints { needed: def.cost });
    }
    let prereq_met = def.requires.is_empty()
        || def.requires_only_root()
        || def.requires.iter().any(|&r| prestige.is_unlocked(r));
    if !prereq_met {
        return Err(ActionError::NodeLocked);
    }
    if def.excludes.is_some_and(|sibling| prestige.is_unlocked(sibling)) {
        return Err(ActionError::NodeExcluded);
    }

    hero.prestige.points -= def.cost;
    hero.prestige.unlocked_nodes.insert(node);
    Ok(())
}

/// Spends a skill point on `skill`. Returns the new level.
pub fn level_up_skill(hero: &mut HeroState, skill: SkillId) -> ActionResult<u32> {
    let def = catalog().skill(skill);
    if def.kind == SkillKind::Locked {
        return Err(ActionError::SkillLocked);
    }
    if hero.skill_points == 0 {
        return Err(ActionError::NoSkillPoints);
    }
    let state = hero.skill_mut(skill).ok_or(ActionError::SkillNotLearned)?;
    if state.level >= def.max_level {
        return Err(ActionError::SkillMaxed);
    }

    state.level += 1;
    let level = state.level;
    hero.skill_points -= 1;
    Ok(level)
}

/// Chooses the talent for `milestone`. The choice is permanent for the run.
pub fn select_talent(hero: &mut HeroState, milestone: u32, talent: TalentId) -> ActionResult<()> {
    if !TALENT_MILESTONES.contains(&milestone) || catalog().talent(talent).milestone != milestone {
        return Err(ActionError::TalentUnavailable);
    }
    if hero.talents.contains_key(&milestone) {
        return Err(ActionError::TalentAlreadyChosen { milestone });
    }
    if hero.level < milestone {
        return Err(ActionError::TalentUnavailable);
    }

    hero.talents.insert(milestone, talent);
    Ok(())
}
