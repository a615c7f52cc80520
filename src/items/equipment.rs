//! Inventory and backpack slots.

use crate::catalog::ItemId;
use crate::core::constants::{BACKPACK_SLOTS, INVENTORY_SLOTS};
use crate::core::game_state::HeroState;
use crate::error::{ActionError, ActionResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    /// Active slots; contributes to stats
    Inventory,
    /// Inactive storage
    Backpack,
}

impl Container {
    pub fn capacity(self) -> usize {
        match self {
            Container::Inventory => INVENTORY_SLOTS,
            Container::Backpack => BACKPACK_SLOTS,
        }
    }
}

pub fn slots(hero: &HeroState, container: Container) -> &Vec<ItemId> {
    match container {
        Container::Inventory => &hero.inventory,
        Container::Backpack => &hero.backpack,
    }
}

pub fn slots_mut(hero: &mut HeroState, container: Container) -> &mut Vec<ItemId> {
    match container {
        Container::Inventory => &mut hero.inventory,
        Container::Backpack => &mut hero.backpack,
    }
}

/// Where a new item would land: the inventory if it has room, else the
/// backpack.
pub fn first_free_container(hero: &HeroState) -> Option<Container> {
    [Container::Inventory, Container::Backpack]
        .into_iter()
        .find(|&c| slots(hero, c).len() < c.capacity())
}

/// Moves an item between slots.
///
/// If the destination index holds an item the two trade places; otherwise
/// the item is appended to the destination container. Swapping within one
/// container exchanges positions.
pub fn swap_items(
    hero: &mut HeroState,
    from_index: usize,
    from: Container,
    to_index: usize,
    to: Container,
) -> ActionResult<()> {
    if from_index >= slots(hero, from).len() {
        return Err(ActionError::EmptySlot);
    }

    if from == to {
        let list = slots_mut(hero, from);
        if to_index >= list.len() {
            // Move to the end
            let item = list.remove(from_index);
            list.push(item);
        } else {
            list.swap(from_index, to_index);
        }
        return Ok(());
    }

    if to_index < slots(hero, to).len() {
        let (inventory, backpack) = (&mut hero.inventory, &mut hero.backpack);
        let (src, dst) = match from {
            Container::Inventory => (inventory, backpack),
            Container::Backpack => (backpack, inventory),
        };
        std::mem::swap(&mut src[from_index], &mut dst[to_index]);
        return Ok(());
    }

    if slots(hero, to).len() >= to.capacity() {
        return Err(ActionError::InvalidSwap);
    }
    let item = slots_mut(hero, from).remove(from_index);
    slots_mut(hero, to).push(item);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ItemId::*;

    #[test]
    fn test_first_free_prefers_inventory() {
        let mut hero = HeroState::new();
        assert_eq!(first_free_container(&hero), Some(Container::Inventory));
        hero.inventory = vec![Claymore; 6];
        assert_eq!(first_free_container(&hero), Some(Container::Backpack));
        hero.backpack = vec![Claymore; 3];
        assert_eq!(first_free_container(&hero), None);
    }

    #[test]
    fn test_swap_exchanges_occupied_slots() {
        let mut hero = HeroState::new();
        hero.inventory = vec![Claymore, Javelin];
        hero.backpack = vec![Reaver];
        swap_items(&mut hero, 1, Container::Inventory, 0, Container::Backpack).unwrap();
        assert_eq!(hero.inventory, vec![Claymore, Reaver]);
        assert_eq!(hero.backpack, vec![Javelin]);
    }

    #[test]
    fn test_swap_into_empty_slot_moves() {
        let mut hero = HeroState::new();
        hero.inventory = vec![Claymore, Javelin];
        swap_items(&mut hero, 0, Container::Inventory, 2, Container::Backpack).unwrap();
        assert_eq!(hero.inventory, vec![Javelin]);
        assert_eq!(hero.backpack, vec![Claymore]);
    }

    #[test]
    fn test_swap_rejects_overflow() {
        let mut hero = HeroState::new();
        hero.inventory = vec![Claymore; 6];
        hero.backpack = vec![Reaver; 3];
        // Appending to a full inventory
        assert_eq!(
            swap_items(&mut hero, 0, Container::Backpack, 6, Container::Inventory),
            Err(ActionError::InvalidSwap)
        );
        assert_eq!(hero.backpack.len(), 3);
    }

    #[test]
    fn test_swap_from_empty_slot() {
        let mut hero = HeroState::new();
        assert_eq!(
            swap_items(&mut hero, 0, Container::Inventory, 0, Container::Backpack),
            Err(ActionError::EmptySlot)
        );
    }
}
