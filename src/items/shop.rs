//! Buying, selling and automatic crafting.

use super::equipment::{first_free_container, slots_mut, Container};
use crate::catalog::{catalog, ItemDef, ItemId};
use crate::core::constants::{BACKPACK_SLOTS, INVENTORY_SLOTS};
use crate::core::game_state::HeroState;
use crate::error::{ActionError, ActionResult};

/// What a successful purchase did.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub item: ItemId,
    pub price: u64,
    /// Items crafted by the follow-up auto-craft pass, in order
    pub crafted: Vec<ItemId>,
    pub consumed: bool,
}

/// Discounted price of `item`, from its full recursive cost.
pub fn price_of(item: ItemId, discount_pct: f64) -> u64 {
    let total = catalog().total_cost(item) as f64;
    (total * (1.0 - discount_pct.clamp(0.0, 1.0))).floor() as u64
}

/// Refund for selling `item`: half its recursive cost.
pub fn sell_value(item: ItemId) -> u64 {
    catalog().total_cost(item) / 2
}

/// Buys `item`.
///
/// Tomes are consumed on the spot into permanent attribute gains. Anything
/// else needs a free slot and triggers an auto-craft pass.
pub fn buy_item(hero: &mut HeroState, item: ItemId, discount_pct: f64) -> ActionResult<Purchase> {
    let def = catalog().item(item);
    let price = price_of(item, discount_pct);

    if hero.gold < price {
        return Err(ActionError::NotEnoughGold { needed: price });
    }

    if def.is_consumable {
        hero.gold -= price;
        consume_tome(hero, def);
        return Ok(Purchase {
            item,
            price,
            crafted: Vec::new(),
            consumed: true,
        });
    }

    let container = first_free_container(hero).ok_or(ActionError::InventoryFull)?;
    hero.gold -= price;
    slots_mut(hero, container).push(item);
    let crafted = auto_craft(hero);

    Ok(Purchase {
        item,
        price,
        crafted,
        consumed: false,
    })
}

fn consume_tome(hero: &mut HeroState, def: &ItemDef) {
    let tomes = &mut hero.consumed_tomes;
    tomes.strength += def.stats.strength as u32;
    tomes.agility += def.stats.agility as u32;
    tomes.intelligence += def.stats.intelligence as u32;
}

/// Sells the item at `index`, refunding half its recursive cost.
pub fn sell_item(
    hero: &mut HeroState,
    index: usize,
    container: Container,
) -> ActionResult<(ItemId, u64)> {
    let list = slots_mut(hero, container);
    if index >= list.len() {
        return Err(ActionError::EmptySlot);
    }
    let item = list.remove(index);
    let refund = sell_value(item);
    hero.gold += refund;
    Ok((item, refund))
}

/// Crafts every recipe whose components are all held, until none apply.
///
/// Recipes are scanned in catalog order and the scan restarts after each
/// craft. Components are taken from the inventory first, then the
/// backpack. The result goes to the inventory if there is room, otherwise
/// the backpack; a recipe whose result fits nowhere is skipped.
pub fn auto_craft(hero: &mut HeroState) -> Vec<ItemId> {
    let mut crafted = Vec::new();

    'scan: loop {
        for recipe in catalog().recipes() {
            let Some((inventory, backpack)) =
                take_components(&hero.inventory, &hero.backpack, recipe.components)
            else {
                continue;
            };

            let (inventory, backpack) = if inventory.len() < INVENTORY_SLOTS {
                (push(inventory, recipe.id), backpack)
            } else if backpack.len() < BACKPACK_SLOTS {
                (inventory, push(backpack, recipe.id))
            } else {
                continue;
            };

            hero.inventory = inventory;
            hero.backpack = backpack;
            crafted.push(recipe.id);
            continue 'scan;
        }
        break;
    }

    crafted
}

fn push(mut list: Vec<ItemId>, item: ItemId) -> Vec<ItemId> {
    list.push(item);
    list
}

/// Returns both containers with `components` removed, or None if any is
/// missing.
fn take_components(
    inventory: &[ItemId],
    backpack: &[ItemId],
    components: &[ItemId],
) -> Option<(Vec<ItemId>, Vec<ItemId>)> {
    let mut inventory = inventory.to_vec();
    let mut backpack = backpack.to_vec();

    for component in components {
        if let Some(pos) = inventory.iter().position(|i| i == component) {
            inventory.remove(pos);
        } else if let Some(pos) = backpack.iter().position(|i| i == component) {
            backpack.remove(pos);
        } else {
            return None;
        }
    }

    Some((inventory, backpack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ItemId::*;

    fn rich_hero() -> HeroState {
        HeroState {
            gold: 1_000_000,
            ..HeroState::new()
        }
    }

    #[test]
    fn test_price_uses_recursive_cost_and_discount() {
        assert_eq!(price_of(SangeYasha, 0.0), 4000);
        assert_eq!(price_of(SangeYasha, 0.25), 3000);
        assert_eq!(price_of(Claymore, 0.10), 1215);
    }

    #[test]
    fn test_not_enough_gold() {
        let mut hero = HeroState::new();
        assert_eq!(
            buy_item(&mut hero, Claymore, 0.0),
            Err(ActionError::NotEnoughGold { needed: 1350 })
        );
        assert_eq!(hero.gold, 600);
        assert!(hero.inventory.is_empty());
    }

    #[test]
    fn test_tome_consumed_without_slot() {
        let mut hero = rich_hero();
        hero.inventory = vec![Claymore; 6];
        hero.backpack = vec![Claymore; 3];
        let purchase = buy_item(&mut hero, TomeAgi, 0.0).unwrap();
        assert!(purchase.consumed);
        assert_eq!(hero.consumed_tomes.agility, 5);
        assert_eq!(hero.gold, 1_000_000 - 10_000);
    }

    #[test]
    fn test_full_containers_reject_purchase() {
        let mut hero = rich_hero();
        hero.inventory = vec![Claymore; 6];
        hero.backpack = vec![Claymore; 3];
        assert_eq!(buy_item(&mut hero, Javelin, 0.0), Err(ActionError::InventoryFull));
        assert_eq!(hero.gold, 1_000_000);
    }

    #[test]
    fn test_buying_last_component_crafts() {
        let mut hero = rich_hero();
        buy_item(&mut hero, MithrilHammer, 0.0).unwrap();
        let purchase = buy_item(&mut hero, Javelin, 0.0).unwrap();
        assert_eq!(purchase.crafted, vec![Maelstrom]);
        assert_eq!(hero.inventory, vec![Maelstrom]);
    }

    #[test]
    fn test_craft_pulls_from_backpack() {
        let mut hero = rich_hero();
        hero.inventory = vec![Claymore, Claymore, Claymore, Claymore, Claymore, MithrilHammer];
        hero.backpack = vec![];
        buy_item(&mut hero, Javelin, 0.0).unwrap();
        assert_eq!(
            hero.inventory,
            vec![Claymore, Claymore, Claymore, Claymore, Claymore, Maelstrom]
        );
        assert!(hero.backpack.is_empty());
    }

    #[test]
    fn test_chained_crafts() {
        let mut hero = rich_hero();
        hero.inventory = vec![Sange, BandElvenskin, BladeAlacrity];
        let purchase = buy_item(&mut hero, RecipeYasha, 0.0).unwrap();
        assert_eq!(purchase.crafted, vec![Yasha, SangeYasha]);
        assert_eq!(hero.inventory, vec![SangeYasha]);
    }

    #[test]
    fn test_sell_refunds_half_total() {
        let mut hero = HeroState::new();
        hero.inventory = vec![SangeYasha];
        let (item, refund) = sell_item(&mut hero, 0, Container::Inventory).unwrap();
        assert_eq!(item, SangeYasha);
        assert_eq!(refund, 2000);
        assert_eq!(hero.gold, 2600);
        assert_eq!(sell_item(&mut hero, 0, Container::Inventory), Err(ActionError::EmptySlot));
    }
}
